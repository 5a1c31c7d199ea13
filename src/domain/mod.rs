// ============================================================
// Domain Layer
// ============================================================
// Pure Rust structs and traits defining the core concepts of
// the system. No Burn types, no file I/O — only plain data and
// the abstractions other layers implement. This keeps the data
// model unit-testable without a backend in scope.

// A raw (label, review text) pair as it appears in the CSV
pub mod review;

// One encoded training instance: class id + token-id sequence
pub mod example;

// Token-string to integer-id mapping with <unk>/<pad> specials
pub mod vocabulary;

// The full labeled dataset: train/test examples + vocabulary
pub mod corpus;

// Core abstractions (traits) that other layers implement
pub mod traits;
