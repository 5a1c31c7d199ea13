// ============================================================
// RawReview Domain Type
// ============================================================
// One row of the source CSV before any encoding happens:
// a star rating and the review text. Ratings are 1-based in
// the file (1..=5 for Yelp full); encoding to a 0-based class
// id happens in the data layer.

use serde::{Deserialize, Serialize};

/// A labeled review as read from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawReview {
    /// Star rating, 1-based as stored in the CSV
    pub label: u32,

    /// The raw review text
    pub review: String,
}

impl RawReview {
    pub fn new(label: u32, review: impl Into<String>) -> Self {
        Self { label, review: review.into() }
    }
}
