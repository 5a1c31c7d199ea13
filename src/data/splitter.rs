// ============================================================
// Train/Validation Splitter
// ============================================================
// Shuffles examples and partitions them into two sets: the
// training set updates model weights, the validation set
// measures generalisation at the end of every epoch. The
// partition is disjoint and exhaustive — every input example
// lands in exactly one of the two outputs.
//
// Split ratio follows the original experiment: 95% training.

use rand::seq::SliceRandom;

/// Randomly shuffle `examples` and split into (train, validation).
///
/// `train_fraction` is the proportion kept for training,
/// e.g. 0.95. The fraction is clamped so tiny datasets cannot
/// panic the index arithmetic.
pub fn split_train_val<T>(mut examples: Vec<T>, train_fraction: f64) -> (Vec<T>, Vec<T>) {
    let mut rng = rand::thread_rng();

    // Fisher-Yates shuffle — every permutation equally likely
    examples.shuffle(&mut rng);

    let total = examples.len();
    let split_at = ((total as f64) * train_fraction).round() as usize;
    let split_at = split_at.min(total);

    // split_off(n) removes elements [n..] and returns them
    let validation = examples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation",
        examples.len(),
        validation.len(),
    );

    (examples, validation)
}
