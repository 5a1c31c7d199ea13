use burn::data::dataset::Dataset;

use crate::domain::example::Example;

/// In-memory dataset over encoded examples, in the order the
/// source produced them. Burn's DataLoader drives it through
/// the Dataset trait.
pub struct ReviewDataset {
    examples: Vec<Example>,
}

impl ReviewDataset {
    pub fn new(examples: Vec<Example>) -> Self {
        Self { examples }
    }

    pub fn example_count(&self) -> usize {
        self.examples.len()
    }
}

impl Dataset<Example> for ReviewDataset {
    fn get(&self, index: usize) -> Option<Example> {
        self.examples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.examples.len()
    }
}
