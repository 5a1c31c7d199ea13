// ============================================================
// CSV Corpus Source
// ============================================================
// Loads the raw Yelp-style corpus: headerless (label, review)
// rows in <data>/train.csv and <data>/test.csv. The pipeline:
//
//   1. Read both CSV files into RawReviews
//   2. Tokenize + n-gram expand every review
//   3. Build the vocabulary from the TRAINING tokens only
//   4. Encode both splits through that vocabulary
//
// The test split is encoded with <unk> fallback so tokens the
// training corpus never saw cannot produce invalid ids.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::data::tokenizer::{basic_english, ngrams_iterator};
use crate::domain::corpus::Corpus;
use crate::domain::example::Example;
use crate::domain::review::RawReview;
use crate::domain::traits::CorpusSource;
use crate::domain::vocabulary::Vocabulary;

pub const TRAIN_FILE: &str = "train.csv";
pub const TEST_FILE: &str = "test.csv";

/// Loads and encodes a (label, review) CSV corpus.
pub struct CsvSource {
    dir: PathBuf,
    ngrams: usize,
}

impl CsvSource {
    pub fn new(dir: impl Into<PathBuf>, ngrams: usize) -> Self {
        Self { dir: dir.into(), ngrams }
    }
}

impl CorpusSource for CsvSource {
    fn load(&self) -> Result<Corpus> {
        let train_raw = read_reviews(&self.dir.join(TRAIN_FILE))?;
        let test_raw = read_reviews(&self.dir.join(TEST_FILE))?;
        tracing::info!(
            "Read {} training and {} test reviews from '{}'",
            train_raw.len(),
            test_raw.len(),
            self.dir.display()
        );

        if train_raw.is_empty() {
            bail!("Training CSV '{}' contains no rows", self.dir.join(TRAIN_FILE).display());
        }

        // Labels are 1-based in the file; the maximum across both
        // splits defines the label set, so a test rating the
        // training split never saw still gets a logit column.
        let num_classes = train_raw
            .iter()
            .chain(test_raw.iter())
            .map(|r| r.label as usize)
            .max()
            .unwrap_or(0);

        // Tokenize once, keep the token lists around for both the
        // vocabulary build and the encoding pass.
        let train_tokens: Vec<Vec<String>> = train_raw
            .iter()
            .map(|r| ngrams_iterator(&basic_english(&r.review), self.ngrams))
            .collect();
        let test_tokens: Vec<Vec<String>> = test_raw
            .iter()
            .map(|r| ngrams_iterator(&basic_english(&r.review), self.ngrams))
            .collect();

        let vocab = Vocabulary::build(train_tokens.iter().flatten());
        tracing::info!("Built vocabulary with {} entries", vocab.len());

        let train = encode_split(&train_raw, &train_tokens, &vocab)?;
        let test = encode_split(&test_raw, &test_tokens, &vocab)?;

        Ok(Corpus { train, test, vocab, num_classes })
    }
}

/// Read one headerless (label, review) CSV file.
fn read_reviews(path: &Path) -> Result<Vec<RawReview>> {
    let file = File::open(path)
        .with_context(|| format!("Cannot open '{}'", path.display()))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(file);

    let mut reviews = Vec::new();
    for (row, record) in reader.deserialize::<RawReview>().enumerate() {
        let review: RawReview = record
            .with_context(|| format!("Malformed row {} in '{}'", row + 1, path.display()))?;
        if review.label == 0 {
            bail!("Row {} in '{}' has label 0 (labels are 1-based)", row + 1, path.display());
        }
        reviews.push(review);
    }
    Ok(reviews)
}

/// Pair raw labels with their pre-tokenized reviews and map
/// tokens through the vocabulary. Unknown tokens become <unk>.
fn encode_split(
    raw: &[RawReview],
    tokens: &[Vec<String>],
    vocab: &Vocabulary,
) -> Result<Vec<Example>> {
    Ok(raw
        .iter()
        .zip(tokens)
        .map(|(review, review_tokens)| {
            let ids = review_tokens.iter().map(|t| vocab.id(t)).collect();
            Example::new(review.label as usize - 1, ids)
        })
        .collect())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_corpus(dir: &Path) {
        let mut train = File::create(dir.join(TRAIN_FILE)).unwrap();
        writeln!(train, "5,\"Great food, great staff\"").unwrap();
        writeln!(train, "1,\"Awful food\"").unwrap();
        writeln!(train, "3,\"ok\"").unwrap();
        let mut test = File::create(dir.join(TEST_FILE)).unwrap();
        writeln!(test, "5,\"great unseen-word\"").unwrap();
    }

    #[test]
    fn test_load_encodes_both_splits() {
        let tmp = TempDir::new().unwrap();
        write_corpus(tmp.path());

        let corpus = CsvSource::new(tmp.path(), 2).load().unwrap();
        assert_eq!(corpus.train.len(), 3);
        assert_eq!(corpus.test.len(), 1);
        assert_eq!(corpus.num_classes, 5);

        // Labels are shifted to 0-based
        assert_eq!(corpus.train[0].label, 4);
        assert_eq!(corpus.train[1].label, 0);

        // "great" appears twice in training → in-vocabulary
        assert!(corpus.vocab.get("great").is_some());
        // bigrams made it into the vocabulary too
        assert!(corpus.vocab.get("great food").is_some());
    }

    #[test]
    fn test_unseen_test_tokens_map_to_unk() {
        let tmp = TempDir::new().unwrap();
        write_corpus(tmp.path());

        let corpus = CsvSource::new(tmp.path(), 1).load().unwrap();
        // "unseen-word" is not in the training vocabulary
        assert!(corpus.test[0].tokens.contains(&0));
        // every id stays inside the vocabulary
        let max_id = corpus.test[0].tokens.iter().max().copied().unwrap();
        assert!((max_id as usize) < corpus.vocab.len());
    }

    #[test]
    fn test_label_set_covers_test_split() {
        let tmp = TempDir::new().unwrap();
        // training split only rates up to 3 stars, test has a 5
        let mut train = File::create(tmp.path().join(TRAIN_FILE)).unwrap();
        writeln!(train, "3,\"decent\"").unwrap();
        writeln!(train, "1,\"bad\"").unwrap();
        let mut test = File::create(tmp.path().join(TEST_FILE)).unwrap();
        writeln!(test, "5,\"excellent\"").unwrap();

        let corpus = CsvSource::new(tmp.path(), 1).load().unwrap();
        assert_eq!(corpus.num_classes, 5);
        // every encoded label indexes a valid logit column
        assert!(corpus
            .train
            .iter()
            .chain(corpus.test.iter())
            .all(|e| e.label < corpus.num_classes));
        assert_eq!(corpus.test[0].label, 4);
    }

    #[test]
    fn test_empty_training_split_rejected() {
        let tmp = TempDir::new().unwrap();
        File::create(tmp.path().join(TRAIN_FILE)).unwrap();
        let mut test = File::create(tmp.path().join(TEST_FILE)).unwrap();
        writeln!(test, "2,\"fine\"").unwrap();

        let err = CsvSource::new(tmp.path(), 1).load().unwrap_err();
        assert!(err.to_string().contains("contains no rows"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(CsvSource::new(tmp.path(), 2).load().is_err());
    }

    #[test]
    fn test_zero_label_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut train = File::create(tmp.path().join(TRAIN_FILE)).unwrap();
        writeln!(train, "0,\"bad label\"").unwrap();
        File::create(tmp.path().join(TEST_FILE)).unwrap();

        assert!(CsvSource::new(tmp.path(), 2).load().is_err());
    }
}
