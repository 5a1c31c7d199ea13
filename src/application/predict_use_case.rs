// ============================================================
// Predict Use Case
// ============================================================
// Loads a trained snapshot once and rates review strings. All
// heavy lifting lives in the inference layer; this use case
// validates the input and keeps clap types out of it.

use anyhow::{ensure, Result};

use crate::ml::inferencer::Predictor;

#[derive(Debug)]
pub struct PredictUseCase {
    predictor: Predictor,
}

impl PredictUseCase {
    /// `output_dir` is the directory a previous training run
    /// wrote its snapshot, config and vocabulary into.
    pub fn new(output_dir: String) -> Result<Self> {
        let predictor = Predictor::from_checkpoint(output_dir)?;
        Ok(Self { predictor })
    }

    /// Rate one review; returns the 1-based star rating.
    pub fn classify(&self, text: &str) -> Result<usize> {
        ensure!(!text.trim().is_empty(), "Review text is empty");
        Ok(self.predictor.predict(text))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::train_use_case::TrainConfig;
    use crate::domain::vocabulary::Vocabulary;
    use crate::infra::checkpoint::CheckpointManager;
    use crate::infra::vocab_store::VocabStore;
    use crate::ml::model::TextClassifierConfig;
    use crate::ml::trainer::EvalBackend;
    use tempfile::TempDir;

    fn write_checkpoint(dir: &std::path::Path) {
        let device = Default::default();
        let vocab = Vocabulary::build(["good", "bad"]);
        let cfg = TrainConfig {
            data_dir:       String::new(),
            log_dir:        String::new(),
            output_dir:     dir.to_string_lossy().into_owned(),
            epochs:         1,
            batch_size:     32,
            lr:             1e-3,
            embed_dim:      8,
            ngrams:         2,
            train_fraction: 0.95,
            vocab_size:     vocab.len(),
            num_classes:    5,
        };
        let model = TextClassifierConfig::new(cfg.vocab_size, cfg.num_classes)
            .with_embed_dim(cfg.embed_dim)
            .init::<EvalBackend>(&device);

        let ckpt = CheckpointManager::new(dir);
        ckpt.save_config(&cfg).unwrap();
        ckpt.save_latest(&model).unwrap();
        VocabStore::new(dir).save(&vocab).unwrap();
    }

    #[test]
    fn test_classify_returns_star_rating() {
        let tmp = TempDir::new().unwrap();
        write_checkpoint(tmp.path());

        let use_case = PredictUseCase::new(tmp.path().to_string_lossy().into_owned()).unwrap();
        let stars = use_case.classify("good good bad").unwrap();
        assert!((1..=5).contains(&stars));
    }

    #[test]
    fn test_blank_text_rejected() {
        let tmp = TempDir::new().unwrap();
        write_checkpoint(tmp.path());

        let use_case = PredictUseCase::new(tmp.path().to_string_lossy().into_owned()).unwrap();
        assert!(use_case.classify("   ").is_err());
    }

    #[test]
    fn test_missing_snapshot_rejected() {
        let tmp = TempDir::new().unwrap();
        let err = PredictUseCase::new(tmp.path().to_string_lossy().into_owned()).unwrap_err();
        assert!(err.to_string().contains("No trained snapshot"));
    }
}
