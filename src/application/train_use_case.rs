// ============================================================
// Train Use Case
// ============================================================
// The full training run, end to end:
//
//   1. Pick the corpus source (pre-tokenized Parquet shards if
//      the data directory carries them, raw CSV otherwise)
//   2. Load and encode the corpus, log its label balance
//   3. Split the training examples 95/5 into train/validation
//   4. Persist the vocabulary and the resolved config next to
//      where the snapshot will land
//   5. Run the epoch loop
//   6. Evaluate the final model on the held-out test split
//
// The resolved TrainConfig (with vocab_size and num_classes
// filled in from the corpus) is what inference later reads to
// rebuild the architecture.

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use burn::module::AutodiffModule;
use serde::{Deserialize, Serialize};

use crate::data::csv_source::CsvSource;
use crate::data::dataset::ReviewDataset;
use crate::data::parquet_source::ParquetSource;
use crate::data::splitter::split_train_val;
use crate::domain::traits::CorpusSource;
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::MetricsLogger;
use crate::infra::run_context;
use crate::infra::vocab_store::VocabStore;
use crate::ml::trainer::{evaluate, run_training};

/// Everything a training run needs, resolved from the CLI and
/// the corpus. Serialized to train_config.json so a later
/// `predict` can rebuild the exact same model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_dir:       String,
    pub log_dir:        String,
    pub output_dir:     String,
    pub epochs:         usize,
    pub batch_size:     usize,
    pub lr:             f64,
    pub embed_dim:      usize,
    pub ngrams:         usize,
    pub train_fraction: f64,

    /// Filled in from the corpus, not the CLI
    pub vocab_size:  usize,
    pub num_classes: usize,
}

pub struct TrainUseCase {
    cfg: TrainConfig,
}

impl TrainUseCase {
    pub fn new(cfg: TrainConfig) -> Self {
        Self { cfg }
    }

    pub fn execute(&self) -> Result<()> {
        let data_dir = Path::new(&self.cfg.data_dir);
        ensure!(
            data_dir.is_dir(),
            "Data directory '{}' does not exist",
            data_dir.display()
        );
        fs::create_dir_all(&self.cfg.output_dir)
            .with_context(|| format!("Failed to create '{}'", self.cfg.output_dir))?;

        let run = run_context::from_env(&self.cfg.log_dir)?;
        tracing::info!("Run id: {}", run.id());

        // Shard directories carry their own vocabulary; raw CSV
        // corpora are tokenized and encoded here.
        let source: Box<dyn CorpusSource> = if ParquetSource::detect(data_dir) {
            tracing::info!("Detected pre-tokenized Parquet shards");
            Box::new(ParquetSource::new(data_dir))
        } else {
            tracing::info!("Loading raw CSV corpus");
            Box::new(CsvSource::new(data_dir, self.cfg.ngrams))
        };
        let corpus = source.load()?;
        tracing::info!("Training label counts: {:?}", corpus.label_histogram());

        let mut cfg = self.cfg.clone();
        cfg.vocab_size = corpus.vocab.len();
        cfg.num_classes = corpus.num_classes;
        log_params(run.as_ref(), &cfg);

        let ckpt = CheckpointManager::new(&cfg.output_dir);
        ckpt.save_config(&cfg)?;
        VocabStore::new(&cfg.output_dir).save(&corpus.vocab)?;

        let (train, validation) = split_train_val(corpus.train, cfg.train_fraction);
        tracing::info!(
            "Split: {} training / {} validation examples",
            train.len(),
            validation.len()
        );

        let metrics = MetricsLogger::new(&cfg.log_dir)?;
        let model = run_training(
            &cfg,
            ReviewDataset::new(train),
            ReviewDataset::new(validation),
            &ckpt,
            &metrics,
            run.as_ref(),
        )?;

        // Final score on the held-out test split
        let device = Default::default();
        let (test_loss, test_acc) = evaluate(
            &model.valid(),
            ReviewDataset::new(corpus.test),
            cfg.batch_size,
            &device,
        );
        println!("Test | loss={test_loss:.4} acc={:.1}%", test_acc * 100.0);
        run.log_metric("test_loss", test_loss);
        run.log_metric("test_acc", test_acc);

        Ok(())
    }
}

/// Record every resolved configuration value on the run, the
/// corpus-derived fields included.
fn log_params(run: &dyn crate::infra::run_context::RunContext, cfg: &TrainConfig) {
    run.log_param("data_dir", &cfg.data_dir);
    run.log_param("log_dir", &cfg.log_dir);
    run.log_param("output_dir", &cfg.output_dir);
    run.log_param("epochs", &cfg.epochs.to_string());
    run.log_param("batch_size", &cfg.batch_size.to_string());
    run.log_param("lr", &cfg.lr.to_string());
    run.log_param("embed_dim", &cfg.embed_dim.to_string());
    run.log_param("ngrams", &cfg.ngrams.to_string());
    run.log_param("train_fraction", &cfg.train_fraction.to_string());
    run.log_param("vocab_size", &cfg.vocab_size.to_string());
    run.log_param("num_classes", &cfg.num_classes.to_string());
}
