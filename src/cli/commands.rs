// ============================================================
// CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `train` and `predict`, and all
// their configurable flags. clap's derive macros generate the
// help text, missing-argument errors, and type conversions.

use crate::application::train_use_case::TrainConfig;
use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the star-rating classifier on a review corpus
    Train(TrainArgs),

    /// Rate a single review using a trained snapshot
    Predict(PredictArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Directory holding the training and test data: either
    /// train.csv/test.csv (label,review rows) or pre-tokenized
    /// train-*/test-* Parquet shards plus vocab.json
    #[arg(short = 'd', long, default_value = "data")]
    pub data: String,

    /// Log directory (run records and metrics.csv land here)
    #[arg(short = 'g', long, default_value = "logs")]
    pub logs: String,

    /// Output directory for the model snapshot and config
    #[arg(short = 'o', long, default_value = "outputs")]
    pub outputs: String,

    /// Number of full passes through the training data
    #[arg(short = 'e', long, default_value_t = 5)]
    pub epochs: usize,

    /// Number of examples per mini-batch
    #[arg(short = 'b', long, default_value_t = 32)]
    pub batch_size: usize,

    /// SGD learning rate (decayed by 0.9 after every epoch)
    #[arg(short = 'r', long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Width of the embedding vectors
    #[arg(long, default_value_t = 32)]
    pub embed_dim: usize,

    /// N-gram order used when tokenizing raw review text
    #[arg(long, default_value_t = 2)]
    pub ngrams: usize,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_dir:   a.data,
            log_dir:    a.logs,
            output_dir: a.outputs,
            epochs:     a.epochs,
            batch_size: a.batch_size,
            lr:         a.lr,
            embed_dim:  a.embed_dim,
            ngrams:     a.ngrams,
            train_fraction: 0.95,
            // Filled in once the corpus has been loaded
            vocab_size:  0,
            num_classes: 0,
        }
    }
}

/// All arguments for the `predict` command
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// The review text to rate
    #[arg(long)]
    pub text: String,

    /// Directory where the training run wrote its snapshot
    #[arg(short = 'o', long, default_value = "outputs")]
    pub outputs: String,
}
