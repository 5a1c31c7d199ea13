// ============================================================
// CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with `clap`.
// All business logic is delegated to the application layer.
//
// Two commands are supported:
//   1. `train`   — trains the classifier on a review corpus
//   2. `predict` — loads a snapshot and rates a review string

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PredictArgs, TrainArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "review-sentiment",
    version = "0.1.0",
    about = "Train a bag-of-embeddings star-rating classifier on Yelp reviews, then rate new ones."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// The CLI layer only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => Self::run_train(args),
            Commands::Predict(args) => Self::run_predict(args),
        }
    }

    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training on data in: {}", args.data);

        // CLI args → application config (keeps clap types out of lower layers)
        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training complete. Snapshot saved.");
        Ok(())
    }

    fn run_predict(args: PredictArgs) -> Result<()> {
        use crate::application::predict_use_case::PredictUseCase;

        let use_case = PredictUseCase::new(args.outputs.clone())?;
        let stars = use_case.classify(&args.text)?;
        println!("\nPredicted rating: {stars} star(s)");
        Ok(())
    }
}
