// ============================================================
// Training Loop
// ============================================================
// One pass of mini-batch SGD per epoch over the shuffled
// training split, followed by a full validation pass in
// evaluation mode. The learning rate decays by a fixed factor
// after every epoch (step decay, as the original experiment's
// scheduler did). Per-epoch results go to stdout, the metrics
// CSV, and the run context; a single model snapshot is written
// after the final epoch.
//
// There is no retry or mid-epoch recovery: this is a manual,
// supervised experiment, and any data or batch error aborts
// the whole run through `?`.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use burn::data::dataloader::{DataLoader, DataLoaderBuilder};
use burn::module::AutodiffModule;
use burn::optim::{GradientsParams, Optimizer, SgdConfig};
use burn::prelude::*;

use crate::application::train_use_case::TrainConfig;
use crate::data::batcher::{ReviewBatch, ReviewBatcher};
use crate::data::dataset::ReviewDataset;
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::infra::run_context::RunContext;
use crate::ml::model::{TextClassifier, TextClassifierConfig};

pub type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;
pub type EvalBackend = burn::backend::NdArray;

/// Multiplied into the learning rate after every epoch
/// (StepLR with step size 1 in the original).
const LR_DECAY: f64 = 0.9;

const SHUFFLE_SEED: u64 = 42;

pub fn run_training(
    cfg:       &TrainConfig,
    train_ds:  ReviewDataset,
    val_ds:    ReviewDataset,
    ckpt:      &CheckpointManager,
    metrics:   &MetricsLogger,
    run:       &dyn RunContext,
) -> Result<TextClassifier<TrainBackend>> {
    let device = <TrainBackend as Backend>::Device::default();

    let model_cfg = TextClassifierConfig::new(cfg.vocab_size, cfg.num_classes)
        .with_embed_dim(cfg.embed_dim);
    let mut model: TextClassifier<TrainBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: vocab_size={}, embed_dim={}, num_classes={}",
        cfg.vocab_size,
        cfg.embed_dim,
        cfg.num_classes
    );

    let mut optim = SgdConfig::new().init();
    let mut lr = cfg.lr;

    let train_examples = train_ds.example_count();
    let train_batcher = ReviewBatcher::<TrainBackend>::new(device.clone());
    let train_loader = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(SHUFFLE_SEED)
        .num_workers(1)
        .build(train_ds);

    // Validation runs on the inner backend — no autodiff overhead
    let val_batcher = ReviewBatcher::<EvalBackend>::new(device.clone());
    let val_loader = DataLoaderBuilder::new(val_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(val_ds);

    let mut best_val_loss = f64::INFINITY;
    let mut best_epoch = 0usize;

    for epoch in 1..=cfg.epochs {
        let epoch_start = Instant::now();

        // ── Training phase ────────────────────────────────────────────────────
        let mut loss_sum = 0.0f64;
        let mut batches = 0usize;
        let mut correct = 0i64;

        for batch in train_loader.iter() {
            let (loss, logits) =
                model.forward_loss(batch.tokens, &batch.offsets, batch.labels.clone());

            loss_sum += loss.clone().into_scalar().elem::<f64>();
            batches += 1;

            let predicted = logits.argmax(1).flatten::<1>(0, 1);
            correct += predicted
                .equal(batch.labels)
                .int()
                .sum()
                .into_scalar()
                .elem::<i64>();

            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optim.step(lr, model, grads);
        }

        // Reported loss is the mean over batches, not examples
        let train_loss = if batches > 0 { loss_sum / batches as f64 } else { f64::NAN };
        let train_acc = if train_examples > 0 {
            correct as f64 / train_examples as f64
        } else {
            0.0
        };

        // Adjust the learning rate
        lr *= LR_DECAY;

        // ── Validation phase ──────────────────────────────────────────────────
        let (val_loss, val_acc) = eval_pass(&model.valid(), &val_loader);

        let seconds = epoch_start.elapsed().as_secs();
        println!(
            "Epoch {:>3}/{} | {:>4}s | train_loss={:.4} acc={:.1}% | val_loss={:.4} acc={:.1}%",
            epoch,
            cfg.epochs,
            seconds,
            train_loss,
            train_acc * 100.0,
            val_loss,
            val_acc * 100.0,
        );

        let epoch_metrics =
            EpochMetrics::new(epoch, seconds, train_loss, train_acc, val_loss, val_acc);
        if epoch_metrics.is_improvement(best_val_loss) {
            best_val_loss = val_loss;
            best_epoch = epoch;
        }
        metrics.log(&epoch_metrics)?;

        run.log_metric("train_loss", train_loss);
        run.log_metric("train_acc", train_acc);
        run.log_metric("val_loss", val_loss);
        run.log_metric("val_acc", val_acc);
    }

    if cfg.epochs > 0 {
        tracing::info!("Best validation loss {:.4} at epoch {}", best_val_loss, best_epoch);
    }

    ckpt.save_latest(&model)?;
    tracing::info!("Training complete, snapshot saved");

    Ok(model)
}

/// One full evaluation pass over a dataset: builds a loader and
/// returns (mean loss, accuracy). Used for the final held-out
/// test evaluation.
pub fn evaluate<B: Backend>(
    model: &TextClassifier<B>,
    dataset: ReviewDataset,
    batch_size: usize,
    device: &B::Device,
) -> (f64, f64) {
    let loader = DataLoaderBuilder::new(ReviewBatcher::<B>::new(device.clone()))
        .batch_size(batch_size)
        .num_workers(1)
        .build(dataset);
    eval_pass(model, &loader)
}

/// Shared evaluation-mode pass: no parameter updates, same
/// collator as training.
fn eval_pass<B: Backend>(
    model: &TextClassifier<B>,
    loader: &Arc<dyn DataLoader<ReviewBatch<B>>>,
) -> (f64, f64) {
    let mut loss_sum = 0.0f64;
    let mut batches = 0usize;
    let mut correct = 0i64;
    let mut examples = 0usize;

    for batch in loader.iter() {
        examples += batch.offsets.len();

        let (loss, logits) =
            model.forward_loss(batch.tokens, &batch.offsets, batch.labels.clone());
        loss_sum += loss.into_scalar().elem::<f64>();
        batches += 1;

        let predicted = logits.argmax(1).flatten::<1>(0, 1);
        correct += predicted
            .equal(batch.labels)
            .int()
            .sum()
            .into_scalar()
            .elem::<i64>();
    }

    let mean_loss = if batches > 0 { loss_sum / batches as f64 } else { f64::NAN };
    let accuracy = if examples > 0 { correct as f64 / examples as f64 } else { 0.0 };
    (mean_loss, accuracy)
}
