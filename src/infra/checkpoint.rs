// ============================================================
// Checkpoint Manager
// ============================================================
// Owns the output directory layout produced by a training run:
//
//   outputs/
//     latest.mpk.gz       — model weights (CompactRecorder)
//     train_config.json   — the run's full configuration
//
// One snapshot, written after the final epoch and overwritten
// by the next run. The config file carries everything inference
// needs to rebuild the architecture (vocab size, class count,
// embedding width, n-gram order).

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use burn::module::Module;
use burn::prelude::*;
use burn::record::{FullPrecisionSettings, NamedMpkGzFileRecorder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::ml::model::{TextClassifier, TextClassifierConfig};

/// The recorder appends ".mpk.gz" to this stem.
const SNAPSHOT_STEM: &str = "latest";

/// Full-precision named-MessagePack recorder whose files carry the
/// ".mpk.gz" extension the snapshot path promises. Full precision
/// keeps reloaded weights identical to the ones that were saved.
type SnapshotRecorder = NamedMpkGzFileRecorder<FullPrecisionSettings>;

const CONFIG_FILE: &str = "train_config.json";

pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.join(format!("{SNAPSHOT_STEM}.mpk.gz"))
    }

    pub fn snapshot_exists(&self) -> bool {
        self.snapshot_path().is_file()
    }

    /// Overwrite the snapshot with the given model's weights.
    pub fn save_latest<B: Backend>(&self, model: &TextClassifier<B>) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        model
            .clone()
            .save_file(self.dir.join(SNAPSHOT_STEM), &SnapshotRecorder::new())
            .with_context(|| format!("Failed to save snapshot under {}", self.dir.display()))?;
        Ok(())
    }

    /// Rebuild a model from the architecture config and load the
    /// persisted weights into it.
    pub fn load_latest<B: Backend>(
        &self,
        cfg: &TextClassifierConfig,
        device: &B::Device,
    ) -> Result<TextClassifier<B>> {
        let model = cfg
            .init::<B>(device)
            .load_file(self.dir.join(SNAPSHOT_STEM), &SnapshotRecorder::new(), device)
            .with_context(|| {
                format!("Failed to load snapshot {}", self.snapshot_path().display())
            })?;
        Ok(model)
    }

    pub fn save_config<T: Serialize>(&self, cfg: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let path = self.dir.join(CONFIG_FILE);
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), cfg)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn load_config<T: DeserializeOwned>(&self) -> Result<T> {
        let path = self.dir.join(CONFIG_FILE);
        let file = File::open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Malformed config file {}", path.display()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use serde::Deserialize;
    use tempfile::TempDir;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_snapshot_roundtrip_preserves_outputs() {
        let tmp = TempDir::new().unwrap();
        let ckpt = CheckpointManager::new(tmp.path());
        let device = Default::default();

        let cfg = TextClassifierConfig::new(12, 3);
        let model = cfg.init::<TestBackend>(&device);
        ckpt.save_latest(&model).unwrap();
        assert!(ckpt.snapshot_exists());

        let restored = ckpt.load_latest::<TestBackend>(&cfg, &device).unwrap();

        let tokens = Tensor::<TestBackend, 1, Int>::from_ints([3, 7, 1].as_slice(), &device);
        let offsets = [0usize, 2];
        let before = model.forward(tokens.clone(), &offsets).into_data();
        let after = restored.forward(tokens, &offsets).into_data();
        before.assert_eq(&after, true);
    }

    #[test]
    fn test_load_without_snapshot_fails() {
        let tmp = TempDir::new().unwrap();
        let ckpt = CheckpointManager::new(tmp.path());
        assert!(!ckpt.snapshot_exists());

        let device = Default::default();
        let cfg = TextClassifierConfig::new(4, 2);
        assert!(ckpt.load_latest::<TestBackend>(&cfg, &device).is_err());
    }

    #[test]
    fn test_config_roundtrip() {
        #[derive(Serialize, Deserialize, PartialEq, Debug)]
        struct Probe {
            epochs: usize,
            lr: f64,
        }

        let tmp = TempDir::new().unwrap();
        let ckpt = CheckpointManager::new(tmp.path());

        let cfg = Probe { epochs: 5, lr: 1e-3 };
        ckpt.save_config(&cfg).unwrap();
        let restored: Probe = ckpt.load_config().unwrap();
        assert_eq!(restored, cfg);
    }
}
