// ============================================================
// Metrics Logger
// ============================================================
// Appends one CSV row per epoch to <log_dir>/metrics.csv so a
// run's learning curve survives the process. The header is
// written once when the logger is created; a new run truncates
// the previous run's file.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const METRICS_FILE: &str = "metrics.csv";

const CSV_HEADER: &str = "epoch,seconds,train_loss,train_acc,val_loss,val_acc";

/// One epoch's worth of training and validation results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochMetrics {
    pub epoch:      usize,
    pub seconds:    u64,
    pub train_loss: f64,
    pub train_acc:  f64,
    pub val_loss:   f64,
    pub val_acc:    f64,
}

impl EpochMetrics {
    pub fn new(
        epoch: usize,
        seconds: u64,
        train_loss: f64,
        train_acc: f64,
        val_loss: f64,
        val_acc: f64,
    ) -> Self {
        Self { epoch, seconds, train_loss, train_acc, val_loss, val_acc }
    }

    /// Whether this epoch beat the best validation loss so far.
    pub fn is_improvement(&self, best_val_loss: f64) -> bool {
        self.val_loss < best_val_loss
    }

    fn as_csv_row(&self) -> String {
        format!(
            "{},{},{:.6},{:.6},{:.6},{:.6}",
            self.epoch, self.seconds, self.train_loss, self.train_acc, self.val_loss, self.val_acc
        )
    }
}

pub struct MetricsLogger {
    path: PathBuf,
}

impl MetricsLogger {
    /// Create the log directory if needed and start a fresh
    /// metrics file containing only the header row.
    pub fn new(log_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = log_dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let path = dir.join(METRICS_FILE);
        let mut file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        writeln!(file, "{CSV_HEADER}")
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(Self { path })
    }

    pub fn csv_path(&self) -> &Path {
        &self.path
    }

    pub fn log(&self, metrics: &EpochMetrics) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        writeln!(file, "{}", metrics.as_csv_row())
            .with_context(|| format!("Failed to append to {}", self.path.display()))?;
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample(epoch: usize) -> EpochMetrics {
        EpochMetrics::new(epoch, 12, 1.5, 0.41, 1.3, 0.44)
    }

    #[test]
    fn test_header_then_one_row_per_epoch() {
        let tmp = TempDir::new().unwrap();
        let logger = MetricsLogger::new(tmp.path()).unwrap();
        logger.log(&sample(1)).unwrap();
        logger.log(&sample(2)).unwrap();

        let text = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[1].starts_with("1,12,1.5"));
        assert!(lines[2].starts_with("2,12,1.5"));
    }

    #[test]
    fn test_new_run_truncates_previous_file() {
        let tmp = TempDir::new().unwrap();
        let first = MetricsLogger::new(tmp.path()).unwrap();
        first.log(&sample(1)).unwrap();

        let second = MetricsLogger::new(tmp.path()).unwrap();
        let text = fs::read_to_string(second.csv_path()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_improvement_is_strict() {
        let m = sample(1);
        assert!(m.is_improvement(f64::INFINITY));
        assert!(m.is_improvement(1.4));
        assert!(!m.is_improvement(1.3));
        assert!(!m.is_improvement(1.0));
    }

    #[test]
    fn test_creates_nested_log_dir() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a").join("b");
        let logger = MetricsLogger::new(&nested).unwrap();
        assert!(logger.csv_path().exists());
    }
}
