// ============================================================
// Run Context
// ============================================================
// Experiment-tracking seam. A training run logs its scalar
// metrics through the RunContext trait instead of talking to a
// tracking backend directly, so the loop is identical whether
// the process runs inside a managed experiment or on a laptop.
//
// Two implementations:
//   TrackedRun — active when the RUN_ID environment variable is
//                set by an orchestrator; appends one JSON line
//                per metric to <log_dir>/run_<id>.jsonl
//   OfflineRun — local fallback; carries a timestamped id and
//                drops metrics (the CSV logger still records
//                the learning curve)

use std::env;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Serialize;

pub const RUN_ID_VAR: &str = "RUN_ID";

pub trait RunContext {
    /// Stable identifier for this run.
    fn id(&self) -> &str;

    /// Record one resolved configuration value at startup.
    /// Advisory like metrics: failures never abort training.
    fn log_param(&self, name: &str, value: &str);

    /// Record one scalar metric. Tracking is advisory: failures
    /// are reported but never abort training.
    fn log_metric(&self, name: &str, value: f64);
}

/// Pick the context for this process: tracked when an
/// orchestrator has set RUN_ID, offline otherwise.
pub fn from_env(log_dir: impl AsRef<Path>) -> Result<Box<dyn RunContext>> {
    match env::var(RUN_ID_VAR) {
        Ok(id) if !id.is_empty() => {
            let run = TrackedRun::new(log_dir, id)?;
            Ok(Box::new(run))
        }
        _ => Ok(Box::new(OfflineRun::new())),
    }
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// ─── TrackedRun ───────────────────────────────────────────────────────────────
#[derive(Serialize)]
struct MetricLine<'a> {
    ts:    u64,
    name:  &'a str,
    value: f64,
}

#[derive(Serialize)]
struct ParamLine<'a> {
    ts:    u64,
    param: &'a str,
    value: &'a str,
}

pub struct TrackedRun {
    id:   String,
    path: PathBuf,
}

impl TrackedRun {
    pub fn new(log_dir: impl AsRef<Path>, id: String) -> Result<Self> {
        let dir = log_dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join(format!("run_{id}.jsonl"));
        tracing::info!("Tracking run {} in {}", id, path.display());
        Ok(Self { id, path })
    }

    pub fn record_path(&self) -> &Path {
        &self.path
    }

    fn append(&self, line: String) -> Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    fn append_metric(&self, name: &str, value: f64) -> Result<()> {
        let line = serde_json::to_string(&MetricLine { ts: unix_seconds(), name, value })?;
        self.append(line)
    }

    fn append_param(&self, param: &str, value: &str) -> Result<()> {
        let line = serde_json::to_string(&ParamLine { ts: unix_seconds(), param, value })?;
        self.append(line)
    }
}

impl RunContext for TrackedRun {
    fn id(&self) -> &str {
        &self.id
    }

    fn log_param(&self, name: &str, value: &str) {
        if let Err(err) = self.append_param(name, value) {
            tracing::warn!("Dropped param {name}={value}: {err:#}");
        }
    }

    fn log_metric(&self, name: &str, value: f64) {
        if let Err(err) = self.append_metric(name, value) {
            tracing::warn!("Dropped metric {name}={value}: {err:#}");
        }
    }
}

// ─── OfflineRun ───────────────────────────────────────────────────────────────
pub struct OfflineRun {
    id: String,
}

impl OfflineRun {
    pub fn new() -> Self {
        Self { id: format!("OfflineRun_{}", unix_seconds()) }
    }
}

impl Default for OfflineRun {
    fn default() -> Self {
        Self::new()
    }
}

impl RunContext for OfflineRun {
    fn id(&self) -> &str {
        &self.id
    }

    fn log_param(&self, _name: &str, _value: &str) {}

    fn log_metric(&self, _name: &str, _value: f64) {}
}
