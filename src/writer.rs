//! Periodic serialization of the snapshot to the sink file.

use crate::error::{Result, SystemError};
use crate::metrics::{MetricsSnapshot, PeriodicTask, SharedMetrics};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Render a snapshot in the sink format: a JSON object with exactly
/// `cpuUsage`, `memUsage` and `powerUsage`, followed by a newline.
pub fn render_snapshot(snapshot: &MetricsSnapshot) -> Result<String> {
    let mut json = serde_json::to_string_pretty(snapshot)?;
    json.push('\n');
    Ok(json)
}

/// Writes the snapshot to a fixed path, replacing whatever was there.
///
/// The write is a plain truncate-and-write, so a crash mid-write can leave
/// a partial file behind.
#[derive(Debug)]
pub struct SnapshotWriter {
    path: PathBuf,
}

impl SnapshotWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Write an already-copied snapshot.
    pub async fn write(&self, snapshot: &MetricsSnapshot) -> Result<()> {
        let json = render_snapshot(snapshot)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| SystemError::sink_unwritable(&self.path, e))
    }
}

impl PeriodicTask for SnapshotWriter {
    fn name(&self) -> &'static str {
        "writer"
    }

    async fn tick(&mut self, metrics: &SharedMetrics) -> Result<()> {
        // Copy under the lock; the file write happens after it is released.
        let snapshot = metrics.snapshot().await;
        self.write(&snapshot).await?;
        debug!("Wrote snapshot to {:?}", self.path);
        Ok(())
    }
}
