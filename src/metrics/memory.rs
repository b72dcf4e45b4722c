//! Memory utilization sampler.

use crate::error::{Result, SystemError};
use crate::metrics::data::{Metric, SharedMetrics};
use crate::metrics::sources::MemInfo;
use crate::metrics::traits::PeriodicTask;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Share of `MemTotal` not reported as `MemAvailable`, in percent.
///
/// A zero total yields 0.
pub fn memory_usage(info: MemInfo) -> f64 {
    if info.total == 0 {
        return 0.0;
    }
    100.0 * (info.total as f64 - info.available as f64) / info.total as f64
}

/// Computes memory usage from `/proc/meminfo`.
#[derive(Debug)]
pub struct MemorySampler {
    path: PathBuf,
}

impl MemorySampler {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read the source and compute usage.
    pub async fn sample(&self) -> Result<f64> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SystemError::source_unavailable(&self.path, e))?;
        Ok(memory_usage(MemInfo::parse(&content)))
    }
}

impl PeriodicTask for MemorySampler {
    fn name(&self) -> &'static str {
        Metric::Memory.name()
    }

    async fn tick(&mut self, metrics: &SharedMetrics) -> Result<()> {
        let usage = self.sample().await?;
        metrics.store(Metric::Memory, usage).await;
        debug!("Memory usage {:.1}%", usage);
        Ok(())
    }
}
