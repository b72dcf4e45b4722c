//! CPU utilization sampler.

use crate::error::{Result, SystemError};
use crate::metrics::data::{Metric, SharedMetrics};
use crate::metrics::sources::CpuTimes;
use crate::metrics::traits::PeriodicTask;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Idle and total ticks from a previous reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSample {
    pub idle: u64,
    pub total: u64,
}

impl TryFrom<CpuTimes> for CounterSample {
    type Error = &'static str;

    fn try_from(times: CpuTimes) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            idle: times.idle_time().ok_or("counter overflow")?,
            total: times.total_time().ok_or("counter overflow")?,
        })
    }
}

/// Utilization between two readings: busy ticks over elapsed ticks.
///
/// Zero elapsed ticks yields 0. Counters that went backwards are not
/// corrected, so the result can leave [0, 100].
pub fn cpu_usage(previous: CounterSample, current: CounterSample) -> f64 {
    let delta_idle = current.idle as f64 - previous.idle as f64;
    let delta_total = current.total as f64 - previous.total as f64;

    if delta_total == 0.0 {
        return 0.0;
    }
    100.0 * (delta_total - delta_idle) / delta_total
}

/// Computes CPU usage from the cumulative counters in `/proc/stat`.
///
/// The first successful reading only sets the baseline; usage is
/// published from the second one onwards.
#[derive(Debug)]
pub struct CpuSampler {
    path: PathBuf,
    previous: Option<CounterSample>,
}

impl CpuSampler {
    /// Create a sampler reading from `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            previous: None,
        }
    }

    /// The current baseline, if one has been recorded.
    pub fn baseline(&self) -> Option<CounterSample> {
        self.previous
    }

    /// Feed one reading and move the baseline forward.
    ///
    /// Returns `None` on cold start.
    pub fn observe(&mut self, current: CounterSample) -> Option<f64> {
        let usage = self.previous.map(|previous| cpu_usage(previous, current));
        self.previous = Some(current);
        usage
    }

    /// Read the counter source and compute usage.
    ///
    /// A malformed source, including counters whose sum overflows, leaves
    /// the baseline untouched.
    pub async fn sample(&mut self) -> Result<Option<f64>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SystemError::source_unavailable(&self.path, e))?;
        let times: CpuTimes = content
            .parse()
            .map_err(|reason: String| SystemError::malformed(&self.path, reason))?;
        let current = CounterSample::try_from(times)
            .map_err(|reason| SystemError::malformed(&self.path, reason))?;

        Ok(self.observe(current))
    }
}

impl PeriodicTask for CpuSampler {
    fn name(&self) -> &'static str {
        Metric::Cpu.name()
    }

    async fn tick(&mut self, metrics: &SharedMetrics) -> Result<()> {
        match self.sample().await? {
            Some(usage) => {
                metrics.store(Metric::Cpu, usage).await;
                debug!("CPU usage {:.1}%", usage);
            }
            None => debug!("CPU baseline recorded"),
        }
        Ok(())
    }
}
