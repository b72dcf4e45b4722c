//! The shared metrics snapshot.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Latest published value of every metric.
///
/// Field names follow the JSON sink format (`cpuUsage`, `memUsage`,
/// `powerUsage`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    /// CPU utilization in percent. Not clamped.
    pub cpu_usage: f64,
    /// Memory utilization in percent
    pub mem_usage: f64,
    /// Power draw in watts
    pub power_usage: f64,
}

/// Which field of the snapshot a sampler publishes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Cpu,
    Memory,
    Power,
}

impl Metric {
    /// Short name used in log output.
    pub fn name(self) -> &'static str {
        match self {
            Metric::Cpu => "cpu",
            Metric::Memory => "memory",
            Metric::Power => "power",
        }
    }
}

/// Process-wide snapshot behind a single exclusive lock.
///
/// Each sampler updates its own field on its own schedule, so a copy taken
/// by [`SharedMetrics::snapshot`] may mix values from different sampling
/// instants. Individual fields are never torn. Callers must not hold the
/// lock across I/O: every method here locks, touches memory, and unlocks.
#[derive(Debug, Clone, Default)]
pub struct SharedMetrics {
    inner: Arc<Mutex<MetricsSnapshot>>,
}

impl SharedMetrics {
    /// Zero-initialized snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a single field.
    pub async fn store(&self, metric: Metric, value: f64) {
        let mut snapshot = self.inner.lock().await;
        match metric {
            Metric::Cpu => snapshot.cpu_usage = value,
            Metric::Memory => snapshot.mem_usage = value,
            Metric::Power => snapshot.power_usage = value,
        }
    }

    /// Copy out all three fields.
    pub async fn snapshot(&self) -> MetricsSnapshot {
        *self.inner.lock().await
    }
}
