//! # System Monitor
//!
//! A small background daemon that samples CPU, memory and power usage from
//! `/proc` and `/sys` and keeps the latest values in a JSON file for other
//! processes to pick up.
//!
//! ## Features
//!
//! - **CPU usage**: delta-over-delta on the cumulative counters in `/proc/stat`
//! - **Memory usage**: `MemTotal` against `MemAvailable` from `/proc/meminfo`
//! - **Power draw**: battery sensor in watts, or a placeholder when absent
//! - **Snapshot file**: `/tmp/metrics.json`, rewritten every two seconds
//! - **Metrics endpoint**: optional HTTP server exposing the snapshot file
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use system_monitor::{Monitor, MonitorConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let handle = Monitor::new(MonitorConfig::default()).spawn();
//!     handle.wait().await;
//! }
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod monitor;
pub mod web;
pub mod writer;

// Re-export public API
pub use config::MonitorConfig;
pub use error::{Result, SystemError};
pub use metrics::{
    cpu::CpuSampler,
    data::{Metric, MetricsSnapshot, SharedMetrics},
    memory::MemorySampler,
    power::PowerSampler,
    traits::PeriodicTask,
};
pub use monitor::{run_periodic, Monitor, MonitorHandle};
pub use web::{start_web_server, WebConfig};
pub use writer::SnapshotWriter;

/// Sampler period in milliseconds
pub const SAMPLE_INTERVAL_MS: u64 = 1000;

/// Snapshot writer period in milliseconds
pub const WRITE_INTERVAL_MS: u64 = 2000;

/// The default metrics endpoint port
pub const DEFAULT_WEB_PORT: u16 = 5000;
