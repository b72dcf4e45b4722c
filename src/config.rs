//! Monitor configuration.
//!
//! Only the locations of the sources and the sink live here. Sampling and
//! write periods are fixed crate constants.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Aggregate CPU time counters.
pub const DEFAULT_STAT_PATH: &str = "/proc/stat";

/// Memory counters.
pub const DEFAULT_MEMINFO_PATH: &str = "/proc/meminfo";

/// Battery power draw in microwatts. Usually absent on desktops and servers.
pub const DEFAULT_POWER_PATH: &str = "/sys/class/power_supply/BAT0/power_now";

/// Where the snapshot is written.
pub const DEFAULT_OUTPUT_PATH: &str = "/tmp/metrics.json";

/// Paths the samplers read from and the writer writes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// CPU counters source
    pub stat_path: PathBuf,
    /// Memory counters source
    pub meminfo_path: PathBuf,
    /// Power sensor source
    pub power_path: PathBuf,
    /// Snapshot sink
    pub output_path: PathBuf,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            stat_path: PathBuf::from(DEFAULT_STAT_PATH),
            meminfo_path: PathBuf::from(DEFAULT_MEMINFO_PATH),
            power_path: PathBuf::from(DEFAULT_POWER_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl MonitorConfig {
    /// Set the CPU counters source.
    pub fn with_stat_path(mut self, path: impl AsRef<Path>) -> Self {
        self.stat_path = path.as_ref().to_path_buf();
        self
    }

    /// Set the memory counters source.
    pub fn with_meminfo_path(mut self, path: impl AsRef<Path>) -> Self {
        self.meminfo_path = path.as_ref().to_path_buf();
        self
    }

    /// Set the power sensor source.
    pub fn with_power_path(mut self, path: impl AsRef<Path>) -> Self {
        self.power_path = path.as_ref().to_path_buf();
        self
    }

    /// Set the snapshot sink.
    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output_path = path.as_ref().to_path_buf();
        self
    }
}
