//! Metric samplers and the shared snapshot they publish into.
//!
//! Each sampler reads one OS counter source, derives a single value and
//! stores it into [`SharedMetrics`] on its own schedule.

pub mod cpu;
pub mod data;
pub mod memory;
pub mod power;
pub mod sources;
pub mod traits;

// Re-export commonly used items
pub use cpu::CpuSampler;
pub use data::{Metric, MetricsSnapshot, SharedMetrics};
pub use memory::MemorySampler;
pub use power::PowerSampler;
pub use traits::PeriodicTask;
