//! Traits for the periodic tasks that make up the daemon.

use crate::error::Result;
use crate::metrics::data::SharedMetrics;
use std::future::Future;

/// One body of work executed on every tick of a periodic loop.
///
/// Samplers read a source and publish into the snapshot; the writer reads
/// the snapshot and writes it out. An `Err` from [`PeriodicTask::tick`] is
/// logged by the loop and the task runs again on the next tick.
pub trait PeriodicTask: Send + 'static {
    /// Name used in log output.
    fn name(&self) -> &'static str;

    /// Run a single tick against the shared snapshot.
    fn tick(&mut self, metrics: &SharedMetrics) -> impl Future<Output = Result<()>> + Send;
}
