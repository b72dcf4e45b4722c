//! Orchestration of the sampler and writer loops.

use crate::config::MonitorConfig;
use crate::error::SystemError;
use crate::metrics::{CpuSampler, MemorySampler, PeriodicTask, PowerSampler, SharedMetrics};
use crate::writer::SnapshotWriter;
use crate::{SAMPLE_INTERVAL_MS, WRITE_INTERVAL_MS};
use futures_util::future::join_all;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Run `task` every `period` until `shutdown` flips to `true` or its sender
/// is dropped.
///
/// The first tick runs immediately. Task errors are logged and the loop
/// carries on; there is no backoff.
pub async fn run_periodic<T: PeriodicTask>(
    mut task: T,
    metrics: SharedMetrics,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    debug!("Starting {} loop every {:?}", task.name(), period);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Err(err) = task.tick(&metrics).await {
                    report(task.name(), &err);
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    debug!("Stopped {} loop", task.name());
}

fn report(name: &str, err: &SystemError) {
    match err {
        SystemError::SinkUnwritable { .. } => error!("{} tick failed: {}", name, err),
        _ => warn!("{} tick failed: {}", name, err),
    }
}

/// The daemon: three samplers and a writer sharing one snapshot.
#[derive(Debug, Clone, Default)]
pub struct Monitor {
    config: MonitorConfig,
    metrics: SharedMetrics,
}

impl Monitor {
    /// Create a monitor with a zeroed snapshot.
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            metrics: SharedMetrics::new(),
        }
    }

    /// Spawn the four loops on the current tokio runtime.
    ///
    /// Samplers tick every [`SAMPLE_INTERVAL_MS`], the writer every
    /// [`WRITE_INTERVAL_MS`]. Loops are not phase-aligned.
    pub fn spawn(self) -> MonitorHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let sample_period = Duration::from_millis(SAMPLE_INTERVAL_MS);
        let write_period = Duration::from_millis(WRITE_INTERVAL_MS);

        let tasks = vec![
            self.spawn_loop(
                CpuSampler::new(&self.config.stat_path),
                sample_period,
                &shutdown_rx,
            ),
            self.spawn_loop(
                MemorySampler::new(&self.config.meminfo_path),
                sample_period,
                &shutdown_rx,
            ),
            self.spawn_loop(
                PowerSampler::new(&self.config.power_path),
                sample_period,
                &shutdown_rx,
            ),
            self.spawn_loop(
                SnapshotWriter::new(&self.config.output_path),
                write_period,
                &shutdown_rx,
            ),
        ];

        info!(
            "Monitor started, writing to {}",
            self.config.output_path.display()
        );

        MonitorHandle {
            metrics: self.metrics,
            shutdown: shutdown_tx,
            tasks,
        }
    }

    fn spawn_loop<T: PeriodicTask>(
        &self,
        task: T,
        period: Duration,
        shutdown: &watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        tokio::spawn(run_periodic(
            task,
            self.metrics.clone(),
            period,
            shutdown.clone(),
        ))
    }
}

/// Handle to a running monitor.
#[derive(Debug)]
pub struct MonitorHandle {
    metrics: SharedMetrics,
    shutdown: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl MonitorHandle {
    /// The shared snapshot the loops publish into.
    pub fn metrics(&self) -> &SharedMetrics {
        &self.metrics
    }

    /// Wait on the loops. They only end through [`MonitorHandle::shutdown`],
    /// so in the daemon this never returns.
    pub async fn wait(self) {
        let MonitorHandle {
            shutdown: _shutdown,
            tasks,
            ..
        } = self;
        join_all_loops(tasks).await;
    }

    /// Signal every loop to stop and wait for them. No final flush.
    pub async fn shutdown(self) {
        // Receivers may already be gone if every loop exited.
        let _ = self.shutdown.send(true);
        join_all_loops(self.tasks).await;
        info!("Monitor stopped");
    }
}

async fn join_all_loops(tasks: Vec<JoinHandle<()>>) {
    for result in join_all(tasks).await {
        if let Err(err) = result {
            error!("Monitor loop panicked: {}", err);
        }
    }
}
