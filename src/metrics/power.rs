//! Power draw sampler.

use crate::error::Result;
use crate::metrics::data::{Metric, SharedMetrics};
use crate::metrics::sources::parse_microwatts;
use crate::metrics::traits::PeriodicTask;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Placeholder range in whole watts used when no sensor is present.
/// Lower bound inclusive, upper bound exclusive.
pub const FALLBACK_WATTS: Range<u32> = 50..70;

const MICROWATTS_PER_WATT: f64 = 1_000_000.0;

/// Reports battery power draw, or a placeholder when there is no battery.
///
/// A missing or unparsable sensor is the normal case on servers and
/// desktops, so this sampler never fails a tick.
#[derive(Debug)]
pub struct PowerSampler {
    path: PathBuf,
    rng: SmallRng,
}

impl PowerSampler {
    /// Create a sampler with an entropy-seeded fallback generator.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_rng(path, SmallRng::from_entropy())
    }

    /// Create a sampler with a caller-supplied fallback generator.
    pub fn with_rng(path: impl AsRef<Path>, rng: SmallRng) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            rng,
        }
    }

    /// Current draw in watts.
    pub async fn sample(&mut self) -> f64 {
        match self.read_sensor().await {
            Some(microwatts) => microwatts / MICROWATTS_PER_WATT,
            None => self.fallback(),
        }
    }

    async fn read_sensor(&self) -> Option<f64> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let reading = parse_microwatts(&content);
                if reading.is_none() {
                    debug!("Ignoring unparsable power reading in {:?}", self.path);
                }
                reading
            }
            Err(_) => None,
        }
    }

    fn fallback(&mut self) -> f64 {
        f64::from(self.rng.gen_range(FALLBACK_WATTS))
    }
}

impl PeriodicTask for PowerSampler {
    fn name(&self) -> &'static str {
        Metric::Power.name()
    }

    async fn tick(&mut self, metrics: &SharedMetrics) -> Result<()> {
        let watts = self.sample().await;
        metrics.store(Metric::Power, watts).await;
        debug!("Power usage {:.1} W", watts);
        Ok(())
    }
}
