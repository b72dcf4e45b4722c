//! Parsers for the OS counter formats.
//!
//! These are pure functions over file contents; the samplers own the I/O.

use std::str::FromStr;

/// Aggregate CPU time counters from the first line of `/proc/stat`.
///
/// All values are cumulative ticks since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuTimes {
    /// Ticks spent doing nothing, including waiting on I/O.
    ///
    /// `None` if the sum does not fit in a `u64`.
    pub fn idle_time(&self) -> Option<u64> {
        self.idle.checked_add(self.iowait)
    }

    /// Sum of every counter, `None` on overflow.
    pub fn total_time(&self) -> Option<u64> {
        [
            self.nice,
            self.system,
            self.idle,
            self.iowait,
            self.irq,
            self.softirq,
            self.steal,
        ]
        .into_iter()
        .try_fold(self.user, u64::checked_add)
    }
}

impl FromStr for CpuTimes {
    type Err = String;

    /// Parse the aggregate line, e.g. `cpu  4705 356 584 3699 23 23 0 0 0 0`.
    ///
    /// Only the first line is considered. Counters beyond `steal` (guest,
    /// guest_nice) are ignored; counters missing at the end of the line
    /// read as zero since older kernels stop before `steal`.
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let line = content.lines().next().ok_or("empty source")?;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some(label) if label.starts_with("cpu") => {}
            Some(label) => return Err(format!("unexpected label {label:?}")),
            None => return Err("empty first line".to_string()),
        }

        let mut counters = [0u64; 8];
        for (slot, token) in counters.iter_mut().zip(tokens) {
            *slot = token
                .parse()
                .map_err(|_| format!("invalid counter {token:?}"))?;
        }

        let [user, nice, system, idle, iowait, irq, softirq, steal] = counters;
        Ok(Self {
            user,
            nice,
            system,
            idle,
            iowait,
            irq,
            softirq,
            steal,
        })
    }
}

/// The two `/proc/meminfo` keys the memory sampler needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemInfo {
    pub total: u64,
    pub available: u64,
}

impl MemInfo {
    /// Extract `MemTotal` and `MemAvailable` from `KEY: VALUE UNIT` lines.
    ///
    /// Scanning stops at `MemAvailable`. This relies on the kernel listing
    /// `MemTotal` before it, which every current kernel does; a source with
    /// the opposite order would read `MemTotal` as 0. Missing or unparsable
    /// values stay 0.
    pub fn parse(content: &str) -> Self {
        let mut info = Self::default();

        for line in content.lines() {
            let Some((key, rest)) = line.split_once(':') else {
                continue;
            };
            let value = rest
                .split_whitespace()
                .next()
                .and_then(|v| v.parse::<u64>().ok());

            match (key.trim(), value) {
                ("MemTotal", Some(v)) => info.total = v,
                ("MemAvailable", v) => {
                    info.available = v.unwrap_or(0);
                    break;
                }
                _ => {}
            }
        }

        info
    }
}

/// Parse a power sensor reading in microwatts.
///
/// Integer and float tokens are both accepted.
pub fn parse_microwatts(content: &str) -> Option<f64> {
    content
        .split_whitespace()
        .next()?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
