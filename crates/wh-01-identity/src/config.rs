//! Configuration types for key search

use std::time::Duration;

use serde::Deserialize;

/// Default difficulty for a freshly generated identity
pub const DEFAULT_WORKBIT: u32 = 8;

/// Runtime configuration for [`KeySearch`](crate::KeySearch)
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeySearchConfig {
    /// Minimum workbit the key must reach
    pub workbit: u32,

    /// Number of search threads (0 = 2 * num_cpus - 1)
    pub workers: usize,

    /// Give up after this many seconds (None = search until found)
    pub timeout_secs: Option<u64>,

    /// Log search progress at this interval in seconds (None = only on completion)
    pub progress_secs: Option<u64>,
}

impl Default for KeySearchConfig {
    fn default() -> Self {
        Self {
            workbit: DEFAULT_WORKBIT,
            workers: 0,
            timeout_secs: None,
            progress_secs: None,
        }
    }
}

impl KeySearchConfig {
    /// Config with the given difficulty and worker count, no deadline.
    pub fn new(workbit: u32, workers: usize) -> Self {
        Self {
            workbit,
            workers,
            ..Self::default()
        }
    }

    /// Deadline as a `Duration`.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Progress interval as a `Duration`.
    pub fn progress_interval(&self) -> Option<Duration> {
        self.progress_secs.filter(|s| *s > 0).map(Duration::from_secs)
    }

    /// Effective thread count after resolving `workers == 0`.
    pub fn resolved_workers(&self) -> usize {
        if self.workers == 0 {
            (num_cpus::get() * 2).saturating_sub(1).max(1)
        } else {
            self.workers
        }
    }
}
