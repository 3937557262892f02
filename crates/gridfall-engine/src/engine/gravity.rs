use std::time::Duration;

use crate::InvalidGravityConfig;

use super::config::GravityConfig;

/// Drop interval that tightens as rows are cleared.
///
/// # Example
///
/// ```
/// use gridfall_engine::{Gravity, GravityConfig};
///
/// let mut gravity = Gravity::new(GravityConfig::default()).unwrap();
/// assert_eq!(gravity.interval_ms(), 625);
///
/// assert!(!gravity.record_cleared_rows(11));
/// assert!(gravity.record_cleared_rows(1));
/// assert_eq!(gravity.interval_ms(), 600);
/// ```
#[derive(Debug, Clone)]
pub struct Gravity {
    config: GravityConfig,
    cleared_rows: usize,
}

impl Gravity {
    pub fn new(config: GravityConfig) -> Result<Self, InvalidGravityConfig> {
        config.validate()?;
        Ok(Self {
            config,
            cleared_rows: 0,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &GravityConfig {
        &self.config
    }

    /// Number of speed-ups earned so far.
    #[must_use]
    pub const fn speed_level(&self) -> usize {
        self.cleared_rows / self.config.rows_per_speedup
    }

    /// Milliseconds between two gravity drops at the current speed.
    #[must_use]
    pub fn interval_ms(&self) -> u64 {
        let level = u64::try_from(self.speed_level()).unwrap_or(u64::MAX);
        let reduction = level.saturating_mul(self.config.interval_step_ms);
        self.config
            .initial_interval_ms
            .saturating_sub(reduction)
            .max(self.config.min_interval_ms)
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms())
    }

    /// Number of display frames between two drops at `fps`, at least one.
    #[must_use]
    pub fn frames_per_drop(&self, fps: u64) -> u64 {
        (self.interval_ms().saturating_mul(fps) / 1000).max(1)
    }

    /// Adds cleared rows and returns whether the interval shrank as a result.
    pub fn record_cleared_rows(&mut self, rows: usize) -> bool {
        let before = self.interval_ms();
        self.cleared_rows += rows;
        self.interval_ms() < before
    }

    pub fn reset(&mut self) {
        self.cleared_rows = 0;
    }
}
