use serde::{Deserialize, Serialize};

use crate::{BoardSize, InvalidGravityConfig};

use super::piece_generator::PieceSeed;

/// Drop interval schedule.
///
/// Gravity starts at `initial_interval_ms` between drops. Every `rows_per_speedup` cleared
/// rows the interval shrinks by `interval_step_ms`, down to `min_interval_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GravityConfig {
    pub initial_interval_ms: u64,
    pub interval_step_ms: u64,
    pub min_interval_ms: u64,
    pub rows_per_speedup: usize,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            initial_interval_ms: 625,
            interval_step_ms: 25,
            min_interval_ms: 100,
            rows_per_speedup: 12,
        }
    }
}

impl GravityConfig {
    pub fn validate(&self) -> Result<(), InvalidGravityConfig> {
        let reason = if self.min_interval_ms == 0 {
            "min_interval_ms must be positive"
        } else if self.initial_interval_ms < self.min_interval_ms {
            "initial_interval_ms must not be below min_interval_ms"
        } else if self.rows_per_speedup == 0 {
            "rows_per_speedup must be positive"
        } else {
            return Ok(());
        };
        Err(InvalidGravityConfig { reason })
    }
}

/// Everything needed to start a game session.
///
/// Missing fields fall back to their defaults, so `{}` is a valid configuration file.
///
/// # Example
///
/// ```
/// use gridfall_engine::SessionConfig;
///
/// let config: SessionConfig =
///     serde_json::from_str(r#"{"board": {"rows": 16, "cols": 10}}"#).unwrap();
/// assert_eq!(config.board.cols(), 10);
/// assert_eq!(config.gravity.rows_per_speedup, 12);
/// assert!(config.seed.is_none());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub board: BoardSize,
    pub gravity: GravityConfig,
    /// Seed for the piece sequence; a random one is drawn when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<PieceSeed>,
}
