//! Falling-block puzzle engine.
//!
//! [`core`] holds the board and piece geometry, including the per-kind rotation rules.
//! [`engine`] drives a game on top of it: spawning, gravity, landing, row clearing and the
//! game-over check.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A cell outside the board was queried or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cell {cell} is outside the {}x{} board", size.rows(), size.cols())]
pub struct OutOfRangeError {
    pub cell: Cell,
    pub size: BoardSize,
}

/// Board dimensions that cannot host the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display(
    "invalid board size {rows}x{cols}: need at least {} rows and {}..={} columns",
    BoardSize::MIN_ROWS,
    BoardSize::MIN_COLS,
    BoardSize::MAX_COLS
)]
pub struct InvalidBoardSize {
    pub rows: usize,
    pub cols: usize,
}

#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum SessionError {
    /// Landing a piece failed because one of its cells was off the board.
    #[display("session invariant violated: {_0}")]
    InvariantViolation(OutOfRangeError),
}

/// A piece seed that is not exactly 32 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {input:?}: expected 32 hex digits")]
pub struct InvalidSeed {
    pub input: String,
}

/// Gravity settings that cannot produce a playable drop schedule.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid gravity config: {reason}")]
pub struct InvalidGravityConfig {
    pub reason: &'static str,
}
