//! Game flow on top of the board and piece geometry.
//!
//! - [`GameSession`] - spawn, gravity, landing, row clearing and game over
//! - [`Gravity`] - drop interval that tightens as rows are cleared
//! - [`PieceGenerator`] / [`PieceSeed`] - seeded uniform piece kinds
//! - [`GameStats`] - landed pieces and cleared rows
//! - [`SessionConfig`] / [`GravityConfig`] - serde-loadable settings

pub use self::{config::*, game_session::*, game_stats::*, gravity::*, piece_generator::*};

mod config;
mod game_session;
mod game_stats;
mod gravity;
mod piece_generator;
