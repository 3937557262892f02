//! Grid geometry: cells, the board and the falling piece.

pub use self::{board::*, cell::*, piece::*};

pub(crate) mod board;
pub(crate) mod cell;
pub(crate) mod piece;
mod rotation;
