//! Per-kind rotation rules.
//!
//! Rotation does not use a rotation matrix. Each kind rebuilds its four cells from one
//! or two anchor cells with fixed offsets for every state transition. Only the geometry
//! is computed here; board checks live in [`Piece::can_rotate`].
//!
//! [`Piece::can_rotate`]: super::piece::Piece::can_rotate

use super::{
    cell::Cell,
    piece::{Facing, NAxis, PieceState, StripAxis},
};

/// Cells of the next rotation state, or `None` if a target cell would have a negative
/// coordinate.
pub(super) fn rotate(state: PieceState, cells: [Cell; 4]) -> Option<(PieceState, [Cell; 4])> {
    match state {
        PieceState::L(facing) => {
            l_shape(facing, cells).map(|(facing, cells)| (PieceState::L(facing), cells))
        }
        PieceState::Gamma(facing) => {
            gamma_shape(facing, cells).map(|(facing, cells)| (PieceState::Gamma(facing), cells))
        }
        PieceState::Strip(axis) => {
            strip_shape(axis, cells).map(|(axis, cells)| (PieceState::Strip(axis), cells))
        }
        PieceState::T(facing) => {
            t_shape(facing, cells).map(|(facing, cells)| (PieceState::T(facing), cells))
        }
        PieceState::Square => Some((PieceState::Square, cells)),
        PieceState::LeftN(axis) => {
            left_n_shape(axis, cells).map(|(axis, cells)| (PieceState::LeftN(axis), cells))
        }
        PieceState::RightN(axis) => {
            right_n_shape(axis, cells).map(|(axis, cells)| (PieceState::RightN(axis), cells))
        }
    }
}

/// Cell in the row of `row_of` and the column of `col_of`, displaced by the deltas.
fn mix(row_of: Cell, col_of: Cell, d_row: isize, d_col: isize) -> Option<Cell> {
    Cell::new(row_of.row(), col_of.col()).offset(d_row, d_col)
}

fn around(pivot: Cell, offsets: [(isize, isize); 4]) -> Option<[Cell; 4]> {
    let mut cells = [pivot; 4];
    for (cell, (d_row, d_col)) in cells.iter_mut().zip(offsets) {
        *cell = pivot.offset(d_row, d_col)?;
    }
    Some(cells)
}

// L and Gamma keep their last two cells as the first two cells of the new state and
// grow the remaining two from them.
fn l_shape(facing: Facing, [_, _, a, b]: [Cell; 4]) -> Option<(Facing, [Cell; 4])> {
    let (next, x, y) = match facing {
        Facing::Down => (Facing::Left, mix(b, a, 1, 0)?, mix(b, a, 1, -1)?),
        Facing::Left => (Facing::Up, mix(a, b, 0, -1)?, mix(b, b, -1, -1)?),
        Facing::Up => (Facing::Right, mix(b, a, -1, 0)?, mix(b, a, -1, 1)?),
        Facing::Right => (Facing::Down, mix(a, b, 0, 1)?, mix(a, b, 1, 1)?),
    };
    Some((next, [a, b, x, y]))
}

fn gamma_shape(facing: Facing, [_, _, a, b]: [Cell; 4]) -> Option<(Facing, [Cell; 4])> {
    let (next, x, y) = match facing {
        Facing::Down => (Facing::Right, mix(b, a, 1, 0)?, mix(b, a, 1, 1)?),
        Facing::Right => (Facing::Up, mix(a, b, 0, 1)?, mix(b, b, -1, 1)?),
        Facing::Up => (Facing::Left, mix(b, a, -1, 0)?, mix(b, a, -1, -1)?),
        Facing::Left => (Facing::Down, mix(a, b, 0, -1)?, mix(a, b, 1, -1)?),
    };
    Some((next, [a, b, x, y]))
}

fn strip_shape(axis: StripAxis, [origin, ..]: [Cell; 4]) -> Option<(StripAxis, [Cell; 4])> {
    match axis {
        StripAxis::Landscape => {
            let cells = around(origin, [(0, 0), (1, 0), (2, 0), (3, 0)])?;
            Some((StripAxis::Portrait, cells))
        }
        StripAxis::Portrait => {
            let cells = around(origin, [(0, 0), (0, 1), (0, 2), (0, 3)])?;
            Some((StripAxis::Landscape, cells))
        }
    }
}

// T turns around its middle cell (cells[1]); the stem is always cells[3].
fn t_shape(facing: Facing, [_, pivot, _, _]: [Cell; 4]) -> Option<(Facing, [Cell; 4])> {
    let (next, offsets) = match facing {
        Facing::Down => (Facing::Left, [(-1, 0), (0, 0), (1, 0), (0, -1)]),
        Facing::Left => (Facing::Up, [(0, -1), (0, 0), (0, 1), (-1, 0)]),
        Facing::Up => (Facing::Right, [(1, 0), (0, 0), (-1, 0), (0, 1)]),
        Facing::Right => (Facing::Down, [(0, -1), (0, 0), (0, 1), (1, 0)]),
    };
    Some((next, around(pivot, offsets)?))
}

fn left_n_shape(axis: NAxis, [_, _, pivot, _]: [Cell; 4]) -> Option<(NAxis, [Cell; 4])> {
    let (next, offsets) = match axis {
        NAxis::Vertical => (NAxis::Horizontal, [(1, -1), (1, 0), (0, 0), (0, 1)]),
        NAxis::Horizontal => (NAxis::Vertical, [(-1, -1), (0, -1), (0, 0), (1, 0)]),
    };
    Some((next, around(pivot, offsets)?))
}

fn right_n_shape(axis: NAxis, [_, pivot, _, _]: [Cell; 4]) -> Option<(NAxis, [Cell; 4])> {
    let (next, offsets) = match axis {
        NAxis::Vertical => (NAxis::Horizontal, [(0, -1), (0, 0), (1, 0), (1, 1)]),
        NAxis::Horizontal => (NAxis::Vertical, [(-1, 0), (0, 0), (0, -1), (1, -1)]),
    };
    Some((next, around(pivot, offsets)?))
}
