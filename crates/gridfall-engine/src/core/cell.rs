use serde::{Deserialize, Serialize};

use crate::InvalidBoardSize;

/// A position on the board grid.
///
/// Row 0 is the top of the board and column 0 is its left edge. A `Cell` is a plain
/// value: whether it lies on a particular board is decided by [`BoardSize::contains`].
///
/// # Example
///
/// ```
/// use gridfall_engine::Cell;
///
/// let cell = Cell::new(0, 10);
/// assert_eq!(cell.down(), Some(Cell::new(1, 10)));
/// assert_eq!(cell.up(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("({row}, {col})")]
pub struct Cell {
    row: usize,
    col: usize,
}

impl Cell {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    #[must_use]
    pub const fn col(self) -> usize {
        self.col
    }

    /// Returns the cell displaced by the given row and column deltas.
    ///
    /// Returns `None` if either coordinate would become negative. The upper bound is not
    /// checked here since it depends on the board.
    #[must_use]
    pub const fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let Some(row) = self.row.checked_add_signed(d_row) else {
            return None;
        };
        let Some(col) = self.col.checked_add_signed(d_col) else {
            return None;
        };
        Some(Self { row, col })
    }

    #[must_use]
    pub const fn left(self) -> Option<Self> {
        self.offset(0, -1)
    }

    #[must_use]
    pub const fn right(self) -> Option<Self> {
        self.offset(0, 1)
    }

    #[must_use]
    pub const fn up(self) -> Option<Self> {
        self.offset(-1, 0)
    }

    #[must_use]
    pub const fn down(self) -> Option<Self> {
        self.offset(1, 0)
    }
}

#[derive(Deserialize)]
struct BoardSizeRepr {
    rows: usize,
    cols: usize,
}

/// Dimensions of the board grid.
///
/// The default board is 20×20. Other sizes are accepted as long as every piece can
/// spawn around the centre column and a full row fits into a 32-bit row mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardSizeRepr")]
pub struct BoardSize {
    rows: usize,
    cols: usize,
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<BoardSizeRepr> for BoardSize {
    type Error = InvalidBoardSize;

    fn try_from(repr: BoardSizeRepr) -> Result<Self, Self::Error> {
        Self::new(repr.rows, repr.cols)
    }
}

impl BoardSize {
    pub const DEFAULT: Self = Self { rows: 20, cols: 20 };

    pub const MIN_ROWS: usize = 4;
    pub const MIN_COLS: usize = 8;
    pub const MAX_COLS: usize = 32;

    pub const fn new(rows: usize, cols: usize) -> Result<Self, InvalidBoardSize> {
        if rows < Self::MIN_ROWS || cols < Self::MIN_COLS || cols > Self::MAX_COLS {
            return Err(InvalidBoardSize { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    #[must_use]
    pub const fn rows(self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(self) -> usize {
        self.cols
    }

    /// Column around which new pieces are laid out.
    #[must_use]
    pub const fn spawn_col(self) -> usize {
        self.cols / 2
    }

    #[must_use]
    pub const fn contains(self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Iterates over every cell of the grid in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Cell::new(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_offset_rejects_negative() {
        let cell = Cell::new(0, 0);
        assert_eq!(cell.left(), None);
        assert_eq!(cell.up(), None);
        assert_eq!(cell.offset(2, 3), Some(Cell::new(2, 3)));
        assert_eq!(Cell::new(5, 5).offset(-5, -1), Some(Cell::new(0, 4)));
    }

    #[test]
    fn test_board_size_validation() {
        assert!(BoardSize::new(20, 20).is_ok());
        assert!(BoardSize::new(4, 8).is_ok());
        assert!(BoardSize::new(3, 20).is_err());
        assert!(BoardSize::new(20, 7).is_err());
        assert!(BoardSize::new(20, 33).is_err());
    }

    #[test]
    fn test_board_size_contains() {
        let size = BoardSize::DEFAULT;
        assert!(size.contains(Cell::new(0, 0)));
        assert!(size.contains(Cell::new(19, 19)));
        assert!(!size.contains(Cell::new(20, 0)));
        assert!(!size.contains(Cell::new(0, 20)));
    }

    #[test]
    fn test_board_size_cells_row_major() {
        let size = BoardSize::new(4, 8).unwrap();
        let cells: Vec<_> = size.cells().collect();
        assert_eq!(cells.len(), 32);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[1], Cell::new(0, 1));
        assert_eq!(cells[8], Cell::new(1, 0));
        assert_eq!(cells[31], Cell::new(3, 7));
    }

    #[test]
    fn test_board_size_deserialize_validates() {
        let size: BoardSize = serde_json::from_str(r#"{"rows":10,"cols":12}"#).unwrap();
        assert_eq!((size.rows(), size.cols()), (10, 12));
        assert!(serde_json::from_str::<BoardSize>(r#"{"rows":10,"cols":40}"#).is_err());
    }
}
