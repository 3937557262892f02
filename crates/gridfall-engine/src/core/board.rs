use std::fmt;

use crate::OutOfRangeError;

use super::{
    cell::{BoardSize, Cell},
    piece::Piece,
};

/// Single row of the board stored as a bitmask.
///
/// Bit `n` (LSB first) holds the occupancy of column `n`. Columns at or beyond the board
/// width are never set, so a row is full when the low `cols` bits are all set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct BitRow {
    bits: u32,
}

impl BitRow {
    const EMPTY: Self = Self { bits: 0 };

    const fn full_mask(cols: usize) -> u32 {
        if cols >= u32::BITS as usize {
            u32::MAX
        } else {
            (1 << cols) - 1
        }
    }

    #[inline]
    fn is_filled(self, cols: usize) -> bool {
        let mask = Self::full_mask(cols);
        self.bits & mask == mask
    }

    #[inline]
    fn is_cell_occupied(self, col: usize) -> bool {
        self.bits & (1 << col) != 0
    }

    #[inline]
    fn occupy_cell(&mut self, col: usize) {
        self.bits |= 1 << col;
    }

    #[inline]
    fn occupied_count(self) -> usize {
        self.bits.count_ones() as usize
    }
}

/// Occupancy grid of permanently placed blocks.
///
/// A cell is occupied iff a landed piece left a block there. The board is only changed
/// by [`Board::commit`] and [`Board::clear_full_rows`]; its size never changes.
///
/// # Example
///
/// ```
/// use gridfall_engine::{Board, BoardSize, Cell, Piece, PieceKind};
///
/// let mut board = Board::new(BoardSize::DEFAULT);
/// let mut piece = Piece::spawn(PieceKind::Square, board.size());
/// piece.move_to_bottom(&board);
/// board.commit(&piece).unwrap();
///
/// assert!(board.is_occupied(Cell::new(19, 10)).unwrap());
/// assert_eq!(board.occupied_count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: BoardSize,
    rows: Vec<BitRow>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardSize::DEFAULT)
    }
}

impl Board {
    #[must_use]
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            rows: vec![BitRow::EMPTY; size.rows()],
        }
    }

    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Empties every cell.
    pub fn reset(&mut self) {
        self.rows.fill(BitRow::EMPTY);
    }

    /// Returns whether `cell` holds a permanent block.
    pub fn is_occupied(&self, cell: Cell) -> Result<bool, OutOfRangeError> {
        self.check_range(cell)?;
        Ok(self.rows[cell.row()].is_cell_occupied(cell.col()))
    }

    /// Returns whether `cell` lies on the board and is empty.
    #[must_use]
    pub fn is_free(&self, cell: Cell) -> bool {
        self.is_occupied(cell).is_ok_and(|occupied| !occupied)
    }

    /// Returns whether every column of `row` is occupied.
    ///
    /// Rows outside the board are never full.
    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|r| r.is_filled(self.size.cols()))
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows.iter().map(|row| row.occupied_count()).sum()
    }

    /// Marks the piece's cells as occupied.
    ///
    /// All cells are validated before anything is written, so a failed commit leaves the
    /// board untouched.
    pub fn commit(&mut self, piece: &Piece) -> Result<(), OutOfRangeError> {
        for cell in piece.cells() {
            self.check_range(*cell)?;
        }
        for cell in piece.cells() {
            self.rows[cell.row()].occupy_cell(cell.col());
        }
        Ok(())
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows are scanned bottom-up once. Each surviving row moves down by the number of
    /// removed rows beneath it and the vacated rows at the top are emptied, so removed rows
    /// need not be contiguous.
    pub fn clear_full_rows(&mut self) -> usize {
        let cols = self.size.cols();
        let mut count = 0;
        for row in (0..self.rows.len()).rev() {
            if self.rows[row].is_filled(cols) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[row + count] = self.rows[row];
            }
        }
        self.rows[..count].fill(BitRow::EMPTY);
        count
    }

    /// Returns whether the piece overlaps a permanent block (or leaves the grid).
    ///
    /// Checked right after a piece spawns; a `true` result ends the game.
    #[must_use]
    pub fn is_game_over(&self, piece: &Piece) -> bool {
        piece.cells().iter().any(|cell| !self.is_free(*cell))
    }

    /// Creates a board from ASCII art.
    ///
    /// `#` is an occupied cell and `.` an empty one; other characters are ignored. Lines
    /// describe rows from the top and blank lines are skipped. Missing rows at the bottom
    /// are left empty.
    ///
    /// # Panics
    ///
    /// Panics if a row does not have exactly `size.cols()` cells or if there are more rows
    /// than the board has.
    #[must_use]
    pub fn from_ascii(size: BoardSize, art: &str) -> Self {
        let mut board = Self::new(size);
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= size.rows(),
            "expected at most {} rows, got {}",
            size.rows(),
            lines.len()
        );

        for (row, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                chars.len(),
                size.cols(),
                "Each row must have exactly {} cells, got {} at row {}",
                size.cols(),
                chars.len(),
                row
            );
            for (col, &ch) in chars.iter().enumerate() {
                if ch == '#' {
                    board.rows[row].occupy_cell(col);
                }
            }
        }
        board
    }

    fn check_range(&self, cell: Cell) -> Result<(), OutOfRangeError> {
        if self.size.contains(cell) {
            Ok(())
        } else {
            Err(OutOfRangeError {
                cell,
                size: self.size,
            })
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for col in 0..self.size.cols() {
                let ch = if row.is_cell_occupied(col) { '#' } else { '.' };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PieceKind;

    fn fill_row(board: &mut Board, row: usize) {
        for col in 0..board.size.cols() {
            board.rows[row].occupy_cell(col);
        }
    }

    fn small_size() -> BoardSize {
        BoardSize::new(6, 8).unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::default();
        assert_eq!(board.occupied_count(), 0);
        for cell in board.size().cells() {
            assert_eq!(board.is_occupied(cell), Ok(false), "cell {cell}");
        }
    }

    #[test]
    fn test_is_occupied_out_of_range() {
        let board = Board::default();
        let err = board.is_occupied(Cell::new(20, 0)).unwrap_err();
        assert_eq!(err.cell, Cell::new(20, 0));
        assert!(board.is_occupied(Cell::new(0, 20)).is_err());
        assert!(!board.is_free(Cell::new(0, 20)));
    }

    #[test]
    fn test_bit_row_full_mask_at_max_width() {
        let mut row = BitRow::EMPTY;
        for col in 0..32 {
            assert!(!row.is_filled(32));
            row.occupy_cell(col);
        }
        assert!(row.is_filled(32));
    }

    #[test]
    fn test_clear_full_rows_non_contiguous() {
        let mut board = Board::default();
        for row in 0..20 {
            if [5, 10, 15].contains(&row) {
                fill_row(&mut board, row);
            } else {
                // Partial rows: a diagonal marker plus column 19 on odd rows
                board.rows[row].occupy_cell(row % 20);
                if row % 2 == 1 {
                    board.rows[row].occupy_cell(19);
                }
            }
        }
        let before = board.clone();
        let count_before = board.occupied_count();

        assert_eq!(board.clear_full_rows(), 3);
        assert_eq!(board.occupied_count(), count_before - 60);

        for row in 0..3 {
            assert_eq!(board.rows[row], BitRow::EMPTY, "row {row} should be empty");
        }
        // Rows below the lowest full row stay in place
        for row in 16..20 {
            assert_eq!(board.rows[row], before.rows[row]);
        }
        // Rows between full rows shift by the number of full rows beneath them
        for row in 11..15 {
            assert_eq!(board.rows[row + 1], before.rows[row]);
        }
        for row in 6..10 {
            assert_eq!(board.rows[row + 2], before.rows[row]);
        }
        for row in 0..5 {
            assert_eq!(board.rows[row + 3], before.rows[row]);
        }
    }

    #[test]
    fn test_clear_full_rows_idempotent() {
        let mut board = Board::from_ascii(
            small_size(),
            "
            ........
            ........
            ...#....
            ########
            #.######
            ########
            ",
        );
        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(
            board.to_string(),
            "........\n........\n........\n........\n...#....\n#.######\n"
        );
    }

    #[test]
    fn test_clear_full_rows_all_filled() {
        let size = small_size();
        let mut board = Board::new(size);
        for row in 0..size.rows() {
            fill_row(&mut board, row);
        }
        assert_eq!(board.clear_full_rows(), size.rows());
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_commit_marks_cells() {
        let mut board = Board::default();
        let piece = Piece::spawn(PieceKind::T, board.size());
        board.commit(&piece).unwrap();
        for cell in piece.cells() {
            assert_eq!(board.is_occupied(*cell), Ok(true));
        }
        assert_eq!(board.occupied_count(), 4);
    }

    #[test]
    fn test_is_game_over() {
        let size = BoardSize::DEFAULT;
        let mut board = Board::new(size);
        let piece = Piece::spawn(PieceKind::Strip, size);
        assert!(!board.is_game_over(&piece));

        for col in 0..size.cols() {
            if col != 3 {
                board.rows[0].occupy_cell(col);
            }
        }
        assert!(board.is_game_over(&piece));
    }

    #[test]
    fn test_from_ascii_and_display() {
        let art = "#.......\n.#......\n";
        let board = Board::from_ascii(small_size(), art);
        assert_eq!(board.is_occupied(Cell::new(0, 0)), Ok(true));
        assert_eq!(board.is_occupied(Cell::new(1, 1)), Ok(true));
        assert_eq!(board.occupied_count(), 2);
        assert!(board.to_string().starts_with(art));
    }

    #[test]
    fn test_reset() {
        let mut board = Board::new(small_size());
        fill_row(&mut board, 3);
        board.reset();
        assert_eq!(board.occupied_count(), 0);
    }
}
