use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use crate::OutOfRangeError;

use super::{
    board::Board,
    cell::{BoardSize, Cell},
    rotation,
};

/// Number of cells in every piece.
pub const CELLS_PER_PIECE: usize = 4;

/// The seven piece shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[repr(u8)]
pub enum PieceKind {
    /// L-piece: a row of three with a foot hanging below its right end.
    L = 0,
    /// Mirrored L: a row of three with a foot below its left end.
    Gamma = 1,
    /// Straight piece of four (I-piece).
    Strip = 2,
    /// T-piece.
    T = 3,
    /// 2×2 square (O-piece).
    Square = 4,
    /// S-piece.
    LeftN = 5,
    /// Z-piece.
    RightN = 6,
}

/// Uniform 7-way choice of piece kind.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::L,
        Self::Gamma,
        Self::Strip,
        Self::T,
        Self::Square,
        Self::LeftN,
        Self::RightN,
    ];
}

/// Orientation of the L, Gamma and T pieces.
///
/// The name is the side the piece's foot (or stem) points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Down,
    Left,
    Up,
    Right,
}

/// Orientation of the Strip piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StripAxis {
    Landscape,
    Portrait,
}

/// Orientation of the S and Z pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NAxis {
    Vertical,
    Horizontal,
}

/// Piece kind together with its kind-specific rotation state.
///
/// Each variant only admits the states its kind can be in, so an L piece can never be
/// `Landscape`. Rotation cycles:
///
/// - `L`, `T`: Down → Left → Up → Right → Down
/// - `Gamma`: Down → Right → Up → Left → Down
/// - `Strip`: Landscape ↔ Portrait
/// - `LeftN`, `RightN`: Vertical ↔ Horizontal
/// - `Square`: single state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum PieceState {
    L(Facing),
    Gamma(Facing),
    Strip(StripAxis),
    T(Facing),
    Square,
    LeftN(NAxis),
    RightN(NAxis),
}

impl PieceState {
    /// Spawn state of the given kind.
    #[must_use]
    pub const fn initial(kind: PieceKind) -> Self {
        match kind {
            PieceKind::L => Self::L(Facing::Down),
            PieceKind::Gamma => Self::Gamma(Facing::Down),
            PieceKind::Strip => Self::Strip(StripAxis::Landscape),
            PieceKind::T => Self::T(Facing::Down),
            PieceKind::Square => Self::Square,
            PieceKind::LeftN => Self::LeftN(NAxis::Vertical),
            PieceKind::RightN => Self::RightN(NAxis::Vertical),
        }
    }

    #[must_use]
    pub const fn kind(self) -> PieceKind {
        match self {
            Self::L(_) => PieceKind::L,
            Self::Gamma(_) => PieceKind::Gamma,
            Self::Strip(_) => PieceKind::Strip,
            Self::T(_) => PieceKind::T,
            Self::Square => PieceKind::Square,
            Self::LeftN(_) => PieceKind::LeftN,
            Self::RightN(_) => PieceKind::RightN,
        }
    }
}

/// The falling piece: four cells plus the rotation state they were built for.
///
/// Movement follows a check-then-act contract. `can_move_*` and [`Piece::can_rotate`]
/// inspect the board without changing anything; `move_*` and [`Piece::rotate`] change
/// the cells without looking at the board, so callers ask first.
///
/// # Example
///
/// ```
/// use gridfall_engine::{Board, Cell, Piece, PieceKind};
///
/// let board = Board::default();
/// let mut piece = Piece::spawn(PieceKind::L, board.size());
///
/// if piece.can_move_left(&board) {
///     piece.move_left();
/// }
/// if piece.can_rotate(&board) {
///     piece.rotate();
/// }
/// assert!(piece.is_displayed_at(Cell::new(0, 11)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    state: PieceState,
    cells: [Cell; CELLS_PER_PIECE],
}

impl Piece {
    /// Creates a piece in its spawn layout near the top centre of the board.
    #[must_use]
    pub fn spawn(kind: PieceKind, size: BoardSize) -> Self {
        let c = size.spawn_col();
        let layout = match kind {
            PieceKind::L => [(0, c), (0, c + 1), (0, c + 2), (1, c + 2)],
            PieceKind::Gamma => [(0, c), (0, c - 1), (0, c - 2), (1, c - 2)],
            PieceKind::Strip => [(0, c), (0, c + 1), (0, c + 2), (0, c + 3)],
            PieceKind::T => [(0, c), (0, c + 1), (0, c + 2), (1, c + 1)],
            PieceKind::Square => [(0, c), (0, c + 1), (1, c), (1, c + 1)],
            PieceKind::LeftN => [(0, c), (1, c), (1, c + 1), (2, c + 1)],
            PieceKind::RightN => [(0, c), (1, c), (1, c - 1), (2, c - 1)],
        };
        Self {
            state: PieceState::initial(kind),
            cells: layout.map(|(row, col)| Cell::new(row, col)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.state.kind()
    }

    #[must_use]
    pub fn state(&self) -> PieceState {
        self.state
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell; CELLS_PER_PIECE] {
        &self.cells
    }

    #[must_use]
    pub fn leftmost(&self) -> usize {
        self.cells.iter().map(|cell| cell.col()).min().unwrap_or(0)
    }

    #[must_use]
    pub fn rightmost(&self) -> usize {
        self.cells.iter().map(|cell| cell.col()).max().unwrap_or(0)
    }

    #[must_use]
    pub fn upmost(&self) -> usize {
        self.cells.iter().map(|cell| cell.row()).min().unwrap_or(0)
    }

    #[must_use]
    pub fn downmost(&self) -> usize {
        self.cells.iter().map(|cell| cell.row()).max().unwrap_or(0)
    }

    /// Returns whether one of the piece's cells is `cell`.
    #[must_use]
    pub fn is_displayed_at(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    #[must_use]
    pub fn can_move_left(&self, board: &Board) -> bool {
        self.can_step(board, Cell::left)
    }

    #[must_use]
    pub fn can_move_right(&self, board: &Board) -> bool {
        self.can_step(board, Cell::right)
    }

    /// Returns whether every cell has a free, on-board cell directly below it.
    #[must_use]
    pub fn can_move_down(&self, board: &Board) -> bool {
        self.can_step(board, Cell::down)
    }

    pub fn move_left(&mut self) {
        self.step(Cell::left);
    }

    pub fn move_right(&mut self) {
        self.step(Cell::right);
    }

    pub fn move_down(&mut self) {
        self.step(Cell::down);
    }

    /// Drops the piece as far as it can fall and returns the number of rows travelled.
    pub fn move_to_bottom(&mut self, board: &Board) -> usize {
        let mut rows = 0;
        while self.can_move_down(board) {
            self.move_down();
            rows += 1;
        }
        rows
    }

    /// Returns the piece in its next rotation state, ignoring the board.
    ///
    /// Returns `None` when the rotated shape would reach past the top or left edge.
    #[must_use]
    pub fn rotated(&self) -> Option<Self> {
        let (state, cells) = rotation::rotate(self.state, self.cells)?;
        Some(Self { state, cells })
    }

    /// Returns whether the piece can turn into its next rotation state.
    ///
    /// All four target cells must be on the board and free. The square never changes
    /// shape and can always rotate.
    #[must_use]
    pub fn can_rotate(&self, board: &Board) -> bool {
        if self.state.is_square() {
            return true;
        }
        self.rotated()
            .is_some_and(|piece| piece.cells.iter().all(|cell| board.is_free(*cell)))
    }

    /// Turns the piece into its next rotation state.
    ///
    /// Callers check [`Piece::can_rotate`] first.
    pub fn rotate(&mut self) {
        if let Some(piece) = self.rotated() {
            *self = piece;
        }
    }

    /// Writes the piece's cells into the board.
    pub fn persist(&self, board: &mut Board) -> Result<(), OutOfRangeError> {
        board.commit(self)
    }

    fn can_step(&self, board: &Board, step: fn(Cell) -> Option<Cell>) -> bool {
        self.cells
            .iter()
            .all(|cell| step(*cell).is_some_and(|next| board.is_free(next)))
    }

    fn step(&mut self, step: fn(Cell) -> Option<Cell>) {
        let mut cells = self.cells;
        for cell in &mut cells {
            let Some(next) = step(*cell) else {
                return;
            };
            *cell = next;
        }
        self.cells = cells;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(coords: [(usize, usize); 4]) -> [Cell; 4] {
        coords.map(|(row, col)| Cell::new(row, col))
    }

    /// Cells moved to the origin and sorted, so shapes compare regardless of position.
    fn silhouette(piece: &Piece) -> Vec<(usize, usize)> {
        let (top, left) = (piece.upmost(), piece.leftmost());
        let mut shape: Vec<_> = piece
            .cells()
            .iter()
            .map(|cell| (cell.row() - top, cell.col() - left))
            .collect();
        shape.sort_unstable();
        shape
    }

    fn spawn_lowered(kind: PieceKind, rows: usize) -> Piece {
        let mut piece = Piece::spawn(kind, BoardSize::DEFAULT);
        for _ in 0..rows {
            piece.move_down();
        }
        piece
    }

    #[test]
    fn test_spawn_layouts() {
        let size = BoardSize::DEFAULT;
        let expected = [
            (PieceKind::L, [(0, 10), (0, 11), (0, 12), (1, 12)]),
            (PieceKind::Gamma, [(0, 10), (0, 9), (0, 8), (1, 8)]),
            (PieceKind::Strip, [(0, 10), (0, 11), (0, 12), (0, 13)]),
            (PieceKind::T, [(0, 10), (0, 11), (0, 12), (1, 11)]),
            (PieceKind::Square, [(0, 10), (0, 11), (1, 10), (1, 11)]),
            (PieceKind::LeftN, [(0, 10), (1, 10), (1, 11), (2, 11)]),
            (PieceKind::RightN, [(0, 10), (1, 10), (1, 9), (2, 9)]),
        ];
        for (kind, layout) in expected {
            let piece = Piece::spawn(kind, size);
            assert_eq!(piece.kind(), kind);
            assert_eq!(piece.state(), PieceState::initial(kind));
            assert_eq!(piece.cells(), &cells(layout), "{kind}");
        }
    }

    #[test]
    fn test_spawn_on_small_board_stays_in_bounds() {
        let size = BoardSize::new(4, 8).unwrap();
        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind, size);
            assert!(
                piece.cells().iter().all(|cell| size.contains(*cell)),
                "{kind} spawned off the board"
            );
        }
    }

    #[test]
    fn test_move_to_bottom_l_piece() {
        let board = Board::default();
        let mut piece = Piece::spawn(PieceKind::L, board.size());
        assert_eq!(piece.move_to_bottom(&board), 18);
        assert_eq!(
            piece.cells(),
            &cells([(18, 10), (18, 11), (18, 12), (19, 12)])
        );
        assert!(!piece.can_move_down(&board));
    }

    #[test]
    fn test_can_move_down_blocked_by_cell_directly_below() {
        let size = BoardSize::DEFAULT;
        let piece = spawn_lowered(PieceKind::T, 5);
        // T at rows 5-6: (5,10) (5,11) (5,12) (6,11)

        let diagonal = Board::from_ascii(size, &row_art(size, 7, &[10, 12]));
        assert!(piece.can_move_down(&diagonal));

        let under_stem = Board::from_ascii(size, &row_art(size, 7, &[11]));
        assert!(!piece.can_move_down(&under_stem));

        let under_wing = Board::from_ascii(size, &row_art(size, 6, &[12]));
        assert!(!piece.can_move_down(&under_wing));
    }

    #[test]
    fn test_horizontal_moves_stop_at_walls() {
        let board = Board::default();
        let mut piece = Piece::spawn(PieceKind::Strip, board.size());
        let mut steps = 0;
        while piece.can_move_left(&board) {
            piece.move_left();
            steps += 1;
        }
        assert_eq!(steps, 10);
        assert_eq!(piece.leftmost(), 0);

        while piece.can_move_right(&board) {
            piece.move_right();
        }
        assert_eq!(piece.rightmost(), 19);
    }

    #[test]
    fn test_horizontal_move_blocked_by_block() {
        let size = BoardSize::DEFAULT;
        let piece = Piece::spawn(PieceKind::Square, size);
        let board = Board::from_ascii(size, &row_art(size, 1, &[9]));
        assert!(!piece.can_move_left(&board));
        assert!(piece.can_move_right(&board));
    }

    #[test]
    fn test_rotation_silhouettes() {
        let expected: [(PieceKind, &[&[(usize, usize)]]); 3] = [
            (
                PieceKind::L,
                &[
                    &[(0, 0), (0, 1), (0, 2), (1, 2)],
                    &[(0, 1), (1, 1), (2, 0), (2, 1)],
                    &[(0, 0), (1, 0), (1, 1), (1, 2)],
                    &[(0, 0), (0, 1), (1, 0), (2, 0)],
                ],
            ),
            (
                PieceKind::Gamma,
                &[
                    &[(0, 0), (0, 1), (0, 2), (1, 0)],
                    &[(0, 0), (1, 0), (2, 0), (2, 1)],
                    &[(0, 2), (1, 0), (1, 1), (1, 2)],
                    &[(0, 0), (0, 1), (1, 1), (2, 1)],
                ],
            ),
            (
                PieceKind::T,
                &[
                    &[(0, 0), (0, 1), (0, 2), (1, 1)],
                    &[(0, 1), (1, 0), (1, 1), (2, 1)],
                    &[(0, 1), (1, 0), (1, 1), (1, 2)],
                    &[(0, 0), (1, 0), (1, 1), (2, 0)],
                ],
            ),
        ];

        let board = Board::default();
        for (kind, shapes) in expected {
            let mut piece = spawn_lowered(kind, 5);
            for shape in shapes {
                assert_eq!(silhouette(&piece), *shape, "{kind} in {:?}", piece.state());
                assert!(piece.can_rotate(&board));
                piece.rotate();
            }
        }
    }

    #[test]
    fn test_rotation_cycles_return_to_start() {
        let board = Board::default();
        for kind in PieceKind::ALL {
            let start = spawn_lowered(kind, 5);
            let period = match start.state() {
                PieceState::L(_) | PieceState::Gamma(_) | PieceState::T(_) => 4,
                PieceState::Strip(_) | PieceState::LeftN(_) | PieceState::RightN(_) => 2,
                PieceState::Square => 1,
            };
            let mut piece = start;
            for _ in 0..period {
                assert!(piece.can_rotate(&board), "{kind}");
                piece.rotate();
                assert_eq!(piece.kind(), kind);
            }
            assert_eq!(piece, start, "{kind} did not return to its start");
        }
    }

    #[test]
    fn test_rotation_checks_every_target_cell() {
        let size = BoardSize::DEFAULT;
        let piece = spawn_lowered(PieceKind::L, 5);
        // Down -> Left targets (5,12) (6,12) (7,12) (7,11)
        assert_eq!(
            piece.rotated().map(|p| *p.cells()),
            Some(cells([(5, 12), (6, 12), (7, 12), (7, 11)]))
        );
        for col in [11, 12] {
            let board = Board::from_ascii(size, &row_art(size, 7, &[col]));
            assert!(!piece.can_rotate(&board), "blocked at (7, {col})");
        }
        let board = Board::from_ascii(size, &row_art(size, 7, &[10, 13]));
        assert!(piece.can_rotate(&board));
    }

    #[test]
    fn test_rotation_respects_board_edges() {
        let board = Board::default();

        let mut l_piece = Piece::spawn(PieceKind::L, board.size());
        l_piece.move_to_bottom(&board);
        assert!(!l_piece.can_rotate(&board));

        let mut strip = Piece::spawn(PieceKind::Strip, board.size());
        strip.rotate();
        while strip.can_move_right(&board) {
            strip.move_right();
        }
        assert_eq!(strip.leftmost(), 19);
        assert!(!strip.can_rotate(&board));

        let t_piece = Piece::spawn(PieceKind::T, board.size());
        assert!(!t_piece.can_rotate(&board));
    }

    #[test]
    fn test_square_always_rotates() {
        let size = BoardSize::DEFAULT;
        let mut piece = Piece::spawn(PieceKind::Square, size);
        let board = Board::from_ascii(size, &"#".repeat(size.cols()));
        assert!(piece.can_rotate(&board));
        let before = piece;
        piece.rotate();
        assert_eq!(piece, before);
    }

    #[test]
    fn test_is_displayed_at_and_persist() {
        let mut board = Board::default();
        let piece = Piece::spawn(PieceKind::RightN, board.size());
        assert!(piece.is_displayed_at(Cell::new(2, 9)));
        assert!(!piece.is_displayed_at(Cell::new(2, 10)));

        piece.persist(&mut board).unwrap();
        assert_eq!(board.is_occupied(Cell::new(2, 9)), Ok(true));
        assert_eq!(board.occupied_count(), 4);
    }

    /// ASCII art with blocks at `cols` of `row` (rows above are empty).
    fn row_art(size: BoardSize, row: usize, cols: &[usize]) -> String {
        let empty = ".".repeat(size.cols());
        let mut art = String::new();
        for _ in 0..row {
            art.push_str(&empty);
            art.push('\n');
        }
        let line: String = (0..size.cols())
            .map(|col| if cols.contains(&col) { '#' } else { '.' })
            .collect();
        art.push_str(&line);
        art.push('\n');
        art
    }
}
