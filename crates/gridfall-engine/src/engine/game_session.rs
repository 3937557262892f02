use std::time::Duration;

use crate::{
    InvalidGravityConfig, SessionError,
    core::{
        board::Board,
        cell::Cell,
        piece::{Piece, PieceKind},
    },
};

use super::{
    config::SessionConfig,
    game_stats::GameStats,
    gravity::Gravity,
    piece_generator::{PieceGenerator, PieceSeed},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// No piece is falling; the next gravity tick spawns one.
    Spawning,
    /// A piece is falling and accepts player commands.
    Falling,
    Paused,
    /// A spawned piece overlapped the stack. Terminal until [`GameSession::restart`].
    GameOver,
}

/// Player commands, accepted only while a piece is falling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    MoveDown,
    Rotate,
    /// Moves the piece as far down as it goes. It lands on the next gravity tick.
    HardDrop,
}

/// What a gravity tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    Spawned(PieceKind),
    Fell,
    /// The piece could not fall any further and became part of the board.
    Landed { cleared_rows: usize },
    /// The new piece overlapped the stack and the game ended.
    ToppedOut,
    /// Paused or over; nothing happened.
    Idle,
}

/// A game in progress: board, falling piece, gravity and statistics.
///
/// The session is driven by [`GameSession::increment_frame`] once per display frame.
/// Every few frames, depending on the current drop interval, it runs one gravity tick:
///
/// 1. Without a falling piece, a random piece spawns at the top. If it overlaps the
///    stack, the game is over.
/// 2. A falling piece moves down one row if it can.
/// 3. Otherwise it lands: its cells become part of the board, full rows are removed and
///    the cleared rows count toward the next speed-up.
///
/// Between ticks [`GameSession::apply`] moves or rotates the falling piece.
///
/// # Example
///
/// ```
/// use gridfall_engine::{Command, GameSession, SessionConfig, TickOutcome};
///
/// let mut session = GameSession::new(SessionConfig::default(), 60).unwrap();
///
/// let outcome = session.increment_frame().unwrap();
/// assert!(matches!(outcome, Some(TickOutcome::Spawned(_))));
///
/// session.apply(Command::HardDrop);
/// while session.stats().completed_pieces() == 0 {
///     session.increment_frame().unwrap();
/// }
/// assert_eq!(session.board().occupied_count(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    board: Board,
    active: Option<Piece>,
    state: SessionState,
    stats: GameStats,
    gravity: Gravity,
    generator: PieceGenerator,
    fps: u64,
    total_frames: u64,
    drop_frames: u64,
}

impl GameSession {
    /// Starts a session. The first piece spawns on the first frame.
    pub fn new(config: SessionConfig, fps: u64) -> Result<Self, InvalidGravityConfig> {
        let gravity = Gravity::new(config.gravity)?;
        Ok(Self {
            config,
            board: Board::new(config.board),
            active: None,
            state: SessionState::Spawning,
            stats: GameStats::new(),
            gravity,
            generator: Self::generator(&config),
            fps: fps.max(1),
            total_frames: 0,
            drop_frames: 1,
        })
    }

    fn generator(config: &SessionConfig) -> PieceGenerator {
        config
            .seed
            .map_or_else(PieceGenerator::new, PieceGenerator::with_seed)
    }

    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub const fn active_piece(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub const fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub const fn gravity(&self) -> &Gravity {
        &self.gravity
    }

    /// Seed of the current piece sequence.
    #[must_use]
    pub const fn seed(&self) -> PieceSeed {
        self.generator.seed()
    }

    #[must_use]
    pub const fn fps(&self) -> u64 {
        self.fps
    }

    /// Time played, counted in frames that were neither paused nor after game over.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.total_frames.saturating_mul(1000) / self.fps)
    }

    /// Returns whether `cell` shows a block: a landed one or one of the falling piece.
    #[must_use]
    pub fn is_cell_visible(&self, cell: Cell) -> bool {
        self.board.is_occupied(cell).unwrap_or(false)
            || self
                .active
                .is_some_and(|piece| piece.is_displayed_at(cell))
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            SessionState::Spawning | SessionState::Falling => SessionState::Paused,
            SessionState::Paused if self.active.is_some() => SessionState::Falling,
            SessionState::Paused => SessionState::Spawning,
            SessionState::GameOver => SessionState::GameOver,
        };
    }

    /// Discards the current game and starts a new one with the same configuration.
    ///
    /// A configured seed replays the same piece sequence; otherwise a new seed is drawn.
    pub fn restart(&mut self) {
        self.board.reset();
        self.active = None;
        self.state = SessionState::Spawning;
        self.stats = GameStats::new();
        self.gravity.reset();
        self.generator = Self::generator(&self.config);
        self.total_frames = 0;
        self.drop_frames = 1;
    }

    /// Advances one display frame and runs a gravity tick when one is due.
    ///
    /// Returns `Ok(None)` on frames without a tick. Frames are not counted while paused or
    /// after game over.
    pub fn increment_frame(&mut self) -> Result<Option<TickOutcome>, SessionError> {
        if self.state.is_paused() || self.state.is_game_over() {
            return Ok(None);
        }
        self.total_frames += 1;
        self.drop_frames = self.drop_frames.saturating_sub(1);
        if self.drop_frames > 0 {
            return Ok(None);
        }
        let outcome = self.tick()?;
        self.drop_frames = self.gravity.frames_per_drop(self.fps);
        Ok(Some(outcome))
    }

    /// Runs one gravity tick immediately.
    pub fn tick(&mut self) -> Result<TickOutcome, SessionError> {
        match self.state {
            SessionState::Paused | SessionState::GameOver => Ok(TickOutcome::Idle),
            SessionState::Spawning => Ok(self.spawn()),
            SessionState::Falling => {
                let Some(piece) = self.active.as_mut() else {
                    self.state = SessionState::Spawning;
                    return Ok(TickOutcome::Idle);
                };
                if piece.can_move_down(&self.board) {
                    piece.move_down();
                    return Ok(TickOutcome::Fell);
                }
                self.land()
            }
        }
    }

    /// Applies a player command to the falling piece.
    ///
    /// Returns `false` when the command was rejected: no piece is falling, or the move or
    /// rotation is blocked. A hard drop that cannot move at all is rejected too.
    pub fn apply(&mut self, command: Command) -> bool {
        if !self.state.is_falling() {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let board = &self.board;
        match command {
            Command::MoveLeft if piece.can_move_left(board) => piece.move_left(),
            Command::MoveRight if piece.can_move_right(board) => piece.move_right(),
            Command::MoveDown if piece.can_move_down(board) => piece.move_down(),
            Command::Rotate if piece.can_rotate(board) => piece.rotate(),
            Command::HardDrop => return piece.move_to_bottom(board) > 0,
            _ => return false,
        }
        true
    }

    fn spawn(&mut self) -> TickOutcome {
        let kind = self.generator.next_kind();
        let piece = Piece::spawn(kind, self.board.size());
        let topped_out = self.board.is_game_over(&piece);
        self.active = Some(piece);
        if topped_out {
            self.state = SessionState::GameOver;
            TickOutcome::ToppedOut
        } else {
            self.state = SessionState::Falling;
            TickOutcome::Spawned(kind)
        }
    }

    fn land(&mut self) -> Result<TickOutcome, SessionError> {
        let Some(piece) = self.active.take() else {
            return Ok(TickOutcome::Idle);
        };
        piece.persist(&mut self.board)?;
        let cleared_rows = self.board.clear_full_rows();
        self.stats.complete_piece_drop(cleared_rows);
        self.gravity.record_cleared_rows(cleared_rows);
        self.state = SessionState::Spawning;
        Ok(TickOutcome::Landed { cleared_rows })
    }
}
