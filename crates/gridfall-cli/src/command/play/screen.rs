use arrayvec::ArrayVec;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use gridfall_engine::{Command, GameSession, SessionError, SessionState};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::ui::widgets::SessionDisplay;

/// Commands received since the last frame. Further keys are dropped until the next frame.
const COMMAND_QUEUE_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Play(Command),
    TogglePause,
    Restart,
    Quit,
}

fn key_action(code: KeyCode) -> Option<KeyAction> {
    let action = match code {
        KeyCode::Left => KeyAction::Play(Command::MoveLeft),
        KeyCode::Right => KeyAction::Play(Command::MoveRight),
        KeyCode::Down => KeyAction::Play(Command::MoveDown),
        KeyCode::Up => KeyAction::Play(Command::Rotate),
        KeyCode::Char(' ') => KeyAction::Play(Command::HardDrop),
        KeyCode::Char('p') => KeyAction::TogglePause,
        KeyCode::Char('r') => KeyAction::Restart,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        _ => return None,
    };
    Some(action)
}

#[derive(Debug)]
pub struct PlayScreen {
    session: GameSession,
    pending: ArrayVec<Command, COMMAND_QUEUE_LEN>,
    error: Option<SessionError>,
    exit_on_game_over: bool,
    is_exiting: bool,
}

impl PlayScreen {
    pub fn new(session: GameSession, exit_on_game_over: bool) -> Self {
        Self {
            session,
            pending: ArrayVec::new(),
            error: None,
            exit_on_game_over,
            is_exiting: false,
        }
    }

    pub fn fps(&self) -> u64 {
        self.session.fps()
    }

    pub fn should_exit(&self) -> bool {
        self.is_exiting
    }

    pub fn finish(self) -> anyhow::Result<GameSession> {
        match self.error {
            Some(err) => Err(err.into()),
            None => Ok(self.session),
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        let Some(event) = event.as_key_event() else {
            return;
        };
        if event.kind == KeyEventKind::Release {
            return;
        }
        match key_action(event.code) {
            Some(KeyAction::Play(command)) if self.session.state().is_falling() => {
                _ = self.pending.try_push(command);
            }
            Some(KeyAction::TogglePause) => {
                self.pending.clear();
                self.session.toggle_pause();
            }
            Some(KeyAction::Restart) => {
                self.pending.clear();
                self.session.restart();
            }
            Some(KeyAction::Quit) => self.is_exiting = true,
            Some(KeyAction::Play(_)) | None => {}
        }
    }

    /// Applies the queued commands, then advances the session by one frame.
    ///
    /// When the game ends during this frame, the frame is still drawn before exiting.
    pub fn update(&mut self) {
        for command in self.pending.drain(..) {
            self.session.apply(command);
        }
        if let Err(err) = self.session.increment_frame() {
            self.error = Some(err);
            self.is_exiting = true;
        }
        if self.exit_on_game_over && self.session.state().is_game_over() {
            self.is_exiting = true;
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let session_display = SessionDisplay::new(&self.session);
        let help_text = match self.session.state() {
            SessionState::Spawning | SessionState::Falling => {
                "Controls: ← → (Move) | ↓ (Down) | ↑ (Rotate) | Space (Drop) | P (Pause) | R (Restart) | Q (Quit)"
            }
            SessionState::Paused => "Controls: P (Resume) | R (Restart) | Q (Quit)",
            SessionState::GameOver => "Controls: R (Restart) | Q (Quit)",
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(session_display.height()),
            Constraint::Length(1),
        ])
        .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use gridfall_engine::{PieceSeed, SessionConfig};

    use super::*;

    fn screen() -> PlayScreen {
        let config = SessionConfig {
            seed: Some(PieceSeed::from_bytes([3; 16])),
            ..SessionConfig::default()
        };
        PlayScreen::new(GameSession::new(config, 60).unwrap(), true)
    }

    /// Plays hard drops until the stack reaches the top.
    fn play_until_game_over(screen: &mut PlayScreen) {
        for _ in 0..100_000 {
            if screen.session.state().is_game_over() {
                return;
            }
            press(screen, KeyCode::Char(' '));
            screen.update();
        }
        panic!("game did not end");
    }

    fn press(screen: &mut PlayScreen, code: KeyCode) {
        screen.handle_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            key_action(KeyCode::Char(' ')),
            Some(KeyAction::Play(Command::HardDrop))
        );
        assert_eq!(
            key_action(KeyCode::Up),
            Some(KeyAction::Play(Command::Rotate))
        );
        assert_eq!(key_action(KeyCode::Esc), Some(KeyAction::Quit));
        assert_eq!(key_action(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_commands_wait_for_next_frame() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Left);
        assert!(screen.pending.is_empty(), "no piece is falling yet");

        screen.update();
        let before = *screen.session.active_piece().unwrap();
        press(&mut screen, KeyCode::Left);
        assert_eq!(screen.session.active_piece(), Some(&before));

        screen.update();
        let after = screen.session.active_piece().unwrap();
        assert_eq!(after.leftmost() + 1, before.leftmost());
    }

    #[test]
    fn test_queue_is_bounded() {
        let mut screen = screen();
        screen.update();
        for _ in 0..COMMAND_QUEUE_LEN * 2 {
            press(&mut screen, KeyCode::Down);
        }
        assert_eq!(screen.pending.len(), COMMAND_QUEUE_LEN);
        screen.update();
        assert!(screen.pending.is_empty());
    }

    #[test]
    fn test_pause_restart_quit() {
        let mut screen = screen();
        screen.update();
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Char('p'));
        assert!(screen.session.state().is_paused());
        assert!(screen.pending.is_empty());

        press(&mut screen, KeyCode::Char('r'));
        assert!(screen.session.state().is_spawning());

        assert!(!screen.should_exit());
        press(&mut screen, KeyCode::Char('q'));
        assert!(screen.should_exit());
        assert!(screen.finish().is_ok());
    }

    #[test]
    fn test_exits_on_game_over() {
        let mut screen = screen();
        play_until_game_over(&mut screen);
        assert!(screen.should_exit());
        let session = screen.finish().unwrap();
        assert!(session.stats().completed_pieces() > 0);
    }

    #[test]
    fn test_hold_on_game_over_waits_for_quit() {
        let mut screen = screen();
        screen.exit_on_game_over = false;
        play_until_game_over(&mut screen);
        assert!(!screen.should_exit());

        press(&mut screen, KeyCode::Char('r'));
        assert!(screen.session.state().is_spawning());
        press(&mut screen, KeyCode::Esc);
        assert!(screen.should_exit());
    }
}
