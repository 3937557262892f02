use crossterm::event::Event;
use gridfall_engine::GameSession;
use ratatui::Frame;
use ratatui_runtime::{App, Runtime};

use crate::command::play::screen::PlayScreen;

#[derive(Debug)]
pub struct PlayApp {
    screen: PlayScreen,
}

impl PlayApp {
    pub fn new(session: GameSession, exit_on_game_over: bool) -> Self {
        Self {
            screen: PlayScreen::new(session, exit_on_game_over),
        }
    }

    /// Returns the final session, or the engine error that stopped the game.
    pub fn finish(self) -> anyhow::Result<GameSession> {
        self.screen.finish()
    }
}

impl App for PlayApp {
    #[expect(clippy::cast_precision_loss)]
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_frame_rate(self.screen.fps() as f64);
    }

    fn should_exit(&self) -> bool {
        self.screen.should_exit()
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        self.screen.handle_event(&event);
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        self.screen.update();
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }
}
