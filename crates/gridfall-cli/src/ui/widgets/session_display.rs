use gridfall_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, SessionStatsDisplay, color, style};

/// Board with a stats panel beside it, plus a banner while paused or after game over.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    fn border_style(&self) -> ratatui::style::Color {
        match self.session.state() {
            SessionState::Spawning | SessionState::Falling => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        }
    }

    fn board_display(&self) -> BoardDisplay<'a> {
        BoardDisplay::new(self.session.board())
            .falling_piece(self.session.active_piece())
            .block(
                Block::bordered()
                    .border_style(self.border_style())
                    .style(style::DEFAULT),
            )
    }

    fn stats_display(&self) -> SessionStatsDisplay<'a> {
        SessionStatsDisplay::new(self.session).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(Padding::symmetric(
                    self.horizontal_padding,
                    self.vertical_padding,
                ))
                .border_style(self.border_style())
                .style(style::DEFAULT),
        )
    }

    pub fn height(&self) -> u16 {
        u16::max(self.board_display().height(), self.stats_display().height())
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let game_board = self.board_display();
        let session_stats = self.stats_display();

        let [board_column, stats_column] = Layout::horizontal([
            Constraint::Length(game_board.width()),
            Constraint::Length(session_stats.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(board_column);
        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(stats_column);

        let game_board_width = game_board.width();
        game_board.render(board_area, buf);
        session_stats.render(stats_area, buf);

        let popup = match self.session.state() {
            SessionState::Spawning | SessionState::Falling => None,
            SessionState::Paused => {
                Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW)))
            }
            SessionState::GameOver => {
                Some(("GAME OVER!!", Style::new().fg(color::WHITE).bg(color::RED)))
            }
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use gridfall_engine::SessionConfig;

    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_renders_stats_and_pause_banner() {
        let mut session = GameSession::new(SessionConfig::default(), 60).unwrap();
        let area = Rect::new(0, 0, 80, 24);

        let mut buf = Buffer::empty(area);
        SessionDisplay::new(&session).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("STATS"));
        assert!(text.contains("625ms"));
        assert!(!text.contains("PAUSED"));

        session.toggle_pause();
        let mut buf = Buffer::empty(area);
        SessionDisplay::new(&session).render(area, &mut buf);
        assert!(buffer_text(&buf).contains("PAUSED"));
    }

    #[test]
    fn test_height_fits_default_board() {
        let session = GameSession::new(SessionConfig::default(), 60).unwrap();
        assert_eq!(SessionDisplay::new(&session).height(), 22);
    }
}
