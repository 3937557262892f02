use gridfall_engine::GameSession;
use ratatui::{
    prelude::{Buffer, Rect},
    text::Line,
    widgets::{Block, Paragraph, Widget},
};

use crate::ui::widgets::{block_horizontal_margin, block_vertical_margin};

const LABEL_WIDTH: usize = 8;
const VALUE_WIDTH: usize = 8;

#[derive(Debug)]
pub struct SessionStatsDisplay<'a> {
    session: &'a GameSession,
    block: Option<Block<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let stats = self.session.stats();
        let duration = self.session.duration();
        let [_, singles, doubles, triples, quads] = *stats.row_cleared_counter();
        let rows = [
            (
                "TIME",
                format!("{}:{:02}", duration.as_secs() / 60, duration.as_secs() % 60),
            ),
            ("PIECES", stats.completed_pieces().to_string()),
            ("ROWS", stats.total_cleared_rows().to_string()),
            (
                "SPEED",
                format!("{}ms", self.session.gravity().interval_ms()),
            ),
            ("", String::new()),
            ("SINGLES", singles.to_string()),
            ("DOUBLES", doubles.to_string()),
            ("TRIPLES", triples.to_string()),
            ("QUADS", quads.to_string()),
        ];
        rows.into_iter()
            .map(|(label, value)| Line::from(format!("{label:<LABEL_WIDTH$}{value:>VALUE_WIDTH$}")))
            .collect()
    }

    pub fn width(&self) -> u16 {
        u16::try_from(LABEL_WIDTH + VALUE_WIDTH).unwrap_or(u16::MAX)
            + block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(self.lines().len()).unwrap_or(u16::MAX)
            + block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let mut paragraph = Paragraph::new(self.lines());
        if let Some(block) = &self.block {
            paragraph = paragraph.block(block.clone());
        }
        paragraph.render(area, buf);
    }
}
