use gridfall_engine::PieceKind;
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::style;

/// One board cell, drawn two terminal columns wide.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const WIDTH: u16 = 2;
    pub const HEIGHT: u16 = 1;

    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub const fn empty() -> Self {
        Self::new(style::EMPTY_DOT, ".")
    }

    pub const fn landed() -> Self {
        Self::new(style::LANDED, "")
    }

    pub const fn falling(kind: PieceKind) -> Self {
        let style = match kind {
            PieceKind::L => style::L_BLOCK,
            PieceKind::Gamma => style::GAMMA_BLOCK,
            PieceKind::Strip => style::STRIP_BLOCK,
            PieceKind::T => style::T_BLOCK,
            PieceKind::Square => style::SQUARE_BLOCK,
            PieceKind::LeftN => style::LEFT_N_BLOCK,
            PieceKind::RightN => style::RIGHT_N_BLOCK,
        };
        Self::new(style, "")
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Use a Paragraph to fill the whole area, not just the cells with the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
