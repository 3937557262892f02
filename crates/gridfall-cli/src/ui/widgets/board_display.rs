use gridfall_engine::{Board, Piece};
use ratatui::{
    prelude::{Buffer, Rect},
    widgets::{Block, Widget},
};

use crate::ui::widgets::{BlockDisplay, block_horizontal_margin, block_vertical_margin};

/// The playing field: landed blocks plus the falling piece.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    falling_piece: Option<&'a Piece>,
    block: Option<Block<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            falling_piece: None,
            block: None,
        }
    }

    pub fn falling_piece(self, piece: Option<&'a Piece>) -> Self {
        Self {
            falling_piece: piece,
            ..self
        }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        let cols = u16::try_from(self.board.size().cols()).unwrap_or(u16::MAX);
        cols.saturating_mul(BlockDisplay::WIDTH)
            .saturating_add(block_horizontal_margin(self.block.as_ref()))
    }

    pub fn height(&self) -> u16 {
        let rows = u16::try_from(self.board.size().rows()).unwrap_or(u16::MAX);
        rows.saturating_mul(BlockDisplay::HEIGHT)
            .saturating_add(block_vertical_margin(self.block.as_ref()))
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        for cell in self.board.size().cells() {
            let (Ok(row), Ok(col)) = (u16::try_from(cell.row()), u16::try_from(cell.col())) else {
                continue;
            };
            let block_area = Rect::new(
                inner.x.saturating_add(col.saturating_mul(BlockDisplay::WIDTH)),
                inner.y.saturating_add(row.saturating_mul(BlockDisplay::HEIGHT)),
                BlockDisplay::WIDTH,
                BlockDisplay::HEIGHT,
            )
            .intersection(inner);
            if block_area.is_empty() {
                continue;
            }

            let display = if self.board.is_occupied(cell).unwrap_or(false) {
                BlockDisplay::landed()
            } else if let Some(piece) = self.falling_piece.filter(|p| p.is_displayed_at(cell)) {
                BlockDisplay::falling(piece.kind())
            } else {
                BlockDisplay::empty()
            };
            display.render(block_area, buf);
        }
    }
}
