use blockfall_engine::{MAX_SHAPE_SIZE, PieceSnapshot};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::{CellDisplay, CellKind};

/// Preview of a single piece, trimmed to its occupied rows.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<&'a PieceSnapshot>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: &'a PieceSnapshot) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        MAX_SHAPE_SIZE as u16 * CellDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(piece) = self.piece else {
            Widget::render(&CellDisplay::from_kind(CellKind::Empty, false), area, buf);
            return;
        };

        let rows: Vec<&[bool]> = piece
            .shape
            .rows()
            .filter(|row| row.contains(&true))
            .collect();
        let width = u16::try_from(piece.shape.size()).unwrap_or(u16::MAX);
        let height = u16::try_from(rows.len()).unwrap_or(u16::MAX);
        let piece_area = area.centered(
            Constraint::Length(width * CellDisplay::width()),
            Constraint::Length(height * CellDisplay::height()),
        );

        let col_constraints = (0..width).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..height).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let empty = CellDisplay::from_kind(CellKind::Empty, false);
        let filled = CellDisplay::from_kind(CellKind::Filled(piece.color), false);
        for (row, row_area) in rows.iter().zip(piece_area.layout_vec(&vertical)) {
            for (&occupied, cell_area) in row.iter().zip(row_area.layout_vec(&horizontal)) {
                let cell = if occupied { &filled } else { &empty };
                Widget::render(cell, cell_area, buf);
            }
        }
    }
}
