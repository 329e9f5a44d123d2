use blockfall_engine::Rgb;
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::style;

/// What a single playfield cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellKind {
    #[default]
    Empty,
    /// Outline of where the active piece will land.
    Ghost(Rgb),
    Filled(Rgb),
}

#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub const fn width() -> u16 {
        2
    }

    pub const fn height() -> u16 {
        1
    }

    pub const fn from_kind(kind: CellKind, show_dots: bool) -> Self {
        match kind {
            CellKind::Empty if show_dots => Self::new(style::EMPTY_DOT, "."),
            CellKind::Empty => Self::new(style::EMPTY, ""),
            CellKind::Ghost(rgb) => Self::new(style::ghost(rgb), "[]"),
            CellKind::Filled(rgb) => Self::new(style::filled(rgb), ""),
        }
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Paragraph fills the whole area, not just the cells under the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
