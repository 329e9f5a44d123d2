use std::iter;

use blockfall_engine::{HEIGHT, PieceSnapshot, SessionSnapshot, WIDTH};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::{CellDisplay, CellKind};

type Cells = [[CellKind; WIDTH]; HEIGHT];

/// The playfield with locked cells, the active piece and its ghost.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    snapshot: &'a SessionSnapshot,
    show_ghost: bool,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(snapshot: &'a SessionSnapshot) -> Self {
        Self {
            snapshot,
            show_ghost: false,
            block: None,
        }
    }

    pub fn ghost(self, show_ghost: bool) -> Self {
        Self { show_ghost, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        WIDTH as u16 * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        HEIGHT as u16 * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }

    fn cells(&self) -> Cells {
        let mut cells = [[CellKind::Empty; WIDTH]; HEIGHT];
        for (dst, src) in iter::zip(&mut cells, &self.snapshot.grid) {
            for (dst, src) in iter::zip(dst, src) {
                if let Some(rgb) = src {
                    *dst = CellKind::Filled(*rgb);
                }
            }
        }
        let Some(active) = &self.snapshot.active else {
            return cells;
        };
        if self.show_ghost
            && let Some(ghost_row) = self.snapshot.ghost_row
        {
            paint(&mut cells, active, ghost_row, |cell| {
                if *cell == CellKind::Empty {
                    *cell = CellKind::Ghost(active.color);
                }
            });
        }
        paint(&mut cells, active, active.row, |cell| {
            *cell = CellKind::Filled(active.color);
        });
        cells
    }
}

/// Applies `f` to every visible cell covered by `piece` placed at `row`.
fn paint<F>(cells: &mut Cells, piece: &PieceSnapshot, row: i32, mut f: F)
where
    F: FnMut(&mut CellKind),
{
    for (dr, dc) in piece.shape.occupied_cells() {
        let (Ok(r), Ok(c)) = (usize::try_from(row + dr), usize::try_from(piece.col + dc)) else {
            continue;
        };
        if let Some(cell) = cells.get_mut(r).and_then(|cells| cells.get_mut(c)) {
            f(cell);
        }
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..WIDTH).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..HEIGHT).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<HEIGHT>(&vertical)
            .into_iter()
            .map(|row| row.layout::<WIDTH>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.cells()) {
            for (grid_cell, kind) in iter::zip(grid_row, row) {
                Widget::render(&CellDisplay::from_kind(kind, true), grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{GameSession, SessionConfig};

    use super::*;

    fn running_snapshot() -> SessionSnapshot {
        let mut session = GameSession::new(SessionConfig {
            seed: Some(1),
            ..SessionConfig::default()
        });
        session.start();
        session.snapshot()
    }

    #[test]
    fn test_cells_show_active_and_ghost() {
        let snapshot = running_snapshot();
        let active = snapshot.active.clone().unwrap();
        let cells = BoardDisplay::new(&snapshot).ghost(true).cells();

        let filled = cells
            .iter()
            .flatten()
            .filter(|cell| matches!(cell, CellKind::Filled(_)))
            .count();
        let ghosts = cells
            .iter()
            .flatten()
            .filter(|cell| matches!(cell, CellKind::Ghost(_)))
            .count();
        assert_eq!(filled, 4);
        assert_eq!(ghosts, 4);
        assert!(
            cells[HEIGHT - 1]
                .iter()
                .any(|cell| *cell == CellKind::Ghost(active.color))
        );
    }

    #[test]
    fn test_cells_without_ghost() {
        let snapshot = running_snapshot();
        let cells = BoardDisplay::new(&snapshot).cells();
        assert!(
            !cells
                .iter()
                .flatten()
                .any(|cell| matches!(cell, CellKind::Ghost(_)))
        );
    }

    #[test]
    fn test_idle_board_is_empty() {
        let snapshot = GameSession::default().snapshot();
        let cells = BoardDisplay::new(&snapshot).ghost(true).cells();
        assert!(cells.iter().flatten().all(|cell| *cell == CellKind::Empty));
    }
}
