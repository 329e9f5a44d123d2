use blockfall_engine::{GameStats, SessionSnapshot, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, PieceDisplay, SessionStatsDisplay, color, style};

/// Whole play area: stats on the left, board in the middle, next piece on the right.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    snapshot: &'a SessionSnapshot,
    stats: Option<&'a GameStats>,
    show_ghost: bool,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(snapshot: &'a SessionSnapshot) -> Self {
        Self {
            snapshot,
            stats: None,
            show_ghost: true,
        }
    }

    pub fn stats(self, stats: Option<&'a GameStats>) -> Self {
        Self { stats, ..self }
    }

    pub fn ghost(self, show_ghost: bool) -> Self {
        Self { show_ghost, ..self }
    }

    fn border_color(&self) -> Color {
        match self.snapshot.state {
            SessionState::Idle => color::GRAY,
            SessionState::Running => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver { .. } => color::RED,
        }
    }

    fn banner(&self) -> Option<(String, Style)> {
        match self.snapshot.state {
            SessionState::Running => None,
            SessionState::Idle => Some((
                "PRESS S TO START".to_owned(),
                Style::new().fg(color::BLACK).bg(color::WHITE),
            )),
            SessionState::Paused => Some((
                "PAUSED".to_owned(),
                Style::new().fg(color::BLACK).bg(color::YELLOW),
            )),
            SessionState::GameOver { final_score } => Some((
                format!("GAME OVER ({final_score})"),
                Style::new().fg(color::WHITE).bg(color::RED),
            )),
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = self.border_color();
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(Padding::horizontal(1))
                .border_style(border_color)
                .style(style::DEFAULT)
        };

        let game_board = BoardDisplay::new(self.snapshot).ghost(self.show_ghost).block(
            Block::bordered()
                .border_style(border_color)
                .style(style::DEFAULT),
        );
        let next_panel = {
            let panel = PieceDisplay::new().block(panel("NEXT"));
            match &self.snapshot.next {
                Some(piece) => panel.piece(piece),
                None => panel,
            }
        };
        let session_stats =
            SessionStatsDisplay::new(self.snapshot, self.stats).block(panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        if let Some((text, style)) = self.banner() {
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
