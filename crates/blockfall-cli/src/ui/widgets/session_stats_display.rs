use std::iter;

use blockfall_engine::{GameStats, SessionSnapshot};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

/// Score, line count and clear histogram.
pub struct SessionStatsDisplay<'a> {
    snapshot: &'a SessionSnapshot,
    stats: Option<&'a GameStats>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(snapshot: &'a SessionSnapshot, stats: Option<&'a GameStats>) -> Self {
        Self {
            snapshot,
            stats,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS.len() as u16 + super::block_vertical_margin(self.block.as_ref())
    }
}

type ValueFn = &'static dyn Fn(&SessionSnapshot, Option<&GameStats>) -> String;

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(ValueFn),
    LabelValue(&'static str, ValueFn),
}

fn cleared(stats: Option<&GameStats>, lines: usize) -> String {
    stats
        .map_or(0, |stats| stats.line_cleared_counter()[lines])
        .to_string()
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|snapshot, _| snapshot.score.to_string()),
    Row::Empty,
    Row::LabelValue("LINES:", &|snapshot, _| snapshot.lines.to_string()),
    Row::LabelValue("PIECES:", &|_, stats| {
        stats.map_or(0, GameStats::completed_pieces).to_string()
    }),
    Row::LabelValue("SPEED:", &|snapshot, _| {
        format!("{}ms", snapshot.drop_interval_ms)
    }),
    Row::Empty,
    Row::LabelValue("SINGLES:", &|_, stats| cleared(stats, 1)),
    Row::LabelValue("DOUBLES:", &|_, stats| cleared(stats, 2)),
    Row::LabelValue("TRIPLES:", &|_, stats| cleared(stats, 3)),
    Row::LabelValue("QUADS:", &|_, stats| cleared(stats, 4)),
];

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.snapshot, self.stats), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.snapshot, self.stats), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
