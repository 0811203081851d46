use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tetrust_engine::{HighScore, ScoreManager};

use super::style;

/// Ranked high score table. Empty slots are not shown.
pub(crate) struct ScoreTableDisplay<'a> {
    scores: &'a ScoreManager,
    highlighted: Option<usize>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> ScoreTableDisplay<'a> {
    pub fn new(scores: &'a ScoreManager) -> Self {
        Self {
            scores,
            highlighted: None,
            block: None,
        }
    }

    /// Draws the entry at `index` in the highlight color.
    pub fn highlighted(self, index: Option<usize>) -> Self {
        Self {
            highlighted: index,
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
    pub fn height(&self) -> u16 {
        ScoreManager::CAPACITY as u16 + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for ScoreTableDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let rows = Layout::vertical((0..ScoreManager::CAPACITY).map(|_| Constraint::Length(1)))
            .split(area);
        for (i, (entry, row_area)) in self.scores.entries().zip(rows.iter()).enumerate() {
            let row_style = if self.highlighted == Some(i) {
                style::SELECTED
            } else {
                style::MENU
            };
            render_row(i, entry, row_style, *row_area, buf);
        }
    }
}

fn render_row(rank: usize, entry: &HighScore, style: Style, area: Rect, buf: &mut Buffer) {
    let [rank_area, name_area, score_area] = area.layout(&Layout::horizontal([
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ]));
    Line::styled(format!("{:>2}.", rank + 1), style).render(rank_area, buf);
    Line::styled(entry.name(), style)
        .left_aligned()
        .render(name_area, buf);
    Line::styled(entry.score().to_string(), style)
        .right_aligned()
        .render(score_area, buf);
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn render(display: ScoreTableDisplay<'_>) -> Buffer {
        let height = display.height();
        let mut terminal = Terminal::new(TestBackend::new(30, height)).unwrap();
        terminal
            .draw(|frame| frame.render_widget(display, frame.area()))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn line(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
    }

    #[test]
    fn test_rows_and_highlight() {
        let mut scores = ScoreManager::new("unused.txt");
        scores.submit("ALICE", 1700).unwrap();
        scores.submit("BOB", 300).unwrap();

        let buf = render(ScoreTableDisplay::new(&scores).highlighted(Some(1)));

        let first = line(&buf, 0);
        assert!(first.starts_with(" 1. ALICE"), "{first:?}");
        assert!(first.trim_end().ends_with("1700"), "{first:?}");
        let second = line(&buf, 1);
        assert!(second.starts_with(" 2. BOB"), "{second:?}");
        assert_eq!(line(&buf, 2).trim(), "");

        assert_eq!(buf[(4, 0)].fg, style::MENU.fg.unwrap());
        assert_eq!(buf[(4, 1)].fg, style::SELECTED.fg.unwrap());
    }
}
