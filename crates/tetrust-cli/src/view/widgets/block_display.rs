use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};
use tetrust_engine::{Cell, Rgb};

use super::style;

/// One board cell, two terminal columns wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const WIDTH: u16 = 2;
    pub const HEIGHT: u16 = 1;

    pub const EMPTY: Self = Self::new(style::EMPTY_DOT, ".");
    pub const DEBUG: Self = Self::new(style::DEBUG_BLOCK, "");

    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub const fn filled(color: Rgb) -> Self {
        Self::new(style::block(color), "")
    }

    /// Landed cells are drawn red in debug mode.
    pub fn from_cell(cell: Cell, debug: bool) -> Self {
        match (cell.is_occupied(), debug) {
            (false, _) => Self::EMPTY,
            (true, false) => Self::filled(cell.color()),
            (true, true) => Self::DEBUG,
        }
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Paragraph fills the whole area, not only the cells under the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
