use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};
use tetrust_engine::{Board, Piece};

use super::BlockDisplay;

/// The board with the controlled piece drawn over it.
#[derive(Debug)]
pub(crate) struct BoardDisplay<'a> {
    board: &'a Board,
    piece: Option<&'a Piece>,
    debug: bool,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            piece: None,
            debug: false,
            block: None,
        }
    }

    pub fn piece(self, piece: Option<&'a Piece>) -> Self {
        Self { piece, ..self }
    }

    pub fn debug(self, debug: bool) -> Self {
        Self { debug, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        Board::WIDTH as u16 * BlockDisplay::WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        Board::HEIGHT as u16 * BlockDisplay::HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }

    /// Returns the display of every cell, row by row, piece included.
    fn cells(&self) -> [[BlockDisplay; Board::WIDTH]; Board::HEIGHT] {
        let mut cells = [[BlockDisplay::EMPTY; Board::WIDTH]; Board::HEIGHT];
        for (row_cells, row) in iter::zip(&mut cells, self.board.rows()) {
            for (display, cell) in iter::zip(row_cells, row) {
                *display = BlockDisplay::from_cell(*cell, self.debug);
            }
        }
        if let Some(piece) = self.piece {
            for (x, y) in piece.occupied_cells() {
                if let Some((x, y)) = Board::index(x, y) {
                    cells[y][x] = BlockDisplay::filled(piece.color());
                }
            }
        }
        cells
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..Board::WIDTH).map(|_| Constraint::Length(BlockDisplay::WIDTH));
        let row_constraints = (0..Board::HEIGHT).map(|_| Constraint::Length(BlockDisplay::HEIGHT));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<{ Board::HEIGHT }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ Board::WIDTH }>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.cells()) {
            for (grid_cell, display) in iter::zip(grid_row, row) {
                display.render(grid_cell, buf);
            }
        }
    }
}
