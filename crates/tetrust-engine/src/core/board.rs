use std::fmt;

use super::{color::Rgb, piece::Piece};

/// A single cell of the [`Board`].
///
/// Occupied cells always carry the color of the block that landed there;
/// empty cells are black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    occupied: bool,
    color: Rgb,
}

impl Cell {
    pub const EMPTY: Self = Self {
        occupied: false,
        color: Rgb::BLACK,
    };

    #[must_use]
    pub const fn filled(color: Rgb) -> Self {
        Self {
            occupied: true,
            color,
        }
    }

    #[must_use]
    pub const fn is_occupied(self) -> bool {
        self.occupied
    }

    #[must_use]
    pub const fn color(self) -> Rgb {
        self.color
    }
}

type Row = [Cell; Board::WIDTH];

const EMPTY_ROW: Row = [Cell::EMPTY; Board::WIDTH];

fn is_row_complete(row: &Row) -> bool {
    row.iter().all(|cell| cell.is_occupied())
}

/// The grid of landed blocks.
///
/// The currently controlled piece is not part of the board until it lands
/// and is merged with [`Board::merge_piece`].
///
/// # Layout
///
/// - **Dimensions**: 10 columns × 22 rows
/// - **Origin**: `(0, 0)` is the top-left cell, Y grows downward
///
/// # Example
///
/// ```
/// use tetrust_engine::{Board, Piece, PieceKind, Rgb};
///
/// let mut board = Board::EMPTY;
/// board.merge_piece(&Piece::new(PieceKind::O, Rgb::new(0, 0, 255)).at(0, 20));
/// assert_eq!(board.occupied_cells().count(), 4);
/// assert_eq!(board.clear_completed_rows(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [Row; Board::HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = 10;
    pub const HEIGHT: usize = 22;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; Board::HEIGHT],
    };

    /// Converts signed coordinates into grid indices, if they lie on the board.
    #[must_use]
    pub fn index(x: i32, y: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|x| *x < Self::WIDTH)?;
        let y = usize::try_from(y).ok().filter(|y| *y < Self::HEIGHT)?;
        Some((x, y))
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the board.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.rows[y][x]
    }

    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.rows[y][x].is_occupied()
    }

    /// Returns the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; Board::WIDTH]> {
        self.rows.iter()
    }

    /// Returns the `(x, y)` coordinates of all occupied cells, row by row.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| cell.is_occupied())
                .map(move |(x, _)| (x, y))
        })
    }

    /// Marks a single cell as occupied with the given color.
    pub fn fill_cell(&mut self, x: usize, y: usize, color: Rgb) {
        self.rows[y][x] = Cell::filled(color);
    }

    /// Freezes a landed piece into the board.
    ///
    /// Blocks that fall outside the grid are skipped.
    pub fn merge_piece(&mut self, piece: &Piece) {
        for (x, y) in piece.occupied_cells() {
            if let Some((x, y)) = Self::index(x, y) {
                self.fill_cell(x, y, piece.color());
            }
        }
    }

    /// Clears completed rows and returns how many were cleared.
    ///
    /// A row is complete when every column is occupied. Rows are compacted in
    /// a single bottom-up sweep: every remaining row falls by the number of
    /// completed rows found beneath it, keeping its colors and relative order.
    pub fn clear_completed_rows(&mut self) -> usize {
        let mut count = 0;
        for y in (0..Self::HEIGHT).rev() {
            if is_row_complete(&self.rows[y]) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(EMPTY_ROW);
        count
    }

    /// Resets every cell to empty.
    pub fn clear(&mut self) {
        self.rows.fill(EMPTY_ROW);
    }
}

/// Renders the board as lines of `x` (occupied) and `.` (empty).
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row {
                f.write_str(if cell.is_occupied() { "x" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
