use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};

use super::color::Rgb;

/// A falling piece (tetrimino): kind, rotation, position and color.
///
/// The geometry itself is never stored per instance. It is looked up in a
/// static table using the kind and the current rotation index.
///
/// # Coordinate System
///
/// - `(x, y)` is the top-left corner of the piece's 4×4 local box on the board
/// - X increases rightward (columns), Y increases downward (rows)
/// - Coordinates are signed; the piece itself never checks bounds or collisions
///
/// # Example
///
/// ```
/// use tetrust_engine::{Piece, PieceKind, RotationDirection, THEME_PALETTE};
///
/// let mut piece = Piece::new(PieceKind::T, THEME_PALETTE[PieceKind::T as usize]);
/// piece.move_by(3, 0);
/// piece.rotate(RotationDirection::Right);
/// assert_eq!(piece.occupied_cells().count(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotation: PieceRotation,
    x: i32,
    y: i32,
    color: Rgb,
}

impl Piece {
    /// Side of the local box every shape fits in.
    pub const SIZE: i32 = 4;

    /// Creates a piece at the origin in its spawn rotation.
    #[must_use]
    pub const fn new(kind: PieceKind, color: Rgb) -> Self {
        Self {
            kind,
            rotation: PieceRotation(0),
            x: 0,
            y: 0,
            color,
        }
    }

    /// Returns the same piece moved to `(x, y)`.
    #[must_use]
    pub const fn at(self, x: i32, y: i32) -> Self {
        Self { x, y, ..self }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Advances the rotation state by one step, wrapping modulo 4.
    pub fn rotate(&mut self, direction: RotationDirection) {
        self.rotation = match direction {
            RotationDirection::Right => self.rotation.rotated_right(),
            RotationDirection::Left => self.rotation.rotated_left(),
        };
    }

    /// Translates the piece unconditionally.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Returns a copy translated by `(dx, dy)`.
    #[must_use]
    pub fn moved(mut self, dx: i32, dy: i32) -> Self {
        self.move_by(dx, dy);
        self
    }

    /// Returns whether the local cell `(local_x, local_y)` holds a block
    /// in the current rotation. Cells outside the 4×4 box are always empty.
    #[must_use]
    pub fn block_at(&self, local_x: i32, local_y: i32) -> bool {
        let (Ok(lx), Ok(ly)) = (usize::try_from(local_x), usize::try_from(local_y)) else {
            return false;
        };
        if lx >= 4 || ly >= 4 {
            return false;
        }
        self.kind.shape(self.rotation)[lx][ly]
    }

    /// Returns the absolute board coordinates of the piece's blocks.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.kind
            .local_cells(self.rotation)
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Direction of a single rotation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Right,
    Left,
}

/// Rotation state of a piece.
///
/// One of four states, `0` being the spawn orientation.
/// Rotation operations wrap around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PieceRotation(u8);

impl PieceRotation {
    #[must_use]
    pub fn rotated_right(self) -> Self {
        PieceRotation((self.0 + 1) % 4)
    }

    #[must_use]
    pub fn rotated_left(self) -> Self {
        PieceRotation((self.0 + 3) % 4)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The seven piece kinds, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// Stick: four in a row.
    I = 0,
    /// Box: 2×2 square.
    O = 1,
    /// Stairs: three in a row with one on top of the middle.
    T = 2,
    /// Right snake.
    S = 3,
    /// Left snake.
    Z = 4,
    /// Left L.
    J = 5,
    /// Right L.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    fn shape(self, rotation: PieceRotation) -> &'static PieceShape {
        &PIECE_SHAPES[self as usize][rotation.index()]
    }

    /// Returns the local `(x, y)` cells occupied in the given rotation.
    pub fn local_cells(self, rotation: PieceRotation) -> impl Iterator<Item = (i32, i32)> {
        let shape = self.shape(rotation);
        (0..4).flat_map(move |x| {
            (0..4).filter_map(move |y| shape[x][y].then_some((x as i32, y as i32)))
        })
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrust_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }
}

/// Occupancy of a 4×4 local box, indexed `[x][y]`.
///
/// Each inner array is one column, listed top to bottom.
type PieceShape = [[bool; 4]; 4];

const PIECE_SHAPES: [[PieceShape; 4]; PieceKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];
    [
        // I-piece
        [
            [[C, C, C, C], EEEE, EEEE, EEEE],
            [[E, E, C, E], [E, E, C, E], [E, E, C, E], [E, E, C, E]],
            [EEEE, EEEE, [C, C, C, C], EEEE],
            [[E, C, E, E], [E, C, E, E], [E, C, E, E], [E, C, E, E]],
        ],
        // O-piece
        [
            [[C, C, E, E], [C, C, E, E], EEEE, EEEE],
            [[C, C, E, E], [C, C, E, E], EEEE, EEEE],
            [[C, C, E, E], [C, C, E, E], EEEE, EEEE],
            [[C, C, E, E], [C, C, E, E], EEEE, EEEE],
        ],
        // T-piece
        [
            [[E, C, E, E], [C, C, C, E], EEEE, EEEE],
            [[E, C, E, E], [E, C, C, E], [E, C, E, E], EEEE],
            [EEEE, [C, C, C, E], [E, C, E, E], EEEE],
            [[E, C, E, E], [C, C, E, E], [E, C, E, E], EEEE],
        ],
        // S-piece
        [
            [[E, E, C, C], [E, C, C, E], EEEE, EEEE],
            [[E, E, C, E], [E, E, C, C], [E, E, E, C], EEEE],
            [EEEE, [E, E, C, C], [E, C, C, E], EEEE],
            [[E, C, E, E], [E, C, C, E], [E, E, C, E], EEEE],
        ],
        // Z-piece
        [
            [[C, C, E, E], [E, C, C, E], EEEE, EEEE],
            [[E, E, C, E], [E, C, C, E], [E, C, E, E], EEEE],
            [EEEE, [C, C, E, E], [E, C, C, E], EEEE],
            [[E, C, E, E], [C, C, E, E], [C, E, E, E], EEEE],
        ],
        // J-piece
        [
            [[C, E, E, E], [C, C, C, E], EEEE, EEEE],
            [[E, C, C, E], [E, C, E, E], [E, C, E, E], EEEE],
            [EEEE, [C, C, C, E], [E, E, C, E], EEEE],
            [[E, C, E, E], [E, C, E, E], [C, C, E, E], EEEE],
        ],
        // L-piece
        [
            [[E, E, C, E], [C, C, C, E], EEEE, EEEE],
            [[E, C, E, E], [E, C, E, E], [E, C, C, E], EEEE],
            [EEEE, [C, C, C, E], [C, E, E, E], EEEE],
            [[C, C, E, E], [E, C, E, E], [E, C, E, E], EEEE],
        ],
    ]
};
