use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};

use crate::{InvalidColorError, PieceKind};

/// An RGB color with one byte per channel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);

    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Builds a color from integer channels, rejecting values outside `0..=255`.
    ///
    /// # Example
    ///
    /// ```
    /// use tetrust_engine::Rgb;
    ///
    /// assert_eq!(Rgb::from_channels(0, 170, 170), Ok(Rgb::new(0, 170, 170)));
    /// assert!(Rgb::from_channels(0, 256, 0).is_err());
    /// ```
    pub fn from_channels(red: i32, green: i32, blue: i32) -> Result<Self, InvalidColorError> {
        let channel = |value: i32| u8::try_from(value).map_err(|_| InvalidColorError::new(value));
        Ok(Self::new(channel(red)?, channel(green)?, channel(blue)?))
    }

    #[must_use]
    pub const fn red(self) -> u8 {
        self.red
    }

    #[must_use]
    pub const fn green(self) -> u8 {
        self.green
    }

    #[must_use]
    pub const fn blue(self) -> u8 {
        self.blue
    }
}

/// Uniformly random color, each channel drawn independently.
impl Distribution<Rgb> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb {
        Rgb::new(rng.random(), rng.random(), rng.random())
    }
}

/// Theme colors, indexed by [`PieceKind`].
pub const THEME_PALETTE: [Rgb; PieceKind::LEN] = [
    Rgb::new(0, 255, 255),
    Rgb::new(0, 0, 255),
    Rgb::new(0, 170, 170),
    Rgb::new(100, 65, 0),
    Rgb::new(0, 67, 0),
    Rgb::new(67, 33, 0),
    Rgb::new(67, 67, 0),
];

/// How newly spawned pieces get their color.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ColorPolicy {
    /// Each piece kind always uses its entry of [`THEME_PALETTE`].
    #[default]
    FixedByType,
    /// Every piece gets a uniformly random RGB color.
    ///
    /// Kept for compatibility with the early behavior of the game.
    Random,
}

impl ColorPolicy {
    pub fn color_for<R>(self, kind: PieceKind, rng: &mut R) -> Rgb
    where
        R: Rng + ?Sized,
    {
        match self {
            ColorPolicy::FixedByType => THEME_PALETTE[kind as usize],
            ColorPolicy::Random => rng.random(),
        }
    }
}
