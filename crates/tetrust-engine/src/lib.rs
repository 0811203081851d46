pub use self::{core::*, engine::*, score::*};

pub mod core;
pub mod engine;
pub mod score;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding when setting controlled piece")]
pub struct PieceCollisionError;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("color channel value {value} is out of range 0..=255")]
pub struct InvalidColorError {
    value: i32,
}

impl InvalidColorError {
    pub(crate) fn new(value: i32) -> Self {
        Self { value }
    }

    #[must_use]
    pub fn value(&self) -> i32 {
        self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("high score name must be non-blank, without surrounding spaces, '=' or line breaks: {name:?}")]
pub struct InvalidNameError {
    name: String,
}

impl InvalidNameError {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
