pub use self::{board::*, color::*, piece::*};

pub(crate) mod board;
pub(crate) mod color;
pub(crate) mod piece;
