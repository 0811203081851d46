pub(crate) mod input;
pub(crate) mod screens;
pub(crate) mod widgets;
