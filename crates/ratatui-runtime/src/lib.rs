//! Terminal runtime and screen stack for ratatui applications.
//!
//! [`Runtime`] drives an event loop producing tick, render and terminal
//! events for an [`App`]. [`ScreenStack`] is an [`App`] that forwards those
//! events to a stack of [`Screen`]s and applies the navigation requests they
//! make through their [`ScreenContext`].

pub use self::{
    app::App,
    event_loop::RenderMode,
    runtime::Runtime,
    screen::{Screen, ScreenContext, ScreenStack, UpdateOutcome},
};

mod app;
mod event_loop;
mod runtime;
mod screen;
