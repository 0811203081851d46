use std::{io, time::Duration};

use crate::{
    App,
    event_loop::{EventLoop, RenderMode, TuiEvent},
};

/// Terminal application runtime.
///
/// Owns the event loop and runs an [`App`] on the terminal until it asks
/// to exit.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current tick interval; `None` when ticks are disabled.
    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        self.events.tick_interval()
    }

    /// Sets the tick interval. Pass `None` to disable ticks.
    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events.set_tick_interval(interval);
    }

    #[must_use]
    pub fn render_mode(&self) -> RenderMode {
        self.events.render_mode()
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Runs the application until [`App::should_exit`] returns `true`.
    ///
    /// 1. Calls `app.init()`
    /// 2. Dispatches events from the loop:
    ///    - tick: `app.update()`
    ///    - render: `app.draw()`
    ///    - terminal event: `app.handle_event()`
    ///
    /// The terminal is restored when this returns, on error too.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => app.update(&mut self),
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&mut self, event),
                }
            }
            Ok(())
        })
    }
}
