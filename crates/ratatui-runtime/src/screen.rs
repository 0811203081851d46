use std::{fmt, time::Duration};

use crossterm::event::Event;
use log::debug;
use ratatui::Frame;

use crate::{App, RenderMode, Runtime};

/// Whether a screen stays on the stack after an update or an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum UpdateOutcome {
    Continue,
    /// Pop this screen off the stack.
    Finished,
}

/// Individual screen in the application.
///
/// # Lifecycle
///
/// ```text
/// Create
///   ↓
/// push (ScreenContext::push)
///   ↓
/// on_init()
///   ↓
/// (Active) ←─────────────┐
///   ↓                    │
/// child pushed on top    │ child finished
///   ↓                    │
/// (Background) ── on_resume()
///   ↓
/// on_close()  ← finished, deleted by the screen above, or exit
///   ↓
/// Drop
/// ```
///
/// Only the top screen receives updates and events. It navigates by
/// returning [`UpdateOutcome::Finished`] and by making requests through the
/// [`ScreenContext`]; the requests are applied once the call returns.
///
/// The runtime's tick interval and render mode follow
/// [`Screen::tick_interval`] and [`Screen::render_mode`] of the active
/// screen.
///
/// ```rust
/// use std::time::Duration;
///
/// use crossterm::event::Event;
/// use ratatui::Frame;
/// use ratatui_runtime::{Screen, ScreenContext, UpdateOutcome};
///
/// #[derive(Debug)]
/// struct Countdown {
///     remaining: u32,
/// }
///
/// impl Screen for Countdown {
///     fn tick_interval(&self) -> Option<Duration> {
///         Some(Duration::from_secs(1))
///     }
///
///     fn update(&mut self, _ctx: &mut ScreenContext) -> UpdateOutcome {
///         self.remaining = self.remaining.saturating_sub(1);
///         if self.remaining == 0 {
///             UpdateOutcome::Finished
///         } else {
///             UpdateOutcome::Continue
///         }
///     }
///
///     fn handle_event(&mut self, ctx: &mut ScreenContext, _event: &Event) -> UpdateOutcome {
///         ctx.request_exit();
///         UpdateOutcome::Continue
///     }
///
///     fn draw(&self, _frame: &mut Frame) {}
/// }
/// ```
pub trait Screen: fmt::Debug {
    /// Called once, when the screen is pushed and becomes active.
    fn on_init(&mut self, _ctx: &mut ScreenContext) {}

    /// Called when the screen above this one is finished and this one is
    /// active again.
    fn on_resume(&mut self, _ctx: &mut ScreenContext) {}

    /// Called right before the screen is removed from the stack.
    fn on_close(&mut self) {}

    /// Ticks between updates while this screen is active. `None` disables
    /// ticks.
    fn tick_interval(&self) -> Option<Duration> {
        None
    }

    /// Render mode applied to the runtime while this screen is active.
    fn render_mode(&self) -> RenderMode {
        RenderMode::OnDirty
    }

    /// Returns `false` for overlays that are drawn on top of the screen
    /// below them.
    fn clears_background(&self) -> bool {
        true
    }

    /// Advances the screen by one tick.
    fn update(&mut self, ctx: &mut ScreenContext) -> UpdateOutcome;

    /// Handles a terminal event.
    fn handle_event(&mut self, ctx: &mut ScreenContext, event: &Event) -> UpdateOutcome;

    /// Renders the screen.
    fn draw(&self, frame: &mut Frame);
}

/// Handle given to the active screen.
///
/// Requests are recorded and applied by the [`ScreenStack`] after the
/// current call returns, in this order: exit, delete previous, pop (if the
/// screen finished), push.
#[derive(Debug, Default)]
pub struct ScreenContext {
    push: Option<Box<dyn Screen>>,
    delete_previous: bool,
    exit: bool,
}

impl ScreenContext {
    /// Pushes `screen` on top of the stack.
    ///
    /// Only one push per call is kept; a later request replaces an earlier
    /// one.
    pub fn push(&mut self, screen: Box<dyn Screen>) {
        self.push = Some(screen);
    }

    /// Removes the screen directly below the requesting one.
    ///
    /// The stack must hold at least three screens when the request is
    /// applied, so the bottom screen is never deleted this way.
    pub fn delete_previous_screen(&mut self) {
        self.delete_previous = true;
    }

    /// Closes every screen and stops the application.
    pub fn request_exit(&mut self) {
        self.exit = true;
    }

    fn into_requests(self) -> Requests {
        Requests {
            push: self.push,
            delete_previous: self.delete_previous,
            exit: self.exit,
        }
    }
}

#[derive(Debug)]
struct Requests {
    push: Option<Box<dyn Screen>>,
    delete_previous: bool,
    exit: bool,
}

#[derive(Debug, Clone, Copy)]
enum Activation {
    Init,
    Resume,
}

/// Stack of screens; the top one is active.
///
/// The application ends when the stack becomes empty or a screen requests
/// an exit.
#[derive(Debug)]
pub struct ScreenStack {
    screens: Vec<Box<dyn Screen>>,
    should_exit: bool,
}

impl ScreenStack {
    /// Creates a stack holding `initial`. It is initialized by
    /// [`App::init`].
    #[must_use]
    pub fn new(initial: Box<dyn Screen>) -> Self {
        Self {
            screens: vec![initial],
            should_exit: false,
        }
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.screens.len()
    }

    fn activate_top(&mut self, runtime: &mut Runtime, activation: Activation) {
        let Some(top) = self.screens.last_mut() else {
            return;
        };
        runtime.set_tick_interval(top.tick_interval());
        runtime.set_render_mode(top.render_mode());
        let mut ctx = ScreenContext::default();
        match activation {
            Activation::Init => top.on_init(&mut ctx),
            Activation::Resume => top.on_resume(&mut ctx),
        }
        let requests = ctx.into_requests();
        self.apply(runtime, UpdateOutcome::Continue, requests);
    }

    fn apply(&mut self, runtime: &mut Runtime, outcome: UpdateOutcome, requests: Requests) {
        if requests.exit {
            debug!("exit requested, closing {} screens", self.screens.len());
            while let Some(mut screen) = self.screens.pop() {
                screen.on_close();
            }
            self.should_exit = true;
            return;
        }

        if requests.delete_previous {
            let depth = self.screens.len();
            assert!(
                depth >= 3,
                "delete_previous_screen needs at least 3 screens, stack has {depth}"
            );
            let mut previous = self.screens.remove(depth - 2);
            debug!("deleting previous screen {previous:?}");
            previous.on_close();
        }

        let popped = outcome.is_finished();
        if popped && let Some(mut screen) = self.screens.pop() {
            debug!("popping screen {screen:?}");
            screen.on_close();
        }

        if let Some(screen) = requests.push {
            debug!("pushing screen {screen:?}");
            self.screens.push(screen);
            self.activate_top(runtime, Activation::Init);
        } else if popped {
            self.activate_top(runtime, Activation::Resume);
        }

        if self.screens.is_empty() {
            self.should_exit = true;
        }
    }
}

impl App for ScreenStack {
    fn init(&mut self, runtime: &mut Runtime) {
        self.activate_top(runtime, Activation::Init);
    }

    fn should_exit(&self) -> bool {
        self.should_exit || self.screens.is_empty()
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        let Some(current) = self.screens.last_mut() else {
            return;
        };
        let mut ctx = ScreenContext::default();
        let outcome = current.handle_event(&mut ctx, &event);
        let requests = ctx.into_requests();
        self.apply(runtime, outcome, requests);
    }

    /// Draws the topmost screen that clears the background and every
    /// overlay above it, bottom to top.
    fn draw(&self, frame: &mut Frame) {
        let start = self
            .screens
            .iter()
            .rposition(|screen| screen.clears_background())
            .unwrap_or(0);
        for screen in &self.screens[start..] {
            screen.draw(frame);
        }
    }

    fn update(&mut self, runtime: &mut Runtime) {
        let Some(current) = self.screens.last_mut() else {
            return;
        };
        let mut ctx = ScreenContext::default();
        let outcome = current.update(&mut ctx);
        let requests = ctx.into_requests();
        self.apply(runtime, outcome, requests);
    }
}
