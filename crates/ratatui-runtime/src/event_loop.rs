use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event as CrosstermEvent};

/// Events dispatched by the [`Runtime`](crate::Runtime).
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(crate) enum TuiEvent {
    /// The tick interval elapsed.
    Tick,
    /// A frame should be drawn, as decided by the [`RenderMode`].
    Render,
    /// Terminal input: key presses, resizes, etc.
    Crossterm(CrosstermEvent),
}

/// When frames are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Draw at a fixed interval, whether anything changed or not.
    Interval(Duration),
    /// Draw after every tick or terminal event.
    #[default]
    OnDirty,
    /// Like [`Self::OnDirty`], but at most once per interval.
    ///
    /// Bursts of input (key repeat) are folded into a single frame.
    Throttled(Duration),
}

impl RenderMode {
    /// Creates a `Throttled` mode from a maximum frame rate (FPS).
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Decides which event comes next.
///
/// Ticks are only produced while a tick interval is set. Changing the
/// interval restarts the tick phase, so a freshly activated screen always
/// waits one full interval before its first tick.
#[derive(Debug)]
pub(crate) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(crate) fn new() -> Self {
        let now = Instant::now();
        let past_time = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: now,
            last_render: past_time,
            // First frame is drawn right away.
            dirty: true,
        }
    }

    pub(crate) fn tick_interval(&self) -> Option<Duration> {
        self.tick_interval
    }

    pub(crate) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        if self.tick_interval != interval {
            self.tick_interval = interval;
            self.last_tick = Instant::now();
        }
    }

    pub(crate) fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub(crate) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Blocks until the next tick, render or terminal event.
    pub(crate) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(tick_interval) = self.tick_interval
                && now.duration_since(self.last_tick) >= tick_interval
            {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            let do_render = match self.render_mode {
                RenderMode::Interval(interval) => now.duration_since(self.last_render) >= interval,
                RenderMode::OnDirty => self.dirty,
                RenderMode::Throttled(interval) => {
                    self.dirty && now.duration_since(self.last_render) >= interval
                }
            };
            if do_render {
                self.last_render = now;
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Returns how long the terminal may be polled before a tick or render
    /// is due, or `None` to wait for input indefinitely.
    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render_at = match self.render_mode {
            RenderMode::Interval(interval) => Some(self.last_render + interval),
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_timeout_at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_event_is_render() {
        let mut events = EventLoop::new();
        assert!(events.next().unwrap().is_render());
    }

    #[test]
    fn test_due_tick_comes_before_render() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::ZERO));
        assert!(events.next().unwrap().is_tick());

        events.set_tick_interval(None);
        assert!(events.next().unwrap().is_render());
    }

    #[test]
    fn test_changing_interval_restarts_tick_phase() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::from_secs(60)));
        let now = Instant::now();
        let timeout = events.compute_timeout(now).unwrap();
        // Dirty on startup, so the render is due first.
        assert_eq!(timeout, Duration::ZERO);

        events.dirty = false;
        let timeout = events.compute_timeout(now).unwrap();
        assert!(timeout > Duration::from_secs(59));
    }

    #[test]
    fn test_idle_loop_waits_for_input() {
        let mut events = EventLoop::new();
        events.dirty = false;
        assert_eq!(events.compute_timeout(Instant::now()), None);

        events.set_render_mode(RenderMode::Interval(Duration::from_millis(10)));
        assert!(events.compute_timeout(Instant::now()).is_some());
    }

    #[test]
    fn test_throttled_from_rate() {
        assert_eq!(
            RenderMode::throttled_from_rate(50.0),
            RenderMode::Throttled(Duration::from_millis(20))
        );
    }
}
