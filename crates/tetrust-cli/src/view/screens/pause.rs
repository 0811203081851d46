use std::time::Duration;

use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    text::Line,
    widgets::Block as BlockWidget,
};
use ratatui_runtime::{Screen, ScreenContext, UpdateOutcome};

use crate::view::{
    input::Key,
    screens::{MENU_TICK_INTERVAL, popup_area},
    widgets::style,
};

/// Overlay drawn over the game screen while it is paused.
///
/// The game below receives no ticks until the overlay is gone.
#[derive(Debug, Default)]
pub(crate) struct PauseScreen;

impl PauseScreen {
    pub fn new() -> Self {
        Self
    }
}

impl Screen for PauseScreen {
    fn tick_interval(&self) -> Option<Duration> {
        Some(MENU_TICK_INTERVAL)
    }

    fn clears_background(&self) -> bool {
        false
    }

    fn update(&mut self, _ctx: &mut ScreenContext) -> UpdateOutcome {
        UpdateOutcome::Continue
    }

    fn handle_event(&mut self, ctx: &mut ScreenContext, event: &Event) -> UpdateOutcome {
        match Key::from_event(event) {
            Some(key) if key.is_activate() => UpdateOutcome::Finished,
            Some(Key::Cancel) => {
                // Drop the game as well, back to the menu.
                ctx.delete_previous_screen();
                UpdateOutcome::Finished
            }
            _ => UpdateOutcome::Continue,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let area = popup_area(frame, 34, 7);
        let block = BlockWidget::bordered()
            .style(style::MENU)
            .border_style(style::BORDER);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [title_area, _, resume_area, quit_area] = Layout::vertical([Constraint::Length(1); 4])
            .flex(Flex::Center)
            .areas(inner);
        frame.render_widget(Line::styled("PAUSED", style::SELECTED).centered(), title_area);
        frame.render_widget(
            Line::styled("SPACE OR ENTER TO RESUME", style::MENU).centered(),
            resume_area,
        );
        frame.render_widget(Line::styled("ESCAPE TO QUIT", style::MENU).centered(), quit_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use ratatui_runtime::{App as _, Runtime, ScreenStack};

    use super::*;
    use crate::view::screens::{
        MainMenuScreen, SharedGame,
        test_util::{screen_contains, send, shared_game},
    };

    fn paused_stack(game: &SharedGame) -> (ScreenStack, Runtime) {
        let mut stack = ScreenStack::new(Box::new(MainMenuScreen::new(game.clone())));
        let mut runtime = Runtime::new();
        stack.init(&mut runtime);
        send(&mut stack, &mut runtime, &[KeyCode::Enter, KeyCode::Esc]);
        assert_eq!(stack.depth(), 3);
        (stack, runtime)
    }

    #[test]
    fn test_resume_keeps_game_state() {
        let game = shared_game();
        let (mut stack, mut runtime) = paused_stack(&game);
        let piece = *game.model().controlled_piece().unwrap();
        assert_eq!(runtime.tick_interval(), Some(MENU_TICK_INTERVAL));

        // Ticks and moves are not forwarded to the game while paused.
        stack.update(&mut runtime);
        send(&mut stack, &mut runtime, &[KeyCode::Left]);
        assert_eq!(game.model().controlled_piece(), Some(&piece));

        send(&mut stack, &mut runtime, &[KeyCode::Char(' ')]);
        assert_eq!(stack.depth(), 2);
        assert_eq!(runtime.tick_interval(), Some(game.gravity_interval()));
        assert_eq!(game.model().controlled_piece(), Some(&piece));
        assert!(!screen_contains(&stack, "PAUSED"));
    }

    #[test]
    fn test_escape_returns_to_menu() {
        let game = shared_game();
        let (mut stack, mut runtime) = paused_stack(&game);

        send(&mut stack, &mut runtime, &[KeyCode::Esc]);
        assert_eq!(stack.depth(), 1);
        assert!(!stack.should_exit());
        assert!(screen_contains(&stack, "> Start Game <"));
    }
}
