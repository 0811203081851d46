use std::time::Duration;

use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
};
use ratatui_runtime::{Screen, ScreenContext, UpdateOutcome};

use crate::view::{
    input::Key,
    screens::{GameScreen, HighScoresScreen, MENU_TICK_INTERVAL, SharedGame, draw_background},
    widgets::{KeyBinding, KeyBindingDisplay, style},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    StartGame,
    HighScores,
    Exit,
}

impl MenuItem {
    const ALL: [Self; 3] = [Self::StartGame, Self::HighScores, Self::Exit];

    fn label(self) -> &'static str {
        match self {
            MenuItem::StartGame => "Start Game",
            MenuItem::HighScores => "High Scores",
            MenuItem::Exit => "Exit",
        }
    }
}

const ITEM_HEIGHT: u16 = 2;

const KEY_BINDINGS: &[KeyBinding] = &[
    (&["↑", "↓"], "Select"),
    (&["Enter", "Space"], "Activate"),
    (&["Esc"], "Exit"),
];

/// First screen: start a game, look at the high scores, or quit.
#[derive(Debug)]
pub(crate) struct MainMenuScreen {
    game: SharedGame,
    selected: usize,
}

impl MainMenuScreen {
    pub fn new(game: SharedGame) -> Self {
        Self { game, selected: 0 }
    }

    fn activate(&self, ctx: &mut ScreenContext) -> UpdateOutcome {
        match MenuItem::ALL[self.selected] {
            MenuItem::StartGame => ctx.push(Box::new(GameScreen::new(self.game.clone()))),
            MenuItem::HighScores => {
                ctx.push(Box::new(HighScoresScreen::table_only(self.game.clone())));
            }
            MenuItem::Exit => return UpdateOutcome::Finished,
        }
        UpdateOutcome::Continue
    }
}

impl Screen for MainMenuScreen {
    fn tick_interval(&self) -> Option<Duration> {
        Some(MENU_TICK_INTERVAL)
    }

    fn update(&mut self, _ctx: &mut ScreenContext) -> UpdateOutcome {
        UpdateOutcome::Continue
    }

    fn handle_event(&mut self, ctx: &mut ScreenContext, event: &Event) -> UpdateOutcome {
        let Some(key) = Key::from_event(event) else {
            return UpdateOutcome::Continue;
        };
        let len = MenuItem::ALL.len();
        match key {
            Key::Cancel => return UpdateOutcome::Finished,
            _ if key.is_activate() => return self.activate(ctx),
            Key::Up => self.selected = (self.selected + len - 1) % len,
            Key::Down => self.selected = (self.selected + 1) % len,
            _ => {}
        }
        UpdateOutcome::Continue
    }

    fn draw(&self, frame: &mut Frame) {
        draw_background(frame);

        let [_, title_area, _, items_area, help_area] = Layout::vertical([
            Constraint::Percentage(10),
            Constraint::Length(1),
            Constraint::Percentage(20),
            Constraint::Length(ITEM_HEIGHT * 3),
            Constraint::Fill(1),
        ])
        .areas(frame.area());

        frame.render_widget(Line::styled("T E T R I S", style::TITLE).centered(), title_area);

        let item_areas =
            Layout::vertical(MenuItem::ALL.map(|_| Constraint::Length(ITEM_HEIGHT))).split(items_area);
        for (i, (item, area)) in MenuItem::ALL.iter().zip(item_areas.iter()).enumerate() {
            let line = if i == self.selected {
                Line::styled(format!("> {} <", item.label()), style::SELECTED)
            } else {
                Line::styled(item.label(), style::MENU)
            };
            frame.render_widget(line.centered(), *area);
        }

        let help = KeyBindingDisplay::new(KEY_BINDINGS).single_line();
        let help_area = help_area.centered_vertically(Constraint::Length(help.height()));
        frame.render_widget(help, help_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use ratatui_runtime::{App as _, Runtime, ScreenStack};

    use super::*;
    use crate::view::screens::test_util::{screen_contains, send, shared_game};

    fn menu_stack(game: &SharedGame) -> (ScreenStack, Runtime) {
        let mut stack = ScreenStack::new(Box::new(MainMenuScreen::new(game.clone())));
        let mut runtime = Runtime::new();
        stack.init(&mut runtime);
        (stack, runtime)
    }

    #[test]
    fn test_start_game_pushes_game_screen() {
        let game = shared_game();
        let (mut stack, mut runtime) = menu_stack(&game);
        assert_eq!(runtime.tick_interval(), Some(MENU_TICK_INTERVAL));

        send(&mut stack, &mut runtime, &[KeyCode::Enter]);

        assert_eq!(stack.depth(), 2);
        assert!(game.model().state().is_running());
        assert_eq!(runtime.tick_interval(), Some(game.gravity_interval()));
    }

    #[test]
    fn test_selection_wraps() {
        let game = shared_game();
        let (mut stack, mut runtime) = menu_stack(&game);

        // Up from the first item selects "Exit".
        send(&mut stack, &mut runtime, &[KeyCode::Up]);
        assert!(screen_contains(&stack, "> Exit <"));
        send(&mut stack, &mut runtime, &[KeyCode::Down]);
        assert!(screen_contains(&stack, "> Start Game <"));

        send(&mut stack, &mut runtime, &[KeyCode::Up, KeyCode::Char(' ')]);
        assert!(stack.should_exit());
    }

    #[test]
    fn test_high_scores_item() {
        let game = shared_game();
        let (mut stack, mut runtime) = menu_stack(&game);

        send(&mut stack, &mut runtime, &[KeyCode::Down, KeyCode::Enter]);
        assert_eq!(stack.depth(), 2);
        assert!(screen_contains(&stack, "HIGH SCORES"));
        assert!(game.model().state().is_not_started());

        // Back to the menu.
        send(&mut stack, &mut runtime, &[KeyCode::Enter]);
        assert_eq!(stack.depth(), 1);
        assert!(screen_contains(&stack, "> High Scores <"));
    }

    #[test]
    fn test_escape_exits() {
        let game = shared_game();
        let (mut stack, mut runtime) = menu_stack(&game);

        send(&mut stack, &mut runtime, &[KeyCode::Esc]);
        assert!(stack.should_exit());
    }
}
