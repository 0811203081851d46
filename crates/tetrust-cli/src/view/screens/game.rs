use std::time::Duration;

use crossterm::event::Event;
use log::info;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    widgets::Block as BlockWidget,
};
use ratatui_runtime::{RenderMode, Screen, ScreenContext, UpdateOutcome};

use crate::view::{
    input::Key,
    screens::{GameOverScreen, PauseScreen, SharedGame},
    widgets::{BoardDisplay, KeyBinding, KeyBindingDisplay, StatsDisplay, style},
};

const KEY_BINDINGS: &[KeyBinding] = &[
    (&["←", "A"], "Left"),
    (&["→", "D"], "Right"),
    (&["↓", "S"], "Soft drop"),
    (&["↑", "W"], "Rotate"),
    (&["Esc"], "Pause"),
    (&["F1"], "Debug"),
];

/// The running game. Gravity advances on every tick.
#[derive(Debug)]
pub(crate) struct GameScreen {
    game: SharedGame,
    debug: bool,
}

impl GameScreen {
    pub fn new(game: SharedGame) -> Self {
        Self { game, debug: false }
    }
}

impl Screen for GameScreen {
    fn on_init(&mut self, _ctx: &mut ScreenContext) {
        self.game.model_mut().start_game();
    }

    fn tick_interval(&self) -> Option<Duration> {
        Some(self.game.gravity_interval())
    }

    fn render_mode(&self) -> RenderMode {
        RenderMode::throttled_from_rate(60.0)
    }

    fn update(&mut self, ctx: &mut ScreenContext) -> UpdateOutcome {
        let mut model = self.game.model_mut();
        if !model.update_game() {
            return UpdateOutcome::Continue;
        }
        if let Some(summary) = model.last_summary().copied() {
            ctx.push(Box::new(GameOverScreen::new(self.game.clone(), summary)));
        }
        UpdateOutcome::Finished
    }

    fn handle_event(&mut self, ctx: &mut ScreenContext, event: &Event) -> UpdateOutcome {
        let Some(key) = Key::from_event(event) else {
            return UpdateOutcome::Continue;
        };
        match key {
            Key::Cancel => ctx.push(Box::new(PauseScreen::new())),
            Key::ToggleDebug => {
                self.debug = !self.debug;
                info!("debug rendering {}", if self.debug { "on" } else { "off" });
            }
            _ => {
                let mut model = self.game.model_mut();
                match key.direction() {
                    Some(Key::Up) => model.rotate(),
                    Some(Key::Left) => model.move_left(),
                    Some(Key::Right) => model.move_right(),
                    Some(Key::Down) => model.soft_drop(),
                    _ => {}
                }
            }
        }
        UpdateOutcome::Continue
    }

    fn draw(&self, frame: &mut Frame) {
        let model = self.game.model();

        frame.render_widget(BlockWidget::new().style(style::DEFAULT), frame.area());

        let board = BoardDisplay::new(model.board())
            .piece(model.controlled_piece())
            .debug(self.debug)
            .block(BlockWidget::bordered().border_style(style::BORDER));
        let stats = StatsDisplay::new(model.stats()).block(BlockWidget::bordered().title("STATS"));
        let help = KeyBindingDisplay::new(KEY_BINDINGS).block(BlockWidget::bordered().title("KEYS"));
        let side_width = stats.width();

        let [board_area, side_area] = Layout::horizontal([
            Constraint::Length(board.width()),
            Constraint::Length(side_width),
        ])
        .spacing(2)
        .areas(frame.area().centered_horizontally(Constraint::Length(
            board.width() + 2 + side_width,
        )));
        let board_area = board_area.centered_vertically(Constraint::Length(board.height()));
        let [stats_area, _, help_area] = Layout::vertical([
            Constraint::Length(stats.height()),
            Constraint::Length(1),
            Constraint::Length(help.height()),
        ])
        .areas(side_area.centered_vertically(Constraint::Length(board.height())));

        frame.render_widget(board, board_area);
        frame.render_widget(stats, stats_area);
        frame.render_widget(help, help_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use ratatui_runtime::{App as _, Runtime, ScreenStack};

    use super::*;
    use crate::view::screens::{
        MENU_TICK_INTERVAL, MainMenuScreen,
        test_util::{play_until_game_over, screen_contains, send, shared_game},
    };

    fn game_stack(game: &SharedGame) -> (ScreenStack, Runtime) {
        let mut stack = ScreenStack::new(Box::new(MainMenuScreen::new(game.clone())));
        let mut runtime = Runtime::new();
        stack.init(&mut runtime);
        send(&mut stack, &mut runtime, &[KeyCode::Enter]);
        assert_eq!(stack.depth(), 2);
        (stack, runtime)
    }

    fn piece_x(game: &SharedGame) -> i32 {
        game.model().controlled_piece().unwrap().x()
    }

    #[test]
    fn test_arrows_and_wasd_move_the_piece() {
        let game = shared_game();
        let (mut stack, mut runtime) = game_stack(&game);
        let x = piece_x(&game);

        send(&mut stack, &mut runtime, &[KeyCode::Left]);
        assert_eq!(piece_x(&game), x - 1);
        send(&mut stack, &mut runtime, &[KeyCode::Char('d'), KeyCode::Char('D')]);
        assert_eq!(piece_x(&game), x + 1);
    }

    #[test]
    fn test_tick_applies_gravity() {
        let game = shared_game();
        let (mut stack, mut runtime) = game_stack(&game);
        let y = game.model().controlled_piece().unwrap().y();

        stack.update(&mut runtime);

        assert_eq!(game.model().controlled_piece().unwrap().y(), y + 1);
    }

    #[test]
    fn test_escape_pushes_pause() {
        let game = shared_game();
        let (mut stack, mut runtime) = game_stack(&game);

        send(&mut stack, &mut runtime, &[KeyCode::Esc]);
        assert_eq!(stack.depth(), 3);
        assert_eq!(runtime.tick_interval(), Some(MENU_TICK_INTERVAL));
        assert!(screen_contains(&stack, "PAUSED"));
        // The board stays visible below the overlay.
        assert!(screen_contains(&stack, "STATS"));
    }

    #[test]
    fn test_game_over_replaces_game_screen() {
        let game = shared_game();
        let (mut stack, mut runtime) = game_stack(&game);

        play_until_game_over(&game);
        stack.update(&mut runtime);

        assert_eq!(stack.depth(), 2);
        assert!(screen_contains(&stack, "GAME OVER !"));
        assert_eq!(runtime.tick_interval(), Some(MENU_TICK_INTERVAL));
    }
}
