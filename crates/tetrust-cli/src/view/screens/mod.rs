use std::{
    cell::{Ref, RefCell, RefMut},
    rc::Rc,
    time::Duration,
};

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    widgets::{Block as BlockWidget, Clear},
};
use tetrust_engine::GameModel;

use crate::view::widgets::style;

pub(crate) use self::{
    game::GameScreen, game_over::GameOverScreen, high_scores::HighScoresScreen,
    main_menu::MainMenuScreen, pause::PauseScreen,
};

mod game;
mod game_over;
mod high_scores;
mod main_menu;
mod pause;

/// Update interval of the menu-like screens.
const MENU_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// The game model shared by every screen, plus the gravity interval.
#[derive(Debug, Clone)]
pub(crate) struct SharedGame {
    model: Rc<RefCell<GameModel>>,
    gravity_interval: Duration,
}

impl SharedGame {
    pub fn new(model: Rc<RefCell<GameModel>>, gravity_interval: Duration) -> Self {
        Self {
            model,
            gravity_interval,
        }
    }

    pub fn model(&self) -> Ref<'_, GameModel> {
        self.model.borrow()
    }

    pub fn model_mut(&self) -> RefMut<'_, GameModel> {
        self.model.borrow_mut()
    }

    pub fn gravity_interval(&self) -> Duration {
        self.gravity_interval
    }
}

/// Fills the whole frame with the menu background.
fn draw_background(frame: &mut Frame) {
    frame.render_widget(BlockWidget::new().style(style::MENU), frame.area());
}

/// Clears a centered popup area and returns it.
fn popup_area(frame: &mut Frame, width: u16, height: u16) -> Rect {
    let area = frame
        .area()
        .centered(Constraint::Length(width), Constraint::Length(height));
    frame.render_widget(Clear, area);
    area
}

#[cfg(test)]
mod test_util {
    use std::{
        cell::RefCell,
        path::PathBuf,
        process,
        rc::Rc,
        time::{Duration, SystemTime, UNIX_EPOCH},
    };

    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};
    use ratatui_runtime::{App as _, Runtime, ScreenStack};
    use tetrust_engine::{GameConfig, GameModel, PieceSeed, ScoreManager};

    use super::SharedGame;

    /// Score file in a directory that does not exist, so saving fails
    /// without touching the file system.
    pub(super) fn unwritable_scores_path() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir()
            .join(format!("tetrust-missing-{}-{nanos}", process::id()))
            .join("scores.txt")
    }

    pub(super) fn shared_game() -> SharedGame {
        shared_game_with(ScoreManager::new(unwritable_scores_path()))
    }

    pub(super) fn shared_game_with(scores: ScoreManager) -> SharedGame {
        let model = GameModel::with_seed(scores, GameConfig::default(), PieceSeed::from_u64(3));
        SharedGame::new(Rc::new(RefCell::new(model)), Duration::from_millis(500))
    }

    /// Runs gravity ticks until the game is over.
    pub(super) fn play_until_game_over(game: &SharedGame) {
        let mut model = game.model_mut();
        if !model.state().is_running() {
            model.start_game();
        }
        for _ in 0..100_000 {
            if model.update_game() {
                return;
            }
        }
        panic!("game did not end");
    }

    pub(super) fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    pub(super) fn send(stack: &mut ScreenStack, runtime: &mut Runtime, codes: &[KeyCode]) {
        for code in codes {
            stack.handle_event(runtime, press(*code));
        }
    }

    /// Renders the stack and returns the screen as lines of text.
    pub(super) fn render_lines(stack: &ScreenStack) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| stack.draw(frame)).unwrap();
        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    pub(super) fn screen_contains(stack: &ScreenStack, text: &str) -> bool {
        render_lines(stack).iter().any(|line| line.contains(text))
    }
}
