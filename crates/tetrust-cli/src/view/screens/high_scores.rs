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
    screens::{MENU_TICK_INTERVAL, SharedGame, draw_background},
    widgets::{ScoreTableDisplay, style},
};

/// Half of the blink period of a new entry.
const BLINK_INTERVAL: Duration = Duration::from_secs(1);

const TABLE_WIDTH: u16 = 38;

/// Ranked high scores, with the entry of the game just played blinking.
#[derive(Debug)]
pub(crate) struct HighScoresScreen {
    game: SharedGame,
    new_entry: Option<usize>,
    elapsed: Duration,
}

impl HighScoresScreen {
    /// Opened from the main menu.
    pub fn table_only(game: SharedGame) -> Self {
        Self::after_game(game, None)
    }

    /// Opened after a game; `new_entry` is the rank the player just took.
    pub fn after_game(game: SharedGame, new_entry: Option<usize>) -> Self {
        Self {
            game,
            new_entry,
            elapsed: Duration::ZERO,
        }
    }

    fn highlighted(&self) -> Option<usize> {
        let phase = self.elapsed.as_millis() / BLINK_INTERVAL.as_millis();
        if phase % 2 == 0 { self.new_entry } else { None }
    }
}

impl Screen for HighScoresScreen {
    fn tick_interval(&self) -> Option<Duration> {
        Some(MENU_TICK_INTERVAL)
    }

    fn update(&mut self, _ctx: &mut ScreenContext) -> UpdateOutcome {
        if self.new_entry.is_some() {
            self.elapsed += MENU_TICK_INTERVAL;
        }
        UpdateOutcome::Continue
    }

    fn handle_event(&mut self, ctx: &mut ScreenContext, event: &Event) -> UpdateOutcome {
        match Key::from_event(event) {
            Some(key) if key.is_activate() => UpdateOutcome::Finished,
            Some(Key::Cancel) => {
                ctx.request_exit();
                UpdateOutcome::Continue
            }
            _ => UpdateOutcome::Continue,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        draw_background(frame);

        let model = self.game.model();
        let table = ScoreTableDisplay::new(model.scores())
            .highlighted(self.highlighted())
            .block(BlockWidget::bordered().border_style(style::BORDER));

        let [title_area, _, banner_area, _, table_area, _, continue_area, exit_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(table.height()),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .flex(Flex::Center)
            .areas(frame.area());

        frame.render_widget(
            Line::styled("----- HIGH SCORES -----", style::TITLE).centered(),
            title_area,
        );
        if self.new_entry.is_some() {
            frame.render_widget(
                Line::styled("NEW HIGH SCORE !", style::SELECTED).centered(),
                banner_area,
            );
        }
        frame.render_widget(
            table,
            table_area.centered_horizontally(Constraint::Length(TABLE_WIDTH)),
        );
        frame.render_widget(
            Line::styled("PRESS SPACE OR ENTER TO CONTINUE", style::MENU).centered(),
            continue_area,
        );
        frame.render_widget(
            Line::styled("PRESS ESCAPE TO EXIT", style::MENU).centered(),
            exit_area,
        );
    }
}
