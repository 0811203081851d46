use std::time::Duration;

use crossterm::event::Event;
use log::warn;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    text::Line,
};
use ratatui_runtime::{Screen, ScreenContext, UpdateOutcome};
use tetrust_engine::GameSummary;

use crate::view::{
    input::Key,
    screens::{HighScoresScreen, MENU_TICK_INTERVAL, SharedGame, draw_background},
    widgets::style,
};

const MAX_NAME_LEN: usize = 10;

/// Recap of the finished game. When the score made it into the table, the
/// player types a name, validated by pressing Enter twice.
#[derive(Debug)]
pub(crate) struct GameOverScreen {
    game: SharedGame,
    summary: GameSummary,
    name: String,
    confirm_pending: bool,
}

impl GameOverScreen {
    pub fn new(game: SharedGame, summary: GameSummary) -> Self {
        Self {
            game,
            summary,
            name: String::new(),
            confirm_pending: false,
        }
    }

    fn qualifies(&self) -> bool {
        self.summary.new_high_score_index().is_some()
    }

    fn edit_name(&mut self, key: Key) {
        match key {
            Key::Backspace => {
                self.name.pop();
            }
            Key::Char(c) if c.is_ascii_alphanumeric() || c == ' ' => {
                if self.name.len() >= MAX_NAME_LEN {
                    return;
                }
                self.name.push(c.to_ascii_uppercase());
            }
            _ => return,
        }
        self.confirm_pending = false;
    }

    fn submit(&self, ctx: &mut ScreenContext) {
        let index = match self.game.model_mut().submit_high_score(self.name.trim()) {
            Ok(index) => index,
            Err(e) => {
                warn!("high score not recorded: {e}");
                None
            }
        };
        ctx.push(Box::new(HighScoresScreen::after_game(self.game.clone(), index)));
    }
}

impl Screen for GameOverScreen {
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

        if !self.qualifies() {
            if key.is_activate() {
                ctx.push(Box::new(HighScoresScreen::after_game(self.game.clone(), None)));
                return UpdateOutcome::Finished;
            }
            return UpdateOutcome::Continue;
        }

        if !key.is_confirm() {
            self.edit_name(key);
            return UpdateOutcome::Continue;
        }
        if self.name.trim().is_empty() {
            return UpdateOutcome::Continue;
        }
        if !self.confirm_pending {
            self.confirm_pending = true;
            return UpdateOutcome::Continue;
        }
        self.submit(ctx);
        UpdateOutcome::Finished
    }

    fn draw(&self, frame: &mut Frame) {
        draw_background(frame);

        let mut lines = vec![
            Line::styled("GAME OVER !", style::TITLE),
            Line::default(),
            Line::styled(format!("Score : {}", self.summary.score()), style::MENU),
            Line::styled(
                format!("Number of lines cleared : {}", self.summary.lines_cleared()),
                style::MENU,
            ),
            Line::default(),
        ];
        if self.qualifies() {
            lines.extend([
                Line::styled("INPUT PLAYER NAME", style::MENU),
                Line::styled(format!("[{:<width$}]", self.name, width = MAX_NAME_LEN), style::SELECTED),
                Line::styled("(PRESS ENTER TWICE TO VALIDATE)", style::MENU),
            ]);
        } else {
            lines.push(Line::styled("PRESS SPACE OR ENTER TO CONTINUE", style::MENU));
        }

        let areas = Layout::vertical(lines.iter().map(|_| Constraint::Length(1)))
            .flex(Flex::Center)
            .split(frame.area());
        for (line, area) in lines.into_iter().zip(areas.iter()) {
            frame.render_widget(line.centered(), *area);
        }
    }
}
