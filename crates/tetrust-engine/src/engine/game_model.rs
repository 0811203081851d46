use std::iter;

use log::{debug, error, info};

use crate::{
    InvalidNameError, PieceCollisionError, ScoreManager,
    core::{
        board::Board,
        color::ColorPolicy,
        piece::{Piece, RotationDirection},
    },
};

use super::{GameStats, PieceGenerator, PieceSeed};

/// Lifecycle of a [`GameModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameState {
    NotStarted,
    Running,
    GameOver,
}

/// Result of [`GameModel::try_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MoveOutcome {
    /// The target position is free.
    Accepted,
    /// The target position is off the sides or the top, or blocked sideways.
    Rejected,
    /// The piece hit the floor or the stack while moving down.
    Landed,
}

/// Gameplay options fixed for the lifetime of a model.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub color_policy: ColorPolicy,
}

/// Snapshot of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    score: u64,
    lines_cleared: usize,
    pieces_placed: usize,
    new_high_score_index: Option<usize>,
}

impl GameSummary {
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn lines_cleared(&self) -> usize {
        self.lines_cleared
    }

    #[must_use]
    pub fn pieces_placed(&self) -> usize {
        self.pieces_placed
    }

    /// Returns the slot the score would take in the high score table, if any.
    #[must_use]
    pub fn new_high_score_index(&self) -> Option<usize> {
        self.new_high_score_index
    }
}

/// Where a piece would end up after a move, before committing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    Free,
    Blocked,
    Landing,
}

fn probe(board: &Board, piece: &Piece, dx: i32, dy: i32) -> Probe {
    let mut landing = false;
    for (x, y) in piece.moved(dx, dy).occupied_cells() {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return Probe::Blocked;
        };
        if x >= Board::WIDTH {
            return Probe::Blocked;
        }
        if y >= Board::HEIGHT {
            landing = true;
            continue;
        }
        if board.is_occupied(x, y) {
            if dy <= 0 {
                return Probe::Blocked;
            }
            landing = true;
        }
    }
    if landing {
        Probe::Landing
    } else {
        Probe::Free
    }
}

/// One play-through of the game.
///
/// The model owns the board, the controlled piece, the running statistics
/// and the high score table. It knows nothing about rendering or timing:
/// the caller decides when a gravity tick happens and reads the state back
/// through the accessors.
///
/// A landed piece is merged immediately, but completed rows are only
/// cleared by the next tick that does not land a piece.
#[derive(Debug, Clone)]
pub struct GameModel {
    board: Board,
    piece: Option<Piece>,
    stats: GameStats,
    state: GameState,
    generator: PieceGenerator,
    scores: ScoreManager,
    last_summary: Option<GameSummary>,
}

impl GameModel {
    /// Creates a model with a random piece sequence.
    ///
    /// `scores` is expected to be loaded already.
    #[must_use]
    pub fn new(scores: ScoreManager, config: GameConfig) -> Self {
        Self::from_generator(scores, PieceGenerator::new(config.color_policy))
    }

    /// Creates a model whose piece sequence is fully determined by `seed`.
    #[must_use]
    pub fn with_seed(scores: ScoreManager, config: GameConfig, seed: PieceSeed) -> Self {
        Self::from_generator(scores, PieceGenerator::with_seed(config.color_policy, seed))
    }

    fn from_generator(scores: ScoreManager, generator: PieceGenerator) -> Self {
        Self {
            board: Board::EMPTY,
            piece: None,
            stats: GameStats::new(),
            state: GameState::NotStarted,
            generator,
            scores,
            last_summary: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the falling piece. `None` before the first game and after a
    /// game over.
    #[must_use]
    pub fn controlled_piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.stats.score()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn scores(&self) -> &ScoreManager {
        &self.scores
    }

    /// Returns the summary of the most recently finished game.
    #[must_use]
    pub fn last_summary(&self) -> Option<&GameSummary> {
        self.last_summary.as_ref()
    }

    /// Resets the board and statistics and spawns the first piece.
    ///
    /// Can be called again after a game over to play another round.
    pub fn start_game(&mut self) {
        self.board.clear();
        self.stats = GameStats::new();
        self.last_summary = None;
        self.state = GameState::Running;
        info!("game started");
        if !self.spawn_piece() {
            self.finish_game();
        }
    }

    /// Advances the game by one gravity tick and returns whether it is over.
    ///
    /// The controlled piece moves down by one row. If it lands, it is merged
    /// and replaced; otherwise completed rows are cleared and scored.
    ///
    /// # Panics
    ///
    /// Panics if the game was never started.
    pub fn update_game(&mut self) -> bool {
        assert!(
            !self.state.is_not_started(),
            "update_game called before start_game"
        );
        if self.state.is_game_over() {
            return true;
        }

        if !self.try_move(0, 1, true).is_landed() {
            let lines = self.board.clear_completed_rows();
            if lines > 0 {
                debug!("cleared {lines} lines");
            }
            self.stats.record_cleared_lines(lines);
        }
        self.state.is_game_over()
    }

    /// Tries to move the controlled piece by `(dx, dy)`.
    ///
    /// Moves are all-or-nothing. Leaving the sides or the top is rejected,
    /// and so is hitting the stack sideways or upward. Reaching the floor, or
    /// the stack while moving down, is a landing.
    ///
    /// Without `commit` nothing changes and only the outcome is reported.
    /// With `commit`, an accepted move translates the piece, and a landing
    /// merges it into the board and spawns the next one, which ends the game
    /// if no spawn position fits.
    pub fn try_move(&mut self, dx: i32, dy: i32, commit: bool) -> MoveOutcome {
        let Some(piece) = &mut self.piece else {
            return MoveOutcome::Rejected;
        };
        match probe(&self.board, piece, dx, dy) {
            Probe::Blocked => MoveOutcome::Rejected,
            Probe::Free => {
                if commit {
                    piece.move_by(dx, dy);
                }
                MoveOutcome::Accepted
            }
            Probe::Landing => {
                if commit {
                    self.lock_piece();
                }
                MoveOutcome::Landed
            }
        }
    }

    /// Rotates the controlled piece clockwise.
    ///
    /// The rotation is not checked against the board or the walls; a piece
    /// rotated past a wall stays there until moved back in.
    pub fn rotate(&mut self) {
        if !self.state.is_running() {
            return;
        }
        if let Some(piece) = &mut self.piece {
            piece.rotate(RotationDirection::Right);
        }
    }

    pub fn move_left(&mut self) {
        if self.state.is_running() {
            self.try_move(-1, 0, true);
        }
    }

    pub fn move_right(&mut self) {
        if self.state.is_running() {
            self.try_move(1, 0, true);
        }
    }

    /// Moves the piece one row down, landing it if it cannot go further.
    pub fn soft_drop(&mut self) {
        if self.state.is_running() {
            self.try_move(0, 1, true);
        }
    }

    /// Replaces the controlled piece, if it fits on the board.
    pub fn replace_controlled_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if probe(&self.board, &piece, 0, 0) != Probe::Free {
            return Err(PieceCollisionError);
        }
        self.piece = Some(piece);
        Ok(())
    }

    /// Records the last finished game's score under `name` and saves the
    /// table.
    ///
    /// Returns the index of the new entry, or `None` if the score did not
    /// qualify or no game has finished yet. A failure to save is logged; the
    /// entry stays in the in-memory table.
    pub fn submit_high_score(&mut self, name: &str) -> Result<Option<usize>, InvalidNameError> {
        let Some(summary) = self.last_summary else {
            return Ok(None);
        };
        let index = self.scores.submit(name, summary.score)?;
        if index.is_some()
            && let Err(e) = self.scores.save()
        {
            error!(
                "failed to save high scores to {}: {e}",
                self.scores.path().display()
            );
        }
        Ok(index)
    }

    fn lock_piece(&mut self) {
        let Some(piece) = self.piece.take() else {
            return;
        };
        self.board.merge_piece(&piece);
        self.stats.record_landing();
        if !self.spawn_piece() {
            self.finish_game();
        }
    }

    /// Spawns a new piece at the top center, or in the leftmost column it
    /// fits in. Returns `false` if it fits nowhere.
    fn spawn_piece(&mut self) -> bool {
        let piece = self.generator.next_piece();
        let center = (Board::WIDTH as i32 - Piece::SIZE) / 2;
        let found = iter::once(center)
            .chain(0..Board::WIDTH as i32)
            .map(|x| piece.at(x, 0))
            .find(|candidate| probe(&self.board, candidate, 0, 0) == Probe::Free);
        match found {
            Some(piece) => {
                debug!("spawned {} at x = {}", piece.kind().as_char(), piece.x());
                self.piece = Some(piece);
                true
            }
            None => {
                self.piece = None;
                false
            }
        }
    }

    fn finish_game(&mut self) {
        self.piece = None;
        self.state = GameState::GameOver;
        let score = self.stats.score();
        let summary = GameSummary {
            score,
            lines_cleared: self.stats.total_cleared_lines(),
            pieces_placed: self.stats.completed_pieces(),
            new_high_score_index: self.scores.qualifies(score),
        };
        info!(
            "game over (score = {score}, lines = {}, pieces = {})",
            summary.lines_cleared, summary.pieces_placed
        );
        self.last_summary = Some(summary);
    }
}
