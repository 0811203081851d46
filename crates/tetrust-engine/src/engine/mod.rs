//! Game engine logic and state management.
//!
//! This module builds the gameplay on top of the core data structures:
//!
//! - [`GameModel`] - One play-through: board, controlled piece, gravity, scoring
//! - [`GameStats`] - Running statistics (score, cleared lines, placed pieces)
//! - [`PieceGenerator`] - Random piece generation with a color policy
//! - [`PieceSeed`] - Seed for deterministic piece generation
//!
//! # Game Flow
//!
//! 1. Create a [`GameModel`] with a loaded [`ScoreManager`](crate::ScoreManager)
//! 2. Call [`GameModel::start_game`]
//! 3. Call [`GameModel::update_game`] once per gravity tick, and forward
//!    player input to the move/rotate actions in between
//! 4. When `update_game` returns `true`, read [`GameModel::last_summary`]
//!
//! # Example
//!
//! ```
//! use tetrust_engine::{GameConfig, GameModel, PieceSeed, ScoreManager};
//!
//! let mut model = GameModel::with_seed(
//!     ScoreManager::new("scores.txt"),
//!     GameConfig::default(),
//!     PieceSeed::from_u64(42),
//! );
//! model.start_game();
//!
//! model.move_left();
//! model.rotate();
//! let game_over = model.update_game();
//!
//! assert!(!game_over);
//! assert!(model.state().is_running());
//! ```

pub use self::{game_model::*, game_stats::*, piece_generator::*};

mod game_model;
mod game_stats;
mod piece_generator;
