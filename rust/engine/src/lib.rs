//! # noughts-engine: Tic-Tac-Toe Game Engine Core
//!
//! A deterministic tic-tac-toe engine for N players on an arbitrary square
//! board. Provides winning-line geometry, per-player move ledgers, move
//! validation with machine-readable rejection reasons, win/tie detection,
//! and high-score records for completed games. No I/O, no async, no clock
//! beyond the creation timestamp — the web layer supplies identity and
//! persistence.
//!
//! ## Core Modules
//!
//! - [`board`] - Winning-line geometry over the flat `0..n²` cell space
//! - [`ledger`] - Per-player claimed-cell sequences with uniqueness checks
//! - [`rules`] - Pure win/tie predicates over ledger views
//! - [`game`] - The aggregate root: turn order, move submission, outcomes
//! - [`score`] - High-score records and the leaderboard ordering
//! - [`errors`] - Validation error types for configuration and moves
//!
//! ## Quick Start
//!
//! ```rust
//! use noughts_engine::game::{Game, MoveOutcome};
//!
//! let players = vec!["alice".to_string(), "bob".to_string()];
//! let mut game = Game::new(players, 3, 2).expect("valid configuration");
//!
//! // Alice races through the top row while Bob works the middle one.
//! for (player, cell) in [("alice", 0), ("bob", 4), ("alice", 1), ("bob", 5)] {
//!     game.submit_move(&player.to_string(), cell).expect("legal move");
//! }
//!
//! match game.submit_move(&"alice".to_string(), 2).expect("legal move") {
//!     MoveOutcome::Won { combination, score } => {
//!         assert_eq!(combination, vec![0, 1, 2]);
//!         assert_eq!(score.moves_count, 3);
//!     }
//!     other => panic!("expected a win, got {other:?}"),
//! }
//! assert!(game.is_done());
//! ```
//!
//! ## Move Validation
//!
//! Every rejected move names its reason:
//!
//! ```rust
//! use noughts_engine::errors::MoveError;
//! use noughts_engine::game::Game;
//!
//! let players = vec!["alice".to_string(), "bob".to_string()];
//! let mut game = Game::new(players, 3, 2).expect("valid configuration");
//!
//! // Bob may not move first.
//! assert_eq!(
//!     game.submit_move(&"bob".to_string(), 0),
//!     Err(MoveError::NotYourTurn { player: "bob".into() })
//! );
//!
//! // Cell 9 is off a 3×3 board.
//! assert_eq!(
//!     game.submit_move(&"alice".to_string(), 9),
//!     Err(MoveError::OutOfRange { cell: 9, cells: 9 })
//! );
//! ```

pub mod board;
pub mod errors;
pub mod game;
pub mod ledger;
pub mod rules;
pub mod score;
