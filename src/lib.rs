//! Tengen: a Go engine with MCTS move selection.
//!
//! The crate adjudicates full games of Go — legal placement, captures, ko,
//! territory scoring — and picks moves with a Monte Carlo Tree Search agent
//! running on cloned game states.
//!
//! ## Modules
//!
//! - [`board`] - Position model: stones, groups, liberties, captures, scoring
//! - [`game`] - Turn rotation, move history, and the ko rule
//! - [`mcts`] - The search tree and the MCTS player
//! - [`player`] - The player capability plus human/random implementations
//!
//! ## Example
//!
//! ```
//! use tengen::board::{Color, Move};
//! use tengen::game::GameState;
//! use tengen::mcts::MctsPlayer;
//! use tengen::player::Player;
//!
//! // Black opens in the center of a small board.
//! let mut game = GameState::two_player(5);
//! game.add_move(Move::play(2, 2)).unwrap();
//!
//! // A (deliberately shallow) engine answers for White.
//! let mut white = MctsPlayer::with_iterations(Color::White, 50).with_seed(7);
//! let reply = white.get_move(&game);
//! assert!(game.is_legal_move(reply, Color::White));
//! ```

pub mod board;
pub mod game;
pub mod mcts;
pub mod player;
