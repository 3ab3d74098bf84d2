//! Core Othello game logic: board representation, sandwich captures, player
//! types, and a copyable game state with explicit-side move application.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, Move, MoveError, DIRECTIONS, SIZE};
pub use player::Player;
pub use state::{GameOutcome, GameState, Score};
