//! # Othello Agents
//!
//! An 8×8 Othello engine with interchangeable automated players: depth-limited
//! Minimax, Alpha-Beta pruning, tabular Q-learning and a uniform random mover.
//!
//! ## Modules
//!
//! - [`game`]: Board, moves, legality, flipping, scoring and terminal detection
//! - [`ai`]: Agent trait, heuristic, search agents, Q-learning agent and table
//! - [`training`]: Training episodes, match harness, trainer, metrics
//! - [`checkpoint`]: Q table persistence
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod checkpoint;
pub mod config;
pub mod error;
pub mod game;
pub mod training;
