use std::time::Duration;

use crate::game::{GameState, Move, Player};

/// A single step of experience for RL training.
#[derive(Debug, Clone)]
pub struct Experience {
    pub state: GameState,
    pub action: Move,
    pub reward: f64,
    pub next_state: GameState,
}

/// Outcome of one move request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    /// `None` when the agent's side has no legal move.
    pub mv: Option<Move>,
    /// Tree nodes visited for this request only. Zero for agents that do not search.
    pub nodes_expanded: u64,
    pub elapsed: Duration,
}

impl Decision {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Universal interface for all agents. A driver holds one `Box<dyn Agent>`
/// per side and never needs to know which kind it is.
pub trait Agent {
    /// Choose a move for this agent's side in `state`.
    fn propose_move(&mut self, state: &GameState) -> Decision;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// The side this agent plays.
    fn side(&self) -> Player;

    /// Update the agent from a single experience.
    fn update(&mut self, _experience: &Experience) {}

    /// Clone the agent into a boxed trait object.
    fn clone_agent(&self) -> Box<dyn Agent>;
}
