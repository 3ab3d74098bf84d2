mod agent;
mod alphabeta;
mod heuristic;
mod kind;
mod minimax;
mod qlearning;
mod qtable;
mod random;

pub use agent::{Agent, Decision, Experience};
pub use alphabeta::AlphaBetaAgent;
pub use heuristic::{evaluate, DiscCount, Heuristic};
pub use kind::{load_or_train, AgentKind};
pub use minimax::{MinimaxAgent, SearchResult};
pub use qlearning::{QLearningAgent, QLearningConfig};
pub use qtable::QTable;
pub use random::RandomAgent;
