use crate::config::AppConfig;
use crate::error::{CheckpointError, TrainingError};
use crate::game::Player;
use crate::training::trainer::Trainer;

use super::agent::Agent;
use super::alphabeta::AlphaBetaAgent;
use super::minimax::MinimaxAgent;
use super::qlearning::QLearningAgent;
use super::random::RandomAgent;

/// Agent families selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AgentKind {
    Minimax,
    #[value(name = "alphabeta")]
    AlphaBeta,
    #[value(name = "qlearning")]
    QLearning,
    Random,
}

impl AgentKind {
    /// Build an agent for `side`. Search agents take their depth from
    /// `config.search`; the learner is loaded or trained via [`load_or_train`].
    pub fn build(self, side: Player, config: &AppConfig) -> Result<Box<dyn Agent>, TrainingError> {
        let agent: Box<dyn Agent> = match self {
            AgentKind::Minimax => Box::new(MinimaxAgent::new(side, config.search.minimax_depth)),
            AgentKind::AlphaBeta => {
                Box::new(AlphaBetaAgent::new(side, config.search.alphabeta_depth))
            }
            AgentKind::QLearning => Box::new(load_or_train(side, config)?),
            AgentKind::Random => Box::new(RandomAgent::new(side)),
        };
        Ok(agent)
    }
}

/// Load the learner's table from `config.table.path`. When that fails, train
/// a fresh table with the configured trainer and save it to the same path.
pub fn load_or_train(side: Player, config: &AppConfig) -> Result<QLearningAgent, TrainingError> {
    let path = &config.table.path;
    let mut agent = match config.training.seed {
        Some(seed) => QLearningAgent::with_seed(side, config.qlearning, seed),
        None => QLearningAgent::new(side, config.qlearning),
    };

    match agent.load(path) {
        Ok(()) => return Ok(agent),
        Err(CheckpointError::NotFound(_)) => {
            log::info!("no Q table at {}, training a new one", path.display());
        }
        Err(e) => {
            log::warn!("could not load Q table ({e}), training a new one");
        }
    }

    Trainer::new(config.training.clone()).train(&mut agent)?;
    agent.save(path)?;
    Ok(agent)
}
