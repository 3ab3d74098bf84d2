use std::path::Path;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::checkpoint::{self, TableMetadata};
use crate::error::{CheckpointError, TrainingError};
use crate::game::{GameState, Move, Player};
use crate::training::episode::play_training_episode;
use crate::training::metrics::EpisodeResult;

use super::agent::{Agent, Decision, Experience};
use super::qtable::QTable;
use super::random::RandomAgent;

/// Q-learning hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    pub learning_rate: f64,
    pub discount: f64,
    /// Probability of playing a uniformly random move instead of the greedy one.
    pub exploration: f64,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        QLearningConfig {
            learning_rate: 0.1,
            discount: 0.9,
            exploration: 0.2,
        }
    }
}

/// Tabular Q-learning agent. Owns its table; nothing is shared between agents
/// unless a driver explicitly moves a table from one to another. A clone
/// carries its own copy of the table and continues the RNG stream.
#[derive(Clone)]
pub struct QLearningAgent {
    side: Player,
    config: QLearningConfig,
    table: QTable,
    rng: StdRng,
    episodes_trained: usize,
}

impl QLearningAgent {
    pub fn new(side: Player, config: QLearningConfig) -> Self {
        Self::build(side, config, QTable::new(), StdRng::from_os_rng())
    }

    pub fn with_seed(side: Player, config: QLearningConfig, seed: u64) -> Self {
        Self::build(side, config, QTable::new(), StdRng::seed_from_u64(seed))
    }

    pub fn with_table(side: Player, config: QLearningConfig, table: QTable) -> Self {
        Self::build(side, config, table, StdRng::from_os_rng())
    }

    fn build(side: Player, config: QLearningConfig, table: QTable, rng: StdRng) -> Self {
        QLearningAgent {
            side,
            config,
            table,
            rng,
            episodes_trained: 0,
        }
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut QTable {
        &mut self.table
    }

    pub fn into_table(self) -> QTable {
        self.table
    }

    pub fn episodes_trained(&self) -> usize {
        self.episodes_trained
    }

    pub fn exploration(&self) -> f64 {
        self.config.exploration
    }

    /// Set exploration directly (e.g. 0.0 for pure greedy play).
    pub fn set_exploration(&mut self, exploration: f64) {
        self.config.exploration = exploration;
    }

    pub fn q_value(&self, state: &GameState, mv: Move) -> f64 {
        self.table.get(&state.fingerprint(), mv)
    }

    /// Epsilon-greedy choice among this agent's legal moves. Ties between
    /// greedy candidates are broken uniformly at random.
    pub fn select_action(&mut self, state: &GameState) -> Option<Move> {
        let values = self.table.action_values(state, self.side);
        if values.is_empty() {
            return None;
        }

        if self.rng.random::<f64>() < self.config.exploration {
            let idx = self.rng.random_range(0..values.len());
            return Some(values[idx].0);
        }

        let max_q = values
            .iter()
            .map(|&(_, q)| q)
            .fold(f64::NEG_INFINITY, f64::max);
        let best: Vec<Move> = values
            .iter()
            .filter(|&&(_, q)| q == max_q)
            .map(|&(mv, _)| mv)
            .collect();
        let idx = self.rng.random_range(0..best.len());
        Some(best[idx])
    }

    /// One-step temporal-difference update of the (prior, action) entry.
    /// Returns the new estimate.
    pub fn learn(
        &mut self,
        prior: &GameState,
        action: Move,
        reward: f64,
        resulting: &GameState,
    ) -> f64 {
        let key = prior.fingerprint();
        let old_q = self.table.get(&key, action);
        let max_future_q = self.table.best_value(resulting, self.side);
        let new_q =
            old_q + self.config.learning_rate * (reward + self.config.discount * max_future_q - old_q);
        self.table.set(key, action, new_q);
        new_q
    }

    /// Zero until the game is over, then +1 / -1 / 0 for win / loss / tie.
    pub fn reward(&self, state: &GameState) -> f64 {
        if !state.is_terminal() {
            return 0.0;
        }
        let score = state.score();
        let own = score.of(self.side);
        let opp = score.of(self.side.opponent());
        match own.cmp(&opp) {
            std::cmp::Ordering::Greater => 1.0,
            std::cmp::Ordering::Less => -1.0,
            std::cmp::Ordering::Equal => 0.0,
        }
    }

    /// Play one full training game against `opponent`, updating the table on
    /// every ply this agent makes.
    pub fn train_episode(
        &mut self,
        opponent: &mut RandomAgent,
    ) -> Result<EpisodeResult, TrainingError> {
        let result = play_training_episode(self, opponent)?;
        self.episodes_trained += 1;
        Ok(result)
    }

    /// Train against a uniformly random opponent for `episodes` games. The
    /// table keeps every update across episodes.
    pub fn train(&mut self, episodes: usize) -> Result<Vec<EpisodeResult>, TrainingError> {
        let seed = self.rng.random::<u64>();
        let mut opponent = RandomAgent::with_seed(self.side.opponent(), seed);
        (0..episodes)
            .map(|_| self.train_episode(&mut opponent))
            .collect()
    }

    /// Write the table to `path`.
    pub fn save(&self, path: &Path) -> Result<(), CheckpointError> {
        let metadata = TableMetadata::new(self.side, self.episodes_trained, self.config, &self.table);
        checkpoint::save_table(path, &self.table, &metadata)
    }

    /// Replace the table with the one stored at `path`. The current table is
    /// kept if loading fails.
    pub fn load(&mut self, path: &Path) -> Result<(), CheckpointError> {
        let loaded = checkpoint::load_table(path)?;
        if loaded.metadata.side != self.side {
            log::warn!(
                "table at {} was trained for {}, loading into a {} agent",
                path.display(),
                loaded.metadata.side.name(),
                self.side.name()
            );
        }
        self.episodes_trained = loaded.metadata.episodes_trained;
        self.table = loaded.table;
        Ok(())
    }
}

impl Agent for QLearningAgent {
    fn propose_move(&mut self, state: &GameState) -> Decision {
        let start = Instant::now();
        let mv = self.select_action(state);
        let elapsed: Duration = start.elapsed();
        log::debug!("{} ({}): {:?}", self.name(), self.side.name(), mv);
        Decision {
            mv,
            nodes_expanded: 0,
            elapsed,
        }
    }

    fn name(&self) -> &str {
        "QLearning"
    }

    fn side(&self) -> Player {
        self.side
    }

    fn update(&mut self, experience: &Experience) {
        self.learn(
            &experience.state,
            experience.action,
            experience.reward,
            &experience.next_state,
        );
    }

    fn clone_agent(&self) -> Box<dyn Agent> {
        Box::new(self.clone())
    }
}
