use crate::ai::{Agent, QLearningAgent, RandomAgent};
use crate::error::TrainingError;
use crate::training::episode;
use crate::training::metrics::TrainingMetrics;

/// Trainer configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub num_episodes: usize,
    /// Must be non-zero.
    pub log_interval: usize,
    /// Must be non-zero.
    pub eval_interval: usize,
    pub eval_games: usize,
    /// Fixed seed for the training and evaluation opponents; fresh entropy
    /// when absent.
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            num_episodes: 500,
            log_interval: 100,
            eval_interval: 250,
            eval_games: 20,
            seed: None,
        }
    }
}

/// Runs Q-learning episodes against a uniformly random opponent.
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Trainer { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Run the full training loop.
    pub fn train(&self, agent: &mut QLearningAgent) -> Result<TrainingMetrics, TrainingError> {
        let side = agent.side();
        let mut metrics = TrainingMetrics::with_capacity(side, self.config.log_interval.max(1));

        let start_episode = agent.episodes_trained() + 1;
        let end_episode = agent.episodes_trained() + self.config.num_episodes;

        let mut opponent = match self.config.seed {
            // Offset by the episode count so resumed runs see new games.
            Some(seed) => {
                RandomAgent::with_seed(side.opponent(), seed.wrapping_add(start_episode as u64))
            }
            None => RandomAgent::new(side.opponent()),
        };
        let mut eval_opponent = match self.config.seed {
            Some(seed) => RandomAgent::with_seed(
                side.opponent(),
                seed.rotate_left(32) ^ start_episode as u64,
            ),
            None => RandomAgent::new(side.opponent()),
        };

        log::info!(
            "starting Q-learning as {} for {} episodes (episodes {}..={})",
            side.name(),
            self.config.num_episodes,
            start_episode,
            end_episode
        );

        for episode in start_episode..=end_episode {
            let result = agent.train_episode(&mut opponent)?;
            metrics.record_episode(result);

            if episode % self.config.log_interval == 0 {
                let window = self.config.log_interval;
                log::info!(
                    "episode {}/{} | win({}): {:.1}% | draw: {:.1}% | avg_len: {:.1} | table: {} entries",
                    episode,
                    end_episode,
                    window,
                    metrics.win_rate(window) * 100.0,
                    metrics.draw_rate(window) * 100.0,
                    metrics.average_game_length(window),
                    agent.table().len(),
                );
            }

            if episode % self.config.eval_interval == 0 {
                let eval_wr =
                    episode::evaluate_against(agent, &mut eval_opponent, self.config.eval_games)?;
                log::info!(
                    "eval vs random ({} games): {:.1}% win rate",
                    self.config.eval_games,
                    eval_wr * 100.0
                );
            }
        }

        log::info!(
            "training complete: {} episodes this run, {} in total, {} table entries",
            metrics.total_episodes(),
            agent.episodes_trained(),
            agent.table().len()
        );

        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::QLearningConfig;
    use crate::game::Player;

    fn small_config() -> TrainerConfig {
        TrainerConfig {
            num_episodes: 6,
            log_interval: 3,
            eval_interval: 6,
            eval_games: 2,
            seed: Some(7),
        }
    }

    #[test]
    fn trains_requested_episodes() {
        let trainer = Trainer::new(small_config());
        let mut agent = QLearningAgent::with_seed(Player::Dark, QLearningConfig::default(), 1);
        let metrics = trainer.train(&mut agent).unwrap();
        assert_eq!(metrics.total_episodes(), 6);
        assert_eq!(agent.episodes_trained(), 6);
        assert!(!agent.table().is_empty());
        assert!(metrics.average_game_length(3) <= 60.0);
    }

    #[test]
    fn resumed_training_continues_episode_count() {
        let trainer = Trainer::new(small_config());
        let mut agent = QLearningAgent::with_seed(Player::Light, QLearningConfig::default(), 2);
        trainer.train(&mut agent).unwrap();
        let entries = agent.table().len();
        trainer.train(&mut agent).unwrap();
        assert_eq!(agent.episodes_trained(), 12);
        assert!(agent.table().len() >= entries);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mut a = QLearningAgent::with_seed(Player::Dark, QLearningConfig::default(), 5);
        let mut b = QLearningAgent::with_seed(Player::Dark, QLearningConfig::default(), 5);
        let config = TrainerConfig {
            num_episodes: 40,
            log_interval: 10,
            eval_interval: 10,
            eval_games: 3,
            seed: Some(7),
        };
        let trainer = Trainer::new(config);
        trainer.train(&mut a).unwrap();
        trainer.train(&mut b).unwrap();
        assert_eq!(a.table(), b.table());
        assert_eq!(a.episodes_trained(), 40);
        assert_eq!(trainer.config().eval_interval, 10);
    }
}
