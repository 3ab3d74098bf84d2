use std::collections::VecDeque;

use crate::game::{Player, Score};

/// Result of a single episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeResult {
    pub winner: Option<Player>,
    /// Discs placed during the game; passes are not counted.
    pub plies: usize,
    pub final_score: Score,
}

/// Training metrics tracker with rolling window computations.
pub struct TrainingMetrics {
    side: Player,
    episode_results: VecDeque<EpisodeResult>,
    capacity: usize,
    total_episodes: usize, // lifetime count, never capped
}

impl TrainingMetrics {
    /// Track results from the point of view of `side`.
    pub fn with_capacity(side: Player, capacity: usize) -> Self {
        TrainingMetrics {
            side,
            episode_results: VecDeque::with_capacity(capacity),
            capacity,
            total_episodes: 0,
        }
    }

    pub fn new(side: Player) -> Self {
        Self::with_capacity(side, 100)
    }

    pub fn record_episode(&mut self, result: EpisodeResult) {
        self.total_episodes += 1;
        self.episode_results.push_back(result);
        if self.episode_results.len() > self.capacity {
            self.episode_results.pop_front();
        }
    }

    fn rate(&self, last_n: usize, pred: impl Fn(&EpisodeResult) -> bool) -> f32 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let hits = self
            .episode_results
            .iter()
            .rev()
            .take(n)
            .filter(|r| pred(r))
            .count();
        hits as f32 / n as f32
    }

    /// Win rate for the tracked side in the last N episodes.
    pub fn win_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, |r| r.winner == Some(self.side))
    }

    /// Loss rate for the tracked side in the last N episodes.
    pub fn loss_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, |r| r.winner == Some(self.side.opponent()))
    }

    /// Draw rate in the last N episodes.
    pub fn draw_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, |r| r.winner.is_none())
    }

    /// Average number of plies over the last N episodes.
    pub fn average_game_length(&self, last_n: usize) -> f32 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let total: usize = self
            .episode_results
            .iter()
            .rev()
            .take(n)
            .map(|r| r.plies)
            .sum();
        total as f32 / n as f32
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(winner: Option<Player>, plies: usize) -> EpisodeResult {
        EpisodeResult {
            winner,
            plies,
            final_score: Score::default(),
        }
    }

    #[test]
    fn test_empty_metrics() {
        let m = TrainingMetrics::new(Player::Dark);
        assert_eq!(m.win_rate(100), 0.0);
        assert_eq!(m.draw_rate(100), 0.0);
        assert_eq!(m.average_game_length(100), 0.0);
        assert_eq!(m.total_episodes(), 0);
    }

    #[test]
    fn test_rates_follow_tracked_side() {
        let mut m = TrainingMetrics::new(Player::Light);
        m.record_episode(result(Some(Player::Light), 60));
        m.record_episode(result(Some(Player::Dark), 58));
        m.record_episode(result(None, 60));
        m.record_episode(result(Some(Player::Light), 50));

        assert!((m.win_rate(4) - 0.5).abs() < 1e-6);
        assert!((m.loss_rate(4) - 0.25).abs() < 1e-6);
        assert!((m.draw_rate(4) - 0.25).abs() < 1e-6);
        assert!((m.average_game_length(2) - 55.0).abs() < 1e-6);
    }

    #[test]
    fn test_window_is_capped() {
        let mut m = TrainingMetrics::with_capacity(Player::Dark, 3);
        for _ in 0..5 {
            m.record_episode(result(Some(Player::Light), 10));
        }
        m.record_episode(result(Some(Player::Dark), 10));
        assert_eq!(m.total_episodes(), 6);
        // Only the last three are kept.
        assert!((m.win_rate(100) - 1.0 / 3.0).abs() < 1e-6);
    }
}
