use std::time::Instant;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::game::{GameState, Move, Player};

use super::agent::{Agent, Decision};

/// An agent that selects uniformly at random from legal moves.
pub struct RandomAgent {
    side: Player,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(side: Player) -> Self {
        RandomAgent {
            side,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(side: Player, seed: u64) -> Self {
        RandomAgent {
            side,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn choose(&mut self, state: &GameState) -> Option<Move> {
        let moves = state.legal_moves(self.side);
        if moves.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..moves.len());
        Some(moves[idx])
    }
}

impl Agent for RandomAgent {
    fn propose_move(&mut self, state: &GameState) -> Decision {
        let start = Instant::now();
        let mv = self.choose(state);
        Decision {
            mv,
            nodes_expanded: 0,
            elapsed: start.elapsed(),
        }
    }

    fn name(&self) -> &str {
        "Random"
    }

    fn side(&self) -> Player {
        self.side
    }

    fn clone_agent(&self) -> Box<dyn Agent> {
        Box::new(RandomAgent::new(self.side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_agent_selects_legal_move() {
        let mut agent = RandomAgent::new(Player::Dark);
        let state = GameState::initial();
        let legal = state.legal_moves(Player::Dark);

        for _ in 0..100 {
            let mv = agent.propose_move(&state).mv.unwrap();
            assert!(legal.contains(&mv), "Move {} is not legal", mv);
        }
    }

    #[test]
    fn test_random_agent_plays_full_game() {
        let mut dark = RandomAgent::new(Player::Dark);
        let mut light = RandomAgent::new(Player::Light);
        let mut state = GameState::initial();
        let mut mover = Player::Dark;

        while !state.is_terminal() {
            let agent = if mover == Player::Dark { &mut dark } else { &mut light };
            if let Some(mv) = agent.propose_move(&state).mv {
                state.apply(mv, mover).unwrap();
            }
            mover = mover.opponent();
        }

        assert!(state.is_terminal());
        assert!(state.outcome().is_some());
        assert!(state.score().total() <= 64);
    }

    #[test]
    fn test_seeded_agents_agree() {
        let state = GameState::initial();
        let mut a = RandomAgent::with_seed(Player::Light, 9);
        let mut b = RandomAgent::with_seed(Player::Light, 9);
        for _ in 0..20 {
            assert_eq!(a.choose(&state), b.choose(&state));
        }
    }

    #[test]
    fn test_random_agent_name() {
        let mut agent = RandomAgent::new(Player::Dark);
        assert_eq!(agent.name(), "Random");
        let decision = agent.propose_move(&GameState::initial());
        assert_eq!(decision.nodes_expanded, 0);
    }
}
