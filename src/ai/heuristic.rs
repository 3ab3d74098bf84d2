use crate::game::{GameState, Player};

/// Trait for evaluating a position from a player's perspective.
/// Higher is always better for `perspective`.
pub trait Heuristic: Send {
    fn evaluate(&self, state: &GameState, perspective: Player) -> f64;

    /// Clone into a fresh box so agents holding a heuristic can be cloned.
    fn box_clone(&self) -> Box<dyn Heuristic>;
}

/// Material count: own discs minus opponent discs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscCount;

impl Heuristic for DiscCount {
    fn evaluate(&self, state: &GameState, perspective: Player) -> f64 {
        evaluate(state, perspective)
    }

    fn box_clone(&self) -> Box<dyn Heuristic> {
        Box::new(*self)
    }
}

/// Disc difference, sign-adjusted for `perspective`.
pub fn evaluate(state: &GameState, perspective: Player) -> f64 {
    let score = state.score();
    score.of(perspective) as f64 - score.of(perspective.opponent()) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Move;

    #[test]
    fn opening_is_even() {
        let state = GameState::initial();
        assert_eq!(evaluate(&state, Player::Dark), 0.0);
        assert_eq!(evaluate(&state, Player::Light), 0.0);
    }

    #[test]
    fn sign_follows_perspective() {
        let state = GameState::initial()
            .with_move(Move::new(2, 3), Player::Dark)
            .unwrap();
        assert_eq!(evaluate(&state, Player::Dark), 3.0);
        assert_eq!(evaluate(&state, Player::Light), -3.0);
    }

    #[test]
    fn trait_matches_free_function() {
        let state = GameState::initial()
            .with_move(Move::new(4, 5), Player::Dark)
            .unwrap();
        let h = DiscCount;
        for side in [Player::Dark, Player::Light] {
            assert_eq!(h.evaluate(&state, side), evaluate(&state, side));
        }
    }
}
