use std::time::Instant;

use crate::game::{GameState, Move, Player};

use super::agent::{Agent, Decision};
use super::heuristic::{DiscCount, Heuristic};
use super::minimax::SearchResult;

/// Minimax with an `[alpha, beta]` pruning window. Children are visited in
/// generation order; there is no move ordering.
pub struct AlphaBetaAgent {
    side: Player,
    depth: usize,
    heuristic: Box<dyn Heuristic>,
    nodes_expanded: u64,
}

impl AlphaBetaAgent {
    pub fn new(side: Player, depth: usize) -> Self {
        AlphaBetaAgent {
            side,
            depth,
            heuristic: Box::new(DiscCount),
            nodes_expanded: 0,
        }
    }

    pub fn with_heuristic(side: Player, depth: usize, heuristic: Box<dyn Heuristic>) -> Self {
        AlphaBetaAgent {
            side,
            depth,
            heuristic,
            nodes_expanded: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Run one search from `state` with a full window.
    pub fn search(&mut self, state: &GameState) -> SearchResult {
        self.nodes_expanded = 0;
        let (value, best_move) =
            self.alphabeta(state, self.depth, f64::NEG_INFINITY, f64::INFINITY, true);
        SearchResult {
            value,
            best_move,
            nodes_expanded: self.nodes_expanded,
        }
    }

    fn alphabeta(
        &mut self,
        state: &GameState,
        depth: usize,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> (f64, Option<Move>) {
        self.nodes_expanded += 1;

        if depth == 0 || state.is_terminal() {
            return (self.heuristic.evaluate(state, self.side), None);
        }

        let mover = if maximizing {
            self.side
        } else {
            self.side.opponent()
        };
        let moves = state.legal_moves(mover);

        if moves.is_empty() {
            let (value, _) = self.alphabeta(state, depth - 1, alpha, beta, !maximizing);
            return (value, None);
        }

        let mut best_move = None;

        if maximizing {
            let mut max_eval = f64::NEG_INFINITY;
            for mv in moves {
                let mut next = state.duplicate();
                if next.apply(mv, mover).is_err() {
                    continue;
                }
                let (eval, _) = self.alphabeta(&next, depth - 1, alpha, beta, false);
                if eval > max_eval {
                    max_eval = eval;
                    best_move = Some(mv);
                }
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            (max_eval, best_move)
        } else {
            let mut min_eval = f64::INFINITY;
            for mv in moves {
                let mut next = state.duplicate();
                if next.apply(mv, mover).is_err() {
                    continue;
                }
                let (eval, _) = self.alphabeta(&next, depth - 1, alpha, beta, true);
                if eval < min_eval {
                    min_eval = eval;
                    best_move = Some(mv);
                }
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            (min_eval, best_move)
        }
    }
}

impl Agent for AlphaBetaAgent {
    fn propose_move(&mut self, state: &GameState) -> Decision {
        let start = Instant::now();
        let result = self.search(state);
        let elapsed = start.elapsed();
        log::debug!(
            "{} ({}) depth {}: {:?} value {} after {} nodes",
            self.name(),
            self.side.name(),
            self.depth,
            result.best_move,
            result.value,
            result.nodes_expanded
        );
        Decision {
            mv: result.best_move,
            nodes_expanded: result.nodes_expanded,
            elapsed,
        }
    }

    fn name(&self) -> &str {
        "AlphaBeta"
    }

    fn side(&self) -> Player {
        self.side
    }

    fn clone_agent(&self) -> Box<dyn Agent> {
        Box::new(AlphaBetaAgent::with_heuristic(
            self.side,
            self.depth,
            self.heuristic.box_clone(),
        ))
    }
}
