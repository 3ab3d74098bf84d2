use std::time::Instant;

use crate::game::{GameState, Move, Player};

use super::agent::{Agent, Decision};
use super::heuristic::{DiscCount, Heuristic};

/// Value and move chosen at the root of one search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub value: f64,
    pub best_move: Option<Move>,
    pub nodes_expanded: u64,
}

/// Plain fixed-depth minimax. The agent's side maximizes, the opponent
/// minimizes, and a side with no legal move passes without branching.
pub struct MinimaxAgent {
    side: Player,
    depth: usize,
    heuristic: Box<dyn Heuristic>,
    nodes_expanded: u64,
}

impl MinimaxAgent {
    pub fn new(side: Player, depth: usize) -> Self {
        MinimaxAgent {
            side,
            depth,
            heuristic: Box::new(DiscCount),
            nodes_expanded: 0,
        }
    }

    pub fn with_heuristic(side: Player, depth: usize, heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxAgent {
            side,
            depth,
            heuristic,
            nodes_expanded: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Run one search from `state`. The node counter starts from zero.
    pub fn search(&mut self, state: &GameState) -> SearchResult {
        self.nodes_expanded = 0;
        let (value, best_move) = self.minimax(state, self.depth, true);
        SearchResult {
            value,
            best_move,
            nodes_expanded: self.nodes_expanded,
        }
    }

    fn minimax(&mut self, state: &GameState, depth: usize, maximizing: bool) -> (f64, Option<Move>) {
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
            // Pass: same position, other role, one ply consumed.
            let (value, _) = self.minimax(state, depth - 1, !maximizing);
            return (value, None);
        }

        let mut best_value = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut best_move = None;

        for mv in moves {
            let mut next = state.duplicate();
            if next.apply(mv, mover).is_err() {
                continue;
            }
            let (value, _) = self.minimax(&next, depth - 1, !maximizing);

            let improves = if maximizing {
                value > best_value
            } else {
                value < best_value
            };
            if improves {
                best_value = value;
                best_move = Some(mv);
            }
        }

        (best_value, best_move)
    }
}

impl Agent for MinimaxAgent {
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
        "Minimax"
    }

    fn side(&self) -> Player {
        self.side
    }

    fn clone_agent(&self) -> Box<dyn Agent> {
        Box::new(MinimaxAgent::with_heuristic(
            self.side,
            self.depth,
            self.heuristic.box_clone(),
        ))
    }
}
