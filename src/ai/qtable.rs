use std::collections::HashMap;

use crate::game::{GameState, Move, Player};

/// Learned value table keyed by (state fingerprint, move).
/// Unseen pairs read as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QTable {
    // Nested so lookups can borrow the fingerprint.
    values: HashMap<String, HashMap<Move, f64>>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str, mv: Move) -> f64 {
        self.values
            .get(key)
            .and_then(|row| row.get(&mv))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, key: String, mv: Move, value: f64) {
        self.values.entry(key).or_default().insert(mv, value);
    }

    /// Table value of every legal move of `side` in `state`, in generation order.
    pub fn action_values(&self, state: &GameState, side: Player) -> Vec<(Move, f64)> {
        let key = state.fingerprint();
        state
            .legal_moves(side)
            .into_iter()
            .map(|mv| (mv, self.get(&key, mv)))
            .collect()
    }

    /// Largest value over `side`'s legal moves in `state`; zero when it has none.
    pub fn best_value(&self, state: &GameState, side: Player) -> f64 {
        self.action_values(state, side)
            .into_iter()
            .map(|(_, v)| v)
            .fold(None, |best: Option<f64>, v| Some(best.map_or(v, |b| b.max(v))))
            .unwrap_or(0.0)
    }

    /// Number of (fingerprint, move) entries.
    pub fn len(&self) -> usize {
        self.values.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct positions with at least one entry.
    pub fn states(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Move, f64)> + '_ {
        self.values.iter().flat_map(|(key, row)| {
            row.iter()
                .map(move |(mv, value)| (key.as_str(), *mv, *value))
        })
    }
}

impl FromIterator<(String, Move, f64)> for QTable {
    fn from_iter<I: IntoIterator<Item = (String, Move, f64)>>(iter: I) -> Self {
        let mut table = QTable::new();
        for (key, mv, value) in iter {
            table.set(key, mv, value);
        }
        table
    }
}
