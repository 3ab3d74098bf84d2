use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::ai::{QLearningConfig, QTable};
use crate::game::Player;

/// Current on-disk table format.
pub const FORMAT_VERSION: u32 = 1;

/// Metadata stored alongside a saved Q table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMetadata {
    pub format_version: u32,
    /// Side the table was learned for.
    pub side: Player,
    pub episodes_trained: usize,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
    pub hyperparameters: QLearningConfig,
    pub entries: usize,
}

impl TableMetadata {
    pub fn new(
        side: Player,
        episodes_trained: usize,
        hyperparameters: QLearningConfig,
        table: &QTable,
    ) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        TableMetadata {
            format_version: FORMAT_VERSION,
            side,
            episodes_trained,
            timestamp,
            hyperparameters,
            entries: table.len(),
        }
    }
}

/// One (fingerprint, move, value) row of a saved table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    pub state: String,
    pub row: usize,
    pub col: usize,
    pub value: f64,
}
