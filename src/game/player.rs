use serde::{Deserialize, Serialize};

use super::board::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Dark,
    Light,
}

impl Player {
    /// Get the other player
    pub fn opponent(self) -> Player {
        match self {
            Player::Dark => Player::Light,
            Player::Light => Player::Dark,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Dark => Cell::Dark,
            Player::Light => Cell::Light,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Dark => "Dark",
            Player::Light => "Light",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Player::Dark.opponent(), Player::Light);
        assert_eq!(Player::Light.opponent(), Player::Dark);
    }

    #[test]
    fn test_player_name() {
        assert_eq!(Player::Dark.name(), "Dark");
        assert_eq!(Player::Light.name(), "Light");
    }

    #[test]
    fn test_to_cell() {
        assert_eq!(Player::Dark.to_cell(), Cell::Dark);
        assert_eq!(Player::Light.to_cell(), Cell::Light);
    }
}
