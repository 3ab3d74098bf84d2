use std::fmt;

use super::{Board, Cell, Move, MoveError, Player, SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// Disc counts for both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub dark: usize,
    pub light: usize,
}

impl Score {
    pub fn of(&self, side: Player) -> usize {
        match side {
            Player::Dark => self.dark,
            Player::Light => self.light,
        }
    }

    pub fn total(&self) -> usize {
        self.dark + self.light
    }

    /// Side with strictly more discs, if any.
    pub fn leader(&self) -> Option<Player> {
        match self.dark.cmp(&self.light) {
            std::cmp::Ordering::Greater => Some(Player::Dark),
            std::cmp::Ordering::Less => Some(Player::Light),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Board contents plus the side to move. Small and `Copy`: duplicating it
/// never shares storage with the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    turn: Player,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            turn: Player::Dark, // Dark opens
        }
    }

    /// Build a state from an arbitrary position.
    pub fn from_board(board: Board, turn: Player) -> Self {
        GameState { board, turn }
    }

    /// Side to move
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Legal placements for `side`, regardless of whose turn it is.
    /// Empty when `side` has nothing to play.
    pub fn legal_moves(&self, side: Player) -> Vec<Move> {
        self.board.legal_moves(side)
    }

    pub fn has_legal_move(&self, side: Player) -> bool {
        // Short-circuits on the first hit instead of collecting the list.
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| Move::new(row, col)))
            .any(|mv| self.board.is_legal(mv, side))
    }

    /// Apply a move for `side`. On success the disc is placed, every
    /// sandwiched run is flipped and the turn passes to the opponent. On
    /// failure nothing changes.
    pub fn apply(&mut self, mv: Move, side: Player) -> Result<(), MoveError> {
        self.board.place(mv, side)?;
        self.turn = side.opponent();
        Ok(())
    }

    /// Apply a move to a copy and return it (immutable)
    pub fn with_move(&self, mv: Move, side: Player) -> Result<GameState, MoveError> {
        let mut next = self.duplicate();
        next.apply(mv, side)?;
        Ok(next)
    }

    /// Neither side can move.
    pub fn is_terminal(&self) -> bool {
        !self.has_legal_move(Player::Dark) && !self.has_legal_move(Player::Light)
    }

    pub fn score(&self) -> Score {
        Score {
            dark: self.board.count(Cell::Dark),
            light: self.board.count(Cell::Light),
        }
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        if !self.is_terminal() {
            return None;
        }
        Some(match self.score().leader() {
            Some(winner) => GameOutcome::Winner(winner),
            None => GameOutcome::Draw,
        })
    }

    /// Independent deep copy.
    pub fn duplicate(&self) -> GameState {
        *self
    }

    /// Lossless key for the learned value table: the 64 cells in row-major
    /// order followed by the side to move.
    pub fn fingerprint(&self) -> String {
        let mut key: String = self.board.cells().map(Cell::symbol).collect();
        key.push(self.turn.to_cell().symbol());
        key
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        let score = self.score();
        writeln!(
            f,
            "Dark {} - Light {} ({} to move)",
            score.dark,
            score.light,
            self.turn.name()
        )
    }
}
