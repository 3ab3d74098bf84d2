use std::fmt;

use serde::{Deserialize, Serialize};

use super::Player;

pub const SIZE: usize = 8;

/// The eight compass directions a sandwich can run along, as (row, col) steps.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Dark,
    Light,
}

impl Cell {
    /// Single-character form used by the fingerprint and the text board.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Dark => 'D',
            Cell::Light => 'L',
        }
    }
}

/// A disc placement. Only meaningful relative to a board and a mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Move { row, col }
    }

    fn in_bounds(self) -> bool {
        self.row < SIZE && self.col < SIZE
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Move {
    fn from((row, col): (usize, usize)) -> Self {
        Move::new(row, col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("move {0} is off the board")]
    OutOfBounds(Move),

    #[error("cell {0} is already occupied")]
    Occupied(Move),

    #[error("move {mv} captures nothing for {}", .side.name())]
    NoCapture { mv: Move, side: Player },
}

/// 8x8 grid of cells. `Copy`, so every duplicate is fully independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
}

impl Board {
    /// Create a board with the standard opening: two diagonal pairs in the center.
    pub fn new() -> Self {
        let mut cells = [[Cell::Empty; SIZE]; SIZE];
        cells[3][3] = Cell::Light;
        cells[4][4] = Cell::Light;
        cells[3][4] = Cell::Dark;
        cells[4][3] = Cell::Dark;
        Board { cells }
    }

    /// Create a board with no discs at all.
    pub fn empty() -> Self {
        Board {
            cells: [[Cell::Empty; SIZE]; SIZE],
        }
    }

    /// Get the cell at a specific position.
    /// Row 0 is the top, column 0 is the left edge.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Set a cell directly, bypassing the capture rules. For building positions.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row][col] = cell;
    }

    /// Iterate all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().flat_map(|row| row.iter().copied())
    }

    /// Count the discs of one kind.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells().filter(|&c| c == cell).count()
    }

    /// Number of opponent discs that a disc of `side` placed at `mv` would
    /// capture along direction `(dr, dc)`. Zero if the run is not closed by a
    /// disc of `side` before the edge or an empty cell.
    fn capture_run(&self, mv: Move, side: Player, (dr, dc): (i8, i8)) -> usize {
        let own = side.to_cell();
        let opp = side.opponent().to_cell();

        let mut r = mv.row as i32 + dr as i32;
        let mut c = mv.col as i32 + dc as i32;
        let mut run = 0;

        while (0..SIZE as i32).contains(&r) && (0..SIZE as i32).contains(&c) {
            match self.cells[r as usize][c as usize] {
                cell if cell == opp => run += 1,
                cell if cell == own => return run,
                _ => return 0,
            }
            r += dr as i32;
            c += dc as i32;
        }

        0
    }

    /// Check whether `side` may place a disc at `mv`: the cell is empty and at
    /// least one direction holds a sandwich of opponent discs.
    pub fn is_legal(&self, mv: Move, side: Player) -> bool {
        self.check_legal(mv, side).is_ok()
    }

    fn check_legal(&self, mv: Move, side: Player) -> Result<(), MoveError> {
        if !mv.in_bounds() {
            return Err(MoveError::OutOfBounds(mv));
        }
        if self.cells[mv.row][mv.col] != Cell::Empty {
            return Err(MoveError::Occupied(mv));
        }
        if DIRECTIONS
            .iter()
            .any(|&dir| self.capture_run(mv, side, dir) > 0)
        {
            Ok(())
        } else {
            Err(MoveError::NoCapture { mv, side })
        }
    }

    /// All legal placements for `side`, in row-major order.
    pub fn legal_moves(&self, side: Player) -> Vec<Move> {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| Move::new(row, col)))
            .filter(|&mv| self.is_legal(mv, side))
            .collect()
    }

    /// Place a disc for `side` and flip every sandwiched run.
    /// Returns the number of flipped discs; the board is untouched on error.
    pub fn place(&mut self, mv: Move, side: Player) -> Result<usize, MoveError> {
        self.check_legal(mv, side)?;

        // Runs are measured before anything changes, so flips in one direction
        // cannot create or break a sandwich in another.
        let runs = DIRECTIONS.map(|dir| (dir, self.capture_run(mv, side, dir)));

        let own = side.to_cell();
        self.cells[mv.row][mv.col] = own;

        let mut flipped = 0;
        for ((dr, dc), run) in runs {
            for step in 1..=run as i32 {
                let r = (mv.row as i32 + dr as i32 * step) as usize;
                let c = (mv.col as i32 + dc as i32 * step) as usize;
                self.cells[r][c] = own;
            }
            flipped += run;
        }

        Ok(flipped)
    }

    /// Build a board from eight rows of `.`, `D` and `L`.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: [&str; SIZE]) -> Self {
        let mut board = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                board.cells[row][col] = match ch {
                    'D' => Cell::Dark,
                    'L' => Cell::Light,
                    _ => Cell::Empty,
                };
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: Vec<String> = row.iter().map(|c| c.symbol().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
