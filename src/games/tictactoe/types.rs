//! Core domain types for tic-tac-toe.

use super::{Coord, GameError};
use tracing::instrument;

/// Glyph shown for a cell nobody has played yet.
pub const EMPTY_GLYPH: char = '.';

/// One of the two player symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Mark {
    /// The human player. Moves first.
    X,
    /// The computer opponent.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Character used to draw this mark.
    pub fn glyph(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell holds a mark.
    Occupied(Mark),
}

impl Cell {
    /// Character used to draw this cell.
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => EMPTY_GLYPH,
            Cell::Occupied(mark) => mark.glyph(),
        }
    }

    /// Inverse of [`Cell::glyph`].
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            EMPTY_GLYPH => Some(Cell::Empty),
            'X' => Some(Cell::Occupied(Mark::X)),
            'O' => Some(Cell::Occupied(Mark::O)),
            _ => None,
        }
    }
}

/// 3x3 tic-tac-toe board, row-major.
///
/// Boards are values: [`Board::apply_move`] returns a new board and leaves
/// the receiver untouched, so a rejected move can never leak a half-applied
/// state into a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Cell; 3]; 3],
}

impl Board {
    /// Creates an all-empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from explicit rows.
    pub fn from_rows(cells: [[Cell; 3]; 3]) -> Self {
        Self { cells }
    }

    /// Returns the cell at `coord`.
    pub fn get(&self, coord: Coord) -> Cell {
        self.cells[coord.row()][coord.col()]
    }

    /// Checks if the cell at `coord` is empty.
    pub fn is_empty(&self, coord: Coord) -> bool {
        self.get(coord) == Cell::Empty
    }

    /// Returns the rows of the board.
    pub fn rows(&self) -> &[[Cell; 3]; 3] {
        &self.cells
    }

    /// Counts cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == Cell::Occupied(mark))
            .count()
    }

    /// Places `mark` at `coord`, returning the resulting board.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CellOccupied`] if the cell is not empty.
    #[instrument(skip(self), fields(board = %self))]
    pub fn apply_move(&self, coord: Coord, mark: Mark) -> Result<Board, GameError> {
        if !self.is_empty(coord) {
            return Err(GameError::CellOccupied(coord));
        }
        let mut next = *self;
        next.cells[coord.row()][coord.col()] = Cell::Occupied(mark);
        Ok(next)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 {
                f.write_str("/")?;
            }
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
        }
        Ok(())
    }
}
