//! Win detection logic for tic-tac-toe.

use super::super::{Board, Cell, Coord, Mark};
use tracing::instrument;

/// The eight winning lines: three rows, three columns, two diagonals.
pub const LINES: [[Coord; 3]; 8] = [
    // Rows
    [Coord::at(0, 0), Coord::at(0, 1), Coord::at(0, 2)],
    [Coord::at(1, 0), Coord::at(1, 1), Coord::at(1, 2)],
    [Coord::at(2, 0), Coord::at(2, 1), Coord::at(2, 2)],
    // Columns
    [Coord::at(0, 0), Coord::at(1, 0), Coord::at(2, 0)],
    [Coord::at(0, 1), Coord::at(1, 1), Coord::at(2, 1)],
    [Coord::at(0, 2), Coord::at(1, 2), Coord::at(2, 2)],
    // Diagonals
    [Coord::at(0, 0), Coord::at(1, 1), Coord::at(2, 2)],
    [Coord::at(0, 2), Coord::at(1, 1), Coord::at(2, 0)],
];

/// Returns the mark holding a complete line, if any.
///
/// Every line is checked; on a board reachable through play at most one
/// mark can own a line.
#[instrument(skip(board), fields(board = %board))]
pub fn winner(board: &Board) -> Option<Mark> {
    LINES.iter().find_map(|[a, b, c]| match board.get(*a) {
        Cell::Occupied(mark) if board.get(*b) == Cell::Occupied(mark) && board.get(*c) == Cell::Occupied(mark) => {
            Some(mark)
        }
        _ => None,
    })
}

/// True iff some line holds three identical non-empty marks.
pub fn has_winner(board: &Board) -> bool {
    winner(board).is_some()
}
