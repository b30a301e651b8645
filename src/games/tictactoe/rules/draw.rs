//! Draw detection logic for tic-tac-toe.

use super::super::{Board, Cell};
use tracing::instrument;

/// Checks if the board is full (all cells occupied).
#[instrument(skip(board), fields(board = %board))]
pub fn is_full(board: &Board) -> bool {
    board.rows().iter().flatten().all(|c| *c != Cell::Empty)
}

/// True iff no empty cell remains.
///
/// Only meaningful once [`has_winner`](super::has_winner) has been ruled
/// out: a full board with a completed line is a win, not a draw.
pub fn is_draw(board: &Board) -> bool {
    is_full(board)
}

#[cfg(test)]
mod tests {
    use super::super::super::{Coord, Mark};
    use super::super::win::has_winner;
    use super::*;

    fn board_from(rows: [&str; 3]) -> Board {
        let mut cells = [[Cell::Empty; 3]; 3];
        for (r, row) in rows.iter().enumerate() {
            for (c, glyph) in row.chars().enumerate() {
                cells[r][c] = Cell::from_glyph(glyph).unwrap();
            }
        }
        Board::from_rows(cells)
    }

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_partial_board_not_full() {
        let board = Board::new()
            .apply_move(Coord::new(1, 1).unwrap(), Mark::X)
            .unwrap();
        assert!(!is_full(&board));
        assert!(!is_draw(&board));
    }

    #[test]
    fn test_draw_detection() {
        let board = board_from(["XOX", "OXX", "OXO"]);
        assert!(is_draw(&board));
        assert!(!has_winner(&board));
    }

    #[test]
    fn test_full_board_with_winner() {
        let board = board_from(["XXX", "OOX", "XOO"]);
        assert!(is_full(&board));
        assert!(has_winner(&board));
    }
}
