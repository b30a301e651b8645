//! Keyboard layout for a board, independent of any platform.

use crate::games::tictactoe::{Board, Coord};
use derive_new::new;

/// One tappable cell.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct KeyButton {
    /// Glyph shown on the button.
    pub label: String,
    /// `"RC"` token sent back when tapped.
    pub callback_data: String,
}

/// A 3x3 grid of buttons mirroring a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    rows: Vec<Vec<KeyButton>>,
}

impl Keyboard {
    /// Lays out `board` row by row, left to right.
    pub fn for_board(board: &Board) -> Self {
        let rows = (0..Coord::SIZE)
            .map(|row| {
                (0..Coord::SIZE)
                    .filter_map(|col| Coord::new(row, col).ok())
                    .map(|coord| KeyButton::new(board.get(coord).glyph().to_string(), coord.token()))
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Button rows, top first.
    pub fn rows(&self) -> &[Vec<KeyButton>] {
        &self.rows
    }

    /// Consumes the keyboard, returning its rows.
    pub fn into_rows(self) -> Vec<Vec<KeyButton>> {
        self.rows
    }
}
