//! Board coordinates and their two-digit wire token.

use super::GameError;
use std::str::FromStr;
use tracing::instrument;

/// A cell address on the 3x3 board.
///
/// Both components are in `0..=2`; the only way to build a `Coord` from
/// untrusted input is [`Coord::new`] or [`Coord::from_token`], which enforce
/// that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("({}, {})", row, col)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Side length of the board.
    pub const SIZE: usize = 3;

    /// Creates a coordinate, rejecting anything outside the board.
    pub fn new(row: usize, col: usize) -> Result<Self, GameError> {
        if row >= Self::SIZE || col >= Self::SIZE {
            return Err(GameError::InvalidCoordinate(format!("{row}{col}")));
        }
        Ok(Self::at(row as u8, col as u8))
    }

    /// Unchecked constructor for compile-time tables.
    pub(crate) const fn at(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row index (0 = top).
    pub fn row(self) -> usize {
        self.row as usize
    }

    /// Column index (0 = left).
    pub fn col(self) -> usize {
        self.col as usize
    }

    /// All nine coordinates in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..Self::SIZE as u8).flat_map(|row| (0..Self::SIZE as u8).map(move |col| Self::at(row, col)))
    }

    /// Parses the `"RC"` token carried by keyboard callbacks.
    ///
    /// Exactly two ASCII digits, each `0`, `1` or `2`. Anything else is an
    /// [`GameError::InvalidCoordinate`].
    #[instrument]
    pub fn from_token(token: &str) -> Result<Self, GameError> {
        let invalid = || GameError::InvalidCoordinate(token.to_string());
        match token.as_bytes() {
            [r @ b'0'..=b'2', c @ b'0'..=b'2'] => Ok(Self::at(r - b'0', c - b'0')),
            _ => Err(invalid()),
        }
    }

    /// Encodes this coordinate as its `"RC"` token.
    pub fn token(self) -> String {
        format!("{}{}", self.row, self.col)
    }
}

impl FromStr for Coord {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
    }
}
