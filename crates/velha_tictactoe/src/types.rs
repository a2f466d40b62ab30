//! Core domain types for tic-tac-toe.

use derive_more::{Display, Error};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::instrument;

use crate::position::Position;
use crate::rules;

/// Mark placed by a player.
///
/// `O` always opens the game; `X` answers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Mark {
    /// First mark (mark-A).
    O,
    /// Second mark (mark-B).
    X,
}

impl Mark {
    /// The mark that opens every game.
    pub const FIRST: Mark = Mark::O;

    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::O => Mark::X,
            Mark::X => Mark::O,
        }
    }

    /// Single-letter symbol shown on the board.
    pub fn symbol(self) -> &'static str {
        match self {
            Mark::O => "O",
            Mark::X => "X",
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Square {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Square holds a mark.
    Occupied(Mark),
}

impl Square {
    /// Stored representation: `""` for empty, otherwise the mark symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Square::Empty => "",
            Square::Occupied(mark) => mark.symbol(),
        }
    }

    /// Parses the stored representation.
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "" => Some(Square::Empty),
            "O" => Some(Square::Occupied(Mark::O)),
            "X" => Some(Square::Occupied(Mark::X)),
            _ => None,
        }
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Square::from_symbol(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid square value: {raw:?}")))
    }
}

/// Errors that can occur when placing a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PlaceError {
    /// Square is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(#[error(not(source))] Position),
}

/// 3x3 board, serialized as a flat array of nine squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from squares in row-major order.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Checks whether a mark has already been placed at `pos`.
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos) != Square::Empty
    }

    /// Places `mark` at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::SquareOccupied`] and leaves the board untouched
    /// if the square already holds a mark.
    #[instrument(skip(self))]
    pub fn apply_mark(&mut self, pos: Position, mark: Mark) -> Result<(), PlaceError> {
        if self.is_occupied(pos) {
            return Err(PlaceError::SquareOccupied(pos));
        }
        self.squares[pos.to_index()] = Square::Occupied(mark);
        Ok(())
    }

    /// Checks if every square holds a mark.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Checks if `mark` fills any of the eight win lines.
    pub fn has_winning_line_for(&self, mark: Mark) -> bool {
        rules::has_winning_line(self, mark)
    }

    /// Clears all nine squares.
    pub fn reset(&mut self) {
        self.squares = [Square::Empty; 9];
    }
}
