//! Win detection logic for tic-tac-toe.

use crate::{Board, Mark, Position, Square};

/// The eight lines that end the game when one mark fills them.
pub const WIN_LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks if `mark` occupies all three squares of any win line.
pub fn has_winning_line(board: &Board, mark: Mark) -> bool {
    let target = Square::Occupied(mark);
    WIN_LINES
        .iter()
        .any(|line| line.iter().all(|&pos| board.get(pos) == target))
}
