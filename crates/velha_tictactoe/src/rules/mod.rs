//! Game rules for tic-tac-toe.
//!
//! Pure functions evaluating a [`Board`](crate::Board), kept apart from board
//! storage.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{WIN_LINES, has_winning_line};
