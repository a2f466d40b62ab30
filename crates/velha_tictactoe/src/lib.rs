//! Tic-tac-toe board model.
//!
//! Pure game data with no I/O: the two [`Mark`]s, the nine [`Square`]s of a
//! [`Board`] addressed by [`Position`], and the rules that decide whether a
//! mark has completed a line or the board is full.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod position;
pub mod rules;
mod types;

pub use position::Position;
pub use rules::WIN_LINES;
pub use types::{Board, Mark, PlaceError, Square};
