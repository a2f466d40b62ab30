//! Contract between a game session and whatever surface renders it.
//!
//! The session never touches rendering primitives. A surface reads a
//! [`SessionView`], draws it, and feeds user input back as [`Gesture`]s.

use crate::{Mark, Phase, Square};

/// One of the nine cell regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    /// What the cell displays.
    pub square: Square,
    /// Whether a click on this cell would be accepted.
    pub clickable: bool,
}

/// Everything a surface needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    /// Current phase.
    pub phase: Phase,
    /// The mark to move (meaningful while in progress).
    pub active_mark: Mark,
    /// Cells 0-8 in row-major order.
    pub cells: [CellView; 9],
    /// Status message, if one has been announced.
    pub status: Option<String>,
    /// Whether the board is shown.
    pub board_visible: bool,
    /// Whether the player-name setup panel is shown.
    pub setup_visible: bool,
    /// Whether the start control is shown.
    pub start_visible: bool,
    /// Whether the restart control is shown.
    pub restart_visible: bool,
    /// Ranking lines in leaderboard order.
    pub ranking: Vec<String>,
}

/// User input forwarded by a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    /// Start control pressed with the two name fields.
    Start {
        /// Name field for mark `O`.
        name_a: String,
        /// Name field for mark `X`.
        name_b: String,
    },
    /// A cell region clicked.
    Cell(usize),
    /// Restart control pressed.
    Restart,
}

/// A surface that can draw a [`SessionView`].
pub trait Presenter {
    /// Rendering failure.
    type Error;

    /// Draws the view.
    ///
    /// # Errors
    ///
    /// Returns the surface's error if drawing fails.
    fn present(&mut self, view: &SessionView) -> Result<(), Self::Error>;
}
