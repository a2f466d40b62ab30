//! Velha - two-player tic-tac-toe with resumable games.
//!
//! A [`GameSession`] alternates the two marks on a [`Board`], announces wins
//! and draws, and credits the [`Leaderboard`]. Every accepted move is written
//! through the [`PersistenceGateway`] to a [`KeyValueStore`], so an
//! interrupted game picks up where it left off the next time the session is
//! loaded.
//!
//! # Example
//!
//! ```
//! use velha::{GameSession, MemoryStore, MoveOutcome};
//!
//! let mut session = GameSession::load(MemoryStore::new());
//! session.start("Ana", "Bea");
//! for index in [0, 3, 1, 4] {
//!     session.play_move(index);
//! }
//! assert!(matches!(session.play_move(2), MoveOutcome::Won { .. }));
//! assert_eq!(session.status(), Some("Ana venceu!"));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod leaderboard;
mod persistence;
mod presentation;
mod session;
mod store;

pub use error::{StoreError, StoreErrorKind};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use persistence::{
    ACTIVE_MARK_KEY, BOARD_KEY, PLAYER_A_KEY, PLAYER_B_KEY, PersistenceGateway, RANKING_KEY,
    Snapshot, decode_board, decode_leaderboard, encode_board, encode_leaderboard,
};
pub use presentation::{CellView, Gesture, Presenter, SessionView};
pub use session::{DEFAULT_NAME_A, DEFAULT_NAME_B, GameSession, MoveOutcome, Phase};
pub use store::{KeyValueStore, MemoryStore, SqliteStore};

pub use velha_tictactoe::{Board, Mark, Position, Square, WIN_LINES};
