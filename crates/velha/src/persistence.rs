//! Encoding of game snapshots and the leaderboard into a key-value store.
//!
//! Writes propagate [`StoreError`]. Reads never fail: an absent, malformed or
//! inconsistent value reads as "nothing saved".

use derive_getters::Getters;
use derive_new::new;
use tracing::{debug, instrument, warn};

use crate::{Board, KeyValueStore, Leaderboard, Mark, StoreError};

/// Key holding the JSON-encoded board.
pub const BOARD_KEY: &str = "board";
/// Key holding the mark to move, `"O"` or `"X"`.
pub const ACTIVE_MARK_KEY: &str = "currentPlayer";
/// Key holding the name of the player with mark `O`.
pub const PLAYER_A_KEY: &str = "player1";
/// Key holding the name of the player with mark `X`.
pub const PLAYER_B_KEY: &str = "player2";
/// Key holding the JSON-encoded leaderboard.
pub const RANKING_KEY: &str = "ranking";

const SNAPSHOT_KEYS: [&str; 4] = [BOARD_KEY, ACTIVE_MARK_KEY, PLAYER_A_KEY, PLAYER_B_KEY];

/// Everything needed to resume a game in progress.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct Snapshot {
    /// Board as last played.
    board: Board,
    /// Mark to move next.
    active_mark: Mark,
    /// Name of the `O` player.
    name_a: String,
    /// Name of the `X` player.
    name_b: String,
}

/// Encodes a board as a JSON array of nine `""`/`"O"`/`"X"` strings.
///
/// # Errors
///
/// Returns [`StoreError`] if serialization fails.
pub fn encode_board(board: &Board) -> Result<String, StoreError> {
    Ok(serde_json::to_string(board)?)
}

/// Decodes a board written by [`encode_board`], `None` if malformed.
#[instrument(skip(raw))]
pub fn decode_board(raw: &str) -> Option<Board> {
    serde_json::from_str(raw)
        .map_err(|e| warn!(error = %e, "Discarding malformed board"))
        .ok()
}

/// Encodes the leaderboard as a JSON array of `{ "name", "wins" }` records.
///
/// # Errors
///
/// Returns [`StoreError`] if serialization fails.
pub fn encode_leaderboard(leaderboard: &Leaderboard) -> Result<String, StoreError> {
    Ok(serde_json::to_string(leaderboard)?)
}

/// Decodes a leaderboard written by [`encode_leaderboard`], `None` if malformed.
#[instrument(skip(raw))]
pub fn decode_leaderboard(raw: &str) -> Option<Leaderboard> {
    serde_json::from_str(raw)
        .map_err(|e| warn!(error = %e, "Discarding malformed leaderboard"))
        .ok()
}

/// Reads and writes game state through a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct PersistenceGateway<S> {
    store: S,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    /// Wraps a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Unwraps the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Writes the four snapshot keys in sequence.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on the first failed write; earlier keys stay
    /// written.
    #[instrument(skip(self, snapshot), fields(active_mark = %snapshot.active_mark))]
    pub fn save_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        self.store.set(BOARD_KEY, &encode_board(&snapshot.board)?)?;
        self.store
            .set(ACTIVE_MARK_KEY, snapshot.active_mark.symbol())?;
        self.store.set(PLAYER_A_KEY, &snapshot.name_a)?;
        self.store.set(PLAYER_B_KEY, &snapshot.name_b)?;
        debug!("Snapshot saved");
        Ok(())
    }

    /// Loads the saved snapshot if one is present and well formed.
    ///
    /// A snapshot whose board already holds a finished game is discarded.
    #[instrument(skip(self))]
    pub fn load_snapshot(&self) -> Option<Snapshot> {
        let Some(raw_board) = self.read(BOARD_KEY) else {
            debug!("No saved game");
            return None;
        };
        let board = decode_board(&raw_board)?;

        let raw_mark = self.read(ACTIVE_MARK_KEY);
        let Some(active_mark) = raw_mark.as_deref().and_then(|m| m.parse::<Mark>().ok()) else {
            warn!(mark = ?raw_mark, "Discarding snapshot with invalid active mark");
            return None;
        };

        let (Some(name_a), Some(name_b)) = (self.read(PLAYER_A_KEY), self.read(PLAYER_B_KEY))
        else {
            warn!("Discarding snapshot with missing player names");
            return None;
        };

        if board.is_full()
            || board.has_winning_line_for(Mark::O)
            || board.has_winning_line_for(Mark::X)
        {
            warn!("Discarding snapshot of a finished game");
            return None;
        }

        debug!(active_mark = %active_mark, "Snapshot loaded");
        Some(Snapshot::new(board, active_mark, name_a, name_b))
    }

    /// Removes all four snapshot keys.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on the first failed removal.
    #[instrument(skip(self))]
    pub fn clear_snapshot(&mut self) -> Result<(), StoreError> {
        for key in SNAPSHOT_KEYS {
            self.store.remove(key)?;
        }
        debug!("Snapshot cleared");
        Ok(())
    }

    /// Writes the whole leaderboard under [`RANKING_KEY`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    #[instrument(skip(self, leaderboard), fields(entries = leaderboard.len()))]
    pub fn save_leaderboard(&mut self, leaderboard: &Leaderboard) -> Result<(), StoreError> {
        self.store
            .set(RANKING_KEY, &encode_leaderboard(leaderboard)?)
    }

    /// Loads the leaderboard, empty if absent or malformed.
    #[instrument(skip(self))]
    pub fn load_leaderboard(&self) -> Leaderboard {
        self.read(RANKING_KEY)
            .and_then(|raw| decode_leaderboard(&raw))
            .unwrap_or_default()
    }

    /// Reads a key, treating store failures as absence.
    fn read(&self, key: &str) -> Option<String> {
        self.store
            .get(key)
            .map_err(|e| warn!(key, error = %e, "Store read failed"))
            .ok()
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, Position};

    fn sample_snapshot() -> Snapshot {
        let mut board = Board::new();
        board.apply_mark(Position::Center, Mark::O).unwrap();
        board.apply_mark(Position::TopLeft, Mark::X).unwrap();
        Snapshot::new(board, Mark::O, "Ana".to_string(), "Bea".to_string())
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        let snapshot = sample_snapshot();
        gateway.save_snapshot(&snapshot).unwrap();
        assert_eq!(gateway.load_snapshot(), Some(snapshot));
    }

    #[test]
    fn test_snapshot_key_layout() {
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        gateway.save_snapshot(&sample_snapshot()).unwrap();
        let store = gateway.store();
        assert_eq!(
            store.get(BOARD_KEY).unwrap().as_deref(),
            Some(r#"["X","","","","O","","","",""]"#)
        );
        assert_eq!(store.get(ACTIVE_MARK_KEY).unwrap().as_deref(), Some("O"));
        assert_eq!(store.get(PLAYER_A_KEY).unwrap().as_deref(), Some("Ana"));
        assert_eq!(store.get(PLAYER_B_KEY).unwrap().as_deref(), Some("Bea"));
    }

    #[test]
    fn test_clear_snapshot_removes_every_key() {
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        gateway.save_snapshot(&sample_snapshot()).unwrap();
        gateway.clear_snapshot().unwrap();
        assert!(gateway.store().is_empty());
        assert_eq!(gateway.load_snapshot(), None);
    }

    #[test]
    fn test_invalid_active_mark_discards_snapshot() {
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        gateway.save_snapshot(&sample_snapshot()).unwrap();
        let mut store = gateway.into_store();
        store.set(ACTIVE_MARK_KEY, "Z").unwrap();
        assert_eq!(PersistenceGateway::new(store).load_snapshot(), None);
    }

    #[test]
    fn test_malformed_board_discards_snapshot() {
        let mut store = MemoryStore::new();
        store.set(BOARD_KEY, "not json").unwrap();
        store.set(ACTIVE_MARK_KEY, "O").unwrap();
        store.set(PLAYER_A_KEY, "Ana").unwrap();
        store.set(PLAYER_B_KEY, "Bea").unwrap();
        assert_eq!(PersistenceGateway::new(store).load_snapshot(), None);
    }

    #[test]
    fn test_missing_name_discards_snapshot() {
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        gateway.save_snapshot(&sample_snapshot()).unwrap();
        let mut store = gateway.into_store();
        store.remove(PLAYER_B_KEY).unwrap();
        assert_eq!(PersistenceGateway::new(store).load_snapshot(), None);
    }

    #[test]
    fn test_finished_board_discards_snapshot() {
        let mut board = Board::new();
        for pos in [Position::TopLeft, Position::TopCenter, Position::TopRight] {
            board.apply_mark(pos, Mark::O).unwrap();
        }
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        gateway
            .save_snapshot(&Snapshot::new(board, Mark::X, "Ana".into(), "Bea".into()))
            .unwrap();
        assert_eq!(gateway.load_snapshot(), None);
    }

    #[test]
    fn test_leaderboard_encoding() {
        let mut leaderboard = Leaderboard::new();
        leaderboard.record_win("Ana");
        leaderboard.record_win("Bea");
        leaderboard.record_win("Ana");
        let raw = encode_leaderboard(&leaderboard).unwrap();
        assert_eq!(raw, r#"[{"name":"Ana","wins":2},{"name":"Bea","wins":1}]"#);
        assert_eq!(decode_leaderboard(&raw), Some(leaderboard));
    }

    #[test]
    fn test_malformed_leaderboard_loads_empty() {
        let mut store = MemoryStore::new();
        store.set(RANKING_KEY, r#"[{"name":"Ana","wins":-1}]"#).unwrap();
        assert!(PersistenceGateway::new(store).load_leaderboard().is_empty());
    }
}
