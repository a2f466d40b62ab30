//! Cumulative win counts per player name.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// One player's line on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct LeaderboardEntry {
    /// Player name, matched exactly.
    name: String,
    /// Games won (draws count for both players).
    wins: u32,
}

impl LeaderboardEntry {
    /// Creates an entry with an explicit win count.
    pub fn new(name: impl Into<String>, wins: u32) -> Self {
        Self {
            name: name.into(),
            wins,
        }
    }
}

impl std::fmt::Display for LeaderboardEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} vitória(s)", self.name, self.wins)
    }
}

/// Win counts keyed by exact player name, in first-seen order.
///
/// Entries are never reordered by score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Creates an empty leaderboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits one win to `name`, adding the player on first sight.
    ///
    /// Returns the player's new win count.
    #[instrument(skip(self))]
    pub fn record_win(&mut self, name: &str) -> u32 {
        let index = match self.entries.iter().position(|e| e.name == name) {
            Some(index) => index,
            None => {
                self.entries.push(LeaderboardEntry::new(name, 0));
                self.entries.len() - 1
            }
        };
        let entry = &mut self.entries[index];
        entry.wins = entry.wins.saturating_add(1);
        info!(player = %entry.name, wins = entry.wins, "Win recorded");
        entry.wins
    }

    /// All entries in the order players were first seen.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Win count for `name`, `None` if the player has never won.
    pub fn wins_for(&self, name: &str) -> Option<u32> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.wins)
    }

    /// Number of players on the board.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether no win has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<LeaderboardEntry>> for Leaderboard {
    fn from(entries: Vec<LeaderboardEntry>) -> Self {
        Self { entries }
    }
}
