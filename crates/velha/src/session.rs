//! Game session state machine.

use tracing::{debug, error, info, instrument};

use crate::{
    Board, CellView, Gesture, KeyValueStore, Leaderboard, Mark, PersistenceGateway, Position,
    SessionView, Snapshot, Square,
};

/// Name given to the `O` player when the field is left empty.
pub const DEFAULT_NAME_A: &str = "Jogador 1";
/// Name given to the `X` player when the field is left empty.
pub const DEFAULT_NAME_B: &str = "Jogador 2";

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for players to be configured.
    NotStarted,
    /// Moves are being accepted.
    InProgress,
    /// Won or drawn; no more moves.
    Finished,
}

/// What a call to [`GameSession::play_move`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Move ignored: game not in progress, index out of range or cell taken.
    Rejected,
    /// Move accepted, game goes on with `next` to move.
    Continued {
        /// Mark now to move.
        next: Mark,
    },
    /// Move completed a line.
    Won {
        /// Name of the winning player.
        winner: String,
        /// Winning mark.
        mark: Mark,
    },
    /// Move filled the board without completing a line.
    Draw,
}

/// A two-player game with its leaderboard and durable store.
///
/// Every accepted move is written through to the store; failed writes are
/// logged and play continues from memory.
#[derive(Debug)]
pub struct GameSession<S> {
    board: Board,
    active_mark: Mark,
    name_a: String,
    name_b: String,
    phase: Phase,
    status: Option<String>,
    leaderboard: Leaderboard,
    gateway: PersistenceGateway<S>,
}

impl<S: KeyValueStore> GameSession<S> {
    /// Loads the leaderboard and any saved game from `store`.
    ///
    /// Resumes the saved game if there is one, otherwise waits in
    /// [`Phase::NotStarted`].
    #[instrument(skip(store))]
    pub fn load(store: S) -> Self {
        let gateway = PersistenceGateway::new(store);
        let leaderboard = gateway.load_leaderboard();
        let snapshot = gateway.load_snapshot();

        let mut session = Self {
            board: Board::new(),
            active_mark: Mark::FIRST,
            name_a: String::new(),
            name_b: String::new(),
            phase: Phase::NotStarted,
            status: None,
            leaderboard,
            gateway,
        };

        match snapshot {
            Some(snapshot) => session.resume(snapshot),
            None => info!(players = session.leaderboard.len(), "Session loaded, no saved game"),
        }
        session
    }

    /// Reconstructs an in-progress game exactly as saved.
    #[instrument(skip(self, snapshot), fields(active_mark = %snapshot.active_mark()))]
    pub fn resume(&mut self, snapshot: Snapshot) {
        self.board = *snapshot.board();
        self.active_mark = *snapshot.active_mark();
        self.name_a = snapshot.name_a().clone();
        self.name_b = snapshot.name_b().clone();
        self.phase = Phase::InProgress;
        self.announce_turn();
        info!(name_a = %self.name_a, name_b = %self.name_b, "Saved game resumed");
    }

    /// Starts a new game, `O` moving first.
    ///
    /// Empty names fall back to [`DEFAULT_NAME_A`] / [`DEFAULT_NAME_B`].
    /// Ignored while a game is in progress.
    #[instrument(skip(self))]
    pub fn start(&mut self, name_a: &str, name_b: &str) {
        if self.phase == Phase::InProgress {
            debug!("Start ignored, game in progress");
            return;
        }

        self.name_a = name_or_default(name_a, DEFAULT_NAME_A);
        self.name_b = name_or_default(name_b, DEFAULT_NAME_B);
        self.board.reset();
        self.active_mark = Mark::FIRST;
        self.phase = Phase::InProgress;
        self.persist_snapshot();
        self.status = Some(format!("{} ({}) começa!", self.name_a, self.active_mark));
        info!(name_a = %self.name_a, name_b = %self.name_b, "Game started");
    }

    /// Plays the active mark at board index `index` (0-8).
    ///
    /// Silently rejected unless a game is in progress and the cell is empty.
    #[instrument(skip(self), fields(mark = %self.active_mark))]
    pub fn play_move(&mut self, index: usize) -> MoveOutcome {
        if self.phase != Phase::InProgress {
            debug!(phase = ?self.phase, "Move rejected, game not in progress");
            return MoveOutcome::Rejected;
        }
        let Some(pos) = Position::from_index(index) else {
            debug!("Move rejected, index out of range");
            return MoveOutcome::Rejected;
        };
        if let Err(e) = self.board.apply_mark(pos, self.active_mark) {
            debug!(error = %e, "Move rejected");
            return MoveOutcome::Rejected;
        }
        self.persist_snapshot();

        let mark = self.active_mark;
        if self.board.has_winning_line_for(mark) {
            let winner = self.name_for(mark).to_string();
            self.status = Some(format!("{} venceu!", winner));
            self.finish(&[winner.clone()]);
            return MoveOutcome::Won { winner, mark };
        }

        if self.board.is_full() {
            self.status = Some("Empate!".to_string());
            let players = [self.name_a.clone(), self.name_b.clone()];
            self.finish(&players);
            return MoveOutcome::Draw;
        }

        self.active_mark = mark.opponent();
        self.persist_snapshot();
        self.announce_turn();
        MoveOutcome::Continued {
            next: self.active_mark,
        }
    }

    /// Returns a finished game to player setup. Ignored in other phases.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        if self.phase != Phase::Finished {
            debug!(phase = ?self.phase, "Restart ignored");
            return;
        }
        self.phase = Phase::NotStarted;
        info!("Ready for new players");
    }

    /// Dispatches a gesture from the presentation surface.
    pub fn handle(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Start { name_a, name_b } => self.start(&name_a, &name_b),
            Gesture::Cell(index) => {
                self.play_move(index);
            }
            Gesture::Restart => self.restart(),
        }
    }

    /// Builds the view a surface renders.
    pub fn view(&self) -> SessionView {
        let in_progress = self.phase == Phase::InProgress;
        let squares = *self.board.squares();
        let cells = squares.map(|square| CellView {
            square,
            clickable: in_progress && square == Square::Empty,
        });
        SessionView {
            phase: self.phase,
            active_mark: self.active_mark,
            cells,
            status: self.status.clone(),
            board_visible: self.phase != Phase::NotStarted,
            setup_visible: self.phase == Phase::NotStarted,
            start_visible: self.phase == Phase::NotStarted,
            restart_visible: self.phase == Phase::Finished,
            ranking: self
                .leaderboard
                .entries()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The mark to move, or the last mark played once finished.
    pub fn active_mark(&self) -> Mark {
        self.active_mark
    }

    /// Name of the `O` player.
    pub fn name_a(&self) -> &str {
        &self.name_a
    }

    /// Name of the `X` player.
    pub fn name_b(&self) -> &str {
        &self.name_b
    }

    /// Name of the player holding `mark`.
    pub fn name_for(&self, mark: Mark) -> &str {
        match mark {
            Mark::O => &self.name_a,
            Mark::X => &self.name_b,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Latest status message.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Cumulative wins.
    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// The durable store.
    pub fn store(&self) -> &S {
        self.gateway.store()
    }

    /// Consumes the session, returning the durable store.
    pub fn into_store(self) -> S {
        self.gateway.into_store()
    }

    fn announce_turn(&mut self) {
        let name = self.name_for(self.active_mark);
        self.status = Some(format!("{} ({}) é a vez!", name, self.active_mark));
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.board,
            self.active_mark,
            self.name_a.clone(),
            self.name_b.clone(),
        )
    }

    fn persist_snapshot(&mut self) {
        let snapshot = self.snapshot();
        if let Err(e) = self.gateway.save_snapshot(&snapshot) {
            error!(error = %e, "Failed to save snapshot");
        }
    }

    /// Ends the game, crediting each name in `winners` with one win.
    fn finish(&mut self, winners: &[String]) {
        self.phase = Phase::Finished;
        for name in winners {
            self.leaderboard.record_win(name);
        }
        if let Err(e) = self.gateway.save_leaderboard(&self.leaderboard) {
            error!(error = %e, "Failed to save leaderboard");
        }
        if let Err(e) = self.gateway.clear_snapshot() {
            error!(error = %e, "Failed to clear snapshot");
        }
        info!(status = ?self.status, "Game finished");
    }
}

fn name_or_default(name: &str, default: &str) -> String {
    if name.is_empty() {
        default.to_string()
    } else {
        name.to_string()
    }
}
