//! Tests for game session turn flow, termination and persistence.

use velha::{
    ACTIVE_MARK_KEY, BOARD_KEY, GameSession, Gesture, KeyValueStore, Mark, MemoryStore,
    MoveOutcome, PLAYER_A_KEY, PLAYER_B_KEY, Phase, RANKING_KEY, Square, StoreError,
    StoreErrorKind,
};

/// Store that reads as empty and rejects every write.
#[derive(Debug, Default)]
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::new(StoreErrorKind::Query, format!("read-only: {key}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        Err(StoreError::new(StoreErrorKind::Query, format!("read-only: {key}")))
    }
}

/// Plays `moves` in order, returning the outcome of the last one.
fn play_all(session: &mut GameSession<MemoryStore>, moves: &[usize]) -> MoveOutcome {
    let mut last = MoveOutcome::Rejected;
    for &index in moves {
        last = session.play_move(index);
    }
    last
}

fn started(name_a: &str, name_b: &str) -> GameSession<MemoryStore> {
    let mut session = GameSession::load(MemoryStore::new());
    session.start(name_a, name_b);
    session
}

#[test]
fn test_fresh_store_waits_for_setup() {
    let session = GameSession::load(MemoryStore::new());
    assert_eq!(session.phase(), Phase::NotStarted);
    assert_eq!(session.status(), None);
    assert!(session.leaderboard().is_empty());

    let view = session.view();
    assert!(view.setup_visible);
    assert!(view.start_visible);
    assert!(!view.board_visible);
    assert!(!view.restart_visible);
}

#[test]
fn test_start_announces_first_player() {
    let session = started("Ana", "Bea");
    assert_eq!(session.phase(), Phase::InProgress);
    assert_eq!(session.active_mark(), Mark::O);
    assert_eq!(session.status(), Some("Ana (O) começa!"));
    assert!(session.view().board_visible);
}

#[test]
fn test_empty_names_get_defaults() {
    let session = started("", "");
    assert_eq!(session.name_a(), "Jogador 1");
    assert_eq!(session.name_b(), "Jogador 2");
    assert_eq!(session.status(), Some("Jogador 1 (O) começa!"));
}

#[test]
fn test_whitespace_names_kept_as_typed() {
    let session = started("   ", "Bea");
    assert_eq!(session.name_a(), "   ");
    assert_eq!(session.name_b(), "Bea");
}

#[test]
fn test_turns_alternate_strictly() {
    let mut session = started("Ana", "Bea");
    let expected = [Mark::X, Mark::O, Mark::X, Mark::O];
    for (index, next) in [4, 0, 8, 2].into_iter().zip(expected) {
        assert_eq!(session.play_move(index), MoveOutcome::Continued { next });
        assert_eq!(session.active_mark(), next);
    }
    assert_eq!(session.status(), Some("Ana (O) é a vez!"));
}

#[test]
fn test_occupied_cell_is_ignored() {
    let mut session = started("Ana", "Bea");
    session.play_move(4);
    let before = *session.board();

    assert_eq!(session.play_move(4), MoveOutcome::Rejected);
    assert_eq!(*session.board(), before);
    assert_eq!(session.active_mark(), Mark::X);
    assert_eq!(session.status(), Some("Bea (X) é a vez!"));
}

#[test]
fn test_out_of_range_index_is_ignored() {
    let mut session = started("Ana", "Bea");
    assert_eq!(session.play_move(9), MoveOutcome::Rejected);
    assert_eq!(session.active_mark(), Mark::O);
}

#[test]
fn test_moves_before_start_are_ignored() {
    let mut session = GameSession::load(MemoryStore::new());
    assert_eq!(session.play_move(0), MoveOutcome::Rejected);
    assert!(session.store().is_empty());
}

#[test]
fn test_row_win_credits_winner_and_clears_snapshot() {
    let mut session = started("Ana", "Bea");
    let outcome = play_all(&mut session, &[0, 3, 1, 4, 2]);

    assert_eq!(
        outcome,
        MoveOutcome::Won {
            winner: "Ana".to_string(),
            mark: Mark::O
        }
    );
    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.status(), Some("Ana venceu!"));
    assert_eq!(session.leaderboard().wins_for("Ana"), Some(1));
    assert_eq!(session.leaderboard().wins_for("Bea"), None);

    let store = session.store();
    for key in [BOARD_KEY, ACTIVE_MARK_KEY, PLAYER_A_KEY, PLAYER_B_KEY] {
        assert_eq!(store.get(key).unwrap(), None, "{key} should be cleared");
    }
    assert_eq!(
        store.get(RANKING_KEY).unwrap().as_deref(),
        Some(r#"[{"name":"Ana","wins":1}]"#)
    );
}

#[test]
fn test_draw_credits_both_players() {
    let mut session = started("Ana", "Bea");
    // O X O / O X X / X O O
    let outcome = play_all(&mut session, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

    assert_eq!(outcome, MoveOutcome::Draw);
    assert_eq!(session.status(), Some("Empate!"));
    assert_eq!(session.leaderboard().wins_for("Ana"), Some(1));
    assert_eq!(session.leaderboard().wins_for("Bea"), Some(1));
    assert_eq!(session.store().get(BOARD_KEY).unwrap(), None);
}

#[test]
fn test_win_on_last_square_is_not_a_draw() {
    let mut session = started("Ana", "Bea");
    // O X O / X O X / X O O: the ninth move fills the board and the diagonal.
    let outcome = play_all(&mut session, &[0, 1, 2, 3, 4, 5, 7, 6, 8]);

    assert!(session.board().is_full());
    assert_eq!(
        outcome,
        MoveOutcome::Won {
            winner: "Ana".to_string(),
            mark: Mark::O
        }
    );
    assert_eq!(session.leaderboard().wins_for("Bea"), None);
}

#[test]
fn test_no_moves_after_finish() {
    let mut session = started("Ana", "Bea");
    play_all(&mut session, &[0, 3, 1, 4, 2]);
    let board = *session.board();

    assert_eq!(session.play_move(8), MoveOutcome::Rejected);
    assert_eq!(*session.board(), board);
    assert!(session.view().cells.iter().all(|c| !c.clickable));
}

#[test]
fn test_restart_keeps_leaderboard() {
    let mut session = started("Ana", "Bea");
    play_all(&mut session, &[0, 3, 1, 4, 2]);
    session.restart();

    assert_eq!(session.phase(), Phase::NotStarted);
    assert_eq!(session.leaderboard().wins_for("Ana"), Some(1));
    assert!(session.view().setup_visible);

    session.start("Ana", "Bea");
    play_all(&mut session, &[0, 3, 1, 4, 2]);
    assert_eq!(session.leaderboard().wins_for("Ana"), Some(2));
    assert_eq!(session.leaderboard().len(), 1);
}

#[test]
fn test_restart_ignored_while_playing() {
    let mut session = started("Ana", "Bea");
    session.play_move(0);
    session.restart();
    assert_eq!(session.phase(), Phase::InProgress);
}

#[test]
fn test_start_ignored_while_playing() {
    let mut session = started("Ana", "Bea");
    session.play_move(0);
    session.start("Caio", "Duda");
    assert_eq!(session.name_a(), "Ana");
    assert_eq!(session.board().squares()[0], Square::Occupied(Mark::O));
}

#[test]
fn test_interrupted_game_resumes_verbatim() {
    let mut store = MemoryStore::new();
    {
        let mut session = GameSession::load(&mut store);
        session.start("Ana", "Bea");
        session.play_move(4);
        session.play_move(0);
        session.play_move(8);
    }

    let session = GameSession::load(store);
    assert_eq!(session.phase(), Phase::InProgress);
    assert_eq!(session.name_a(), "Ana");
    assert_eq!(session.name_b(), "Bea");
    assert_eq!(session.active_mark(), Mark::X);
    assert_eq!(session.status(), Some("Bea (X) é a vez!"));

    let squares = session.board().squares();
    assert_eq!(squares[4], Square::Occupied(Mark::O));
    assert_eq!(squares[0], Square::Occupied(Mark::X));
    assert_eq!(squares[8], Square::Occupied(Mark::O));
    assert_eq!(squares.iter().filter(|s| **s != Square::Empty).count(), 3);
}

#[test]
fn test_resumed_game_plays_on() {
    let mut store = MemoryStore::new();
    {
        let mut session = GameSession::load(&mut store);
        session.start("Ana", "Bea");
        play_all_ref(&mut session, &[0, 3, 1, 4]);
    }

    let mut session = GameSession::load(store);
    assert!(matches!(session.play_move(2), MoveOutcome::Won { .. }));
    assert_eq!(session.status(), Some("Ana venceu!"));
}

fn play_all_ref(session: &mut GameSession<&mut MemoryStore>, moves: &[usize]) {
    for &index in moves {
        session.play_move(index);
    }
}

#[test]
fn test_leaderboard_survives_reload() {
    let mut session = started("Ana", "Bea");
    play_all(&mut session, &[0, 3, 1, 4, 2]);
    let store = session.into_store();

    let session = GameSession::load(store);
    assert_eq!(session.phase(), Phase::NotStarted);
    assert_eq!(session.leaderboard().wins_for("Ana"), Some(1));
    assert_eq!(session.view().ranking, ["Ana: 1 vitória(s)"]);
}

#[test]
fn test_corrupt_active_mark_loads_as_not_started() {
    let mut store = MemoryStore::new();
    {
        let mut session = GameSession::load(&mut store);
        session.start("Ana", "Bea");
        session.play_move(0);
    }
    store.set(ACTIVE_MARK_KEY, "Y").unwrap();

    let session = GameSession::load(store);
    assert_eq!(session.phase(), Phase::NotStarted);
}

#[test]
fn test_gestures_drive_the_session() {
    let mut session = GameSession::load(MemoryStore::new());
    session.handle(Gesture::Start {
        name_a: "Ana".to_string(),
        name_b: String::new(),
    });
    assert_eq!(session.name_b(), "Jogador 2");

    for index in [0, 3, 1, 4, 2] {
        session.handle(Gesture::Cell(index));
    }
    let view = session.view();
    assert_eq!(view.phase, Phase::Finished);
    assert!(view.restart_visible);
    assert_eq!(view.status.as_deref(), Some("Ana venceu!"));

    session.handle(Gesture::Restart);
    assert_eq!(session.phase(), Phase::NotStarted);
}

#[test]
fn test_view_marks_only_empty_cells_clickable() {
    let mut session = started("Ana", "Bea");
    session.play_move(4);
    let view = session.view();
    for (index, cell) in view.cells.iter().enumerate() {
        assert_eq!(cell.clickable, index != 4);
    }
    assert_eq!(view.cells[4].square, Square::Occupied(Mark::O));
}

#[test]
fn test_failed_writes_keep_game_in_memory() {
    let mut session = GameSession::load(ReadOnlyStore);
    session.start("Ana", "Bea");
    assert_eq!(session.phase(), Phase::InProgress);

    let outcome = [0, 3, 1, 4, 2]
        .into_iter()
        .map(|index| session.play_move(index))
        .last();

    assert!(matches!(outcome, Some(MoveOutcome::Won { .. })));
    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.status(), Some("Ana venceu!"));
    assert_eq!(session.leaderboard().wins_for("Ana"), Some(1));
}

#[test]
fn test_maxed_out_win_count_does_not_overflow() {
    let mut store = MemoryStore::new();
    store
        .set(RANKING_KEY, r#"[{"name":"Ana","wins":4294967295}]"#)
        .unwrap();

    let mut session = GameSession::load(store);
    session.start("Ana", "Bea");
    for index in [0, 3, 1, 4, 2] {
        session.play_move(index);
    }

    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.leaderboard().wins_for("Ana"), Some(u32::MAX));
    assert_eq!(session.store().len(), 1);
}
