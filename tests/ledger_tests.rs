//! Action ledger and replay integration tests.
//!
//! An exported ledger, replayed against the same seed, must rebuild the
//! same state and the same event stream byte for byte.

use proptest::prelude::*;

use will_reversi::core::{ActionId, ActionKind, EngineConfig, GameRng, PlayerKey, Pos};
use will_reversi::error::{LedgerError, Rejection};
use will_reversi::events::BoardEvent;
use will_reversi::ledger::{replay, ActionLedger, LedgerEntry, LedgerStorage, SequentialIds, TimeProvider};
use will_reversi::rules::{DecisionMaker, UniformPolicy};
use will_reversi::session::{GameSession, SessionBuilder};

/// Play a random game, collecting every event the session produced.
fn random_game(seed: u64, max_actions: usize) -> (GameSession, Vec<BoardEvent>) {
    let mut session = SessionBuilder::new().with_seed(seed).build();
    let policy = UniformPolicy::default();
    let mut rng = GameRng::new(seed.wrapping_mul(31));
    let mut events = Vec::new();

    for _ in 0..max_actions {
        let player = session.current_player();
        let Some(kind) = policy.compute_action(session.card_state(), session.game_state(), player, &mut rng) else {
            break;
        };
        events.extend(session.submit(player, kind).expect("legal action rejected"));
    }
    (session, events)
}

// =============================================================================
// Replay Determinism Tests
// =============================================================================

/// Replaying through the JSON format reproduces state and events exactly.
#[test]
fn test_json_replay_is_byte_identical() {
    let (session, events) = random_game(2024, 300);

    let json = session.ledger().export_json().unwrap();
    let records = ActionLedger::import_json(&json).unwrap();
    let replayed = replay(EngineConfig::default(), 2024, &records).unwrap();

    assert_eq!(replayed.card_state.to_bytes().unwrap(), session.card_state().to_bytes().unwrap());
    assert_eq!(replayed.game_state.to_bytes().unwrap(), session.game_state().to_bytes().unwrap());
    assert_eq!(serde_json::to_string(&replayed.events).unwrap(), serde_json::to_string(&events).unwrap());
}

/// A different seed deals a different game.
#[test]
fn test_seed_changes_the_deal() {
    let a = SessionBuilder::new().with_seed(1).build();
    let b = SessionBuilder::new().with_seed(2).build();
    assert_ne!(a.card_state().deck, b.card_state().deck);
}

/// A tampered ledger fails at the offending action.
#[test]
fn test_tampered_ledger_is_rejected() {
    let (session, _) = random_game(7, 10);
    let mut records = session.ledger().export_actions();
    let mut forged = records[0];
    forged.action_id = ActionId(999);
    forged.player = session.current_player().opponent();
    records.push(forged);

    let err = replay(EngineConfig::default(), 7, &records).unwrap_err();
    match err {
        LedgerError::Rejected { action_id, rejection } => {
            assert_eq!(action_id, 999);
            assert!(matches!(rejection, Rejection::NotYourTurn { .. } | Rejection::GameOver));
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// A ledger naming an off-board cell fails to import instead of replaying.
#[test]
fn test_off_board_record_fails_import() {
    let json = r#"[{"action_id":1,"turn_index":0,"player":"black","type":"place","pos":{"row":9,"col":9}}]"#;

    let err = ActionLedger::import_json(json).unwrap_err();

    assert!(matches!(err, LedgerError::Json(_)));
    assert!(err.to_string().contains("off the board"));
}

/// The same record shape with an on-board cell imports and replays.
#[test]
fn test_on_board_record_imports() {
    let json = r#"[{"action_id":1,"turn_index":0,"player":"black","type":"place","pos":{"row":2,"col":3}}]"#;

    let records = ActionLedger::import_json(json).unwrap();
    let replayed = replay(EngineConfig::default(), 1, &records).unwrap();

    assert_eq!(records[0].kind, ActionKind::Place { pos: Pos::new(2, 3) });
    assert_eq!(replayed.game_state.board.count(PlayerKey::Black), 4);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    /// Any random game replays to identical bytes.
    #[test]
    fn prop_replay_determinism(seed in any::<u64>(), length in 1usize..120) {
        let (session, events) = random_game(seed, length);
        let replayed = replay(EngineConfig::default(), seed, &session.ledger().export_actions()).unwrap();

        prop_assert_eq!(replayed.game_state.to_bytes().unwrap(), session.game_state().to_bytes().unwrap());
        prop_assert_eq!(replayed.card_state.to_bytes().unwrap(), session.card_state().to_bytes().unwrap());
        prop_assert_eq!(replayed.events, events);
    }
}

// =============================================================================
// Injected Collaborator Tests
// =============================================================================

/// Storage that shares its saved entries with the test.
#[derive(Clone, Default)]
struct SharedStorage(std::rc::Rc<std::cell::RefCell<Vec<LedgerEntry>>>);

impl LedgerStorage for SharedStorage {
    fn save(&mut self, entries: &[LedgerEntry]) {
        *self.0.borrow_mut() = entries.to_vec();
    }

    fn load(&self) -> Vec<LedgerEntry> {
        self.0.borrow().clone()
    }
}

struct Clock(u64);

impl TimeProvider for Clock {
    fn now(&self) -> Option<u64> {
        Some(self.0)
    }
}

/// The session records through the injected storage, ids and clock.
#[test]
fn test_session_uses_injected_collaborators() {
    let storage = SharedStorage::default();
    let mut session = SessionBuilder::new()
        .with_seed(3)
        .with_id_generator(Box::new(SequentialIds::starting_at(100)))
        .with_time_provider(Box::new(Clock(42)))
        .with_storage(Box::new(storage.clone()))
        .build();

    session.submit(PlayerKey::Black, ActionKind::Place { pos: Pos::new(2, 3) }).unwrap();

    let saved = storage.0.borrow();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].action.action_id, ActionId(100));
    assert_eq!(saved[0].action.timestamp, Some(42));
    assert!(!saved[0].acknowledged);
}

/// Reconciliation marks what the server has and reports the rest.
#[test]
fn test_reconcile_after_play() {
    let (mut session, _) = random_game(5, 6);
    let ids: Vec<ActionId> = session.ledger().export_actions().iter().map(|r| r.action_id).collect();
    let known = &ids[..ids.len() / 2];

    let result = session.ledger_mut().reconcile_with_server(known);

    assert_eq!(result.acknowledged, known.to_vec());
    assert_eq!(result.missing, ids[ids.len() / 2..].to_vec());
    assert_eq!(session.ledger().unacknowledged().len(), result.missing.len());
}
