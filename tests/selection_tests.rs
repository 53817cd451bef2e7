//! Selection protocol integration tests.
//!
//! Targeted cards open a pending selection. These tests walk each protocol
//! through `TurnPipeline::apply`: valid picks, rejected picks, multi-step
//! picks and cancellation.

use will_reversi::board::{Board, MarkerTag};
use will_reversi::cards::{CardType, Stage};
use will_reversi::core::{
    Action, ActionId, ActionKind, CardState, EngineConfig, GameState, PlayerKey, Pos, Target,
};
use will_reversi::error::{EngineResult, Rejection};
use will_reversi::pipeline::{Applied, TurnPipeline};
use will_reversi::rules::legal_actions;

struct Table {
    pipeline: TurnPipeline,
    cards: CardState,
    game: GameState,
    next_id: u64,
}

impl Table {
    fn new(cards: CardState, game: GameState) -> Self {
        Self { pipeline: TurnPipeline::seeded(EngineConfig::default(), 23), cards, game, next_id: 1 }
    }

    /// Apply for Black, keeping the new state only on success.
    fn black(&mut self, kind: ActionKind) -> EngineResult<Applied> {
        let action = Action::new(ActionId(self.next_id), self.cards.turn_index, PlayerKey::Black, kind);
        self.next_id += 1;
        let applied = self.pipeline.apply(&self.cards, &self.game, PlayerKey::Black, &action)?;
        self.cards = applied.card_state.clone();
        self.game = applied.game_state.clone();
        Ok(applied)
    }

    fn pending_card(&self) -> Option<CardType> {
        self.cards.pending[PlayerKey::Black].as_ref().map(|p| p.card)
    }
}

fn cell(row: u8, col: u8) -> ActionKind {
    ActionKind::Select { target: Target::Cell(Pos::new(row, col)) }
}

fn card(card: CardType) -> ActionKind {
    ActionKind::Select { target: Target::Card(card) }
}

fn holding(hand: &[CardType], charge: u32, rows: &[&str]) -> Table {
    let cards = CardState::new().with_hand(PlayerKey::Black, hand.iter().copied()).with_charge(PlayerKey::Black, charge);
    let game = if rows.is_empty() { GameState::new() } else { GameState::with_board(Board::from_rows(rows)) };
    Table::new(cards, game)
}

// =============================================================================
// Sacrifice Tests
// =============================================================================

/// Sacrifice takes at most three stones, paying out for each.
#[test]
fn test_sacrifice_stops_at_three() {
    let mut table = holding(&[CardType::Sacrifice], 5, &["BBBBB...", "W......."]);
    table.black(ActionKind::UseCard { card: CardType::Sacrifice }).unwrap();

    for col in 0..3 {
        assert_eq!(table.pending_card(), Some(CardType::Sacrifice));
        let applied = table.black(cell(0, col)).unwrap();
        assert!(!applied.turn_ended);
    }

    assert_eq!(table.pending_card(), None);
    assert_eq!(table.cards.charge[PlayerKey::Black], 15);
    assert_eq!(table.game.board.count(PlayerKey::Black), 2);
}

/// Cancelling a sacrifice after a pick ends it without a refund.
#[test]
fn test_sacrifice_cancel_after_pick_keeps_payout() {
    let mut table = holding(&[CardType::Sacrifice], 5, &["BBBBB...", "W......."]);
    table.black(ActionKind::UseCard { card: CardType::Sacrifice }).unwrap();
    table.black(cell(0, 0)).unwrap();

    table.black(ActionKind::Cancel).unwrap();

    assert_eq!(table.pending_card(), None);
    assert!(table.cards.hands[PlayerKey::Black].is_empty());
    assert_eq!(table.cards.charge[PlayerKey::Black], 5);
    assert!(table.cards.used_this_turn[PlayerKey::Black]);
}

/// Opponent stones are not valid sacrifice targets.
#[test]
fn test_sacrifice_rejects_enemy_stone() {
    let mut table = holding(&[CardType::Sacrifice], 5, &["BBBBB...", "W......."]);
    table.black(ActionKind::UseCard { card: CardType::Sacrifice }).unwrap();

    let result = table.black(cell(1, 0)).map(|_| ());

    assert_eq!(result, Err(Rejection::InvalidTarget { card: CardType::Sacrifice }));
    assert_eq!(table.game.board.count(PlayerKey::White), 1);
}

// =============================================================================
// Cancel Tests
// =============================================================================

/// Cancelling DESTROY before picking returns the card and the charge.
#[test]
fn test_cancel_destroy_refunds() {
    let mut table = holding(&[CardType::Destroy], 10, &[]);
    table.black(ActionKind::UseCard { card: CardType::Destroy }).unwrap();
    assert_eq!(table.cards.charge[PlayerKey::Black], 0);

    table.black(ActionKind::Cancel).unwrap();

    assert_eq!(table.cards.charge[PlayerKey::Black], 10);
    assert!(table.cards.has_card(PlayerKey::Black, CardType::Destroy));
    assert!(table.cards.discard.is_empty());
    assert!(!table.cards.used_this_turn[PlayerKey::Black]);
}

/// TIME_BOMB cannot be cancelled once played.
#[test]
fn test_time_bomb_is_not_cancellable() {
    let mut table = holding(&[CardType::TimeBomb], 13, &[]);
    table.black(ActionKind::UseCard { card: CardType::TimeBomb }).unwrap();

    let actions = legal_actions(&table.cards, &table.game, PlayerKey::Black, table.pipeline.config());
    assert!(!actions.contains(&ActionKind::Cancel));
    assert_eq!(
        table.black(ActionKind::Cancel).map(|_| ()),
        Err(Rejection::NoPendingEffectMatch { card: Some(CardType::TimeBomb) })
    );
}

// =============================================================================
// Two-Step Selection Tests
// =============================================================================

/// Position swap takes two picks and exchanges owners; ids stay in place.
#[test]
fn test_position_swap_two_picks() {
    let mut table = holding(&[CardType::PositionSwap], 10, &[]);
    let black_id = table.game.board.stone_id(Pos::new(3, 4));
    let white_id = table.game.board.stone_id(Pos::new(3, 3));

    table.black(ActionKind::UseCard { card: CardType::PositionSwap }).unwrap();
    table.black(cell(3, 4)).unwrap();
    assert_eq!(table.pending_card(), Some(CardType::PositionSwap));

    // The first pick cannot be picked again.
    assert_eq!(
        table.black(cell(3, 4)).map(|_| ()),
        Err(Rejection::InvalidTarget { card: CardType::PositionSwap })
    );

    table.black(cell(3, 3)).unwrap();

    assert_eq!(table.pending_card(), None);
    assert_eq!(table.game.board.owner(Pos::new(3, 4)), Some(PlayerKey::White));
    assert_eq!(table.game.board.owner(Pos::new(3, 3)), Some(PlayerKey::Black));
    assert_eq!(table.game.board.stone_id(Pos::new(3, 4)), black_id);
    assert_eq!(table.game.board.stone_id(Pos::new(3, 3)), white_id);
}

// =============================================================================
// Card-Stage Tests
// =============================================================================

/// Heaven blessing offers distinct cards and adds the chosen one to hand.
#[test]
fn test_heaven_blessing_offers() {
    let mut table = holding(&[CardType::HeavenBlessing], 3, &[]);
    table.black(ActionKind::UseCard { card: CardType::HeavenBlessing }).unwrap();

    let pending = table.cards.pending[PlayerKey::Black].clone().unwrap();
    assert_eq!(pending.stage, Stage::SelectCard);
    assert_eq!(pending.offers.len(), 5);
    assert!(!pending.offers.contains(&CardType::HeavenBlessing));
    let mut unique = pending.offers.to_vec();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), 5);

    // A cell is the wrong shape of answer for a card stage.
    assert_eq!(
        table.black(cell(3, 3)).map(|_| ()),
        Err(Rejection::NoPendingEffectMatch { card: Some(CardType::HeavenBlessing) })
    );

    let chosen = pending.offers[0];
    table.black(card(chosen)).unwrap();
    assert_eq!(table.pending_card(), None);
    assert!(table.cards.has_card(PlayerKey::Black, chosen));
}

/// Selling a card turns its cost into charge.
#[test]
fn test_sell_card() {
    let mut table = holding(&[CardType::Sell, CardType::Tempt], 8, &[]);
    table.black(ActionKind::UseCard { card: CardType::Sell }).unwrap();

    assert_eq!(
        table.black(card(CardType::Guard)).map(|_| ()),
        Err(Rejection::InvalidTarget { card: CardType::Sell })
    );
    table.black(card(CardType::Tempt)).unwrap();

    assert!(table.cards.hands[PlayerKey::Black].is_empty());
    assert_eq!(table.cards.charge[PlayerKey::Black], 20);
}

/// Condemn discards a card from the opponent's hand.
#[test]
fn test_condemn_discards_opponent_card() {
    let mut table = holding(&[CardType::Condemn], 6, &[]);
    table.cards.hands[PlayerKey::White].push_back(CardType::DoublePlace);

    table.black(ActionKind::UseCard { card: CardType::Condemn }).unwrap();
    table.black(card(CardType::DoublePlace)).unwrap();

    assert!(table.cards.hands[PlayerKey::White].is_empty());
    assert!(table.cards.discard.contains(&CardType::DoublePlace));
}

// =============================================================================
// Marker Target Tests
// =============================================================================

/// Guard goes on an own unmarked stone and then protects it from DESTROY.
#[test]
fn test_guard_then_destroy_rejected() {
    let mut table = holding(&[CardType::Guard], 7, &[]);
    table.black(ActionKind::UseCard { card: CardType::Guard }).unwrap();
    table.black(cell(3, 4)).unwrap();
    assert!(table.cards.markers.has(Pos::new(3, 4), MarkerTag::Guard));

    // A second card needs a fresh turn; reset the flag instead.
    let mut cards = table.cards.clone();
    cards.used_this_turn[PlayerKey::Black] = false;
    cards.hands[PlayerKey::Black].push_back(CardType::Destroy);
    cards.charge[PlayerKey::Black] = 10;
    let mut table = Table::new(cards, table.game.clone());
    table.black(ActionKind::UseCard { card: CardType::Destroy }).unwrap();

    assert_eq!(
        table.black(cell(3, 4)).map(|_| ()),
        Err(Rejection::InvalidTarget { card: CardType::Destroy })
    );
    table.black(cell(3, 3)).unwrap();
    assert!(table.game.board.is_empty_at(Pos::new(3, 3)));
}

/// Legal actions during a selection list exactly the valid targets.
#[test]
fn test_legal_actions_while_pending() {
    let mut table = holding(&[CardType::Inherit], 12, &[]);
    table.black(ActionKind::UseCard { card: CardType::Inherit }).unwrap();

    let actions = legal_actions(&table.cards, &table.game, PlayerKey::Black, table.pipeline.config());

    assert_eq!(actions, vec![cell(3, 4), cell(4, 3), ActionKind::Cancel]);
}
