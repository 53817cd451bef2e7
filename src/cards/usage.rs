//! Playing cards from hand.
//!
//! A played card leaves the hand for the shared discard, its cost is paid,
//! and the player's card-per-turn flag is set. What happens next depends on
//! the card kind: targeted cards open a `PendingEffect`, armed cards wait
//! for the next placement, immediate cards resolve on the spot.

use log::{debug, trace};

use super::selection::is_valid_cell;
use super::{CardKind, CardType, PendingEffect};
use crate::core::{CardState, EngineConfig, GameRng, GameState, PlayerKey, Pos};
use crate::effects::ResolverContext;
use crate::error::{EngineResult, Rejection};

/// Check every precondition for playing `card`.
pub fn check_use(
    cards: &CardState,
    game: &GameState,
    player: PlayerKey,
    card: CardType,
    config: &EngineConfig,
) -> EngineResult<()> {
    if game.game_over {
        return Err(Rejection::GameOver);
    }
    if let Some(pending) = &cards.pending[player] {
        return Err(Rejection::NoPendingEffectMatch { card: Some(pending.card) });
    }
    if cards.used_this_turn[player] {
        return Err(Rejection::CardAlreadyUsedThisTurn);
    }
    if !cards.has_card(player, card) {
        return Err(Rejection::CardNotInHand { card });
    }
    let available = cards.charge[player];
    if available < card.cost() {
        return Err(Rejection::InsufficientCurrency { card, cost: card.cost(), available });
    }
    if !has_targets(cards, game, player, card, config) {
        return Err(Rejection::InvalidTarget { card });
    }
    Ok(())
}

/// Whether `card` could be played right now.
#[must_use]
pub fn can_use(cards: &CardState, game: &GameState, player: PlayerKey, card: CardType, config: &EngineConfig) -> bool {
    check_use(cards, game, player, card, config).is_ok()
}

/// Hand cards that pass `can_use`, deduplicated, in hand order.
#[must_use]
pub fn usable_cards(cards: &CardState, game: &GameState, player: PlayerKey, config: &EngineConfig) -> Vec<CardType> {
    let mut usable: Vec<CardType> = Vec::new();
    for &card in cards.hands[player].iter() {
        if !usable.contains(&card) && can_use(cards, game, player, card, config) {
            usable.push(card);
        }
    }
    usable
}

fn has_targets(cards: &CardState, game: &GameState, player: PlayerKey, card: CardType, config: &EngineConfig) -> bool {
    if card.kind() != CardKind::Targeted {
        return true;
    }
    match card {
        CardType::Sell => cards.hands[player].len() > 1,
        CardType::Condemn => !cards.hands[player.opponent()].is_empty(),
        CardType::HeavenBlessing => config.heaven_offer_count > 0,
        CardType::PositionSwap => {
            Pos::all().filter(|&pos| is_valid_cell(card, cards, game, player, pos, None)).nth(1).is_some()
        }
        _ => Pos::all().any(|pos| is_valid_cell(card, cards, game, player, pos, None)),
    }
}

/// Play `card` for `player`.
pub fn use_card(ctx: &mut ResolverContext<'_>, player: PlayerKey, card: CardType) -> EngineResult<()> {
    check_use(ctx.cards, ctx.game, player, card, ctx.config)?;

    ctx.cards.take_from_hand(player, card);
    ctx.cards.discard.push_back(card);
    ctx.cards.charge[player] -= card.cost();
    ctx.cards.used_this_turn[player] = true;
    debug!("{player} used {card}");

    match card.kind() {
        CardKind::Targeted => {
            let mut pending = PendingEffect::for_card(card, ctx.config);
            if card == CardType::HeavenBlessing {
                pending = pending.with_offers(heaven_offers(ctx.rng, ctx.config.heaven_offer_count));
            }
            ctx.cards.pending[player] = Some(pending);
        }
        CardKind::Armed => {
            ctx.cards.armed[player] = Some(card);
        }
        CardKind::Immediate => match card {
            CardType::DoublePlace => ctx.cards.extra_placements[player] += 1,
            CardType::TreasureBox => {
                let (min, max) = (ctx.config.treasure_min, ctx.config.treasure_max);
                let gain = min + ctx.rng.gen_range_usize(0..(max.saturating_sub(min) + 1) as usize) as u32;
                ctx.add_charge(player, gain);
                trace!("{player} opened a treasure box for {gain}");
            }
            _ => {}
        },
    }
    Ok(())
}

/// Distinct cards offered by a heaven blessing.
fn heaven_offers(rng: &mut GameRng, count: usize) -> Vec<CardType> {
    let mut pool: Vec<CardType> = CardType::all().filter(|&c| c != CardType::HeavenBlessing).collect();
    rng.shuffle(&mut pool);
    pool.truncate(count);
    pool
}

/// Back out of a cancellable selection.
///
/// The card returns to hand with its cost refunded. A sacrifice that has
/// already taken a stone is finished instead, without refund.
pub fn cancel(cards: &mut CardState, player: PlayerKey) -> EngineResult<()> {
    let pending = match &cards.pending[player] {
        Some(pending) if pending.is_cancellable() => pending.clone(),
        other => return Err(Rejection::NoPendingEffectMatch { card: other.as_ref().map(|p| p.card) }),
    };
    cards.pending[player] = None;

    if pending.card == CardType::Sacrifice && pending.selected_count > 0 {
        debug!("{player} finished sacrifice early");
        return Ok(());
    }

    if let Some(index) = cards.discard.iter().rposition(|&c| c == pending.card) {
        cards.discard.remove(index);
    }
    cards.hands[player].push_back(pending.card);
    cards.charge[player] += pending.card.cost();
    cards.used_this_turn[player] = false;
    debug!("{player} cancelled {}", pending.card);
    Ok(())
}
