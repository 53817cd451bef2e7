//! Target rules and selection effects for targeted cards.
//!
//! Each targeted card runs a small state machine over its `PendingEffect`:
//! a valid selection applies the card's effect and bumps
//! `selected_count`; the effect closes once its selections are used up.
//! An invalid selection is rejected without consuming anything.

use log::{debug, trace};

use super::placement;
use super::{CardType, PendingEffect, Resolution, Stage};
use crate::board::{BlastShape, BombData, MarkerTag, Special};
use crate::core::{CardState, GameState, PlayerKey, Pos, Target, ORTHOGONAL};
use crate::effects::ResolverContext;
use crate::error::{EngineResult, Rejection};
use crate::events::Cause;

/// Whether `pos` is a valid board target for `card`.
///
/// `first` is the already chosen cell of a two-cell selection.
#[must_use]
pub fn is_valid_cell(
    card: CardType,
    cards: &CardState,
    game: &GameState,
    player: PlayerKey,
    pos: Pos,
    first: Option<Pos>,
) -> bool {
    if !pos.is_on_board() {
        return false;
    }
    let owner = game.board.owner(pos);
    let own = owner == Some(player);
    let enemy = owner == Some(player.opponent());
    let markers = &cards.markers;
    let special = markers.special_at(pos).and_then(|m| m.special());
    let guarded = markers.has(pos, MarkerTag::Guard);
    let bombed = markers.bomb_at(pos).is_some();

    match card {
        CardType::Destroy => owner.is_some() && !guarded,
        CardType::Guard => own && !bombed && special.is_none(),
        CardType::SwapWithEnemy => enemy && !bombed && matches!(special, None | Some(Special::Trap)),
        CardType::PositionSwap => owner.is_some() && !guarded && first != Some(pos),
        CardType::Sacrifice => own && !guarded,
        CardType::TimeBomb => own && !bombed,
        CardType::Trap => own && !bombed && special.is_none(),
        CardType::StrongWind => owner.is_some() && wind_directions(game, pos).next().is_some(),
        CardType::Tempt => enemy && special.is_some() && !guarded,
        CardType::Inherit => own && !bombed && special.is_none(),
        _ => false,
    }
}

/// Cards a card-stage selection may pick from.
#[must_use]
pub fn card_choices(pending: &PendingEffect, cards: &CardState, player: PlayerKey) -> Vec<CardType> {
    let mut choices: Vec<CardType> = match pending.card {
        CardType::Sell => cards.hands[player].iter().copied().collect(),
        CardType::Condemn => cards.hands[player.opponent()].iter().copied().collect(),
        _ => pending.offers.iter().copied().collect(),
    };
    choices.sort_unstable();
    choices.dedup();
    choices
}

/// Every target the pending effect would accept right now.
#[must_use]
pub fn targets(pending: &PendingEffect, cards: &CardState, game: &GameState, player: PlayerKey) -> Vec<Target> {
    match pending.stage {
        Stage::SelectTarget => Pos::all()
            .filter(|&pos| is_valid_cell(pending.card, cards, game, player, pos, pending.first_target))
            .map(Target::Cell)
            .collect(),
        Stage::SelectCard => card_choices(pending, cards, player).into_iter().map(Target::Card).collect(),
    }
}

/// Orthogonal directions in which `pos` has an empty neighbour.
fn wind_directions(game: &GameState, pos: Pos) -> impl Iterator<Item = (i8, i8)> + '_ {
    ORTHOGONAL
        .iter()
        .copied()
        .filter(move |&(dr, dc)| pos.offset(dr, dc).is_some_and(|next| game.board.is_empty_at(next)))
}

/// Apply one selection for the player's pending effect.
pub fn apply(ctx: &mut ResolverContext<'_>, player: PlayerKey, target: Target) -> EngineResult<Resolution> {
    let Some(mut pending) = ctx.cards.pending[player].clone() else {
        return Err(Rejection::NoPendingEffectMatch { card: None });
    };
    let card = pending.card;

    let resolution = match (pending.stage, target) {
        (Stage::SelectTarget, Target::Cell(pos)) => {
            if !is_valid_cell(card, ctx.cards, ctx.game, player, pos, pending.first_target) {
                return Err(Rejection::InvalidTarget { card });
            }
            select_cell(ctx, player, &mut pending, pos)
        }
        (Stage::SelectCard, Target::Card(chosen)) => {
            if !card_choices(&pending, ctx.cards, player).contains(&chosen) {
                return Err(Rejection::InvalidTarget { card });
            }
            if card == CardType::HeavenBlessing && ctx.cards.hands[player].len() >= ctx.config.hand_limit {
                return Err(Rejection::InvalidTarget { card });
            }
            select_card(ctx, player, card, chosen);
            Resolution::Continue
        }
        _ => return Err(Rejection::NoPendingEffectMatch { card: Some(card) }),
    };

    pending.selected_count += 1;
    let exhausted = card == CardType::Sacrifice && !has_cell_target(ctx, player, &pending);
    if resolution == Resolution::Continue && pending.remaining() > 0 && !exhausted {
        ctx.cards.pending[player] = Some(pending);
    } else {
        ctx.cards.pending[player] = None;
        debug!("{player} finished {card}");
    }
    Ok(resolution)
}

fn has_cell_target(ctx: &ResolverContext<'_>, player: PlayerKey, pending: &PendingEffect) -> bool {
    Pos::all().any(|pos| is_valid_cell(pending.card, ctx.cards, ctx.game, player, pos, pending.first_target))
}

fn select_cell(ctx: &mut ResolverContext<'_>, player: PlayerKey, pending: &mut PendingEffect, pos: Pos) -> Resolution {
    let card = pending.card;
    trace!("{player} selected {pos} for {card}");

    match card {
        CardType::Destroy => {
            ctx.destroy(pos, Cause::Destroy, "destroy_card");
        }
        CardType::Guard => {
            let special = Special::Guard { remaining_owner_turns: ctx.config.guard_turns };
            ctx.apply_status(pos, player, special, Cause::Guard, "guard_applied");
        }
        CardType::SwapWithEnemy => {
            // An enemy trap stays and springs once the stone is settled.
            ctx.change_owner(pos, player, Cause::Swap, "swap_with_enemy");
            ctx.cards.pending[player] = None;
            return placement::resolve_swapped(ctx, player, pos);
        }
        CardType::PositionSwap => match pending.first_target {
            None => pending.first_target = Some(pos),
            Some(first) => swap_positions(ctx, first, pos),
        },
        CardType::Sacrifice => {
            if ctx.destroy(pos, Cause::Sacrifice, "sacrifice") {
                ctx.add_charge(player, ctx.config.sacrifice_reward);
            }
        }
        CardType::TimeBomb => {
            let bomb = BombData {
                remaining_turns: ctx.config.bomb_turns,
                placed_turn: ctx.cards.turn_index,
                shape: BlastShape::Square,
            };
            ctx.apply_bomb(pos, player, bomb, Cause::TimeBomb, "bomb_placed");
        }
        CardType::Trap => {
            ctx.apply_status(pos, player, Special::Trap, Cause::Trap, "trap_placed");
        }
        CardType::StrongWind => strong_wind(ctx, pos),
        CardType::Tempt => {
            ctx.change_owner(pos, player, Cause::Tempt, "tempt");
            if let Some(marker) = ctx.cards.markers.special_at(pos).copied() {
                if marker.tag() == MarkerTag::Work {
                    ctx.remove_status(marker.id, Cause::Tempt, "tempt_work_removed");
                } else {
                    ctx.cards.markers.set_owner(marker.id, player);
                }
            }
        }
        CardType::Inherit => {
            ctx.apply_status(pos, player, Special::PermaProtected, Cause::Inherit, "inherit_applied");
        }
        _ => {}
    }
    Resolution::Continue
}

/// Exchange the owners and markers of two cells; stone ids stay put.
fn swap_positions(ctx: &mut ResolverContext<'_>, a: Pos, b: Pos) {
    let (Some(owner_a), Some(owner_b)) = (ctx.owner(a), ctx.owner(b)) else {
        return;
    };
    if owner_a != owner_b {
        ctx.change_owner(a, owner_b, Cause::PositionSwap, "position_swap");
        ctx.change_owner(b, owner_a, Cause::PositionSwap, "position_swap");
    }
    ctx.cards.markers.swap_cells(a, b);
}

/// Slide the stone to the farthest empty cell in a random open direction.
fn strong_wind(ctx: &mut ResolverContext<'_>, pos: Pos) {
    let open: Vec<(i8, i8)> = wind_directions(ctx.game, pos).collect();
    let Some(&(dr, dc)) = ctx.rng.choose(&open) else {
        return;
    };

    let mut dest = pos;
    while let Some(next) = dest.offset(dr, dc) {
        if !ctx.is_empty(next) {
            break;
        }
        dest = next;
    }
    ctx.move_stone(pos, dest, Cause::StrongWind, "strong_wind");
}

fn select_card(ctx: &mut ResolverContext<'_>, player: PlayerKey, card: CardType, chosen: CardType) {
    trace!("{player} selected {chosen} for {card}");
    match card {
        CardType::Sell => {
            if ctx.cards.take_from_hand(player, chosen) {
                ctx.cards.discard.push_back(chosen);
                ctx.add_charge(player, chosen.cost());
            }
        }
        CardType::HeavenBlessing => ctx.cards.hands[player].push_back(chosen),
        CardType::Condemn => {
            if ctx.cards.take_from_hand(player.opponent(), chosen) {
                ctx.cards.discard.push_back(chosen);
            }
        }
        _ => {}
    }
}
