//! Stone placement and the effects of armed cards.
//!
//! A placement resolves in this order:
//!
//! 1. spawn the stone
//! 2. standard flips (direction order, nearest first); flipped stones lose
//!    bombs and hyperactive markers
//! 3. regen one-shots on the flipped stones
//! 4. chain flips and their regen, when CHAIN is armed
//! 5. placement effects of the armed card (charge multipliers, plunder,
//!    card steal, markers)
//! 6. immediate anchor activation (dragon, breeding, destroy god)
//! 7. trap triggers
//! 8. extra-placement bookkeeping
//!
//! Charge gained is the number of standard plus chain flips.

use log::{debug, trace};

use super::{CardType, Resolution};
use crate::board::{BlastShape, BombData, MarkerTag, Special};
use crate::core::{CardState, GameState, PlayerKey, Pos};
use crate::effects::{breeding, chain, destroy_god, dragon, regen, trap, ResolverContext};
use crate::error::{EngineResult, Rejection};
use crate::events::Cause;
use crate::rules::{capture_flips_from, flips_for, free_placement_moves, legal_moves, ProtectionSet};

/// Cells the player may place on right now, row-major.
#[must_use]
pub fn legal_placements(cards: &CardState, game: &GameState, player: PlayerKey) -> Vec<Pos> {
    if cards.armed[player] == Some(CardType::FreePlacement) {
        free_placement_moves(&game.board)
    } else {
        legal_moves(&game.board, player, &ProtectionSet::from_markers(&cards.markers))
    }
}

/// Place a stone for `player` at `pos`.
pub fn place(ctx: &mut ResolverContext<'_>, player: PlayerKey, pos: Pos) -> EngineResult<Resolution> {
    if !pos.is_on_board() {
        return Err(Rejection::IllegalMove { pos });
    }
    let armed = ctx.cards.armed[player];
    let flips = flips_for(&ctx.game.board, pos, player, &ctx.protection());
    let free = armed == Some(CardType::FreePlacement);

    if !ctx.is_empty(pos) || (flips.is_empty() && !free) {
        return Err(Rejection::IllegalMove { pos });
    }

    ctx.cards.armed[player] = None;
    ctx.spawn(pos, player, Cause::Place, "place");
    debug!("{player} placed at {pos}, {} flips", flips.len());
    Ok(settle_stone(ctx, player, pos, &flips, armed))
}

/// Resolve an enemy stone taken by SWAP_WITH_ENEMY as if it were placed.
pub(crate) fn resolve_swapped(ctx: &mut ResolverContext<'_>, player: PlayerKey, pos: Pos) -> Resolution {
    let armed = ctx.cards.armed[player].take();
    let flips = capture_flips_from(&ctx.game.board, pos, player, &ctx.protection());
    settle_stone(ctx, player, pos, &flips, armed)
}

/// Everything after the stone is on the board and owned by `player`.
fn settle_stone(
    ctx: &mut ResolverContext<'_>,
    player: PlayerKey,
    pos: Pos,
    flips: &[Pos],
    armed: Option<CardType>,
) -> Resolution {
    let flipped = ctx.flip_all(flips, player, Cause::Flip, "standard_flip");
    regen::after_flips(ctx, &flipped);

    let chained = if armed == Some(CardType::Chain) {
        chain::resolve(ctx, &flipped, player)
    } else {
        Vec::new()
    };

    let gained = (flipped.len() + chained.len()) as u32;
    apply_armed(ctx, player, pos, armed, gained);

    match armed {
        Some(CardType::Dragon) => {
            dragon::activate(ctx, pos, player, "dragon_convert_immediate");
        }
        Some(CardType::Breeding) => {
            breeding::activate(ctx, pos, player);
        }
        Some(CardType::DestroyGod) => {
            destroy_god::activate(ctx, pos, player);
        }
        _ => {}
    }

    trap::check_triggers(ctx);
    ctx.game.consecutive_passes = 0;

    if ctx.cards.extra_placements[player] > 0 {
        ctx.cards.extra_placements[player] -= 1;
        Resolution::Continue
    } else {
        Resolution::EndTurn
    }
}

/// Charge for the flips plus whatever the armed card adds on top.
fn apply_armed(ctx: &mut ResolverContext<'_>, player: PlayerKey, pos: Pos, armed: Option<CardType>, gained: u32) {
    let opponent = player.opponent();
    let Some(card) = armed else {
        ctx.add_charge(player, gained);
        return;
    };

    match card {
        CardType::GoldStone | CardType::SilverStone => {
            let (factor, cause, reason) = if card == CardType::GoldStone {
                (4, Cause::GoldStone, "gold_stone_consumed")
            } else {
                (3, Cause::SilverStone, "silver_stone_consumed")
            };
            ctx.add_charge(player, gained * factor);
            ctx.destroy(pos, cause, reason);
            return;
        }
        CardType::Plunder => {
            let stolen = gained.min(ctx.cards.charge[opponent]);
            ctx.cards.charge[opponent] -= stolen;
            ctx.add_charge(player, stolen);
            trace!("{player} plundered {stolen}");
        }
        CardType::StealCard => {
            let room = ctx.config.hand_limit.saturating_sub(ctx.cards.hands[player].len());
            let count = (gained as usize).min(ctx.cards.hands[opponent].len()).min(room);
            for _ in 0..count {
                if let Some(stolen) = ctx.cards.hands[opponent].pop_front() {
                    ctx.cards.hands[player].push_back(stolen);
                }
            }
            trace!("{player} stole {count} cards");
        }
        CardType::CrossBomb => {
            let bomb = BombData {
                remaining_turns: ctx.config.bomb_turns,
                placed_turn: ctx.cards.turn_index,
                shape: BlastShape::Cross,
            };
            ctx.apply_bomb(pos, player, bomb, Cause::CrossBomb, "cross_bomb_placed");
        }
        _ => {
            if card == CardType::Work {
                retire_work_anchors(ctx, player);
            }
            if let Some((special, cause, reason)) = armed_marker(card, ctx) {
                ctx.apply_status(pos, player, special, cause, reason);
            }
        }
    }
    ctx.add_charge(player, gained);
}

/// A player keeps a single WORK stone; placing a new one retires the old.
fn retire_work_anchors(ctx: &mut ResolverContext<'_>, player: PlayerKey) {
    for marker in ctx.cards.markers.anchors(MarkerTag::Work, player) {
        ctx.remove_status(marker.id, Cause::Work, "work_replaced");
    }
}

/// The marker an armed card leaves on the placed stone.
fn armed_marker(card: CardType, ctx: &ResolverContext<'_>) -> Option<(Special, Cause, &'static str)> {
    let config = ctx.config;
    let marker = match card {
        CardType::ProtectedNextStone => (Special::Protected, Cause::Protection, "protected_placed"),
        CardType::PermaProtect => (Special::PermaProtected, Cause::Protection, "perma_protected_placed"),
        CardType::Regen => (Special::Regen { remaining: 1 }, Cause::Regen, "regen_placed"),
        CardType::Dragon => (
            Special::Dragon { remaining_owner_turns: config.dragon_turns },
            Cause::Dragon,
            "dragon_placed",
        ),
        CardType::Breeding => (
            Special::Breeding { remaining_owner_turns: config.breeding_turns },
            Cause::Breeding,
            "breeding_placed",
        ),
        CardType::DestroyGod => (
            Special::DestroyGod { remaining_owner_turns: config.destroy_god_turns },
            Cause::DestroyGod,
            "udg_placed",
        ),
        CardType::Hyperactive => (Special::Hyperactive, Cause::Hyperactive, "hyperactive_placed"),
        CardType::Work => (Special::Work { stage: 0 }, Cause::Work, "work_placed"),
        _ => return None,
    };
    Some(marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::fixture::Fixture;
    use crate::events::EventKind;

    fn opening() -> Fixture {
        let mut fx = Fixture::new(&[]);
        fx.game = GameState::new();
        fx
    }

    #[test]
    fn test_standard_placement() {
        let mut fx = opening();
        let resolution = place(&mut fx.ctx(), PlayerKey::Black, Pos::new(2, 3)).unwrap();

        assert_eq!(resolution, Resolution::EndTurn);
        assert_eq!(fx.game.board.count(PlayerKey::Black), 4);
        assert_eq!(fx.cards.charge[PlayerKey::Black], 1);
        let kinds: Vec<_> = fx.events().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Spawn, EventKind::Change]);
    }

    #[test]
    fn test_illegal_placement_rejected() {
        let mut fx = opening();
        assert_eq!(
            place(&mut fx.ctx(), PlayerKey::Black, Pos::new(0, 0)),
            Err(Rejection::IllegalMove { pos: Pos::new(0, 0) })
        );
        assert_eq!(
            place(&mut fx.ctx(), PlayerKey::Black, Pos::new(3, 3)),
            Err(Rejection::IllegalMove { pos: Pos::new(3, 3) })
        );
        assert!(fx.events().is_empty());
    }

    #[test]
    fn test_off_board_placement_rejected() {
        let mut fx = opening();
        fx.cards.armed[PlayerKey::Black] = Some(CardType::FreePlacement);
        let off = Pos { row: 8, col: 0 };

        assert_eq!(place(&mut fx.ctx(), PlayerKey::Black, off), Err(Rejection::IllegalMove { pos: off }));
        assert!(fx.events().is_empty());
    }

    #[test]
    fn test_free_placement_allows_any_empty_cell() {
        let mut fx = opening();
        fx.cards.armed[PlayerKey::Black] = Some(CardType::FreePlacement);

        assert!(place(&mut fx.ctx(), PlayerKey::Black, Pos::new(0, 0)).is_ok());
        assert_eq!(fx.game.board.owner(Pos::new(0, 0)), Some(PlayerKey::Black));
        assert_eq!(fx.cards.armed[PlayerKey::Black], None);
    }

    #[test]
    fn test_gold_stone_multiplies_and_vanishes() {
        let mut fx = opening();
        fx.cards.armed[PlayerKey::Black] = Some(CardType::GoldStone);

        place(&mut fx.ctx(), PlayerKey::Black, Pos::new(2, 3)).unwrap();

        assert_eq!(fx.cards.charge[PlayerKey::Black], 4);
        assert!(fx.game.board.is_empty_at(Pos::new(2, 3)));
        assert_eq!(fx.game.board.owner(Pos::new(3, 3)), Some(PlayerKey::Black));
    }

    #[test]
    fn test_plunder_takes_up_to_flip_count() {
        let mut fx = opening();
        fx.cards.armed[PlayerKey::Black] = Some(CardType::Plunder);
        fx.cards.charge[PlayerKey::White] = 10;

        place(&mut fx.ctx(), PlayerKey::Black, Pos::new(2, 3)).unwrap();

        assert_eq!(fx.cards.charge[PlayerKey::White], 9);
        assert_eq!(fx.cards.charge[PlayerKey::Black], 2);
    }

    #[test]
    fn test_steal_card_respects_hand_room() {
        let mut fx = opening();
        fx.config = fx.config.clone().with_hand_limit(1);
        fx.cards.armed[PlayerKey::Black] = Some(CardType::StealCard);
        fx.cards.hands[PlayerKey::White] = [CardType::Sell, CardType::Trap].into_iter().collect();

        place(&mut fx.ctx(), PlayerKey::Black, Pos::new(2, 3)).unwrap();

        assert_eq!(fx.cards.hands[PlayerKey::Black].iter().copied().collect::<Vec<_>>(), vec![CardType::Sell]);
        assert_eq!(fx.cards.hands[PlayerKey::White].len(), 1);
    }

    #[test]
    fn test_armed_marker_lands_on_placed_stone() {
        let mut fx = opening();
        fx.cards.armed[PlayerKey::Black] = Some(CardType::Work);

        place(&mut fx.ctx(), PlayerKey::Black, Pos::new(2, 3)).unwrap();

        assert!(fx.cards.markers.has(Pos::new(2, 3), MarkerTag::Work));
        assert_eq!(fx.events().last().map(|e| e.kind), Some(EventKind::StatusApplied));
    }

    #[test]
    fn test_second_work_stone_replaces_the_first() {
        let mut fx = opening();
        fx.cards.markers.set_special(Pos::new(3, 4), PlayerKey::Black, Special::Work { stage: 2 });
        fx.cards.markers.set_special(Pos::new(3, 3), PlayerKey::White, Special::Work { stage: 1 });
        fx.cards.armed[PlayerKey::Black] = Some(CardType::Work);

        place(&mut fx.ctx(), PlayerKey::Black, Pos::new(2, 3)).unwrap();

        let black_work = fx.cards.markers.anchors(MarkerTag::Work, PlayerKey::Black);
        assert_eq!(black_work.len(), 1);
        assert_eq!(black_work[0].pos, Pos::new(2, 3));
        assert_eq!(black_work[0].special(), Some(Special::Work { stage: 0 }));
        assert!(!fx.cards.markers.has(Pos::new(3, 4), MarkerTag::Work));
        assert!(fx.reasons().contains(&"work_replaced"));
    }

    #[test]
    fn test_cross_bomb_records_placement_turn() {
        let mut fx = opening();
        fx.cards.turn_index = 4;
        fx.cards.armed[PlayerKey::Black] = Some(CardType::CrossBomb);

        place(&mut fx.ctx(), PlayerKey::Black, Pos::new(2, 3)).unwrap();

        let bomb = fx.cards.markers.bomb_at(Pos::new(2, 3)).and_then(|m| m.bomb()).unwrap();
        assert_eq!(bomb.placed_turn, 4);
        assert_eq!(bomb.shape, BlastShape::Cross);
    }

    #[test]
    fn test_extra_placement_keeps_turn() {
        let mut fx = opening();
        fx.cards.extra_placements[PlayerKey::Black] = 1;

        let resolution = place(&mut fx.ctx(), PlayerKey::Black, Pos::new(2, 3)).unwrap();

        assert_eq!(resolution, Resolution::Continue);
        assert_eq!(fx.cards.extra_placements[PlayerKey::Black], 0);
    }

    #[test]
    fn test_dragon_converts_on_placement() {
        // Placing at (0,0) flips (0,1); the dragon then takes (1,0) and (1,1).
        let mut fx = Fixture::new(&[".WB.....", "WW......"]);
        fx.cards.armed[PlayerKey::Black] = Some(CardType::Dragon);

        place(&mut fx.ctx(), PlayerKey::Black, Pos::new(0, 0)).unwrap();

        assert_eq!(fx.game.board.count(PlayerKey::White), 0);
        assert!(fx.cards.markers.has(Pos::new(0, 0), MarkerTag::Dragon));
        assert!(fx.reasons().contains(&"dragon_convert_immediate"));
    }
}
