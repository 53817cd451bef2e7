//! Hyperactive stones.
//!
//! At every turn-start, whoever's turn it is, each hyperactive stone hops
//! to a random empty neighbour and flips whatever it brackets from its new
//! cell. Stones are processed in the order their markers were created. A
//! stone with nowhere to go is destroyed; a stone no longer held by its
//! owner loses the marker.

use log::trace;

use super::{flip_and_settle, ResolverContext};
use crate::board::MarkerTag;
use crate::core::Pos;
use crate::events::Cause;
use crate::rules::capture_flips_from;

pub fn tick(ctx: &mut ResolverContext<'_>) {
    for marker in ctx.cards.markers.with_tag(MarkerTag::Hyperactive) {
        // Re-read: earlier hops may have moved, flipped or destroyed it.
        let Some(current) = ctx.cards.markers.get(marker.id).copied() else {
            continue;
        };
        let (from, owner) = (current.pos, current.owner);
        if ctx.owner(from) != Some(owner) {
            ctx.remove_status(current.id, Cause::Hyperactive, "hyperactive_lost");
            continue;
        }

        let empties: Vec<Pos> = from.neighbors().into_iter().filter(|&p| ctx.is_empty(p)).collect();
        let Some(&to) = ctx.rng.choose(&empties) else {
            ctx.destroy(from, Cause::Hyperactive, "no_candidates");
            continue;
        };

        if !ctx.move_stone(from, to, Cause::Hyperactive, "hyperactive_move").moved() {
            continue;
        }
        let flips = capture_flips_from(&ctx.game.board, to, owner, &ctx.protection());
        let flipped = flip_and_settle(ctx, &flips, owner, Cause::Hyperactive, "hyperactive_flip");
        ctx.add_charge(owner, flipped.len() as u32);
        trace!("hyperactive {from} -> {to}, flipped {}", flipped.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Special;
    use crate::core::PlayerKey;
    use crate::effects::fixture::Fixture;
    use crate::events::EventKind;

    #[test]
    fn test_hop_and_flip() {
        // (0,0) can only hop to (0,1), where it brackets (0,2) against (0,3).
        let mut fx = Fixture::new(&["B.WB", "WW.."]);
        fx.cards.markers.set_special(Pos::new(0, 0), PlayerKey::Black, Special::Hyperactive);

        tick(&mut fx.ctx());

        assert!(fx.game.board.is_empty_at(Pos::new(0, 0)));
        assert!(fx.cards.markers.has(Pos::new(0, 1), MarkerTag::Hyperactive));
        assert_eq!(fx.game.board.owner(Pos::new(0, 2)), Some(PlayerKey::Black));
        assert_eq!(fx.events()[0].kind, EventKind::Move);
        assert_eq!(fx.cards.charge[PlayerKey::Black], 1);
    }

    #[test]
    fn test_boxed_in_stone_is_destroyed() {
        let mut fx = Fixture::new(&["BW", "WW"]);
        fx.cards.markers.set_special(Pos::new(0, 0), PlayerKey::Black, Special::Hyperactive);

        tick(&mut fx.ctx());

        assert!(fx.game.board.is_empty_at(Pos::new(0, 0)));
        assert!(fx.cards.markers.is_empty());
        assert_eq!(fx.reasons(), vec!["no_candidates"]);
    }

    #[test]
    fn test_flipped_hyperactive_is_dropped_before_moving() {
        let mut fx = Fixture::new(&["WB.", "BW."]);
        fx.cards.markers.set_special(Pos::new(0, 0), PlayerKey::Black, Special::Hyperactive);
        fx.cards.markers.set_special(Pos::new(1, 1), PlayerKey::White, Special::Hyperactive);

        tick(&mut fx.ctx());

        assert!(!fx.cards.markers.has(Pos::new(0, 0), MarkerTag::Hyperactive));
        assert_eq!(fx.reasons()[0], "hyperactive_lost");
    }
}
