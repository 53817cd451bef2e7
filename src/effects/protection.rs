//! Protection expiry at the turn change.
//!
//! Runs for the player whose turn is starting, before anything else in the
//! turn-start cascade:
//! - temporary protection placed on their previous turn ends
//! - guard countdowns tick, the guard lifting at zero
//! - untriggered traps expire (see `trap::expire`)

use log::trace;

use super::{trap, ResolverContext};
use crate::board::{MarkerData, MarkerTag, Special};
use crate::core::PlayerKey;
use crate::events::Cause;

pub fn expire(ctx: &mut ResolverContext<'_>, owner: PlayerKey) {
    for marker in ctx.cards.markers.anchors(MarkerTag::Protected, owner) {
        ctx.remove_status(marker.id, Cause::Protection, "protection_expired");
    }

    for marker in ctx.cards.markers.anchors(MarkerTag::Guard, owner) {
        let Some(Special::Guard { remaining_owner_turns }) = marker.special() else {
            continue;
        };
        let left = remaining_owner_turns.saturating_sub(1);
        if left == 0 {
            ctx.remove_status(marker.id, Cause::Guard, "guard_expired");
        } else {
            ctx.cards
                .markers
                .update(marker.id, MarkerData::Special(Special::Guard { remaining_owner_turns: left }));
            trace!("guard at {} has {left} turns left", marker.pos);
        }
    }

    trap::expire(ctx, owner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pos;
    use crate::effects::fixture::Fixture;

    #[test]
    fn test_temporary_protection_expires_for_owner_only() {
        let mut fx = Fixture::new(&["BW......"]);
        fx.cards.markers.set_special(Pos::new(0, 0), PlayerKey::Black, Special::Protected);
        fx.cards.markers.set_special(Pos::new(0, 1), PlayerKey::White, Special::Protected);

        expire(&mut fx.ctx(), PlayerKey::Black);

        assert!(!fx.cards.markers.has(Pos::new(0, 0), MarkerTag::Protected));
        assert!(fx.cards.markers.has(Pos::new(0, 1), MarkerTag::Protected));
    }

    #[test]
    fn test_perma_protection_never_expires() {
        let mut fx = Fixture::new(&["B......."]);
        fx.cards.markers.set_special(Pos::new(0, 0), PlayerKey::Black, Special::PermaProtected);
        for _ in 0..5 {
            expire(&mut fx.ctx(), PlayerKey::Black);
        }
        assert!(fx.cards.markers.has(Pos::new(0, 0), MarkerTag::PermaProtected));
    }

    #[test]
    fn test_guard_lasts_three_owner_turns() {
        let mut fx = Fixture::new(&["B......."]);
        let pos = Pos::new(0, 0);
        fx.cards.markers.set_special(pos, PlayerKey::Black, Special::Guard { remaining_owner_turns: 3 });

        expire(&mut fx.ctx(), PlayerKey::Black);
        expire(&mut fx.ctx(), PlayerKey::Black);
        assert!(fx.cards.markers.has(pos, MarkerTag::Guard));

        expire(&mut fx.ctx(), PlayerKey::Black);
        assert!(!fx.cards.markers.has(pos, MarkerTag::Guard));
        assert_eq!(fx.reasons(), vec!["guard_expired"]);
    }
}
