//! Ultimate destroy god anchors.
//!
//! Each owner turn-start the anchor destroys every unguarded enemy stone
//! around it, then counts down. At zero the anchor itself is destroyed.
//! Placing one also fires immediately, without a countdown.

use log::trace;

use super::ResolverContext;
use crate::board::{MarkerData, MarkerTag, Special};
use crate::core::{PlayerKey, Pos};
use crate::events::Cause;

/// Destroy the enemy neighbours of `anchor`. Returns how many went.
pub fn activate(ctx: &mut ResolverContext<'_>, anchor: Pos, owner: PlayerKey) -> usize {
    let enemy = Some(owner.opponent());
    let mut destroyed = 0;
    for pos in anchor.neighbors() {
        if ctx.owner(pos) == enemy && ctx.destroy_unguarded(pos, Cause::DestroyGod, "udg_destroyed") {
            destroyed += 1;
        }
    }
    trace!("destroy god at {anchor} destroyed {destroyed}");
    destroyed
}

pub fn tick(ctx: &mut ResolverContext<'_>, owner: PlayerKey) {
    for marker in ctx.cards.markers.anchors(MarkerTag::DestroyGod, owner) {
        if ctx.cards.markers.get(marker.id).is_none() {
            continue;
        }
        let Some(Special::DestroyGod { remaining_owner_turns }) = marker.special() else {
            continue;
        };
        if ctx.owner(marker.pos) != Some(owner) {
            ctx.remove_status(marker.id, Cause::DestroyGod, "anchor_lost");
            continue;
        }

        activate(ctx, marker.pos, owner);

        let left = remaining_owner_turns.saturating_sub(1);
        if left == 0 {
            ctx.destroy(marker.pos, Cause::DestroyGod, "anchor_expired");
        } else {
            ctx.cards
                .markers
                .update(marker.id, MarkerData::Special(Special::DestroyGod { remaining_owner_turns: left }));
        }
    }
}
