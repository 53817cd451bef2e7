//! Breeding anchors.
//!
//! Each owner turn-start a breeder counts down, spawns one stone on a
//! random empty neighbour and resolves that spawn like a placement: every
//! enemy line the new stone brackets is flipped. At zero the anchor is
//! destroyed. Placing a breeder spawns once immediately.

use log::trace;

use super::{flip_and_settle, ResolverContext};
use crate::board::{MarkerData, MarkerTag, Special};
use crate::core::{PlayerKey, Pos};
use crate::events::Cause;
use crate::rules::flips_for;

/// Spawn next to `anchor` and flip what the new stone brackets.
///
/// Returns the spawn cell, or `None` when the anchor is boxed in.
pub fn activate(ctx: &mut ResolverContext<'_>, anchor: Pos, owner: PlayerKey) -> Option<Pos> {
    let empties: Vec<Pos> = anchor.neighbors().into_iter().filter(|&p| ctx.is_empty(p)).collect();
    let target = *ctx.rng.choose(&empties)?;

    let flips = flips_for(&ctx.game.board, target, owner, &ctx.protection());
    ctx.spawn(target, owner, Cause::Breeding, "breeding_spawn")?;
    let flipped = flip_and_settle(ctx, &flips, owner, Cause::Breeding, "breeding_flip");
    ctx.add_charge(owner, flipped.len() as u32);
    trace!("breeder at {anchor} spawned at {target}, flipped {}", flipped.len());
    Some(target)
}

pub fn tick(ctx: &mut ResolverContext<'_>, owner: PlayerKey) {
    for marker in ctx.cards.markers.anchors(MarkerTag::Breeding, owner) {
        if ctx.cards.markers.get(marker.id).is_none() {
            continue;
        }
        let Some(Special::Breeding { remaining_owner_turns }) = marker.special() else {
            continue;
        };
        if ctx.owner(marker.pos) != Some(owner) {
            ctx.remove_status(marker.id, Cause::Breeding, "anchor_lost");
            continue;
        }

        let left = remaining_owner_turns.saturating_sub(1);
        if left > 0 {
            ctx.cards
                .markers
                .update(marker.id, MarkerData::Special(Special::Breeding { remaining_owner_turns: left }));
        }

        activate(ctx, marker.pos, owner);

        if left == 0 {
            ctx.destroy(marker.pos, Cause::Breeding, "anchor_expired");
        }
    }
}
