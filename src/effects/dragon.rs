//! Ultimate reverse dragon anchors.
//!
//! On each owner turn-start a dragon counts down, then converts every
//! enemy stone around it that is not flip-protected. The conversion is a
//! flip: regen stones among the converted revert and capture within the
//! same phase. When the countdown reaches zero the anchor is destroyed
//! after its final conversion. Placing a dragon converts immediately,
//! without a countdown.

use log::trace;

use super::{flip_and_settle, ResolverContext};
use crate::board::{MarkerData, MarkerTag, Special};
use crate::core::{PlayerKey, Pos};
use crate::events::Cause;

/// Convert the enemy neighbours of `anchor`. Returns the converted cells.
pub fn activate(ctx: &mut ResolverContext<'_>, anchor: Pos, owner: PlayerKey, reason: &'static str) -> Vec<Pos> {
    let enemy = Some(owner.opponent());
    let protection = ctx.protection();
    let targets: Vec<Pos> = anchor
        .neighbors()
        .into_iter()
        .filter(|&pos| ctx.owner(pos) == enemy && !protection.contains(pos))
        .collect();

    let converted = flip_and_settle(ctx, &targets, owner, Cause::Dragon, reason);
    ctx.add_charge(owner, converted.len() as u32);
    trace!("dragon at {anchor} converted {}", converted.len());
    converted
}

pub fn tick(ctx: &mut ResolverContext<'_>, owner: PlayerKey) {
    for marker in ctx.cards.markers.anchors(MarkerTag::Dragon, owner) {
        if ctx.cards.markers.get(marker.id).is_none() {
            continue;
        }
        let Some(Special::Dragon { remaining_owner_turns }) = marker.special() else {
            continue;
        };
        if ctx.owner(marker.pos) != Some(owner) {
            ctx.remove_status(marker.id, Cause::Dragon, "anchor_lost");
            continue;
        }

        let left = remaining_owner_turns.saturating_sub(1);
        if left > 0 {
            ctx.cards
                .markers
                .update(marker.id, MarkerData::Special(Special::Dragon { remaining_owner_turns: left }));
        }

        activate(ctx, marker.pos, owner, "dragon_convert");

        if left == 0 {
            ctx.destroy(marker.pos, Cause::Dragon, "anchor_expired");
        }
    }
}
