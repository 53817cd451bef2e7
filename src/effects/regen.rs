//! Regen one-shots.
//!
//! A regen stone that ends up held by the other player reverts to its
//! owner, then captures from its cell in every direction. Each trigger
//! spends one charge of `remaining`; at zero the marker is consumed and
//! the stone flips like any other from then on. Capture flips do not
//! trigger further regen stones.

use log::trace;

use super::ResolverContext;
use crate::board::{MarkerData, Special};
use crate::core::Pos;
use crate::events::Cause;
use crate::rules::capture_flips_from;

/// Settle regen stones among freshly flipped cells.
///
/// Returns how many stones the regen captures flipped.
pub fn after_flips(ctx: &mut ResolverContext<'_>, flipped: &[Pos]) -> usize {
    let mut captured = 0;
    for &pos in flipped {
        let Some(marker) = ctx.cards.markers.special_at(pos).copied() else {
            continue;
        };
        let Some(Special::Regen { remaining }) = marker.special() else {
            continue;
        };
        if remaining == 0 || ctx.owner(pos) == Some(marker.owner) {
            continue;
        }

        let owner = marker.owner;
        let left = remaining - 1;
        if left > 0 {
            ctx.cards
                .markers
                .update(marker.id, MarkerData::Special(Special::Regen { remaining: left }));
        }

        ctx.change_owner(pos, owner, Cause::Regen, "regen_triggered");

        let captures = capture_flips_from(&ctx.game.board, pos, owner, &ctx.protection());
        let flipped_back = ctx.flip_all(&captures, owner, Cause::Regen, "regen_capture_flip");
        ctx.add_charge(owner, flipped_back.len() as u32);
        captured += flipped_back.len();
        trace!("regen at {pos} reverted to {owner}, captured {}", flipped_back.len());

        if left == 0 {
            ctx.remove_status(marker.id, Cause::Regen, "regen_consumed");
        }
    }
    captured
}
