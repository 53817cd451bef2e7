//! Time bombs and cross bombs.
//!
//! Only the owner's bombs tick, once per owner turn-start, skipping the
//! turn index they were placed on. At zero the bomb detonates: every
//! unguarded stone in its blast (3×3 square or plus shape, centre
//! included) is destroyed, and the bomb marker goes with the centre.

use log::trace;

use super::ResolverContext;
use crate::board::{BlastShape, MarkerData, MarkerTag};
use crate::core::{PlayerKey, Pos};
use crate::events::{Cause, EventMeta};

/// Tick `owner`'s bombs. Returns the number of stones destroyed.
pub fn tick(ctx: &mut ResolverContext<'_>, owner: PlayerKey) -> usize {
    let turn_index = ctx.cards.turn_index;
    let mut destroyed = 0;

    for marker in ctx.cards.markers.anchors(MarkerTag::Bomb, owner) {
        // An earlier blast this phase may already have removed it.
        if ctx.cards.markers.get(marker.id).is_none() {
            continue;
        }
        let Some(mut bomb) = marker.bomb() else {
            continue;
        };
        if bomb.placed_turn == turn_index {
            continue;
        }

        bomb.remaining_turns = bomb.remaining_turns.saturating_sub(1);
        if bomb.remaining_turns > 0 {
            ctx.cards.markers.update(marker.id, MarkerData::Bomb(bomb));
            trace!("bomb at {} ticks, {} left", marker.pos, bomb.remaining_turns);
            continue;
        }

        destroyed += detonate(ctx, marker.pos, bomb.shape);
        if ctx.remove_status(marker.id, cause_for(bomb.shape), "bomb_explosion") {
            ctx.log.annotate_last(EventMeta::Blast { center: marker.pos, shape: bomb.shape });
        }
    }
    destroyed
}

fn cause_for(shape: BlastShape) -> Cause {
    match shape {
        BlastShape::Square => Cause::TimeBomb,
        BlastShape::Cross => Cause::CrossBomb,
    }
}

/// Destroy the blast area around `center`, sparing guarded stones.
pub fn detonate(ctx: &mut ResolverContext<'_>, center: Pos, shape: BlastShape) -> usize {
    let cause = cause_for(shape);
    let meta = EventMeta::Blast { center, shape };
    let mut destroyed = 0;
    for pos in shape.cells(center) {
        if ctx.destroy_unguarded(pos, cause, "bomb_explosion") {
            ctx.log.annotate_last(meta);
            destroyed += 1;
        }
    }
    trace!("bomb at {center} destroyed {destroyed} stones");
    destroyed
}
