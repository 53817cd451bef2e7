//! Work anchors: escalating charge income.
//!
//! On each of its owner's turn-starts a work stone pays `1 << stage`
//! charge (1, 2, 4, 8, 16) and advances a stage. After the fifth payment
//! the marker retires. A work stone no longer held by its owner ends the
//! chain without paying.

use log::trace;

use super::ResolverContext;
use crate::board::{MarkerData, MarkerTag, Special};
use crate::core::PlayerKey;
use crate::events::Cause;

/// Stages a work stone pays out before retiring.
pub const WORK_STAGES: u8 = 5;

/// Pay out `owner`'s work stones. Returns the total charge granted.
pub fn collect(ctx: &mut ResolverContext<'_>, owner: PlayerKey) -> u32 {
    let mut total = 0;
    for marker in ctx.cards.markers.anchors(MarkerTag::Work, owner) {
        let Some(Special::Work { stage }) = marker.special() else {
            continue;
        };
        if ctx.owner(marker.pos) != Some(owner) {
            ctx.remove_status(marker.id, Cause::Work, "work_lost");
            continue;
        }

        let income = (1u32 << stage.min(WORK_STAGES)).min(ctx.config.charge_cap);
        ctx.add_charge(owner, income);
        total += income;
        trace!("work at {} paid {income} to {owner}", marker.pos);

        let next = stage + 1;
        if next >= WORK_STAGES {
            ctx.remove_status(marker.id, Cause::Work, "work_completed");
        } else {
            ctx.cards.markers.update(marker.id, MarkerData::Special(Special::Work { stage: next }));
        }
    }
    total
}
