//! Chain flips.
//!
//! After a placement with CHAIN armed, the engine looks at every stone the
//! placement just flipped and, from each, at every direction. The longest
//! bracketed enemy line among those candidates is flipped as well, ties
//! broken by the action RNG. The next step searches from the cells that
//! step flipped, up to `chain_steps` steps.

use log::trace;
use smallvec::SmallVec;

use super::{regen, ResolverContext};
use crate::core::{PlayerKey, Pos, DIRECTIONS};
use crate::events::Cause;
use crate::rules::directional_flips;

/// Best line reachable from `frontier`, or `None` if nothing brackets.
fn pick_line(ctx: &mut ResolverContext<'_>, frontier: &[Pos], player: PlayerKey) -> Option<SmallVec<[Pos; 6]>> {
    let protection = ctx.protection();
    let mut seen: SmallVec<[Pos; 16]> = SmallVec::new();
    let mut best: Vec<SmallVec<[Pos; 6]>> = Vec::new();

    for &origin in frontier {
        if seen.contains(&origin) || ctx.owner(origin) != Some(player) {
            continue;
        }
        seen.push(origin);

        for &dir in DIRECTIONS.iter() {
            let line = directional_flips(&ctx.game.board, origin, player, dir, &protection);
            let Some(current) = best.first().map(|l| l.len()) else {
                if !line.is_empty() {
                    best.push(line);
                }
                continue;
            };
            if line.len() > current {
                best.clear();
                best.push(line);
            } else if !line.is_empty() && line.len() == current {
                best.push(line);
            }
        }
    }

    if best.is_empty() {
        return None;
    }
    let index = ctx.rng.gen_range_usize(0..best.len());
    Some(best.swap_remove(index))
}

/// Run the chain from `primary` flips. Returns every chain-flipped cell.
pub fn resolve(ctx: &mut ResolverContext<'_>, primary: &[Pos], player: PlayerKey) -> Vec<Pos> {
    let mut frontier: Vec<Pos> = primary.to_vec();
    let mut flipped = Vec::new();

    for step in 0..ctx.config.chain_steps {
        let Some(line) = pick_line(ctx, &frontier, player) else {
            break;
        };
        let changed = ctx.flip_all(&line, player, Cause::Chain, "chain_flip");
        regen::after_flips(ctx, &changed);
        trace!("chain step {step} flipped {}", changed.len());

        if changed.is_empty() {
            break;
        }
        flipped.extend_from_slice(&changed);
        frontier = changed;
    }
    flipped
}
