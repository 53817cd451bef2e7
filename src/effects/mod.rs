//! Special-effect resolvers.
//!
//! One module per stone archetype. Each resolver works on a
//! `ResolverContext` and emits its changes through the board primitives,
//! so a resolver's output is exactly the events it appended to the log.
//!
//! ## Turn-start order
//!
//! The pipeline runs the owner-scoped resolvers in a fixed order so later
//! ones see the board as earlier ones left it:
//!
//! 1. `protection::expire` (temporary protection, guard countdown, traps)
//! 2. `work::collect`
//! 3. `bombs::tick`
//! 4. `destroy_god::tick`
//! 5. `dragon::tick`
//! 6. `breeding::tick`
//! 7. `hyperactive::tick` (every marker, both owners)
//!
//! Flips made inside a phase settle their regen one-shots (`regen`) and
//! trap triggers (`trap`) before the phase ends.

pub mod bombs;
pub mod breeding;
pub mod chain;
pub mod destroy_god;
pub mod dragon;
pub mod hyperactive;
pub mod protection;
pub mod regen;
pub mod resolver;
pub mod trap;
pub mod work;

pub use resolver::ResolverContext;

use crate::core::{PlayerKey, Pos};
use crate::events::Cause;

/// Flip cells for `owner`, then settle regen one-shots and trap triggers.
///
/// Returns the cells that changed owner (regen captures excluded).
pub fn flip_and_settle(
    ctx: &mut ResolverContext<'_>,
    cells: &[Pos],
    owner: PlayerKey,
    cause: Cause,
    reason: &'static str,
) -> Vec<Pos> {
    let flipped = ctx.flip_all(cells, owner, cause, reason);
    regen::after_flips(ctx, &flipped);
    trap::check_triggers(ctx);
    flipped
}
