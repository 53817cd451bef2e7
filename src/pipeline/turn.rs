//! Turn change and the turn-start cascade.

use log::{debug, trace};

use crate::cards::{deck, CardType};
use crate::core::PlayerKey;
use crate::effects::{bombs, breeding, destroy_god, dragon, hyperactive, protection, work, ResolverContext};
use crate::events::Phase;

/// Hand the turn from `mover` to the opponent and run its turn-start.
pub fn advance(ctx: &mut ResolverContext<'_>, mover: PlayerKey) {
    if ctx.cards.armed[mover] == Some(CardType::Chain) {
        ctx.cards.armed[mover] = None;
        trace!("{mover}'s unused chain discarded");
    }

    let next = mover.opponent();
    ctx.game.current_player = next;
    ctx.cards.turn_index += 1;
    ctx.log.set_turn_index(ctx.cards.turn_index);
    debug!("turn {} begins for {next}", ctx.cards.turn_index);

    begin_turn(ctx, next);
}

/// Turn-start for `player`: counters, expiry, income, the resolver
/// cascade, then the draw.
pub fn begin_turn(ctx: &mut ResolverContext<'_>, player: PlayerKey) {
    ctx.cards.turn_count[player] += 1;
    ctx.cards.used_this_turn[player] = false;
    ctx.cards.extra_placements[player] = 0;

    ctx.log.set_phase(Phase::Expiry);
    protection::expire(ctx, player);

    ctx.log.set_phase(Phase::Work);
    work::collect(ctx, player);

    ctx.log.set_phase(Phase::Bombs);
    bombs::tick(ctx, player);

    ctx.log.set_phase(Phase::DestroyGod);
    destroy_god::tick(ctx, player);

    ctx.log.set_phase(Phase::Dragons);
    dragon::tick(ctx, player);

    ctx.log.set_phase(Phase::Breeding);
    breeding::tick(ctx, player);

    ctx.log.set_phase(Phase::Hyperactive);
    hyperactive::tick(ctx);

    ctx.log.set_phase(Phase::Action);
    deck::draw(ctx.cards, player, ctx.config);
    trace!(
        "{player} starts with {} charge, {} cards, {} markers on board",
        ctx.cards.charge[player],
        ctx.cards.hands[player].len(),
        ctx.cards.markers.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BlastShape, BombData, Special};
    use crate::core::Pos;
    use crate::effects::fixture::Fixture;
    use crate::events::EventKind;

    #[test]
    fn test_advance_updates_counters_and_draws() {
        let mut fx = Fixture::new(&["BW"]);
        fx.cards = fx.cards.clone().with_deck([CardType::Sell, CardType::Guard]);
        fx.cards.used_this_turn[PlayerKey::White] = true;
        fx.cards.armed[PlayerKey::Black] = Some(CardType::Chain);

        advance(&mut fx.ctx(), PlayerKey::Black);

        assert_eq!(fx.game.current_player, PlayerKey::White);
        assert_eq!(fx.cards.turn_index, 1);
        assert_eq!(fx.cards.turn_count[PlayerKey::White], 1);
        assert!(!fx.cards.used_this_turn[PlayerKey::White]);
        assert_eq!(fx.cards.armed[PlayerKey::Black], None);
        assert!(fx.cards.has_card(PlayerKey::White, CardType::Sell));
        assert_eq!(fx.cards.deck.len(), 1);
    }

    #[test]
    fn test_phases_run_in_order() {
        // White's bomb goes off before White's dragon, so the dragon only
        // finds (3,3) left to convert.
        let mut fx = Fixture::new(&["WB......", ".B......", "..W.....", "...B...."]);
        fx.cards.markers.set_bomb(
            Pos::new(0, 0),
            PlayerKey::White,
            BombData { remaining_turns: 1, placed_turn: 0, shape: BlastShape::Square },
        );
        fx.cards.markers.set_special(Pos::new(2, 2), PlayerKey::White, Special::Dragon { remaining_owner_turns: 3 });

        advance(&mut fx.ctx(), PlayerKey::Black);

        let phases: Vec<_> = fx.events().iter().map(|e| (e.phase, e.kind, e.pos)).collect();
        assert_eq!(
            phases,
            vec![
                (Phase::Bombs, EventKind::Destroy, Pos::new(0, 0)),
                (Phase::Bombs, EventKind::Destroy, Pos::new(0, 1)),
                (Phase::Bombs, EventKind::Destroy, Pos::new(1, 1)),
                (Phase::Dragons, EventKind::Change, Pos::new(3, 3)),
            ]
        );
        assert!(fx.events().iter().all(|e| e.turn_index == 1));
    }
}
