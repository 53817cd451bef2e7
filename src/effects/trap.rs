//! Hidden traps.
//!
//! A trap fires once its stone is held by the opponent, however that came
//! about (flip, conversion, swap). The trap owner takes all of the holder's
//! charge and up to `trap_steal_count` cards from the front of their hand.
//! A trap that is still untriggered when its owner's next turn begins
//! expires and takes its stone with it.

use log::trace;

use super::ResolverContext;
use crate::board::MarkerTag;
use crate::cards::deck::give_or_return;
use crate::core::PlayerKey;
use crate::events::Cause;

/// Fire every trap whose stone is now held by the opponent.
///
/// Returns the number of traps that fired.
pub fn check_triggers(ctx: &mut ResolverContext<'_>) -> usize {
    let mut fired = 0;
    for marker in ctx.cards.markers.with_tag(MarkerTag::Trap) {
        let Some(holder) = ctx.owner(marker.pos) else {
            continue;
        };
        if holder == marker.owner {
            continue;
        }
        let owner = marker.owner;

        let stolen = std::mem::take(&mut ctx.cards.charge[holder]);
        ctx.add_charge(owner, stolen);

        let count = ctx.config.trap_steal_count.min(ctx.cards.hands[holder].len());
        for _ in 0..count {
            if let Some(card) = ctx.cards.hands[holder].pop_front() {
                give_or_return(ctx.cards, owner, card, ctx.config);
            }
        }

        trace!("trap at {} fired: {owner} took {stolen} charge and {count} cards from {holder}", marker.pos);
        ctx.remove_status(marker.id, Cause::Trap, "trap_triggered");
        fired += 1;
    }
    fired
}

/// Expire `owner`'s untriggered traps, destroying their stones.
pub fn expire(ctx: &mut ResolverContext<'_>, owner: PlayerKey) {
    for marker in ctx.cards.markers.anchors(MarkerTag::Trap, owner) {
        if ctx.owner(marker.pos) == Some(owner) {
            ctx.destroy(marker.pos, Cause::Trap, "trap_expired");
        } else {
            ctx.remove_status(marker.id, Cause::Trap, "trap_expired");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Special;
    use crate::cards::CardType;
    use crate::core::Pos;
    use crate::effects::fixture::Fixture;

    fn trapped() -> Fixture {
        let mut fx = Fixture::new(&["W......."]);
        fx.cards.markers.set_special(Pos::new(0, 0), PlayerKey::Black, Special::Trap);
        fx.cards.charge[PlayerKey::White] = 12;
        fx.cards.charge[PlayerKey::Black] = 25;
        fx.cards.hands[PlayerKey::White] =
            [CardType::Chain, CardType::Regen, CardType::Guard, CardType::Sell].into_iter().collect();
        fx.cards.hands[PlayerKey::Black] = [CardType::Work, CardType::Trap, CardType::Tempt].into_iter().collect();
        fx
    }

    #[test]
    fn test_trap_steals_charge_and_cards() {
        let mut fx = trapped();
        assert_eq!(check_triggers(&mut fx.ctx()), 1);

        assert_eq!(fx.cards.charge[PlayerKey::White], 0);
        assert_eq!(fx.cards.charge[PlayerKey::Black], 30);
        assert_eq!(fx.cards.hands[PlayerKey::White].len(), 1);
        assert_eq!(fx.cards.hands[PlayerKey::White][0], CardType::Sell);
        // Black had room for two of the three stolen cards.
        assert_eq!(fx.cards.hands[PlayerKey::Black].len(), 5);
        assert_eq!(fx.cards.deck.back(), Some(&CardType::Guard));
        assert!(fx.cards.markers.is_empty());
    }

    #[test]
    fn test_trap_on_own_stone_stays_hidden() {
        let mut fx = Fixture::new(&["B......."]);
        fx.cards.markers.set_special(Pos::new(0, 0), PlayerKey::Black, Special::Trap);
        assert_eq!(check_triggers(&mut fx.ctx()), 0);
        assert_eq!(fx.cards.markers.len(), 1);
    }

    #[test]
    fn test_untriggered_trap_expires_with_stone() {
        let mut fx = Fixture::new(&["B......."]);
        fx.cards.markers.set_special(Pos::new(0, 0), PlayerKey::Black, Special::Trap);

        expire(&mut fx.ctx(), PlayerKey::White);
        assert_eq!(fx.cards.markers.len(), 1);

        expire(&mut fx.ctx(), PlayerKey::Black);
        assert!(fx.game.board.is_empty_at(Pos::new(0, 0)));
        assert!(fx.cards.markers.is_empty());
        assert_eq!(fx.reasons(), vec!["trap_expired"]);
    }
}
