//! Building the shared deck and drawing from it.

use im::Vector;
use log::trace;

use super::catalog::CardType;
use crate::core::{CardState, EngineConfig, GameRng, PlayerKey};

/// Build a shuffled deck: one of every card type, the rest drawn uniformly
/// from the catalog, truncated to `config.deck_size`.
#[must_use]
pub fn build_deck(config: &EngineConfig, rng: &mut GameRng) -> Vector<CardType> {
    let all: Vec<CardType> = CardType::all().collect();
    let mut cards = all.clone();
    while cards.len() < config.deck_size {
        if let Some(&card) = rng.choose(&all) {
            cards.push(card);
        }
    }
    rng.shuffle(&mut cards);
    cards.truncate(config.deck_size);
    cards.into_iter().collect()
}

/// Draw the top card into a player's hand if there is room.
///
/// The discard pile is never reshuffled back in.
pub fn draw(cards: &mut CardState, player: PlayerKey, config: &EngineConfig) -> Option<CardType> {
    if cards.hands[player].len() >= config.hand_limit {
        return None;
    }
    let card = cards.deck.pop_front()?;
    cards.hands[player].push_back(card);
    trace!("{player} drew {card}, {} left in deck", cards.deck.len());
    Some(card)
}

/// Move a card into a player's hand, or onto the bottom of the deck when
/// the hand is full.
pub fn give_or_return(cards: &mut CardState, player: PlayerKey, card: CardType, config: &EngineConfig) {
    if cards.hands[player].len() < config.hand_limit {
        cards.hands[player].push_back(card);
    } else {
        cards.deck.push_back(card);
    }
}
