//! The two state values threaded through every `apply()` call.
//!
//! ## GameState
//!
//! The board and turn bookkeeping visible to both players:
//! - Grid and stone identities
//! - Current player
//! - Consecutive passes and game-over flag
//!
//! ## CardState
//!
//! Everything the will cards add on top of plain stone-flipping:
//! - Shared deck and discard, per-player hands
//! - Charge, turn counters, the used-this-turn flag
//! - Pending selections and armed placement effects
//! - The marker store (special stones and bombs)
//!
//! Both use `im` persistent vectors, so the pipeline clones them at the top
//! of `apply()` and only returns the clone on success.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::{PlayerKey, PlayerMap};
use crate::board::{Board, MarkerStore};
use crate::cards::{CardType, PendingEffect};

/// Board-level game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,

    /// Player whose turn it is.
    pub current_player: PlayerKey,

    /// Passes in a row; two end the game.
    pub consecutive_passes: u8,

    pub game_over: bool,
}

impl GameState {
    /// Standard opening position, Black to move.
    #[must_use]
    pub fn new() -> Self {
        Self::with_board(Board::initial())
    }

    /// Start from an arbitrary board, Black to move.
    #[must_use]
    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            current_player: PlayerKey::Black,
            consecutive_passes: 0,
            game_over: false,
        }
    }

    /// Set the player to move.
    #[must_use]
    pub fn with_current_player(mut self, player: PlayerKey) -> Self {
        self.current_player = player;
        self
    }

    /// Compact binary snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Restore a binary snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Card-level game state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardState {
    /// Shared draw pile; the front is the top.
    pub deck: Vector<CardType>,

    /// Shared discard pile.
    pub discard: Vector<CardType>,

    pub hands: PlayerMap<Vector<CardType>>,

    /// Currency spent on cards ("charge").
    pub charge: PlayerMap<u32>,

    /// Turns each player has started.
    pub turn_count: PlayerMap<u32>,

    /// Global turn counter, incremented on every turn change.
    pub turn_index: u32,

    /// Whether the player has played a card this turn.
    pub used_this_turn: PlayerMap<bool>,

    /// In-progress target selection, if any.
    pub pending: PlayerMap<Option<PendingEffect>>,

    /// Card effect waiting for the player's next placement.
    pub armed: PlayerMap<Option<CardType>>,

    /// Placements left this turn before the turn changes.
    pub extra_placements: PlayerMap<u8>,

    pub markers: MarkerStore,
}

impl CardState {
    /// Empty card state: no deck, no hands, no markers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given shared deck.
    #[must_use]
    pub fn with_deck(mut self, deck: impl IntoIterator<Item = CardType>) -> Self {
        self.deck = deck.into_iter().collect();
        self
    }

    /// Give a player a hand.
    #[must_use]
    pub fn with_hand(mut self, player: PlayerKey, hand: impl IntoIterator<Item = CardType>) -> Self {
        self.hands[player] = hand.into_iter().collect();
        self
    }

    /// Give a player some charge.
    #[must_use]
    pub fn with_charge(mut self, player: PlayerKey, charge: u32) -> Self {
        self.charge[player] = charge;
        self
    }

    /// Whether a player holds a card.
    #[must_use]
    pub fn has_card(&self, player: PlayerKey, card: CardType) -> bool {
        self.hands[player].contains(&card)
    }

    /// Remove the first copy of a card from a player's hand.
    pub fn take_from_hand(&mut self, player: PlayerKey, card: CardType) -> bool {
        match self.hands[player].index_of(&card) {
            Some(index) => {
                self.hands[player].remove(index);
                true
            }
            None => false,
        }
    }

    /// Compact binary snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Restore a binary snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}
