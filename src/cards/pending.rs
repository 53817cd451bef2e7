//! In-progress target selections.
//!
//! A targeted card opens a `PendingEffect` for its player. While it is set,
//! the pipeline accepts only a matching `select` (or, for a few cards,
//! `cancel`). Each accepted selection bumps `selected_count`; the effect is
//! cleared once the card's selections are used up.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::catalog::CardType;
use crate::core::{EngineConfig, Pos};

/// What the pending effect is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    /// A board cell.
    SelectTarget,
    /// A card from `offers`, the player's hand or the opponent's hand.
    SelectCard,
}

/// One player's open selection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingEffect {
    pub card: CardType,
    pub stage: Stage,
    pub selected_count: u8,
    pub max_selections: u8,
    /// Cards on offer (heaven blessing).
    pub offers: SmallVec<[CardType; 5]>,
    /// First pick of a two-cell selection (position swap).
    pub first_target: Option<Pos>,
}

impl PendingEffect {
    /// The pending effect a targeted card opens.
    #[must_use]
    pub fn for_card(card: CardType, config: &EngineConfig) -> Self {
        let (stage, max_selections) = match card {
            CardType::Sell | CardType::HeavenBlessing | CardType::Condemn => (Stage::SelectCard, 1),
            CardType::Sacrifice => (Stage::SelectTarget, config.sacrifice_max_selections),
            CardType::PositionSwap => (Stage::SelectTarget, 2),
            _ => (Stage::SelectTarget, 1),
        };
        Self {
            card,
            stage,
            selected_count: 0,
            max_selections,
            offers: SmallVec::new(),
            first_target: None,
        }
    }

    #[must_use]
    pub fn with_offers(mut self, offers: impl IntoIterator<Item = CardType>) -> Self {
        self.offers = offers.into_iter().collect();
        self
    }

    /// Selections still allowed.
    #[must_use]
    pub fn remaining(&self) -> u8 {
        self.max_selections.saturating_sub(self.selected_count)
    }

    /// Whether `cancel` is accepted for this effect.
    #[must_use]
    pub fn is_cancellable(&self) -> bool {
        matches!(self.card, CardType::Destroy | CardType::Inherit | CardType::Sacrifice)
    }
}
