//! Actions submitted to the turn pipeline.
//!
//! An action is a verb (`ActionKind`) plus the identity the ledger assigns
//! to it: a monotonically increasing `ActionId` and the `turn_index` it was
//! created for. Callers never pick ids themselves; they go through
//! `ActionLedger::create_action`.
//!
//! ## Wire shape
//!
//! ```
//! use will_reversi::core::{Action, ActionId, ActionKind, PlayerKey, Pos};
//!
//! let action = Action::new(ActionId(1), 0, PlayerKey::Black, ActionKind::Place { pos: Pos::new(2, 3) });
//! let json = serde_json::to_string(&action.record()).unwrap();
//! assert!(json.contains("\"type\":\"place\""));
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerKey;
use super::position::Pos;
use crate::cards::CardType;

/// Ledger-assigned action identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub u64);

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "local-{}", self.0)
    }
}

/// What a selection points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// A board cell (destroy, swap, bomb placement, ...).
    Cell(Pos),
    /// A card (sell from own hand, heaven offer, condemn from opponent hand).
    Card(CardType),
}

/// The verb of an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    /// Place a stone.
    Place { pos: Pos },
    /// Pass the turn. Only legal with no move and no usable card.
    Pass,
    /// Play a card from hand.
    UseCard { card: CardType },
    /// Answer the pending target selection.
    Select { target: Target },
    /// Abandon a cancellable pending selection.
    Cancel,
}

impl ActionKind {
    /// Short lowercase name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            ActionKind::Place { .. } => "place",
            ActionKind::Pass => "pass",
            ActionKind::UseCard { .. } => "use_card",
            ActionKind::Select { .. } => "select",
            ActionKind::Cancel => "cancel",
        }
    }
}

/// A complete action as created and recorded by the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub action_id: ActionId,
    pub turn_index: u32,
    pub player: PlayerKey,
    #[serde(flatten)]
    pub kind: ActionKind,
    /// Wall-clock time from the ledger's time provider, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

impl Action {
    #[must_use]
    pub fn new(action_id: ActionId, turn_index: u32, player: PlayerKey, kind: ActionKind) -> Self {
        Self {
            action_id,
            turn_index,
            player,
            kind,
            timestamp: None,
        }
    }

    /// Attach a timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Minimal replayable form of this action.
    #[must_use]
    pub fn record(&self) -> ActionRecord {
        ActionRecord {
            action_id: self.action_id,
            turn_index: self.turn_index,
            player: self.player,
            kind: self.kind,
        }
    }
}

/// The replay format: one action stripped of timestamps and ack flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionRecord {
    pub action_id: ActionId,
    pub turn_index: u32,
    pub player: PlayerKey,
    #[serde(flatten)]
    pub kind: ActionKind,
}

impl ActionRecord {
    /// Rebuild a full action (without timestamp) from the record.
    #[must_use]
    pub fn to_action(&self) -> Action {
        Action::new(self.action_id, self.turn_index, self.player, self.kind)
    }
}
