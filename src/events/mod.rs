//! The ordered event log produced by one `apply()` call.
//!
//! Every board mutation and every marker change is recorded as a
//! `BoardEvent`. The log stamps each event with the action it belongs to,
//! the turn index, the phase that produced it and a `ply_index` that
//! strictly increases within one call. The core never animates anything;
//! a presentation layer groups events by phase and plays them back at its
//! own pace.
//!
//! ## Example
//!
//! ```
//! use will_reversi::core::{ActionId, Pos};
//! use will_reversi::events::{Cause, EventKind, EventLog};
//!
//! let mut log = EventLog::new(ActionId(1), 0);
//! log.emit(EventKind::Spawn, Pos::new(2, 3), Cause::Place, "standard_place");
//! log.emit(EventKind::Change, Pos::new(3, 3), Cause::Flip, "standard_flip");
//!
//! let events = log.into_events();
//! assert_eq!(events[0].ply_index, 0);
//! assert_eq!(events[1].ply_index, 1);
//! ```

use serde::Serialize;

use crate::board::{BlastShape, MarkerTag};
use crate::core::{ActionId, PlayerKey, Pos, StoneId};

/// What happened to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Spawn,
    Destroy,
    Change,
    Move,
    StatusApplied,
    StatusRemoved,
}

/// The rule that produced an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cause {
    Place,
    Flip,
    Chain,
    Regen,
    TimeBomb,
    CrossBomb,
    #[serde(rename = "ULTIMATE_DESTROY_GOD")]
    DestroyGod,
    Dragon,
    Breeding,
    Hyperactive,
    Protection,
    Guard,
    Trap,
    Work,
    Destroy,
    Swap,
    PositionSwap,
    Sacrifice,
    StrongWind,
    Tempt,
    Inherit,
    GoldStone,
    SilverStone,
}

/// Which stage of the action produced an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The submitted action itself (placement, card, selection).
    #[default]
    Action,
    /// Protection, guard and trap expiry at the turn change.
    Expiry,
    Work,
    Bombs,
    DestroyGod,
    Dragons,
    Breeding,
    Hyperactive,
}

/// Extra detail attached to an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventMeta {
    /// The stone went in a bomb blast.
    Blast { center: Pos, shape: BlastShape },
}

/// One semantic event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BoardEvent {
    pub kind: EventKind,
    pub pos: Pos,
    /// Source cell of a `MOVE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Pos>,
    pub stone_id: Option<StoneId>,
    pub owner_before: Option<PlayerKey>,
    pub owner_after: Option<PlayerKey>,
    pub cause: Cause,
    pub reason: &'static str,
    /// Marker involved in a status event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MarkerTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<EventMeta>,
    pub phase: Phase,
    pub action_id: ActionId,
    pub turn_index: u32,
    pub ply_index: u32,
}

/// Append-only event buffer for one `apply()` call.
#[derive(Clone, Debug)]
pub struct EventLog {
    action_id: ActionId,
    turn_index: u32,
    phase: Phase,
    next_ply: u32,
    events: Vec<BoardEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new(action_id: ActionId, turn_index: u32) -> Self {
        Self {
            action_id,
            turn_index,
            phase: Phase::Action,
            next_ply: 0,
            events: Vec::new(),
        }
    }

    /// Set the phase stamped on subsequent events.
    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Set the turn index stamped on subsequent events.
    pub fn set_turn_index(&mut self, turn_index: u32) {
        self.turn_index = turn_index;
    }

    /// Append an event and return it for the caller to fill in.
    pub fn emit(&mut self, kind: EventKind, pos: Pos, cause: Cause, reason: &'static str) -> &mut BoardEvent {
        let ply_index = self.next_ply;
        self.next_ply += 1;
        self.events.push(BoardEvent {
            kind,
            pos,
            from: None,
            stone_id: None,
            owner_before: None,
            owner_after: None,
            cause,
            reason,
            status: None,
            meta: None,
            phase: self.phase,
            action_id: self.action_id,
            turn_index: self.turn_index,
            ply_index,
        });
        let last = self.events.len() - 1;
        &mut self.events[last]
    }

    /// Attach metadata to the most recent event.
    pub fn annotate_last(&mut self, meta: EventMeta) {
        if let Some(event) = self.events.last_mut() {
            event.meta = Some(meta);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn events(&self) -> &[BoardEvent] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<BoardEvent> {
        self.events
    }
}
