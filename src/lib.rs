//! # will-reversi
//!
//! A deterministic rule engine for an 8×8 stone-flipping game extended with
//! "will" cards that leave persistent special stones on the board.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: `TurnPipeline::apply` takes state by reference
//!    and returns new state plus an ordered event log. A rejected action
//!    leaves the inputs untouched.
//!
//! 2. **Determinism**: every random choice comes from a `RandomSource`
//!    keyed by `(turn_index, action_id)`, so an exported ledger replays to
//!    the same state and the same events.
//!
//! 3. **Events, not animation**: the engine only describes what happened.
//!    Grouping and pacing belong to whoever presents the events.
//!
//! ## Architecture
//!
//! - **Persistent data structures**: cheap clones via `im` keep the
//!   copy-on-write inside `apply()` affordable.
//!
//! - **Fixed phase order**: turn-start resolvers run in one order
//!   (expiry, work, bombs, destroy-god, dragons, breeding, hyperactive) and
//!   iterate their cells row-major.
//!
//! ## Modules
//!
//! - `core`: Players, positions, RNG, configuration, actions, state
//! - `board`: Grid, stone identity, markers, mutation primitives
//! - `events`: Ordered event log
//! - `rules`: Flip rules, legal actions, game end, decision-makers
//! - `cards`: Catalog, deck, usage, selection protocols, placement effects
//! - `effects`: Special-stone resolvers
//! - `pipeline`: The turn pipeline
//! - `ledger`: Action identity, persistence and replay
//! - `session`: Owned game handle

pub mod core;
pub mod board;
pub mod events;
pub mod rules;
pub mod cards;
pub mod effects;
pub mod pipeline;
pub mod ledger;
pub mod session;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionId, ActionKind, ActionRecord, CardState, EngineConfig, GameRng, GameRngState, GameState,
    PlayerKey, PlayerMap, Pos, RandomSource, SeededSource, StoneId, Target,
};

pub use crate::board::{Board, Cell, Marker, MarkerData, MarkerTag, Special};

pub use crate::events::{BoardEvent, Cause, EventKind, EventMeta, Phase};

pub use crate::rules::{legal_actions, DecisionMaker, GameResult, UniformPolicy};

pub use crate::cards::{CardKind, CardType, PendingEffect, Stage};

pub use crate::pipeline::{Applied, TurnPipeline};

pub use crate::ledger::{replay, ActionLedger, LedgerStorage, MemoryStorage, Replay};

pub use crate::session::{GameSession, SessionBuilder};

pub use crate::error::{EngineResult, LedgerError, Rejection, RejectionCode};
