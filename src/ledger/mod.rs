//! Action ledger: identity, ordering and persistence of applied actions.
//!
//! The ledger is the only place action ids come from. It hands out
//! `Action`s through `create_action`, keeps the ones the pipeline accepted
//! (`record_action`), tracks which the server has acknowledged, and
//! exports the minimal replayable form.
//!
//! ## Injected collaborators
//!
//! - `ActionIdGenerator`: id source (default `SequentialIds`, from 1)
//! - `TimeProvider`: optional timestamps (default `NoClock`)
//! - `LedgerStorage`: where entries are saved (default `MemoryStorage`)

pub mod replay;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::core::{Action, ActionId, ActionKind, ActionRecord, PlayerKey};
use crate::error::LedgerResult;

pub use replay::{replay, Replay};

/// Source of fresh action ids.
pub trait ActionIdGenerator {
    fn next_id(&mut self) -> ActionId;
}

/// Ids 1, 2, 3, ...
#[derive(Clone, Debug)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    /// Start counting at `first`.
    #[must_use]
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl ActionIdGenerator for SequentialIds {
    fn next_id(&mut self) -> ActionId {
        let id = ActionId(self.next);
        self.next += 1;
        id
    }
}

/// Source of action timestamps.
pub trait TimeProvider {
    fn now(&self) -> Option<u64>;
}

/// No timestamps at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoClock;

impl TimeProvider for NoClock {
    fn now(&self) -> Option<u64> {
        None
    }
}

/// One recorded action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub action: Action,
    pub acknowledged: bool,
}

/// Persistence adapter for ledger entries.
pub trait LedgerStorage {
    /// Persist the full current entry list.
    fn save(&mut self, entries: &[LedgerEntry]);

    /// Entries saved earlier, oldest first.
    fn load(&self) -> Vec<LedgerEntry>;
}

/// Keeps the last saved entry list in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Vec<LedgerEntry>,
    saves: usize,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `save` was called.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl LedgerStorage for MemoryStorage {
    fn save(&mut self, entries: &[LedgerEntry]) {
        self.entries = entries.to_vec();
        self.saves += 1;
    }

    fn load(&self) -> Vec<LedgerEntry> {
        self.entries.clone()
    }
}

/// Result of comparing local actions with what the server knows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Local actions the server has (now marked acknowledged).
    pub acknowledged: Vec<ActionId>,
    /// Local actions the server is missing.
    pub missing: Vec<ActionId>,
}

/// Append-only record of applied actions.
pub struct ActionLedger {
    ids: Box<dyn ActionIdGenerator>,
    clock: Box<dyn TimeProvider>,
    storage: Box<dyn LedgerStorage>,
    entries: Vec<LedgerEntry>,
    /// Oldest entries beyond this many are dropped; `None` keeps everything.
    max_history: Option<usize>,
}

impl Default for ActionLedger {
    fn default() -> Self {
        Self::new(Box::new(SequentialIds::default()), Box::new(NoClock), Box::new(MemoryStorage::new()))
    }
}

impl std::fmt::Debug for ActionLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionLedger")
            .field("entries", &self.entries.len())
            .field("max_history", &self.max_history)
            .finish()
    }
}

impl ActionLedger {
    /// Ledger over the given collaborators, starting from whatever the
    /// storage already holds.
    #[must_use]
    pub fn new(
        ids: Box<dyn ActionIdGenerator>,
        clock: Box<dyn TimeProvider>,
        storage: Box<dyn LedgerStorage>,
    ) -> Self {
        let entries = storage.load();
        Self {
            ids,
            clock,
            storage,
            entries,
            max_history: None,
        }
    }

    /// Keep at most `max` entries.
    #[must_use]
    pub fn with_max_history(mut self, max: usize) -> Self {
        self.max_history = Some(max);
        self
    }

    #[must_use]
    pub fn max_history(&self) -> Option<usize> {
        self.max_history
    }

    /// A fresh action with the next id. Not recorded until `record_action`.
    pub fn create_action(&mut self, turn_index: u32, player: PlayerKey, kind: ActionKind) -> Action {
        let mut action = Action::new(self.ids.next_id(), turn_index, player, kind);
        action.timestamp = self.clock.now();
        trace!("created {} {} for {player}", action.action_id, kind.name());
        action
    }

    /// Append an accepted action and persist.
    pub fn record_action(&mut self, action: Action) {
        self.entries.push(LedgerEntry { action, acknowledged: false });
        if let Some(max) = self.max_history {
            let excess = self.entries.len().saturating_sub(max);
            self.entries.drain(..excess);
        }
        self.storage.save(&self.entries);
    }

    /// Mark one action as known to the server.
    pub fn acknowledge(&mut self, id: ActionId) -> bool {
        match self.entries.iter_mut().find(|e| e.action.action_id == id) {
            Some(entry) => {
                entry.acknowledged = true;
                self.storage.save(&self.entries);
                true
            }
            None => false,
        }
    }

    /// Actions the server has not acknowledged yet, oldest first.
    #[must_use]
    pub fn unacknowledged(&self) -> Vec<&Action> {
        self.entries.iter().filter(|e| !e.acknowledged).map(|e| &e.action).collect()
    }

    /// Split local actions by whether the server already has them.
    pub fn reconcile_with_server(&mut self, known: &[ActionId]) -> Reconciliation {
        let mut result = Reconciliation::default();
        for entry in &mut self.entries {
            let id = entry.action.action_id;
            if known.contains(&id) {
                entry.acknowledged = true;
                result.acknowledged.push(id);
            } else {
                result.missing.push(id);
            }
        }
        self.storage.save(&self.entries);
        debug!(
            "reconciled ledger: {} acknowledged, {} missing",
            result.acknowledged.len(),
            result.missing.len()
        );
        result
    }

    /// Minimal replayable records, oldest first.
    #[must_use]
    pub fn export_actions(&self) -> Vec<ActionRecord> {
        self.entries.iter().map(|e| e.action.record()).collect()
    }

    /// The replay format: a JSON array of action records.
    pub fn export_json(&self) -> LedgerResult<String> {
        Ok(serde_json::to_string(&self.export_actions())?)
    }

    /// Parse the replay format.
    pub fn import_json(json: &str) -> LedgerResult<Vec<ActionRecord>> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn last_action(&self) -> Option<&Action> {
        self.entries.last().map(|e| &e.action)
    }

    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
