//! Board mutation primitives.
//!
//! `spawn`, `destroy`, `change_owner` and `move_stone` are the only code
//! that writes to a `Board` after construction. Each is a no-op when its
//! precondition does not hold, so repeating an identical call changes
//! nothing and emits nothing. None of them know about cards: guard,
//! protection and trap rules are applied by the callers.

use crate::core::{PlayerKey, Pos, StoneId};
use crate::events::{Cause, EventKind, EventLog};

use super::{Board, MarkerStore};

/// Result of `move_stone`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    SourceEmpty,
    DestinationOccupied,
}

impl MoveOutcome {
    #[must_use]
    pub const fn moved(self) -> bool {
        matches!(self, MoveOutcome::Moved)
    }
}

/// Put a new stone on an empty cell.
///
/// Returns the new stone's id, or `None` (and no event) if the cell is
/// occupied.
pub fn spawn(
    board: &mut Board,
    log: &mut EventLog,
    pos: Pos,
    owner: PlayerKey,
    cause: Cause,
    reason: &'static str,
) -> Option<StoneId> {
    if !board.is_empty_at(pos) {
        return None;
    }
    let id = board.put(pos, owner);
    let event = log.emit(EventKind::Spawn, pos, cause, reason);
    event.stone_id = Some(id);
    event.owner_after = Some(owner);
    Some(id)
}

/// Remove the stone on a cell together with every marker on it.
///
/// Returns `false` (and emits nothing) if the cell is empty.
pub fn destroy(
    board: &mut Board,
    markers: &mut MarkerStore,
    log: &mut EventLog,
    pos: Pos,
    cause: Cause,
    reason: &'static str,
) -> bool {
    let Some(owner) = board.owner(pos) else {
        return false;
    };
    let id = board.stone_id(pos);
    board.clear(pos);
    markers.clear_cell(pos);
    let event = log.emit(EventKind::Destroy, pos, cause, reason);
    event.stone_id = id;
    event.owner_before = Some(owner);
    true
}

/// Give the stone on a cell to `owner`, keeping its identity.
///
/// Returns `false` if the cell is empty or already owned by `owner`.
pub fn change_owner(
    board: &mut Board,
    log: &mut EventLog,
    pos: Pos,
    owner: PlayerKey,
    cause: Cause,
    reason: &'static str,
) -> bool {
    match board.owner(pos) {
        Some(before) if before != owner => {
            board.set_owner(pos, owner);
            let event = log.emit(EventKind::Change, pos, cause, reason);
            event.stone_id = board.stone_id(pos);
            event.owner_before = Some(before);
            event.owner_after = Some(owner);
            true
        }
        _ => false,
    }
}

/// Slide a stone, with its identity and markers, to an empty cell.
pub fn move_stone(
    board: &mut Board,
    markers: &mut MarkerStore,
    log: &mut EventLog,
    from: Pos,
    to: Pos,
    cause: Cause,
    reason: &'static str,
) -> MoveOutcome {
    let cell = board.get(from);
    let Some(owner) = cell.owner() else {
        return MoveOutcome::SourceEmpty;
    };
    if from == to || !board.is_empty_at(to) {
        return MoveOutcome::DestinationOccupied;
    }
    let id = board.stone_id(from);
    board.clear(from);
    board.place_existing(to, cell, id);
    markers.relocate(from, to);
    let event = log.emit(EventKind::Move, to, cause, reason);
    event.from = Some(from);
    event.stone_id = id;
    event.owner_before = Some(owner);
    event.owner_after = Some(owner);
    MoveOutcome::Moved
}
