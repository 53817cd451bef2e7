//! Special-stone and bomb markers.
//!
//! A cell carries at most one `Special` marker and, independently, at most
//! one bomb. Markers are kept in creation order in an `im::Vector`; each
//! gets a `MarkerId` from a store-wide counter, which also serves as the
//! creation sequence hyperactive stones are processed in.
//!
//! The store never checks the board. Keeping markers on occupied cells is
//! the job of the mutation primitives: `destroy` drops every marker on the
//! cell and `move_stone` relocates them.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{PlayerKey, Pos};

/// Store-wide marker identity, increasing with creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(pub u32);

/// Special-stone archetypes with their per-archetype data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Special {
    /// Flip-immune until the owner's next turn-start.
    Protected,
    /// Flip-immune forever.
    PermaProtected,
    Dragon { remaining_owner_turns: u8 },
    Breeding { remaining_owner_turns: u8 },
    #[serde(rename = "ULTIMATE_DESTROY_GOD")]
    DestroyGod { remaining_owner_turns: u8 },
    Hyperactive,
    Regen { remaining: u8 },
    Guard { remaining_owner_turns: u8 },
    Trap,
    Work { stage: u8 },
}

impl Special {
    #[must_use]
    pub const fn tag(self) -> MarkerTag {
        match self {
            Special::Protected => MarkerTag::Protected,
            Special::PermaProtected => MarkerTag::PermaProtected,
            Special::Dragon { .. } => MarkerTag::Dragon,
            Special::Breeding { .. } => MarkerTag::Breeding,
            Special::DestroyGod { .. } => MarkerTag::DestroyGod,
            Special::Hyperactive => MarkerTag::Hyperactive,
            Special::Regen { .. } => MarkerTag::Regen,
            Special::Guard { .. } => MarkerTag::Guard,
            Special::Trap => MarkerTag::Trap,
            Special::Work { .. } => MarkerTag::Work,
        }
    }

    /// Whether this marker cancels any bracket line running through it.
    #[must_use]
    pub const fn blocks_flips(self) -> bool {
        matches!(
            self,
            Special::Protected
                | Special::PermaProtected
                | Special::Dragon { .. }
                | Special::Breeding { .. }
                | Special::DestroyGod { .. }
                | Special::Guard { .. }
        )
    }
}

/// Detonation footprint of a bomb.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlastShape {
    /// Centre plus its 3×3 neighbourhood.
    Square,
    /// Centre plus its orthogonal neighbours.
    Cross,
}

impl BlastShape {
    /// Cells destroyed by a detonation at `center`, row-major.
    #[must_use]
    pub fn cells(self, center: Pos) -> Vec<Pos> {
        match self {
            BlastShape::Square => center.square().into_vec(),
            BlastShape::Cross => center.plus().into_vec(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BombData {
    pub remaining_turns: u8,
    /// Turn index the bomb was placed on; it does not tick that turn.
    pub placed_turn: u32,
    pub shape: BlastShape,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerData {
    Special(Special),
    Bomb(BombData),
}

/// Data-free marker kind, carried by status events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarkerTag {
    Protected,
    PermaProtected,
    Dragon,
    Breeding,
    #[serde(rename = "ULTIMATE_DESTROY_GOD")]
    DestroyGod,
    Hyperactive,
    Regen,
    Guard,
    Trap,
    Work,
    Bomb,
}

/// One marker on one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marker {
    pub id: MarkerId,
    pub pos: Pos,
    pub owner: PlayerKey,
    pub data: MarkerData,
}

impl Marker {
    #[must_use]
    pub const fn tag(&self) -> MarkerTag {
        match self.data {
            MarkerData::Special(special) => special.tag(),
            MarkerData::Bomb(_) => MarkerTag::Bomb,
        }
    }

    #[must_use]
    pub const fn special(&self) -> Option<Special> {
        match self.data {
            MarkerData::Special(special) => Some(special),
            MarkerData::Bomb(_) => None,
        }
    }

    #[must_use]
    pub const fn bomb(&self) -> Option<BombData> {
        match self.data {
            MarkerData::Bomb(bomb) => Some(bomb),
            MarkerData::Special(_) => None,
        }
    }

    const fn is_bomb(&self) -> bool {
        matches!(self.data, MarkerData::Bomb(_))
    }
}

/// All markers in creation order.
///
/// ## Example
///
/// ```
/// use will_reversi::board::{MarkerStore, Special};
/// use will_reversi::core::{PlayerKey, Pos};
///
/// let mut markers = MarkerStore::new();
/// markers.set_special(Pos::new(2, 2), PlayerKey::Black, Special::Trap);
/// markers.set_special(Pos::new(2, 2), PlayerKey::Black, Special::PermaProtected);
///
/// assert_eq!(markers.len(), 1);
/// assert_eq!(markers.special_at(Pos::new(2, 2)).unwrap().special(), Some(Special::PermaProtected));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerStore {
    markers: Vector<Marker>,
    next_id: u32,
}

impl MarkerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Markers in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    #[must_use]
    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    /// The special marker on a cell.
    #[must_use]
    pub fn special_at(&self, pos: Pos) -> Option<&Marker> {
        self.markers.iter().find(|m| m.pos == pos && !m.is_bomb())
    }

    /// The bomb on a cell.
    #[must_use]
    pub fn bomb_at(&self, pos: Pos) -> Option<&Marker> {
        self.markers.iter().find(|m| m.pos == pos && m.is_bomb())
    }

    /// Whether a cell carries a special marker with this tag.
    #[must_use]
    pub fn has(&self, pos: Pos, tag: MarkerTag) -> bool {
        self.markers.iter().any(|m| m.pos == pos && m.tag() == tag)
    }

    /// Markers of one tag, in creation order.
    #[must_use]
    pub fn with_tag(&self, tag: MarkerTag) -> Vec<Marker> {
        self.markers.iter().filter(|m| m.tag() == tag).copied().collect()
    }

    /// Markers of one tag and owner, ordered by cell (row-major).
    #[must_use]
    pub fn anchors(&self, tag: MarkerTag, owner: PlayerKey) -> Vec<Marker> {
        let mut found: Vec<Marker> = self
            .markers
            .iter()
            .filter(|m| m.tag() == tag && m.owner == owner)
            .copied()
            .collect();
        found.sort_by_key(|m| m.pos);
        found
    }

    /// Put a special marker on a cell, replacing any existing one.
    pub fn set_special(&mut self, pos: Pos, owner: PlayerKey, special: Special) -> MarkerId {
        self.markers.retain(|m| !(m.pos == pos && !m.is_bomb()));
        self.push(pos, owner, MarkerData::Special(special))
    }

    /// Put a bomb on a cell, replacing any existing one.
    pub fn set_bomb(&mut self, pos: Pos, owner: PlayerKey, bomb: BombData) -> MarkerId {
        self.markers.retain(|m| !(m.pos == pos && m.is_bomb()));
        self.push(pos, owner, MarkerData::Bomb(bomb))
    }

    fn push(&mut self, pos: Pos, owner: PlayerKey, data: MarkerData) -> MarkerId {
        self.next_id += 1;
        let id = MarkerId(self.next_id);
        self.markers.push_back(Marker { id, pos, owner, data });
        id
    }

    /// Replace a marker's data in place, keeping its id and position.
    pub fn update(&mut self, id: MarkerId, data: MarkerData) -> bool {
        match self.markers.iter().position(|m| m.id == id) {
            Some(index) => {
                let mut marker = self.markers[index];
                marker.data = data;
                self.markers.set(index, marker);
                true
            }
            None => false,
        }
    }

    /// Hand a marker to a new owner.
    pub fn set_owner(&mut self, id: MarkerId, owner: PlayerKey) -> bool {
        match self.markers.iter().position(|m| m.id == id) {
            Some(index) => {
                let mut marker = self.markers[index];
                marker.owner = owner;
                self.markers.set(index, marker);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: MarkerId) -> Option<Marker> {
        let index = self.markers.iter().position(|m| m.id == id)?;
        Some(self.markers.remove(index))
    }

    /// Remove the special marker on a cell.
    pub fn remove_special(&mut self, pos: Pos) -> Option<Marker> {
        let id = self.special_at(pos)?.id;
        self.remove(id)
    }

    /// Remove the bomb on a cell.
    pub fn remove_bomb(&mut self, pos: Pos) -> Option<Marker> {
        let id = self.bomb_at(pos)?.id;
        self.remove(id)
    }

    /// Remove every marker on a cell.
    pub fn clear_cell(&mut self, pos: Pos) -> Vec<Marker> {
        let removed: Vec<Marker> = self.markers.iter().filter(|m| m.pos == pos).copied().collect();
        self.markers.retain(|m| m.pos != pos);
        removed
    }

    /// Move every marker on `from` to `to`, dropping whatever was on `to`.
    pub fn relocate(&mut self, from: Pos, to: Pos) {
        self.markers.retain(|m| m.pos != to);
        for marker in self.markers.iter_mut() {
            if marker.pos == from {
                marker.pos = to;
            }
        }
    }

    /// Exchange the markers of two cells.
    pub fn swap_cells(&mut self, a: Pos, b: Pos) {
        for marker in self.markers.iter_mut() {
            if marker.pos == a {
                marker.pos = b;
            } else if marker.pos == b {
                marker.pos = a;
            }
        }
    }
}
