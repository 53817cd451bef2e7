//! Player keys and per-player data storage.
//!
//! ## PlayerKey
//!
//! The two sides of the board. Black always moves first.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `PlayerKey`, used for hands, charge,
//! turn counters and pending effects.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKey {
    Black,
    White,
}

impl PlayerKey {
    /// Both players in turn order.
    pub const ALL: [PlayerKey; 2] = [PlayerKey::Black, PlayerKey::White];

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            PlayerKey::Black => PlayerKey::White,
            PlayerKey::White => PlayerKey::Black,
        }
    }

    /// Slot index (Black = 0, White = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            PlayerKey::Black => 0,
            PlayerKey::White => 1,
        }
    }

    /// Lowercase name used in logs and the replay format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PlayerKey::Black => "black",
            PlayerKey::White => "white",
        }
    }
}

impl std::fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use will_reversi::core::{PlayerKey, PlayerMap};
///
/// let mut charge: PlayerMap<u32> = PlayerMap::with_value(0);
/// charge[PlayerKey::White] += 4;
///
/// assert_eq!(charge[PlayerKey::Black], 0);
/// assert_eq!(charge[PlayerKey::White], 4);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(PlayerKey) -> T) -> Self {
        Self {
            data: [factory(PlayerKey::Black), factory(PlayerKey::White)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerKey) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerKey) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerKey, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerKey, &T)> {
        PlayerKey::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<PlayerKey> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerKey) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerKey> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerKey) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involution() {
        for player in PlayerKey::ALL {
            assert_ne!(player, player.opponent());
            assert_eq!(player, player.opponent().opponent());
        }
    }

    #[test]
    fn test_display_matches_replay_names() {
        assert_eq!(PlayerKey::Black.to_string(), "black");
        assert_eq!(
            serde_json::to_string(&PlayerKey::White).unwrap(),
            "\"white\""
        );
    }

    #[test]
    fn test_player_map_new() {
        let map = PlayerMap::new(|p| p.index() * 10);
        assert_eq!(map[PlayerKey::Black], 0);
        assert_eq!(map[PlayerKey::White], 10);
    }

    #[test]
    fn test_player_map_mutation_and_iter() {
        let mut map: PlayerMap<Vec<u8>> = PlayerMap::default();
        map[PlayerKey::White].push(3);

        let pairs: Vec<_> = map.iter().map(|(p, v)| (p, v.len())).collect();
        assert_eq!(pairs, vec![(PlayerKey::Black, 0), (PlayerKey::White, 1)]);
    }
}
