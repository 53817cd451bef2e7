//! Engine configuration.
//!
//! `EngineConfig::default()` is the standard game. Every numeric rule
//! parameter the resolvers and selection protocols consult lives here, so
//! variants and tests can tweak one value without touching rule code.
//!
//! ```
//! use will_reversi::core::EngineConfig;
//!
//! let config = EngineConfig::default().with_hand_limit(3).with_chain_steps(1);
//! assert_eq!(config.hand_limit, 3);
//! assert_eq!(config.charge_cap, 30);
//! ```

use serde::{Deserialize, Serialize};

/// Rule parameters for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum cards a player may hold.
    pub hand_limit: usize,

    /// Size of the shared deck built at setup.
    pub deck_size: usize,

    /// Upper bound on a player's charge.
    pub charge_cap: u32,

    /// Owner turn-starts before a time or cross bomb detonates.
    pub bomb_turns: u8,

    /// Owner turn-starts a dragon anchor stays active.
    pub dragon_turns: u8,
    pub breeding_turns: u8,
    pub destroy_god_turns: u8,
    pub guard_turns: u8,

    /// Charge granted per stone destroyed by a sacrifice.
    pub sacrifice_reward: u32,
    pub sacrifice_max_selections: u8,

    /// Successive chain picks after a placement with CHAIN armed.
    pub chain_steps: u8,

    /// Cards offered by a heaven blessing.
    pub heaven_offer_count: usize,

    /// Cards a triggered trap takes from the flipper's hand.
    pub trap_steal_count: usize,

    /// Inclusive charge range granted by a treasure box.
    pub treasure_min: u32,
    pub treasure_max: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hand_limit: 5,
            deck_size: 30,
            charge_cap: 30,
            bomb_turns: 3,
            dragon_turns: 5,
            breeding_turns: 3,
            destroy_god_turns: 3,
            guard_turns: 3,
            sacrifice_reward: 5,
            sacrifice_max_selections: 3,
            chain_steps: 2,
            heaven_offer_count: 5,
            trap_steal_count: 3,
            treasure_min: 1,
            treasure_max: 3,
        }
    }
}

impl EngineConfig {
    /// Set the hand limit.
    #[must_use]
    pub fn with_hand_limit(mut self, limit: usize) -> Self {
        self.hand_limit = limit;
        self
    }

    /// Set the shared deck size.
    #[must_use]
    pub fn with_deck_size(mut self, size: usize) -> Self {
        self.deck_size = size;
        self
    }

    /// Set the charge cap.
    #[must_use]
    pub fn with_charge_cap(mut self, cap: u32) -> Self {
        self.charge_cap = cap;
        self
    }

    #[must_use]
    pub fn with_bomb_turns(mut self, turns: u8) -> Self {
        self.bomb_turns = turns;
        self
    }

    #[must_use]
    pub fn with_dragon_turns(mut self, turns: u8) -> Self {
        self.dragon_turns = turns;
        self
    }

    #[must_use]
    pub fn with_breeding_turns(mut self, turns: u8) -> Self {
        self.breeding_turns = turns;
        self
    }

    #[must_use]
    pub fn with_destroy_god_turns(mut self, turns: u8) -> Self {
        self.destroy_god_turns = turns;
        self
    }

    #[must_use]
    pub fn with_guard_turns(mut self, turns: u8) -> Self {
        self.guard_turns = turns;
        self
    }

    /// Set the per-stone sacrifice reward and selection bound.
    #[must_use]
    pub fn with_sacrifice(mut self, reward: u32, max_selections: u8) -> Self {
        self.sacrifice_reward = reward;
        self.sacrifice_max_selections = max_selections;
        self
    }

    #[must_use]
    pub fn with_chain_steps(mut self, steps: u8) -> Self {
        self.chain_steps = steps;
        self
    }

    #[must_use]
    pub fn with_heaven_offer_count(mut self, count: usize) -> Self {
        self.heaven_offer_count = count;
        self
    }

    #[must_use]
    pub fn with_trap_steal_count(mut self, count: usize) -> Self {
        self.trap_steal_count = count;
        self
    }

    /// Set the inclusive treasure box range. `min` is clamped to `max`.
    #[must_use]
    pub fn with_treasure_range(mut self, min: u32, max: u32) -> Self {
        self.treasure_min = min.min(max);
        self.treasure_max = max;
        self
    }

    /// Clamp a charge value to the cap.
    #[must_use]
    pub fn cap_charge(&self, charge: u32) -> u32 {
        charge.min(self.charge_cap)
    }
}
