//! Decision-maker contract.
//!
//! The engine never chooses moves. A `DecisionMaker` looks at the state and
//! returns one of the action kinds `legal_actions` lists; the caller
//! submits it to the pipeline. Self-play drivers and tests plug in
//! `UniformPolicy`; anything smarter lives outside this crate.

use super::engine::legal_actions;
use crate::core::{ActionKind, CardState, EngineConfig, GameRng, GameState, PlayerKey};

/// Chooses the next action for a player.
pub trait DecisionMaker {
    /// Pick an action for `player`, or `None` when it has nothing to do
    /// (game over, or not its turn).
    fn compute_action(
        &self,
        cards: &CardState,
        game: &GameState,
        player: PlayerKey,
        rng: &mut GameRng,
    ) -> Option<ActionKind>;
}

/// Picks uniformly among the legal actions.
#[derive(Clone, Debug, Default)]
pub struct UniformPolicy {
    config: EngineConfig,
}

impl UniformPolicy {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }
}

impl DecisionMaker for UniformPolicy {
    fn compute_action(
        &self,
        cards: &CardState,
        game: &GameState,
        player: PlayerKey,
        rng: &mut GameRng,
    ) -> Option<ActionKind> {
        let actions = legal_actions(cards, game, player, &self.config);
        rng.choose(&actions).copied()
    }
}
