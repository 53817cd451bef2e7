//! Owned game handle for callers and self-play drivers.
//!
//! `GameSession` ties a `TurnPipeline` to its current state values and an
//! `ActionLedger`. Callers submit action kinds; the session asks the ledger
//! for an id, applies the action, and records it only when the pipeline
//! accepts it.
//!
//! ```
//! use will_reversi::core::{ActionKind, PlayerKey, Pos};
//! use will_reversi::session::SessionBuilder;
//!
//! let mut session = SessionBuilder::new().with_seed(7).build();
//! let events = session.submit(PlayerKey::Black, ActionKind::Place { pos: Pos::new(2, 3) }).unwrap();
//! assert_eq!(events.len(), 2);
//! assert_eq!(session.current_player(), PlayerKey::White);
//! assert_eq!(session.ledger().len(), 1);
//! ```

use log::{debug, warn};

use crate::core::{ActionKind, ActionRecord, CardState, EngineConfig, GameRng, GameState, PlayerKey};
use crate::error::{EngineResult, LedgerError, LedgerResult};
use crate::events::BoardEvent;
use crate::ledger::{
    ActionIdGenerator, ActionLedger, LedgerStorage, MemoryStorage, NoClock, SequentialIds, TimeProvider,
};
use crate::pipeline::TurnPipeline;
use crate::rules::{self, DecisionMaker, GameResult};

/// Builder for `GameSession`.
pub struct SessionBuilder {
    seed: u64,
    config: EngineConfig,
    ids: Option<Box<dyn ActionIdGenerator>>,
    clock: Option<Box<dyn TimeProvider>>,
    storage: Option<Box<dyn LedgerStorage>>,
    max_history: Option<usize>,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            seed: 0,
            config: EngineConfig::default(),
            ids: None,
            clock: None,
            storage: None,
            max_history: None,
        }
    }
}

impl SessionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Game seed for the deal and every per-action stream.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_id_generator(mut self, ids: Box<dyn ActionIdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    #[must_use]
    pub fn with_time_provider(mut self, clock: Box<dyn TimeProvider>) -> Self {
        self.clock = Some(clock);
        self
    }

    #[must_use]
    pub fn with_storage(mut self, storage: Box<dyn LedgerStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Bound the ledger to the last `max` actions.
    #[must_use]
    pub fn with_max_history(mut self, max: usize) -> Self {
        self.max_history = Some(max);
        self
    }

    /// Deal a new game.
    #[must_use]
    pub fn build(self) -> GameSession {
        let pipeline = TurnPipeline::seeded(self.config.clone(), self.seed);
        let (card_state, game_state) = pipeline.new_game();
        debug!("session started with seed {}", self.seed);
        let ledger = self.into_ledger(1);
        GameSession { pipeline, card_state, game_state, ledger }
    }

    /// Rebuild a session from exported records. The ledger holds the
    /// records afterwards and, unless an id generator was supplied, new
    /// ids continue after the highest replayed one.
    pub fn resume(self, records: &[ActionRecord]) -> LedgerResult<GameSession> {
        let pipeline = TurnPipeline::seeded(self.config.clone(), self.seed);
        let (mut card_state, mut game_state) = pipeline.new_game();
        for record in records {
            let applied = pipeline
                .apply(&card_state, &game_state, record.player, &record.to_action())
                .map_err(|rejection| LedgerError::Rejected { action_id: record.action_id.0, rejection })?;
            card_state = applied.card_state;
            game_state = applied.game_state;
        }

        let next_id = records.iter().map(|r| r.action_id.0).max().map_or(1, |id| id + 1);
        let mut ledger = self.into_ledger(next_id);
        for record in records {
            ledger.record_action(record.to_action());
        }
        debug!("session resumed from {} actions", records.len());
        Ok(GameSession { pipeline, card_state, game_state, ledger })
    }

    fn into_ledger(self, next_id: u64) -> ActionLedger {
        let ledger = ActionLedger::new(
            self.ids.unwrap_or_else(|| Box::new(SequentialIds::starting_at(next_id))),
            self.clock.unwrap_or_else(|| Box::new(NoClock)),
            self.storage.unwrap_or_else(|| Box::new(MemoryStorage::new())),
        );
        match self.max_history {
            Some(max) => ledger.with_max_history(max),
            None => ledger,
        }
    }
}

/// A running game: pipeline, current state and ledger.
pub struct GameSession {
    pipeline: TurnPipeline,
    card_state: CardState,
    game_state: GameState,
    ledger: ActionLedger,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("turn_index", &self.card_state.turn_index)
            .field("current_player", &self.game_state.current_player)
            .field("ledger", &self.ledger)
            .finish()
    }
}

impl GameSession {
    /// Apply `kind` for `player`. Returns the events on success; a
    /// rejection leaves state and ledger unchanged apart from the spent id.
    pub fn submit(&mut self, player: PlayerKey, kind: ActionKind) -> EngineResult<Vec<BoardEvent>> {
        let action = self.ledger.create_action(self.card_state.turn_index, player, kind);
        let applied = self.pipeline.apply(&self.card_state, &self.game_state, player, &action)?;
        self.card_state = applied.card_state;
        self.game_state = applied.game_state;
        self.ledger.record_action(action);
        Ok(applied.events)
    }

    /// Everything `player` may submit right now.
    #[must_use]
    pub fn legal_actions(&self, player: PlayerKey) -> Vec<ActionKind> {
        rules::legal_actions(&self.card_state, &self.game_state, player, self.pipeline.config())
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerKey {
        self.game_state.current_player
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.game_state.game_over
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        rules::result(&self.game_state)
    }

    #[must_use]
    pub fn card_state(&self) -> &CardState {
        &self.card_state
    }

    #[must_use]
    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        self.pipeline.config()
    }

    #[must_use]
    pub fn ledger(&self) -> &ActionLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut ActionLedger {
        &mut self.ledger
    }

    /// Let two decision-makers play until the game ends, one of them has
    /// nothing to do, or `max_actions` actions were applied.
    pub fn play_with(
        &mut self,
        black: &dyn DecisionMaker,
        white: &dyn DecisionMaker,
        rng: &mut GameRng,
        max_actions: usize,
    ) -> Option<GameResult> {
        for _ in 0..max_actions {
            if self.is_over() {
                break;
            }

            let player = self.current_player();
            let maker = match player {
                PlayerKey::Black => black,
                PlayerKey::White => white,
            };
            let Some(kind) = maker.compute_action(&self.card_state, &self.game_state, player, rng) else {
                break;
            };

            if let Err(rejection) = self.submit(player, kind) {
                warn!("decision-maker for {player} chose a rejected {}: {rejection}", kind.name());
                break;
            }
        }
        self.result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pos;
    use crate::error::Rejection;
    use crate::ledger::replay;
    use crate::rules::UniformPolicy;

    #[test]
    fn test_rejected_submit_is_not_recorded() {
        let mut session = SessionBuilder::new().with_seed(1).build();

        let result = session.submit(PlayerKey::Black, ActionKind::Place { pos: Pos::new(0, 0) });

        assert_eq!(result, Err(Rejection::IllegalMove { pos: Pos::new(0, 0) }));
        assert!(session.ledger().is_empty());
        assert_eq!(session.current_player(), PlayerKey::Black);
    }

    #[test]
    fn test_play_with_uniform_policies() {
        let mut session = SessionBuilder::new().with_seed(11).build();
        let policy = UniformPolicy::default();
        let mut rng = GameRng::new(11);

        let result = session.play_with(&policy, &policy, &mut rng, 2_000);

        assert_eq!(result.is_some(), session.is_over());
        assert!(session.ledger().len() > 4);
    }

    #[test]
    fn test_session_matches_replay() {
        let mut session = SessionBuilder::new().with_seed(5).build();
        let policy = UniformPolicy::default();
        let mut rng = GameRng::new(99);
        session.play_with(&policy, &policy, &mut rng, 60);

        let records = session.ledger().export_actions();
        let replayed = replay(EngineConfig::default(), 5, &records).unwrap();

        assert_eq!(&replayed.card_state, session.card_state());
        assert_eq!(&replayed.game_state, session.game_state());
    }

    #[test]
    fn test_resume_continues_ids() {
        let mut session = SessionBuilder::new().with_seed(5).build();
        session.submit(PlayerKey::Black, ActionKind::Place { pos: Pos::new(2, 3) }).unwrap();
        let records = session.ledger().export_actions();

        let mut resumed = SessionBuilder::new().with_seed(5).resume(&records).unwrap();

        assert_eq!(resumed.game_state(), session.game_state());
        assert_eq!(resumed.ledger().len(), 1);
        let kind = resumed.legal_actions(PlayerKey::White)[0];
        resumed.submit(PlayerKey::White, kind).unwrap();
        assert_eq!(resumed.ledger().last_action().map(|a| a.action_id.0), Some(2));
    }
}
