//! Deterministic replay of an exported ledger.

use log::debug;

use crate::core::{ActionRecord, CardState, EngineConfig, GameState};
use crate::error::{LedgerError, LedgerResult};
use crate::events::BoardEvent;
use crate::pipeline::TurnPipeline;

/// Final state and full event stream of a replayed game.
#[derive(Clone, Debug)]
pub struct Replay {
    pub card_state: CardState,
    pub game_state: GameState,
    pub events: Vec<BoardEvent>,
}

/// Deal a fresh game from `seed` and apply every record in order.
///
/// Same seed, same config and same records always give the same final
/// state and the same events. A record the rules reject aborts the replay.
pub fn replay(config: EngineConfig, seed: u64, records: &[ActionRecord]) -> LedgerResult<Replay> {
    let pipeline = TurnPipeline::seeded(config, seed);
    let (mut card_state, mut game_state) = pipeline.new_game();
    let mut events = Vec::new();

    for record in records {
        let applied = pipeline
            .apply(&card_state, &game_state, record.player, &record.to_action())
            .map_err(|rejection| LedgerError::Rejected { action_id: record.action_id.0, rejection })?;
        card_state = applied.card_state;
        game_state = applied.game_state;
        events.extend(applied.events);
    }

    debug!("replayed {} actions, {} events", records.len(), events.len());
    Ok(Replay { card_state, game_state, events })
}
