//! The turn pipeline: validate an action, resolve it, advance the turn.
//!
//! `apply()` takes the two state values by reference and returns new ones.
//! It works on clones (cheap, the state is built on `im` vectors) and only
//! hands them back on success, so a rejection leaves the caller's state
//! exactly as it was.
//!
//! ## Action routing
//!
//! | Pending selection | Action      | Handler                   |
//! |-------------------|-------------|---------------------------|
//! | yes               | `select`    | `cards::selection::apply` |
//! | yes               | `cancel`    | `cards::usage::cancel`    |
//! | yes               | other       | `NO_PENDING_EFFECT_MATCH` |
//! | no                | `place`     | `cards::placement::place` |
//! | no                | `use_card`  | `cards::usage::use_card`  |
//! | no                | `pass`      | pass rules                |
//!
//! After a turn-ending action the turn passes (see `turn::advance`). The
//! game-over check runs after the action and again after the turn-start.

pub mod turn;

use log::debug;

use crate::cards::{deck, placement, selection, usage, Resolution};
use crate::core::{
    Action, ActionKind, CardState, EngineConfig, GameState, PlayerKey, RandomSource, SeededSource,
};
use crate::effects::ResolverContext;
use crate::error::{EngineResult, Rejection};
use crate::events::{BoardEvent, EventLog};
use crate::rules::is_terminal;

/// Outcome of a successful `apply()`.
#[derive(Clone, Debug)]
pub struct Applied {
    pub card_state: CardState,
    pub game_state: GameState,
    /// Every event the action produced, in ply order.
    pub events: Vec<BoardEvent>,
    /// Whether the turn passed to the opponent.
    pub turn_ended: bool,
}

/// Deterministic rule engine over owned state values.
#[derive(Clone, Debug)]
pub struct TurnPipeline<R: RandomSource = SeededSource> {
    config: EngineConfig,
    source: R,
}

impl TurnPipeline<SeededSource> {
    /// Pipeline drawing randomness from a game seed.
    #[must_use]
    pub fn seeded(config: EngineConfig, seed: u64) -> Self {
        Self::new(config, SeededSource::new(seed))
    }
}

impl<R: RandomSource> TurnPipeline<R> {
    #[must_use]
    pub fn new(config: EngineConfig, source: R) -> Self {
        Self { config, source }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Initial deal: opening board, shuffled deck, Black's first turn-start.
    #[must_use]
    pub fn new_game(&self) -> (CardState, GameState) {
        let mut rng = self.source.for_action(0, 0);
        let mut cards = CardState::new().with_deck(deck::build_deck(&self.config, &mut rng));
        let game = GameState::new();

        cards.turn_count[PlayerKey::Black] += 1;
        deck::draw(&mut cards, PlayerKey::Black, &self.config);
        debug!("new game dealt, {} cards in deck", cards.deck.len());
        (cards, game)
    }

    /// Apply one action for `player`.
    pub fn apply(
        &self,
        card_state: &CardState,
        game_state: &GameState,
        player: PlayerKey,
        action: &Action,
    ) -> EngineResult<Applied> {
        if game_state.game_over {
            return Err(Rejection::GameOver);
        }
        if player != game_state.current_player || action.player != player {
            return Err(Rejection::NotYourTurn { current: game_state.current_player });
        }

        let mut cards = card_state.clone();
        let mut game = game_state.clone();
        let mut rng = self.source.for_action(action.turn_index, action.action_id.0);
        let mut log = EventLog::new(action.action_id, cards.turn_index);

        let turn_ended = {
            let mut ctx = ResolverContext::new(&mut game, &mut cards, &mut log, &mut rng, &self.config);
            let resolution = match resolve_action(&mut ctx, player, action.kind) {
                Ok(resolution) => resolution,
                Err(rejection) => {
                    debug!("{} {} by {player} rejected: {rejection}", action.action_id, action.kind.name());
                    return Err(rejection);
                }
            };

            if is_terminal(ctx.game) {
                false
            } else if resolution == Resolution::EndTurn {
                turn::advance(&mut ctx, player);
                true
            } else {
                false
            }
        };

        if is_terminal(&game) {
            game.game_over = true;
            debug!(
                "game over: black {} white {}",
                game.board.count(PlayerKey::Black),
                game.board.count(PlayerKey::White)
            );
        }

        debug!("{} {} by {player} applied, {} events", action.action_id, action.kind.name(), log.len());
        Ok(Applied {
            card_state: cards,
            game_state: game,
            events: log.into_events(),
            turn_ended,
        })
    }
}

fn resolve_action(ctx: &mut ResolverContext<'_>, player: PlayerKey, kind: ActionKind) -> EngineResult<Resolution> {
    if let Some(pending) = &ctx.cards.pending[player] {
        let card = pending.card;
        return match kind {
            ActionKind::Select { target } => selection::apply(ctx, player, target),
            ActionKind::Cancel => usage::cancel(ctx.cards, player).map(|()| Resolution::Continue),
            _ => Err(Rejection::NoPendingEffectMatch { card: Some(card) }),
        };
    }

    match kind {
        ActionKind::Place { pos } => placement::place(ctx, player, pos),
        ActionKind::UseCard { card } => usage::use_card(ctx, player, card).map(|()| Resolution::Continue),
        ActionKind::Pass => {
            let stuck = placement::legal_placements(ctx.cards, ctx.game, player).is_empty()
                && usage::usable_cards(ctx.cards, ctx.game, player, ctx.config).is_empty();
            if !stuck {
                return Err(Rejection::IllegalPass);
            }
            ctx.game.consecutive_passes += 1;
            Ok(Resolution::EndTurn)
        }
        ActionKind::Select { .. } | ActionKind::Cancel => Err(Rejection::NoPendingEffectMatch { card: None }),
    }
}
