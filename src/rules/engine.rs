//! Game end and legal-action enumeration.
//!
//! These are the read-only queries a decision-maker needs:
//! - Whether the game has ended and who won
//! - Every action the turn pipeline would accept from a player

use serde::{Deserialize, Serialize};

use crate::cards::{placement, selection, usage};
use crate::core::{ActionKind, CardState, EngineConfig, GameState, PlayerKey};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// More stones on the board.
    Winner(PlayerKey),
    /// Equal stone counts.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerKey) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Whether the position ends the game: full board, a colour wiped out, or
/// two passes in a row.
#[must_use]
pub fn is_terminal(game: &GameState) -> bool {
    let board = &game.board;
    board.is_full()
        || PlayerKey::ALL.iter().any(|&p| board.count(p) == 0)
        || game.consecutive_passes >= 2
}

/// Final result by stone count, or `None` while the game continues.
#[must_use]
pub fn result(game: &GameState) -> Option<GameResult> {
    if !game.game_over {
        return None;
    }
    let black = game.board.count(PlayerKey::Black);
    let white = game.board.count(PlayerKey::White);
    Some(match black.cmp(&white) {
        std::cmp::Ordering::Greater => GameResult::Winner(PlayerKey::Black),
        std::cmp::Ordering::Less => GameResult::Winner(PlayerKey::White),
        std::cmp::Ordering::Equal => GameResult::Draw,
    })
}

/// Every action the pipeline would accept from `player` right now.
///
/// Empty when the game is over or it is not the player's turn. With a
/// selection pending, only its targets (and `cancel`, when allowed) are
/// listed. `pass` appears only when nothing else is possible.
#[must_use]
pub fn legal_actions(cards: &CardState, game: &GameState, player: PlayerKey, config: &EngineConfig) -> Vec<ActionKind> {
    if game.game_over || game.current_player != player {
        return Vec::new();
    }

    if let Some(pending) = &cards.pending[player] {
        let mut actions: Vec<ActionKind> = selection::targets(pending, cards, game, player)
            .into_iter()
            .map(|target| ActionKind::Select { target })
            .collect();
        if pending.is_cancellable() {
            actions.push(ActionKind::Cancel);
        }
        return actions;
    }

    let mut actions: Vec<ActionKind> = placement::legal_placements(cards, game, player)
        .into_iter()
        .map(|pos| ActionKind::Place { pos })
        .collect();
    actions.extend(
        usage::usable_cards(cards, game, player, config)
            .into_iter()
            .map(|card| ActionKind::UseCard { card }),
    );

    if actions.is_empty() {
        actions.push(ActionKind::Pass);
    }
    actions
}
