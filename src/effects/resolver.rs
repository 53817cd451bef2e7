//! Resolver context: the mutable view every effect resolves against.
//!
//! `ResolverContext` bundles the two state values, the event log, the
//! action's RNG stream and the configuration. Its helpers wrap the board
//! mutation primitives with the rules every card effect shares:
//!
//! - `flip` changes owner and drops bomb and hyperactive markers
//! - `destroy_unguarded` leaves guarded stones alone
//! - `add_charge` respects the charge cap
//! - `apply_status` / `remove_status` emit status events

use crate::board::{self, BombData, MarkerId, MarkerTag, MoveOutcome, Special};
use crate::core::{CardState, EngineConfig, GameRng, GameState, PlayerKey, Pos, StoneId};
use crate::events::{Cause, EventKind, EventLog};
use crate::rules::ProtectionSet;

/// Mutable state for one resolution.
pub struct ResolverContext<'a> {
    pub game: &'a mut GameState,
    pub cards: &'a mut CardState,
    pub log: &'a mut EventLog,
    pub rng: &'a mut GameRng,
    pub config: &'a EngineConfig,
}

impl<'a> ResolverContext<'a> {
    pub fn new(
        game: &'a mut GameState,
        cards: &'a mut CardState,
        log: &'a mut EventLog,
        rng: &'a mut GameRng,
        config: &'a EngineConfig,
    ) -> Self {
        Self { game, cards, log, rng, config }
    }

    /// Flip-blocking cells as of now.
    #[must_use]
    pub fn protection(&self) -> ProtectionSet {
        ProtectionSet::from_markers(&self.cards.markers)
    }

    #[must_use]
    pub fn owner(&self, pos: Pos) -> Option<PlayerKey> {
        self.game.board.owner(pos)
    }

    #[must_use]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.game.board.is_empty_at(pos)
    }

    /// Whether the stone on `pos` carries an active guard.
    #[must_use]
    pub fn is_guarded(&self, pos: Pos) -> bool {
        self.cards.markers.has(pos, MarkerTag::Guard)
    }

    // === Primitives ===

    pub fn spawn(&mut self, pos: Pos, owner: PlayerKey, cause: Cause, reason: &'static str) -> Option<StoneId> {
        board::spawn(&mut self.game.board, self.log, pos, owner, cause, reason)
    }

    pub fn destroy(&mut self, pos: Pos, cause: Cause, reason: &'static str) -> bool {
        board::destroy(&mut self.game.board, &mut self.cards.markers, self.log, pos, cause, reason)
    }

    /// Destroy unless the stone is guarded.
    pub fn destroy_unguarded(&mut self, pos: Pos, cause: Cause, reason: &'static str) -> bool {
        if self.is_guarded(pos) {
            return false;
        }
        self.destroy(pos, cause, reason)
    }

    pub fn change_owner(&mut self, pos: Pos, owner: PlayerKey, cause: Cause, reason: &'static str) -> bool {
        board::change_owner(&mut self.game.board, self.log, pos, owner, cause, reason)
    }

    pub fn move_stone(&mut self, from: Pos, to: Pos, cause: Cause, reason: &'static str) -> MoveOutcome {
        board::move_stone(&mut self.game.board, &mut self.cards.markers, self.log, from, to, cause, reason)
    }

    // === Shared effect rules ===

    /// Change owner as the result of a flip.
    ///
    /// A flipped stone loses its bomb and its hyperactive marker.
    pub fn flip(&mut self, pos: Pos, owner: PlayerKey, cause: Cause, reason: &'static str) -> bool {
        if !self.change_owner(pos, owner, cause, reason) {
            return false;
        }
        if let Some(bomb) = self.cards.markers.bomb_at(pos).map(|m| m.id) {
            self.remove_status(bomb, cause, "flipped");
        }
        if let Some(marker) = self.cards.markers.special_at(pos) {
            if marker.tag() == MarkerTag::Hyperactive {
                let id = marker.id;
                self.remove_status(id, cause, "flipped");
            }
        }
        true
    }

    /// Flip every listed cell, returning the ones that actually changed.
    pub fn flip_all(&mut self, cells: &[Pos], owner: PlayerKey, cause: Cause, reason: &'static str) -> Vec<Pos> {
        cells
            .iter()
            .copied()
            .filter(|&pos| self.flip(pos, owner, cause, reason))
            .collect()
    }

    /// Grant charge, clamped to the cap.
    pub fn add_charge(&mut self, player: PlayerKey, amount: u32) {
        let charge = self.cards.charge[player].saturating_add(amount);
        self.cards.charge[player] = self.config.cap_charge(charge);
    }

    /// Put a special marker on a stone and emit `STATUS_APPLIED`.
    pub fn apply_status(
        &mut self,
        pos: Pos,
        owner: PlayerKey,
        special: Special,
        cause: Cause,
        reason: &'static str,
    ) -> MarkerId {
        let id = self.cards.markers.set_special(pos, owner, special);
        self.status_event(EventKind::StatusApplied, pos, special.tag(), cause, reason);
        id
    }

    /// Put a bomb on a stone and emit `STATUS_APPLIED`.
    pub fn apply_bomb(&mut self, pos: Pos, owner: PlayerKey, bomb: BombData, cause: Cause, reason: &'static str) -> MarkerId {
        let id = self.cards.markers.set_bomb(pos, owner, bomb);
        self.status_event(EventKind::StatusApplied, pos, MarkerTag::Bomb, cause, reason);
        id
    }

    /// Remove a marker and emit `STATUS_REMOVED`. No-op for unknown ids.
    pub fn remove_status(&mut self, id: MarkerId, cause: Cause, reason: &'static str) -> bool {
        match self.cards.markers.remove(id) {
            Some(marker) => {
                self.status_event(EventKind::StatusRemoved, marker.pos, marker.tag(), cause, reason);
                true
            }
            None => false,
        }
    }

    fn status_event(&mut self, kind: EventKind, pos: Pos, tag: MarkerTag, cause: Cause, reason: &'static str) {
        let stone_id = self.game.board.stone_id(pos);
        let owner = self.game.board.owner(pos);
        let event = self.log.emit(kind, pos, cause, reason);
        event.status = Some(tag);
        event.stone_id = stone_id;
        event.owner_before = owner;
        event.owner_after = owner;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BlastShape;
    use crate::effects::fixture::Fixture;

    #[test]
    fn test_flip_drops_bomb_and_hyperactive() {
        let mut fx = Fixture::new(&["W......."]);
        let pos = Pos::new(0, 0);
        {
            let mut ctx = fx.ctx();
            ctx.cards.markers.set_special(pos, PlayerKey::White, Special::Hyperactive);
            ctx.cards.markers.set_bomb(pos, PlayerKey::White, BombData { remaining_turns: 3, placed_turn: 0, shape: BlastShape::Square });
            assert!(ctx.flip(pos, PlayerKey::Black, Cause::Flip, "standard_flip"));
        }

        assert!(fx.cards.markers.is_empty());
        let kinds: Vec<_> = fx.log.events().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Change, EventKind::StatusRemoved, EventKind::StatusRemoved]);
    }

    #[test]
    fn test_flip_keeps_other_markers() {
        let mut fx = Fixture::new(&["W......."]);
        let pos = Pos::new(0, 0);
        let mut ctx = fx.ctx();
        ctx.cards.markers.set_special(pos, PlayerKey::White, Special::Trap);
        ctx.flip(pos, PlayerKey::Black, Cause::Flip, "standard_flip");
        assert!(ctx.cards.markers.has(pos, MarkerTag::Trap));
    }

    #[test]
    fn test_destroy_unguarded_skips_guard() {
        let mut fx = Fixture::new(&["BW......"]);
        let mut ctx = fx.ctx();
        ctx.cards.markers.set_special(Pos::new(0, 0), PlayerKey::Black, Special::Guard { remaining_owner_turns: 3 });

        assert!(!ctx.destroy_unguarded(Pos::new(0, 0), Cause::Destroy, "destroy_card"));
        assert!(ctx.destroy_unguarded(Pos::new(0, 1), Cause::Destroy, "destroy_card"));
        assert!(!ctx.is_empty(Pos::new(0, 0)));
    }

    #[test]
    fn test_add_charge_caps() {
        let mut fx = Fixture::new(&[]);
        let mut ctx = fx.ctx();
        ctx.add_charge(PlayerKey::Black, 25);
        ctx.add_charge(PlayerKey::Black, 25);
        assert_eq!(ctx.cards.charge[PlayerKey::Black], 30);
    }

    #[test]
    fn test_status_events() {
        let mut fx = Fixture::new(&["B......."]);
        {
            let mut ctx = fx.ctx();
            let id = ctx.apply_status(Pos::new(0, 0), PlayerKey::Black, Special::PermaProtected, Cause::Inherit, "inherit_applied");
            assert!(ctx.remove_status(id, Cause::Inherit, "test"));
            assert!(!ctx.remove_status(id, Cause::Inherit, "test"));
        }
        let statuses: Vec<_> = fx.log.events().iter().map(|e| (e.kind, e.status)).collect();
        assert_eq!(
            statuses,
            vec![
                (EventKind::StatusApplied, Some(MarkerTag::PermaProtected)),
                (EventKind::StatusRemoved, Some(MarkerTag::PermaProtected)),
            ]
        );
    }
}
