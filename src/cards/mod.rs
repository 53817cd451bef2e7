//! Will cards: catalog, deck, pending selections and card effects.
//!
//! ## Key Types
//!
//! - `CardType`: One variant per card; doubles as the card's identity
//! - `CardDefinition`: Static catalog row (id, cost, kind)
//! - `PendingEffect`: An in-progress target selection
//! - `Resolution`: Whether the acting player keeps the turn
//!
//! ## Modules
//!
//! - `usage`: playing a card from hand and cancelling it
//! - `selection`: per-card target rules and selection effects
//! - `placement`: stone placement with armed-card effects

pub mod catalog;
pub mod deck;
pub mod pending;
pub mod placement;
pub mod selection;
pub mod usage;

pub use catalog::{CardCatalog, CardDefinition, CardKind, CardType, CARDS};
pub use pending::{PendingEffect, Stage};

/// What happens to the turn after an action resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The same player acts again (card played, selection made, extra
    /// placement left).
    Continue,
    /// The turn passes to the opponent.
    EndTurn,
}
