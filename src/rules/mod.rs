//! Rules queries: flip lines, legal moves, game end, decision-makers.
//!
//! Everything here is read-only over the state values. The turn pipeline
//! uses the flip rules to resolve placements; external decision-makers use
//! `legal_actions` and `DecisionMaker` to drive a game.

pub mod engine;
pub mod flips;
pub mod policy;

pub use engine::{is_terminal, legal_actions, result, GameResult};
pub use flips::{
    capture_flips_from, directional_flips, flips_for, free_placement_moves, is_legal_move, legal_moves,
    ProtectionSet,
};
pub use policy::{DecisionMaker, UniformPolicy};
