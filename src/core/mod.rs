//! Core engine types: players, positions, RNG, configuration, actions, state.
//!
//! Everything here is plain data. Rule logic lives in `rules`, `cards`,
//! `effects` and `pipeline`.

pub mod player;
pub mod position;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use player::{PlayerKey, PlayerMap};
pub use position::{Pos, StoneId, BOARD_SIZE, DIRECTIONS, ORTHOGONAL};
pub use rng::{GameRng, GameRngState, RandomSource, SeededSource};
pub use config::EngineConfig;
pub use action::{Action, ActionId, ActionKind, ActionRecord, Target};
pub use state::{CardState, GameState};
