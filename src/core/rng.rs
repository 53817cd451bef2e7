//! Deterministic random number generation keyed by action.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Action streams**: Every `(turn_index, action_id)` pair gets its own
//!   independent sequence, so replaying an action reproduces its randomness
//!   no matter what ran before it
//! - **Forkable**: Self-play drivers fork a stream per game
//! - **Serializable**: O(1) state capture and restore
//!
//! ```
//! use will_reversi::core::GameRng;
//!
//! let rng = GameRng::new(42);
//! let mut a = rng.for_action(3, 7);
//! let mut b = GameRng::new(42).for_action(3, 7);
//! assert_eq!(a.gen_range_usize(0..100), b.gen_range_usize(0..100));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG built on ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }

    /// Create an independent stream for a named context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let words = std::iter::once(context.len() as u64).chain(context.bytes().map(u64::from));
        Self::new(derive_seed(self.seed, words))
    }

    /// Create the stream used while resolving one action.
    ///
    /// The stream seed is a SplitMix64 fold of `(seed, turn_index,
    /// action_id)`, fixed so stored ledgers replay on any toolchain.
    #[must_use]
    pub fn for_action(&self, turn_index: u32, action_id: u64) -> Self {
        Self::new(action_seed(self.seed, turn_index, action_id))
    }

    /// Generate a random integer in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// SplitMix64 output function.
const fn mix64(z: u64) -> u64 {
    let mut z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn derive_seed(seed: u64, words: impl IntoIterator<Item = u64>) -> u64 {
    words.into_iter().fold(mix64(seed), |acc, word| mix64(acc ^ word))
}

fn action_seed(seed: u64, turn_index: u32, action_id: u64) -> u64 {
    derive_seed(seed, [u64::from(turn_index), action_id])
}

/// Serializable RNG state for checkpointing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Fork counter for deterministic branching
    pub fork_counter: u64,
}

/// Source of per-action randomness injected into the turn pipeline.
pub trait RandomSource {
    /// Stream for the action identified by `(turn_index, action_id)`.
    fn for_action(&self, turn_index: u32, action_id: u64) -> GameRng;
}

/// Default source: one ChaCha8 stream per action, derived from a game seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededSource {
    pub seed: u64,
}

impl SeededSource {
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl RandomSource for SeededSource {
    fn for_action(&self, turn_index: u32, action_id: u64) -> GameRng {
        GameRng::new(self.seed).for_action(turn_index, action_id)
    }
}
