//! Deterministic random number generation.
//!
//! A `GameState` carries two independent `GameRng` streams:
//!
//! - **gameplay**: drives shuffles and draws during setup and `apply`
//! - **redeterminization**: drives the pooled reshuffles inside `copy`
//!
//! The two never share state, so the number of `copy` calls an agent makes
//! while planning cannot change the cards gameplay would deal next.
//!
//! ```
//! use rust_tabletop::core::GameRng;
//!
//! let gameplay = GameRng::new(42);
//! let mut planning = gameplay.for_context("redeterminization");
//! let mut gameplay = gameplay;
//!
//! // Drawing from the planning stream leaves gameplay untouched.
//! let mut reference = GameRng::new(42);
//! for _ in 0..10 {
//!     planning.gen_range(0..100);
//! }
//! assert_eq!(gameplay.gen_range(0..1000), reference.gen_range(0..1000));
//! ```

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Deterministic RNG with forking and named context streams.
///
/// ChaCha8 keeps generation fast while the word position gives O(1)
/// checkpointing through [`GameRngState`], which is also its serde form.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "GameRngState", from = "GameRngState")]
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

    /// Fork this RNG into an independent, deterministic branch.
    ///
    /// Advances only the fork counter; the parent's own sequence is unchanged.
    /// The child seed hashes `(seed, fork_counter)`, so a fork of a fork
    /// never lands on a later fork of the parent.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        self.fork_counter.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Draw a seed for an unrelated stream. Advances this stream.
    pub fn next_seed(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Create an independent stream for a named purpose.
    ///
    /// Derived from the seed value only, never from the current stream
    /// position, and hashed with `FxHasher` so the mapping is stable.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random integer in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<i32>) -> i32 {
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

impl From<GameRngState> for GameRng {
    fn from(state: GameRngState) -> Self {
        Self::from_state(&state)
    }
}

impl From<GameRng> for GameRngState {
    fn from(rng: GameRng) -> Self {
        rng.state()
    }
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
