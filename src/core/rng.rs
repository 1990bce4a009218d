//! Deterministic random number generation with per-room streams.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical rooms, decks and layouts
//! - **Forkable**: The registry forks one independent stream per room
//! - **Context streams**: Layout generation and deck shuffling draw from
//!   separate sequences so a reshuffle never perturbs the board layout
//! - **Stable**: Context seeds come from `FxHasher` fed raw bytes, not from
//!   std's `DefaultHasher`, so a fixed seed replays the same session on any
//!   toolchain (given the same pointer width and endianness)
//!
//! ## Usage
//!
//! ```
//! use sequence_engine::core::GameRng;
//!
//! let mut registry_rng = GameRng::new(42);
//!
//! // One stream per room
//! let room_a = registry_rng.fork();
//! let room_b = registry_rng.fork();
//! assert_ne!(room_a.seed(), room_b.seed());
//!
//! // Same seed, same forks
//! let mut again = GameRng::new(42);
//! assert_eq!(again.fork().seed(), room_a.seed());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Deterministic RNG with forking.
///
/// Uses ChaCha8 for speed while keeping uniform, high-quality output.
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

    /// Seed from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        hasher.write_u64(self.seed);
        hasher.write(context.as_bytes());
        // Terminator keeps contexts prefix-free.
        hasher.write_u8(0xff);
        Self::new(hasher.finish())
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place (Fisher–Yates).
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
}
