//! Deterministic random number generation for shuffling.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **String seeds**: Seeds such as `"test"` are hashed to a stable `u64`
//! - **Serializable**: O(1) state capture and restore via ChaCha word position
//!
//! ## Usage
//!
//! ```
//! use deal_engine::core::GameRng;
//!
//! let mut a = GameRng::from_seed_str("test");
//! let mut b = GameRng::from_seed_str("test");
//!
//! assert_eq!(a.next_int(52), b.next_int(52));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

const SEED_HASH_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const SEED_HASH_MULTIPLIER: u64 = 0x51_7c_c1_b7_27_22_0a_95;

/// Deterministic RNG driving every shuffle in a game.
///
/// Uses ChaCha8 for speed while keeping a well-distributed stream.
/// A game owns exactly one `GameRng` and never reseeds it mid-game.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given numeric seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG from a textual seed.
    #[must_use]
    pub fn from_seed_str(seed: &str) -> Self {
        Self::new(Self::hash_seed(seed))
    }

    /// Hash a textual seed into the numeric seed space.
    ///
    /// The fold works on `u64` over the UTF-8 bytes, so a given seed maps to
    /// the same stream on every target.
    #[must_use]
    pub fn hash_seed(seed: &str) -> u64 {
        seed.bytes().fold(SEED_HASH_BASIS, |hash, byte| {
            (hash.rotate_left(5) ^ u64::from(byte)).wrapping_mul(SEED_HASH_MULTIPLIER)
        })
    }

    /// Numeric seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw an integer in `0..bound`.
    ///
    /// Returns 0 when `bound` is 0 so callers never have to special-case
    /// empty ranges.
    pub fn next_int(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        // Sample in u64 so the stream does not depend on the pointer width
        self.inner.gen_range(0..bound as u64) as usize
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
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
        }
    }
}

/// Serializable RNG state for checkpointing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Numeric seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
