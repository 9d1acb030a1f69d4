//! Per-call RNG seeding with ChaCha8.
//!
//! Every generation call owns its RNG. A stream is derived from
//! `(seed + stream_id)`: same seed and stream, same random cases.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Create a deterministic RNG for a given seed and stream ID.
pub fn stage_rng(seed: u64, stream_id: u64) -> ChaCha8Rng {
    let combined = seed.wrapping_add(stream_id);
    ChaCha8Rng::seed_from_u64(combined)
}

/// RNG for one base-set call: seeded when a seed is configured, otherwise
/// drawn from OS entropy so every call produces fresh random cases.
pub fn call_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => stage_rng(seed, 0),
        None => ChaCha8Rng::from_entropy(),
    }
}
