//! Generator configuration: random-case count, seeding and resource limits.
use serde::{Deserialize, Serialize};

/// Bounds on the otherwise unbounded parts of generation.
///
/// Exhaustive enumeration grows combinatorially and random augmentation
/// redraws on collision; both stop with an error once a limit is reached
/// instead of exhausting memory or spinning forever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateLimits {
    /// Redraws allowed while filling one random set or dict with unique
    /// elements/keys.
    pub max_redraws: u64,
    /// Consecutive rejected candidates allowed during random augmentation
    /// (candidate already exhaustive or already drawn).
    pub max_case_retries: u64,
    /// Maximum values a single node may enumerate exhaustively,
    /// intermediate sizes included.
    pub max_exhaustive_values: usize,
    /// Element copies allowed while building one node's exhaustive values.
    /// Bounds the work of long containers over tiny child domains, which
    /// `max_exhaustive_values` alone does not.
    pub max_exhaustive_work: usize,
    /// Maximum size of the exhaustive cross-product.
    pub max_exhaustive_cases: usize,
    /// Largest size (string length or element count) a random draw may
    /// produce. Size domains reaching past it are rejected by validation.
    pub max_random_size: usize,
    /// Wall-clock budget for random augmentation. None = unlimited.
    pub max_wall_millis: Option<u64>,
}

impl Default for GenerateLimits {
    fn default() -> Self {
        Self {
            max_redraws: 10_000,
            max_case_retries: 10_000,
            max_exhaustive_values: 1_000_000,
            max_exhaustive_work: 100_000_000,
            max_exhaustive_cases: 1_000_000,
            max_random_size: 10_000,
            max_wall_millis: None,
        }
    }
}

/// Configuration for one [`BaseSetGenerator`](crate::basegen::BaseSetGenerator).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of random cases added after the exhaustive cases.
    pub random_count: usize,
    /// Fixed seed for reproducible random cases. None = fresh entropy per call.
    pub seed: Option<u64>,
    pub limits: GenerateLimits,
}

impl GeneratorConfig {
    pub fn with_random_count(random_count: usize) -> Self {
        Self {
            random_count,
            ..Self::default()
        }
    }

    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
