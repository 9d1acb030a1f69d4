//! Base-set generation: exhaustive cases followed by random cases.

use std::collections::BTreeSet;

use basegen_ir::{TestCase, ValueNode};
use rand::Rng;
use tracing::info;

use crate::cases::{exhaustive_cases, random_cases};
use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::rng::call_rng;
use crate::validate::{validate_nodes, validate_random_count};

/// Generates the base test set for one function signature.
///
/// Nodes are validated once at construction and never mutated, so one
/// generator can be shared across threads; every call builds its own RNG.
#[derive(Debug, Clone)]
pub struct BaseSetGenerator {
    nodes: Vec<ValueNode>,
    config: GeneratorConfig,
}

impl BaseSetGenerator {
    /// Validate `nodes` (one per parameter, in order) and build a generator.
    pub fn new(nodes: Vec<ValueNode>, config: GeneratorConfig) -> Result<Self, GenerateError> {
        let mut errors = validate_nodes(&nodes, &config.limits).err().unwrap_or_default();
        if let Err(e) = validate_random_count(&nodes, config.random_count) {
            errors.push(e);
        }
        if !errors.is_empty() {
            return Err(errors.into());
        }
        Ok(Self { nodes, config })
    }

    /// Generator with default limits and no fixed seed.
    pub fn with_random_count(
        nodes: Vec<ValueNode>,
        random_count: usize,
    ) -> Result<Self, GenerateError> {
        Self::new(nodes, GeneratorConfig::with_random_count(random_count))
    }

    pub fn nodes(&self) -> &[ValueNode] {
        &self.nodes
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// All test cases in the exhaustive cross-product.
    pub fn generate_exhaustive_cases(&self) -> Result<BTreeSet<TestCase>, GenerateError> {
        exhaustive_cases(&self.nodes, &self.config.limits)
    }

    /// `random_count` random cases disjoint from `exhaustive`.
    pub fn generate_random_cases<R: Rng + ?Sized>(
        &self,
        exhaustive: &BTreeSet<TestCase>,
        rng: &mut R,
    ) -> Result<Vec<TestCase>, GenerateError> {
        random_cases(
            &self.nodes,
            self.config.random_count,
            exhaustive,
            rng,
            &self.config.limits,
        )
    }

    /// The base set: exhaustive cases in sorted order, then random cases in
    /// draw order. Indices are stable for the returned list, so callers may
    /// key per-case results by position.
    ///
    /// With a configured seed the result is reproducible; without one each
    /// call draws fresh random cases.
    pub fn generate_base_set(&self) -> Result<Vec<TestCase>, GenerateError> {
        let mut rng = call_rng(self.config.seed);
        self.generate_base_set_with(&mut rng)
    }

    /// Same as [`generate_base_set`](Self::generate_base_set) with a
    /// caller-supplied RNG.
    pub fn generate_base_set_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Vec<TestCase>, GenerateError> {
        let exhaustive = self.generate_exhaustive_cases()?;
        let random = self.generate_random_cases(&exhaustive, rng)?;

        info!(
            params = self.nodes.len(),
            exhaustive = exhaustive.len(),
            random = random.len(),
            "generated base set"
        );

        let mut base = Vec::with_capacity(exhaustive.len() + random.len());
        base.extend(exhaustive);
        base.extend(random);
        Ok(base)
    }
}
