//! Base-set generation from parameter domain specifications.
//!
//! Two strategies feed one base set:
//! - **exhaustive**: every combination of the parameters' small explicit
//!   domains ([`exhaustive`], [`cases::exhaustive_cases`]).
//! - **random**: draws from the wider random domains until the requested
//!   number of cases outside the exhaustive set is reached ([`random`],
//!   [`cases::random_cases`]).
//!
//! [`BaseSetGenerator`] ties both together behind validation, seeding and
//! retry limits.

pub mod basegen;
pub mod budget;
pub mod cases;
pub mod config;
pub mod error;
pub mod exhaustive;
pub mod random;
pub mod rng;
pub mod validate;

use std::collections::BTreeSet;

use basegen_ir::{Value, ValueNode};
use rand::Rng;

pub use basegen::BaseSetGenerator;
pub use config::{GenerateLimits, GeneratorConfig};
pub use error::GenerateError;

/// Generation entry points in method form.
pub trait NodeGen {
    /// Every value in the node's exhaustive domain.
    fn generate_exhaustive_values(
        &self,
        limits: &GenerateLimits,
    ) -> Result<BTreeSet<Value>, GenerateError>;

    /// One fresh draw from the node's random domain.
    fn generate_random_value<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        limits: &GenerateLimits,
    ) -> Result<Value, GenerateError>;
}

impl NodeGen for ValueNode {
    fn generate_exhaustive_values(
        &self,
        limits: &GenerateLimits,
    ) -> Result<BTreeSet<Value>, GenerateError> {
        exhaustive::exhaustive_values(self, limits)
    }

    fn generate_random_value<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        limits: &GenerateLimits,
    ) -> Result<Value, GenerateError> {
        random::random_value(self, rng, limits)
    }
}
