//! Test-case assembly across parameters.
//!
//! - **exhaustive**: Cartesian product of every parameter's exhaustive values.
//! - **random**: one random draw per parameter, kept only if the tuple is
//!   neither an exhaustive case nor already drawn.

use std::collections::{BTreeSet, HashSet};

use basegen_ir::{TestCase, Value, ValueNode};
use rand::Rng;
use tracing::{debug, warn};

use crate::budget::{Deadline, RetryBudget};
use crate::config::GenerateLimits;
use crate::error::GenerateError;
use crate::exhaustive::exhaustive_values;
use crate::random::random_value;

/// Every combination of the parameters' exhaustive values.
///
/// Zero parameters yield the single empty case; a parameter with no
/// exhaustive values yields no cases at all.
pub fn exhaustive_cases(
    nodes: &[ValueNode],
    limits: &GenerateLimits,
) -> Result<BTreeSet<TestCase>, GenerateError> {
    let per_param = nodes
        .iter()
        .map(|node| exhaustive_values(node, limits))
        .collect::<Result<Vec<_>, _>>()?;

    let product = per_param
        .iter()
        .try_fold(1usize, |acc, values| acc.checked_mul(values.len()));
    match product {
        Some(n) if n <= limits.max_exhaustive_cases => {}
        _ => {
            return Err(GenerateError::ExhaustiveTooLarge {
                what: "cases",
                limit: limits.max_exhaustive_cases,
            })
        }
    }

    let mut partial: Vec<Vec<Value>> = vec![Vec::new()];
    for values in &per_param {
        let mut extended = Vec::with_capacity(partial.len() * values.len());
        for prefix in &partial {
            for value in values {
                let mut args = Vec::with_capacity(nodes.len());
                args.extend_from_slice(prefix);
                args.push(value.clone());
                extended.push(args);
            }
        }
        partial = extended;
    }

    let cases: BTreeSet<TestCase> = partial.into_iter().map(TestCase::new).collect();
    debug!(
        params = nodes.len(),
        cases = cases.len(),
        "exhaustive cross-product"
    );
    Ok(cases)
}

/// Draw `count` distinct random cases, none of which is in `exhaustive`.
///
/// Cases are returned in draw order. Gives up with
/// [`GenerateError::DomainExhausted`] after `max_case_retries` consecutive
/// rejected draws, or [`GenerateError::DeadlineExceeded`] once the
/// configured wall-clock budget runs out.
pub fn random_cases<R: Rng + ?Sized>(
    nodes: &[ValueNode],
    count: usize,
    exhaustive: &BTreeSet<TestCase>,
    rng: &mut R,
    limits: &GenerateLimits,
) -> Result<Vec<TestCase>, GenerateError> {
    let mut accepted = Vec::with_capacity(count);
    let mut seen: HashSet<TestCase> = HashSet::with_capacity(count);
    let mut budget = RetryBudget::new(limits.max_case_retries);
    let deadline = Deadline::start(limits.max_wall_millis);
    let mut rejected: u64 = 0;

    while accepted.len() < count {
        if deadline.exceeded() {
            warn!(
                accepted = accepted.len(),
                count,
                "random augmentation deadline exceeded"
            );
            return Err(GenerateError::DeadlineExceeded {
                elapsed_ms: deadline.elapsed_millis(),
                accepted: accepted.len(),
            });
        }

        let args = nodes
            .iter()
            .map(|node| random_value(node, rng, limits))
            .collect::<Result<Vec<_>, _>>()?;
        let candidate = TestCase::new(args);

        if exhaustive.contains(&candidate) || seen.contains(&candidate) {
            rejected += 1;
            if !budget.charge() {
                warn!(
                    accepted = accepted.len(),
                    count,
                    retries = budget.spent(),
                    "random domain exhausted"
                );
                return Err(GenerateError::DomainExhausted {
                    requested: count,
                    accepted: accepted.len(),
                    retries: budget.spent(),
                });
            }
            continue;
        }

        budget.reset();
        seen.insert(candidate.clone());
        accepted.push(candidate);
    }

    debug!(accepted = accepted.len(), rejected, "random augmentation");
    Ok(accepted)
}
