//! Random value draws for a single node.
//!
//! Scalars draw uniformly from their random domain. String and composite
//! nodes draw a target size first, then fill it one child draw at a time.
//! Sets and dicts discard draws that would repeat an element or key and try
//! again, up to `max_redraws` times per value.

use std::collections::{BTreeMap, BTreeSet};

use basegen_ir::{RandomDomain, SizeDomain, Value, ValueNode};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use crate::budget::RetryBudget;
use crate::config::GenerateLimits;
use crate::error::GenerateError;

/// Draw one value from the node's random domain.
pub fn random_value<R: Rng + ?Sized>(
    node: &ValueNode,
    rng: &mut R,
    limits: &GenerateLimits,
) -> Result<Value, GenerateError> {
    let kind = node.kind();
    match node {
        ValueNode::Bool { random, .. } => random
            .choose(rng)
            .map(|b| Value::Bool(*b))
            .ok_or(GenerateError::UnusableRandomDomain { kind }),
        ValueNode::Int { random, .. } => draw_int(random, rng, kind).map(Value::Int),
        ValueNode::Float { random, .. } => draw_float(random, rng, kind).map(Value::float),
        ValueNode::Str {
            alphabet, random, ..
        } => {
            let size = draw_size(random, rng, kind, limits)?;
            let chars: Vec<char> = alphabet.chars().collect();
            let mut s = String::with_capacity(size);
            for _ in 0..size {
                let c = chars
                    .choose(rng)
                    .ok_or(GenerateError::UnusableRandomDomain { kind })?;
                s.push(*c);
            }
            Ok(Value::Str(s))
        }
        ValueNode::List { elem, random, .. } => {
            let size = draw_size(random, rng, kind, limits)?;
            draw_sequence(elem, size, rng, limits).map(Value::List)
        }
        ValueNode::Tuple { elem, random, .. } => {
            let size = draw_size(random, rng, kind, limits)?;
            draw_sequence(elem, size, rng, limits).map(Value::Tuple)
        }
        ValueNode::Set { elem, random, .. } => {
            let size = draw_size(random, rng, kind, limits)?;
            let mut set = BTreeSet::new();
            let mut budget = RetryBudget::new(limits.max_redraws);
            while set.len() < size {
                if !set.insert(random_value(elem, rng, limits)?) && !budget.charge() {
                    return Err(unique_exhausted(kind, size, set.len(), &budget));
                }
            }
            Ok(Value::Set(set))
        }
        ValueNode::Dict {
            key, value, random, ..
        } => {
            let size = draw_size(random, rng, kind, limits)?;
            let mut dict = BTreeMap::new();
            let mut budget = RetryBudget::new(limits.max_redraws);
            while dict.len() < size {
                let k = random_value(key, rng, limits)?;
                if dict.contains_key(&k) {
                    if !budget.charge() {
                        return Err(unique_exhausted(kind, size, dict.len(), &budget));
                    }
                    continue;
                }
                let v = random_value(value, rng, limits)?;
                dict.insert(k, v);
            }
            Ok(Value::Dict(dict))
        }
    }
}

fn unique_exhausted(
    kind: &'static str,
    target: usize,
    reached: usize,
    budget: &RetryBudget,
) -> GenerateError {
    warn!(
        kind,
        target,
        reached,
        redraws = budget.spent(),
        "unique draw budget exhausted"
    );
    GenerateError::UniqueDrawExhausted {
        kind,
        target,
        reached,
        redraws: budget.spent(),
    }
}

fn draw_sequence<R: Rng + ?Sized>(
    elem: &ValueNode,
    size: usize,
    rng: &mut R,
    limits: &GenerateLimits,
) -> Result<Vec<Value>, GenerateError> {
    (0..size).map(|_| random_value(elem, rng, limits)).collect()
}

fn draw_int<R: Rng + ?Sized>(
    domain: &RandomDomain<i64>,
    rng: &mut R,
    kind: &'static str,
) -> Result<i64, GenerateError> {
    match domain {
        RandomDomain::Range { min, max } if min <= max => Ok(rng.gen_range(*min..=*max)),
        RandomDomain::Range { .. } => Err(GenerateError::UnusableRandomDomain { kind }),
        RandomDomain::Values { values } => values
            .choose(rng)
            .copied()
            .ok_or(GenerateError::UnusableRandomDomain { kind }),
    }
}

/// Float ranges are half-open; a degenerate range `min == max` yields `min`.
/// A range whose width overflows to infinity cannot be sampled.
fn draw_float<R: Rng + ?Sized>(
    domain: &RandomDomain<f64>,
    rng: &mut R,
    kind: &'static str,
) -> Result<f64, GenerateError> {
    match domain {
        RandomDomain::Range { min, max } if min.is_finite() && max.is_finite() => {
            if min == max {
                Ok(*min)
            } else if min < max && (max - min).is_finite() {
                Ok(rng.gen_range(*min..*max))
            } else {
                Err(GenerateError::UnusableRandomDomain { kind })
            }
        }
        RandomDomain::Range { .. } => Err(GenerateError::UnusableRandomDomain { kind }),
        RandomDomain::Values { values } => values
            .choose(rng)
            .copied()
            .ok_or(GenerateError::UnusableRandomDomain { kind }),
    }
}

fn draw_size<R: Rng + ?Sized>(
    domain: &SizeDomain,
    rng: &mut R,
    kind: &'static str,
    limits: &GenerateLimits,
) -> Result<usize, GenerateError> {
    let size = match domain {
        RandomDomain::Range { min, max } if min <= max => Ok(rng.gen_range(*min..=*max)),
        RandomDomain::Range { .. } => Err(GenerateError::UnusableRandomDomain { kind }),
        RandomDomain::Values { values } => values
            .choose(rng)
            .copied()
            .ok_or(GenerateError::UnusableRandomDomain { kind }),
    }?;
    if size > limits.max_random_size {
        return Err(GenerateError::RandomSizeTooLarge {
            kind,
            size,
            limit: limits.max_random_size,
        });
    }
    Ok(size)
}
