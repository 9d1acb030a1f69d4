//! Structural validation of node trees before generation.
//!
//! Catches configurations that would otherwise only surface as a panic in
//! the RNG or as an exhausted retry budget: empty or inverted random domains,
//! an empty alphabet with non-zero lengths, and unique-element containers
//! asked for more distinct elements than their child can produce.
//!
//! An exhaustive size larger than the children can fill is *not* an error:
//! that size just contributes no values.

use std::collections::BTreeSet;

use basegen_ir::{RandomDomain, SizeDomain, ValueNode};
use ordered_float::OrderedFloat;

use crate::config::GenerateLimits;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{path}: {kind} node has an empty random domain")]
    EmptyRandomDomain { path: String, kind: &'static str },

    #[error("{path}: inverted random range: min ({min}) > max ({max})")]
    InvertedRange {
        path: String,
        min: String,
        max: String,
    },

    #[error("{path}: float random range bounds must be finite")]
    NonFiniteRange { path: String },

    #[error("{path}: float random range is wider than f64 can represent")]
    FloatRangeOverflow { path: String },

    #[error("{path}: {kind} node may draw size {max_size}, above the limit of {limit}")]
    RandomSizeTooLarge {
        path: String,
        kind: &'static str,
        max_size: usize,
        limit: usize,
    },

    #[error("{path}: empty alphabet but random lengths up to {max_len}")]
    EmptyAlphabet { path: String, max_len: usize },

    #[error(
        "{path}: {kind} node may draw {requested} unique entries but its {role} domain has only {available}"
    )]
    UniqueDomainTooSmall {
        path: String,
        kind: &'static str,
        role: &'static str,
        requested: usize,
        available: u128,
    },

    #[error("{requested} random cases requested but the random domains only admit {available} distinct cases")]
    RandomCountUnreachable { requested: usize, available: u128 },
}

/// Validate every parameter node; all problems are reported together.
pub fn validate_nodes(
    nodes: &[ValueNode],
    limits: &GenerateLimits,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    for (i, node) in nodes.iter().enumerate() {
        check_node(node, &format!("param[{i}]"), limits, &mut errors);
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a single node tree.
pub fn validate_node(
    node: &ValueNode,
    limits: &GenerateLimits,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_node(node, "root", limits, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check that `count` distinct random cases can exist at all.
///
/// Only the product of the random-domain cardinalities is known here, so a
/// request that passes may still fail at generation time once exhaustive
/// cases are excluded.
pub fn validate_random_count(nodes: &[ValueNode], count: usize) -> Result<(), ValidationError> {
    let available = nodes
        .iter()
        .try_fold(1u128, |acc, node| acc.checked_mul(random_cardinality(node)?));
    match available {
        Some(available) if available < count as u128 => {
            Err(ValidationError::RandomCountUnreachable {
                requested: count,
                available,
            })
        }
        _ => Ok(()),
    }
}

fn check_node(
    node: &ValueNode,
    path: &str,
    limits: &GenerateLimits,
    errors: &mut Vec<ValidationError>,
) {
    let kind = node.kind();
    if let Some(max_size) = node.random_sizes().and_then(SizeDomain::max_size) {
        if max_size > limits.max_random_size {
            errors.push(ValidationError::RandomSizeTooLarge {
                path: path.to_string(),
                kind,
                max_size,
                limit: limits.max_random_size,
            });
        }
    }
    match node {
        ValueNode::Bool { random, .. } => {
            if random.is_empty() {
                errors.push(ValidationError::EmptyRandomDomain {
                    path: path.to_string(),
                    kind,
                });
            }
        }
        ValueNode::Int { random, .. } => check_domain(random, kind, path, errors),
        ValueNode::Float { random, .. } => {
            if let RandomDomain::Range { min, max } = random {
                if !min.is_finite() || !max.is_finite() {
                    errors.push(ValidationError::NonFiniteRange {
                        path: path.to_string(),
                    });
                    return;
                }
                if min < max && !(max - min).is_finite() {
                    errors.push(ValidationError::FloatRangeOverflow {
                        path: path.to_string(),
                    });
                    return;
                }
            }
            check_domain(random, kind, path, errors);
        }
        ValueNode::Str {
            alphabet, random, ..
        } => {
            check_domain(random, kind, path, errors);
            if let Some(max_len) = random.max_size() {
                if alphabet.is_empty() && max_len > 0 {
                    errors.push(ValidationError::EmptyAlphabet {
                        path: path.to_string(),
                        max_len,
                    });
                }
            }
        }
        ValueNode::List { elem, random, .. } | ValueNode::Tuple { elem, random, .. } => {
            check_domain(random, kind, path, errors);
            check_node(elem, &format!("{path}.elem"), limits, errors);
        }
        ValueNode::Set { elem, random, .. } => {
            check_domain(random, kind, path, errors);
            check_unique(kind, "elem", elem, random, path, errors);
            check_node(elem, &format!("{path}.elem"), limits, errors);
        }
        ValueNode::Dict {
            key, value, random, ..
        } => {
            check_domain(random, kind, path, errors);
            check_unique(kind, "key", key, random, path, errors);
            check_node(key, &format!("{path}.key"), limits, errors);
            check_node(value, &format!("{path}.value"), limits, errors);
        }
    }
}

fn check_domain<T>(
    domain: &RandomDomain<T>,
    kind: &'static str,
    path: &str,
    errors: &mut Vec<ValidationError>,
) where
    T: PartialOrd + std::fmt::Display,
{
    match domain {
        RandomDomain::Range { min, max } if min > max => {
            errors.push(ValidationError::InvertedRange {
                path: path.to_string(),
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        RandomDomain::Values { values } if values.is_empty() => {
            errors.push(ValidationError::EmptyRandomDomain {
                path: path.to_string(),
                kind,
            });
        }
        _ => {}
    }
}

/// A set or dict must not draw more unique entries than its child can supply.
fn check_unique(
    kind: &'static str,
    role: &'static str,
    child: &ValueNode,
    sizes: &SizeDomain,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    let (Some(requested), Some(available)) = (sizes.max_size(), random_cardinality(child)) else {
        return;
    };
    if requested as u128 > available {
        errors.push(ValidationError::UniqueDomainTooSmall {
            path: path.to_string(),
            kind,
            role,
            requested,
            available,
        });
    }
}

/// Number of distinct values the node's random domain can produce.
///
/// `None` when the count is unknown or too large to matter (continuous
/// float ranges, overflow).
pub fn random_cardinality(node: &ValueNode) -> Option<u128> {
    match node {
        ValueNode::Bool { random, .. } => {
            Some(random.iter().collect::<BTreeSet<_>>().len() as u128)
        }
        ValueNode::Int { random, .. } => match random {
            RandomDomain::Range { min, max } if min > max => Some(0),
            RandomDomain::Range { min, max } => Some((*max as i128 - *min as i128 + 1) as u128),
            RandomDomain::Values { values } => {
                Some(values.iter().collect::<BTreeSet<_>>().len() as u128)
            }
        },
        ValueNode::Float { random, .. } => match random {
            RandomDomain::Range { min, max } if min == max => Some(1),
            RandomDomain::Range { .. } => None,
            RandomDomain::Values { values } => Some(
                values
                    .iter()
                    .map(|f| OrderedFloat(*f))
                    .collect::<BTreeSet<_>>()
                    .len() as u128,
            ),
        },
        ValueNode::Str {
            alphabet, random, ..
        } => {
            let chars = alphabet.chars().collect::<BTreeSet<_>>().len() as u128;
            sum_of_powers(chars, random)
        }
        ValueNode::List { elem, random, .. } | ValueNode::Tuple { elem, random, .. } => {
            sum_of_powers(random_cardinality(elem)?, random)
        }
        ValueNode::Set { elem, random, .. } => {
            let elems = random_cardinality(elem)?;
            sum_over_sizes(random, |size| binomial(elems, size as u128))
        }
        ValueNode::Dict {
            key, value, random, ..
        } => {
            let keys = random_cardinality(key)?;
            let vals = random_cardinality(value)?;
            sum_over_sizes(random, |size| match binomial(keys, size as u128)? {
                0 => Some(0),
                key_sets => key_sets.checked_mul(vals.checked_pow(size)?),
            })
        }
    }
}

/// `sum(base^size)` over the domain's sizes.
fn sum_of_powers(base: u128, sizes: &SizeDomain) -> Option<u128> {
    if base == 1 {
        // Every size contributes exactly one value.
        return Some(match sizes {
            RandomDomain::Range { min, max } if min <= max => (max - min) as u128 + 1,
            RandomDomain::Range { .. } => 0,
            RandomDomain::Values { .. } => sizes.sizes().len() as u128,
        });
    }
    sum_over_sizes(sizes, |size| base.checked_pow(size))
}

/// Sum `per_size` over the domain's sizes in ascending order.
///
/// `per_size` must stay 0 for every size above the first positive size at
/// which it is 0 (true of powers and binomials), so the walk stops there.
/// Any other term sequence reaches overflow within a few hundred sizes.
fn sum_over_sizes(sizes: &SizeDomain, per_size: impl Fn(u32) -> Option<u128>) -> Option<u128> {
    let walk = |sizes: &mut dyn Iterator<Item = usize>| -> Option<u128> {
        let mut total: u128 = 0;
        for size in sizes {
            let term = per_size(u32::try_from(size).ok()?)?;
            if term == 0 && size > 0 {
                break;
            }
            total = total.checked_add(term)?;
        }
        Some(total)
    };
    match sizes {
        // Ranges are walked lazily; they can be wide.
        RandomDomain::Range { min, max } => walk(&mut (*min..=*max)),
        RandomDomain::Values { .. } => walk(&mut sizes.sizes().into_iter()),
    }
}

/// `C(n, k)`, `None` on overflow.
fn binomial(n: u128, k: u128) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        result = result.checked_mul(n - i)? / (i + 1);
    }
    Some(result)
}
