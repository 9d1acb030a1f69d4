//! Exhaustive value enumeration for a single node.
//!
//! Scalar nodes return their literal domain. String and composite nodes are
//! built by induction on size: size 0 is the single empty value, and every
//! value of size `s` extends one value of size `s - 1` by one element (or one
//! key/value pair). Only sizes listed in the node's exhaustive domain are
//! kept, but every size up to the largest one has to be built.
//!
//! - **list / tuple / str**: append; order matters and repeats are allowed.
//! - **set**: insert; an element already present is rejected.
//! - **dict**: insert a pair; a key already present is rejected.
//!
//! A requested size that the children cannot fill without duplicates
//! contributes nothing. That case is not an error.

use std::collections::{BTreeMap, BTreeSet};

use basegen_ir::{Value, ValueNode};
use tracing::debug;

use crate::config::GenerateLimits;
use crate::error::GenerateError;

/// Enumerate every value in the node's exhaustive domain.
pub fn exhaustive_values(
    node: &ValueNode,
    limits: &GenerateLimits,
) -> Result<BTreeSet<Value>, GenerateError> {
    let values = match node {
        ValueNode::Bool { exhaustive, .. } => exhaustive.iter().map(|b| Value::Bool(*b)).collect(),
        ValueNode::Int { exhaustive, .. } => exhaustive.iter().map(|i| Value::Int(*i)).collect(),
        ValueNode::Float { exhaustive, .. } => exhaustive.iter().map(|f| Value::float(*f)).collect(),
        ValueNode::Str {
            alphabet,
            exhaustive,
            ..
        } => {
            let chars: BTreeSet<char> = alphabet.chars().collect();
            grow_by_size(
                exhaustive,
                String::new(),
                |s, next| {
                    for c in &chars {
                        let mut longer = s.clone();
                        longer.push(*c);
                        next.insert(longer);
                    }
                },
                Value::Str,
                limits,
            )?
        }
        ValueNode::List {
            elem, exhaustive, ..
        } => {
            let elems = exhaustive_values(elem, limits)?;
            grow_by_size(exhaustive, Vec::new(), append_each(&elems), Value::List, limits)?
        }
        ValueNode::Tuple {
            elem, exhaustive, ..
        } => {
            let elems = exhaustive_values(elem, limits)?;
            grow_by_size(exhaustive, Vec::new(), append_each(&elems), Value::Tuple, limits)?
        }
        ValueNode::Set {
            elem, exhaustive, ..
        } => {
            let elems = exhaustive_values(elem, limits)?;
            grow_by_size(
                exhaustive,
                BTreeSet::new(),
                |set: &BTreeSet<Value>, next| {
                    for e in &elems {
                        if !set.contains(e) {
                            let mut larger = set.clone();
                            larger.insert(e.clone());
                            next.insert(larger);
                        }
                    }
                },
                Value::Set,
                limits,
            )?
        }
        ValueNode::Dict {
            key,
            value,
            exhaustive,
            ..
        } => {
            let keys = exhaustive_values(key, limits)?;
            let vals = exhaustive_values(value, limits)?;
            grow_by_size(
                exhaustive,
                BTreeMap::new(),
                |dict: &BTreeMap<Value, Value>, next| {
                    for k in &keys {
                        if dict.contains_key(k) {
                            continue;
                        }
                        for v in &vals {
                            let mut larger = dict.clone();
                            larger.insert(k.clone(), v.clone());
                            next.insert(larger);
                        }
                    }
                },
                Value::Dict,
                limits,
            )?
        }
    };

    debug!(kind = node.kind(), count = values.len(), "exhaustive values");
    Ok(values)
}

/// Extension step for ordered sequences: append each element.
fn append_each(elems: &BTreeSet<Value>) -> impl Fn(&Vec<Value>, &mut BTreeSet<Vec<Value>>) + '_ {
    move |seq, next| {
        for e in elems {
            let mut longer = seq.clone();
            longer.push(e.clone());
            next.insert(longer);
        }
    }
}

/// Build all containers up to the largest permitted size, one size at a time,
/// keeping those whose size is permitted.
///
/// Stops with [`GenerateError::ExhaustiveTooLarge`] once the containers built
/// exceed `max_exhaustive_values`, or once the elements copied into them
/// exceed `max_exhaustive_work`.
fn grow_by_size<C, E, W>(
    sizes: &[usize],
    empty: C,
    extend: E,
    wrap: W,
    limits: &GenerateLimits,
) -> Result<BTreeSet<Value>, GenerateError>
where
    C: Ord + Clone,
    E: Fn(&C, &mut BTreeSet<C>),
    W: Fn(C) -> Value,
{
    let mut result = BTreeSet::new();
    let Some(max_size) = sizes.iter().copied().max() else {
        return Ok(result);
    };
    let permitted: BTreeSet<usize> = sizes.iter().copied().collect();

    let mut layer: BTreeSet<C> = BTreeSet::from([empty]);
    let mut work: usize = 0;
    for size in 0..=max_size {
        if permitted.contains(&size) {
            result.extend(layer.iter().cloned().map(&wrap));
        }
        if size == max_size || layer.is_empty() {
            break;
        }

        let mut next = BTreeSet::new();
        for container in &layer {
            let before = next.len();
            extend(container, &mut next);
            // Every new container holds `size + 1` copied elements.
            work = work.saturating_add((next.len() - before).saturating_mul(size + 1));
            if work > limits.max_exhaustive_work {
                return Err(GenerateError::ExhaustiveTooLarge {
                    what: "element copies",
                    limit: limits.max_exhaustive_work,
                });
            }
            if next.len() + result.len() > limits.max_exhaustive_values {
                return Err(GenerateError::ExhaustiveTooLarge {
                    what: "values",
                    limit: limits.max_exhaustive_values,
                });
            }
        }
        layer = next;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use basegen_ir::{RandomDomain, SizeDomain};

    fn ints(values: Vec<i64>) -> ValueNode {
        ValueNode::int(values, RandomDomain::range(0, 100))
    }

    fn int_set(values: &[i64]) -> BTreeSet<Value> {
        values.iter().map(|i| Value::Int(*i)).collect()
    }

    #[test]
    fn test_scalar_returns_literal_domain() {
        let values = exhaustive_values(&ints(vec![3, 1, 3]), &GenerateLimits::default()).unwrap();
        assert_eq!(values, int_set(&[1, 3]));
    }

    #[test]
    fn test_dict_respects_size_domain() {
        let node = ValueNode::dict(
            ints(vec![1, 2]),
            ValueNode::str("x", vec![1], SizeDomain::range(1, 1)),
            vec![0, 1],
            SizeDomain::range(0, 1),
        );
        let values = exhaustive_values(&node, &GenerateLimits::default()).unwrap();

        let mut one = BTreeMap::new();
        one.insert(Value::Int(1), Value::str("x"));
        let mut two = BTreeMap::new();
        two.insert(Value::Int(2), Value::str("x"));
        let expected: BTreeSet<Value> = [
            Value::Dict(BTreeMap::new()),
            Value::Dict(one),
            Value::Dict(two),
        ]
        .into_iter()
        .collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_dict_keys_are_never_repeated() {
        let node = ValueNode::dict(
            ints(vec![1, 2]),
            ints(vec![7, 8]),
            vec![2, 3],
            SizeDomain::range(0, 1),
        );
        let values = exhaustive_values(&node, &GenerateLimits::default()).unwrap();
        // Size 3 is unreachable with two keys; size 2 has 2 * 2 value choices.
        assert_eq!(values.len(), 4);
        assert!(values.iter().all(|v| v.len() == Some(2)));
    }

    #[test]
    fn test_list_is_ordered_with_repeats() {
        let node = ValueNode::list(ints(vec![0, 1]), vec![2], SizeDomain::range(0, 2));
        let values = exhaustive_values(&node, &GenerateLimits::default()).unwrap();
        assert_eq!(values.len(), 4);
        assert!(values.contains(&Value::List(vec![Value::Int(1), Value::Int(0)])));
        assert!(values.contains(&Value::List(vec![Value::Int(0), Value::Int(1)])));
        assert!(values.contains(&Value::List(vec![Value::Int(1), Value::Int(1)])));
    }

    #[test]
    fn test_tuple_sizes_zero_through_two() {
        let node = ValueNode::tuple(ints(vec![5, 6]), vec![0, 1, 2], SizeDomain::range(0, 2));
        let values = exhaustive_values(&node, &GenerateLimits::default()).unwrap();
        // 1 + 2 + 4
        assert_eq!(values.len(), 7);
        assert!(values.contains(&Value::Tuple(vec![])));
        assert!(values.iter().all(|v| matches!(v, Value::Tuple(_))));
    }

    #[test]
    fn test_set_ignores_order() {
        let node = ValueNode::set(ints(vec![1, 2, 3]), vec![2], SizeDomain::range(0, 2));
        let values = exhaustive_values(&node, &GenerateLimits::default()).unwrap();
        // C(3, 2)
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_strings_over_alphabet() {
        let node = ValueNode::str("ab", vec![0, 2], SizeDomain::range(0, 3));
        let values = exhaustive_values(&node, &GenerateLimits::default()).unwrap();
        let expected: BTreeSet<Value> = ["", "aa", "ab", "ba", "bb"]
            .into_iter()
            .map(Value::str)
            .collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_size_zero_with_empty_children() {
        let node = ValueNode::list(ints(vec![]), vec![0, 1, 2], SizeDomain::range(0, 0));
        let values = exhaustive_values(&node, &GenerateLimits::default()).unwrap();
        assert_eq!(values, BTreeSet::from([Value::List(vec![])]));
    }

    #[test]
    fn test_empty_size_domain_yields_nothing() {
        let node = ValueNode::list(ints(vec![1]), vec![], SizeDomain::range(0, 1));
        let values = exhaustive_values(&node, &GenerateLimits::default()).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_nested_composites() {
        // dict[int, list[bool]] with one key and lists of length 0 or 1.
        let inner = ValueNode::list(
            ValueNode::bool(vec![true, false], vec![true]),
            vec![0, 1],
            SizeDomain::range(0, 1),
        );
        let node = ValueNode::dict(ints(vec![9]), inner, vec![1], SizeDomain::range(1, 1));
        let values = exhaustive_values(&node, &GenerateLimits::default()).unwrap();
        // One key, three possible lists.
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_limit_stops_enumeration() {
        let node = ValueNode::list(ints((0..10).collect()), vec![4], SizeDomain::range(0, 1));
        let limits = GenerateLimits {
            max_exhaustive_values: 500,
            ..GenerateLimits::default()
        };
        let err = exhaustive_values(&node, &limits).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::ExhaustiveTooLarge { limit: 500, .. }
        ));
    }

    #[test]
    fn test_long_container_over_single_value_is_bounded() {
        // One container per size, so only the copy count grows.
        let node = ValueNode::list(ints(vec![7]), vec![2_000], SizeDomain::range(0, 1));
        let limits = GenerateLimits {
            max_exhaustive_work: 10_000,
            ..GenerateLimits::default()
        };
        let err = exhaustive_values(&node, &limits).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::ExhaustiveTooLarge {
                what: "element copies",
                limit: 10_000
            }
        ));

        let modest = ValueNode::list(ints(vec![7]), vec![1_000], SizeDomain::range(0, 1));
        let values = exhaustive_values(&modest, &GenerateLimits::default()).unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values.iter().next().unwrap().len(), Some(1_000));
    }

    #[test]
    fn test_enumeration_is_repeatable() {
        let node = ValueNode::set(ints(vec![1, 2, 3, 4]), vec![1, 2, 3], SizeDomain::range(0, 1));
        let limits = GenerateLimits::default();
        let first = exhaustive_values(&node, &limits).unwrap();
        let second = exhaustive_values(&node, &limits).unwrap();
        assert_eq!(first, second);
        // 4 + 6 + 4
        assert_eq!(first.len(), 14);
    }
}
