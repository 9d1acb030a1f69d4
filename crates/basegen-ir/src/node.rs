use serde::{Deserialize, Serialize};

/// A random-generation domain: either an inclusive range or an explicit list
/// of candidates drawn uniformly.
///
/// Float ranges are half-open (`min..max`) unless `min == max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RandomDomain<T> {
    Range { min: T, max: T },
    Values { values: Vec<T> },
}

impl<T> RandomDomain<T> {
    pub fn range(min: T, max: T) -> Self {
        RandomDomain::Range { min, max }
    }

    pub fn values(values: Vec<T>) -> Self {
        RandomDomain::Values { values }
    }
}

impl RandomDomain<usize> {
    /// Largest size this domain can draw, `None` if it can draw nothing.
    pub fn max_size(&self) -> Option<usize> {
        match self {
            RandomDomain::Range { min, max } if min <= max => Some(*max),
            RandomDomain::Range { .. } => None,
            RandomDomain::Values { values } => values.iter().copied().max(),
        }
    }

    /// Every size this domain can draw, ascending and deduplicated.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = match self {
            RandomDomain::Range { min, max } => (*min..=*max).collect(),
            RandomDomain::Values { values } => values.clone(),
        };
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }
}

/// Size domain for composite and string nodes.
pub type SizeDomain = RandomDomain<usize>;

/// Type and domain specification for one parameter of the function under test.
///
/// Scalar nodes carry literal exhaustive domains. String and composite nodes
/// carry permitted *sizes* in both domains, and their elements come from the
/// alphabet or from child nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueNode {
    Bool {
        exhaustive: Vec<bool>,
        random: Vec<bool>,
    },
    Int {
        exhaustive: Vec<i64>,
        random: RandomDomain<i64>,
    },
    Float {
        exhaustive: Vec<f64>,
        random: RandomDomain<f64>,
    },
    Str {
        alphabet: String,
        exhaustive: Vec<usize>,
        random: SizeDomain,
    },
    List {
        elem: Box<ValueNode>,
        exhaustive: Vec<usize>,
        random: SizeDomain,
    },
    Tuple {
        elem: Box<ValueNode>,
        exhaustive: Vec<usize>,
        random: SizeDomain,
    },
    Set {
        elem: Box<ValueNode>,
        exhaustive: Vec<usize>,
        random: SizeDomain,
    },
    Dict {
        key: Box<ValueNode>,
        value: Box<ValueNode>,
        exhaustive: Vec<usize>,
        random: SizeDomain,
    },
}

impl ValueNode {
    pub fn bool(exhaustive: Vec<bool>, random: Vec<bool>) -> Self {
        ValueNode::Bool { exhaustive, random }
    }

    pub fn int(exhaustive: Vec<i64>, random: RandomDomain<i64>) -> Self {
        ValueNode::Int { exhaustive, random }
    }

    pub fn float(exhaustive: Vec<f64>, random: RandomDomain<f64>) -> Self {
        ValueNode::Float { exhaustive, random }
    }

    pub fn str(alphabet: &str, exhaustive: Vec<usize>, random: SizeDomain) -> Self {
        ValueNode::Str {
            alphabet: alphabet.to_string(),
            exhaustive,
            random,
        }
    }

    pub fn list(elem: ValueNode, exhaustive: Vec<usize>, random: SizeDomain) -> Self {
        ValueNode::List {
            elem: Box::new(elem),
            exhaustive,
            random,
        }
    }

    pub fn tuple(elem: ValueNode, exhaustive: Vec<usize>, random: SizeDomain) -> Self {
        ValueNode::Tuple {
            elem: Box::new(elem),
            exhaustive,
            random,
        }
    }

    pub fn set(elem: ValueNode, exhaustive: Vec<usize>, random: SizeDomain) -> Self {
        ValueNode::Set {
            elem: Box::new(elem),
            exhaustive,
            random,
        }
    }

    pub fn dict(
        key: ValueNode,
        value: ValueNode,
        exhaustive: Vec<usize>,
        random: SizeDomain,
    ) -> Self {
        ValueNode::Dict {
            key: Box::new(key),
            value: Box::new(value),
            exhaustive,
            random,
        }
    }

    /// Type name of the values this node produces.
    pub fn kind(&self) -> &'static str {
        match self {
            ValueNode::Bool { .. } => "bool",
            ValueNode::Int { .. } => "int",
            ValueNode::Float { .. } => "float",
            ValueNode::Str { .. } => "str",
            ValueNode::List { .. } => "list",
            ValueNode::Tuple { .. } => "tuple",
            ValueNode::Set { .. } => "set",
            ValueNode::Dict { .. } => "dict",
        }
    }

    /// Child nodes paired with their role (`elem`, `key`, `value`).
    pub fn children(&self) -> Vec<(&'static str, &ValueNode)> {
        match self {
            ValueNode::List { elem, .. }
            | ValueNode::Tuple { elem, .. }
            | ValueNode::Set { elem, .. } => vec![("elem", elem.as_ref())],
            ValueNode::Dict { key, value, .. } => {
                vec![("key", key.as_ref()), ("value", value.as_ref())]
            }
            ValueNode::Bool { .. }
            | ValueNode::Int { .. }
            | ValueNode::Float { .. }
            | ValueNode::Str { .. } => vec![],
        }
    }

    /// Permitted exhaustive sizes for string and composite nodes.
    pub fn exhaustive_sizes(&self) -> Option<&[usize]> {
        match self {
            ValueNode::Str { exhaustive, .. }
            | ValueNode::List { exhaustive, .. }
            | ValueNode::Tuple { exhaustive, .. }
            | ValueNode::Set { exhaustive, .. }
            | ValueNode::Dict { exhaustive, .. } => Some(exhaustive),
            ValueNode::Bool { .. } | ValueNode::Int { .. } | ValueNode::Float { .. } => None,
        }
    }

    /// Random size domain for string and composite nodes.
    pub fn random_sizes(&self) -> Option<&SizeDomain> {
        match self {
            ValueNode::Str { random, .. }
            | ValueNode::List { random, .. }
            | ValueNode::Tuple { random, .. }
            | ValueNode::Set { random, .. }
            | ValueNode::Dict { random, .. } => Some(random),
            ValueNode::Bool { .. } | ValueNode::Int { .. } | ValueNode::Float { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_domain_bounds() {
        assert_eq!(SizeDomain::range(1, 3).max_size(), Some(3));
        assert_eq!(SizeDomain::range(3, 1).max_size(), None);
        assert_eq!(SizeDomain::values(vec![]).max_size(), None);
        assert_eq!(SizeDomain::values(vec![4, 0, 4]).sizes(), vec![0, 4]);
        assert_eq!(SizeDomain::range(0, 2).sizes(), vec![0, 1, 2]);
    }

    #[test]
    fn test_children_roles() {
        let node = ValueNode::dict(
            ValueNode::int(vec![1], RandomDomain::range(0, 9)),
            ValueNode::bool(vec![true], vec![true, false]),
            vec![0, 1],
            SizeDomain::range(0, 2),
        );
        let roles: Vec<&str> = node.children().iter().map(|(role, _)| *role).collect();
        assert_eq!(roles, vec!["key", "value"]);
        assert_eq!(node.children()[1].1.kind(), "bool");
        assert_eq!(node.exhaustive_sizes(), Some(&[0, 1][..]));
    }

    #[test]
    fn test_scalar_has_no_sizes() {
        let node = ValueNode::int(vec![0, 1], RandomDomain::values(vec![5]));
        assert!(node.exhaustive_sizes().is_none());
        assert!(node.random_sizes().is_none());
        assert!(node.children().is_empty());
    }
}
