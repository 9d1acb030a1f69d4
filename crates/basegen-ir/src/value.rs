//! Generated values and test cases.
//!
//! A [`Value`] is what a node produces; a [`TestCase`] is one positional
//! argument tuple built from one value per parameter. Both derive `Eq`,
//! `Hash` and `Ord` structurally, so they deduplicate correctly inside
//! `HashSet`/`BTreeSet` and can serve as dict keys. Lists and tuples compare
//! element by element; sets and dicts are backed by `BTreeSet`/`BTreeMap`,
//! which makes their identity independent of insertion order.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Write as _};

use ordered_float::OrderedFloat;
use serde::Serialize;

/// A concrete generated value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Value {
    Bool(bool),
    Int(i64),
    /// Totally ordered so that floats hash and compare like every other value.
    Float(OrderedFloat<f64>),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Set(BTreeSet<Value>),
    Dict(BTreeMap<Value, Value>),
}

impl Value {
    pub fn float(f: f64) -> Self {
        Value::Float(OrderedFloat(f))
    }

    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Type name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Set(_) => "set",
            Value::Dict(_) => "dict",
        }
    }

    /// Size of a sized value (string length in chars, or element count).
    /// Returns `None` for bool, int and float.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::List(items) | Value::Tuple(items) => Some(items.len()),
            Value::Set(items) => Some(items.len()),
            Value::Dict(entries) => Some(entries.len()),
            Value::Bool(_) | Value::Int(_) | Value::Float(_) => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            Value::List(_) | Value::Tuple(_) | Value::Set(_) | Value::Dict(_)
        )
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

/// Write `items` separated by `", "`.
fn write_joined<'a, I>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
    I: IntoIterator<Item = &'a Value>,
{
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Quote and escape `s` as Python's `repr` does: single quotes unless the
/// string contains `'` but no `"`.
fn write_str_literal(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    f.write_char(quote)?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => write!(f, "\\{c}")?,
            c if c.is_control() => write!(f, "\\x{:02x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}

// Rendered as Python literals, since that is what harnesses paste into
// failing-case reports.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{:?}", x.0),
            Value::Str(s) => write_str_literal(f, s),
            Value::List(items) => {
                f.write_str("[")?;
                write_joined(f, items)?;
                f.write_str("]")
            }
            Value::Tuple(items) => {
                f.write_str("(")?;
                write_joined(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Value::Set(items) if items.is_empty() => f.write_str("set()"),
            Value::Set(items) => {
                f.write_str("{")?;
                write_joined(f, items)?;
                f.write_str("}")
            }
            Value::Dict(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// One argument tuple for the function under test, in parameter order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TestCase {
    args: Vec<Value>,
}

impl TestCase {
    pub fn new(args: Vec<Value>) -> Self {
        Self { args }
    }

    /// Positional arguments.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn into_args(self) -> Vec<Value> {
        self.args
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

impl From<Vec<Value>> for TestCase {
    fn from(args: Vec<Value>) -> Self {
        Self::new(args)
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        write_joined(f, &self.args)?;
        f.write_str(")")
    }
}
