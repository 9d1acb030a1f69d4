//! Data model for base-set generation: parameter domain specifications
//! ([`ValueNode`]), the values they produce ([`Value`]) and the argument
//! tuples assembled from them ([`TestCase`]).

pub mod node;
pub mod parse;
pub mod value;

pub use node::{RandomDomain, SizeDomain, ValueNode};
pub use value::{TestCase, Value};
