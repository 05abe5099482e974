//! A crate for encoding, decoding and evaluating rules of one-dimensional
//! cellular automata.
//!
//! Four kinds of rules are supported:
//!
//! - Binary rules numbered in the convention of *A New Kind of Science* (NKS).
//! - Binary rules numbered with neighborhoods in lexicographic order.
//! - `k`-color totalistic rules.
//! - Explicit lookup tables.
//!
//! All of them are unified behind [`Rule`], which also accepts an arbitrary
//! function.

#![warn(clippy::missing_const_for_fn)]
#![warn(missing_docs)]

mod error;
mod parse;
pub mod radix;
mod rule;

pub use error::{RuleError, RuleStringError};
pub use parse::parse_rule;
pub use rule::{
    lexicographic_rule, nks_rule, reverse_rule_number, table_rule, totalistic_rule, Rule,
    RuleFn, RuleTable, State, MAX_BINARY_NEIGHBORHOOD_SIZE, MAX_STATES,
};
