//! A library for simulating one-dimensional cellular automata.
//!
//! Given an initial row of cells and a [`Rule`], [`evolve`] computes the whole
//! space-time [`Grid`] with periodic boundary conditions. Rules can be written
//! as rule numbers (see [`parse_rule`]), built by hand as a [`RuleTable`], or
//! generated at random with Langton's random-table method (see
//! [`RandomTable`]).
//!
//! [`Simulation`] ties a validated [`Config`], a rule, and an initial row
//! together.

#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::use_self)]
#![warn(missing_docs)]

mod config;
mod error;
mod evolve;
mod init;
mod random_table;
mod simulation;

pub use ca_rules1d::{parse_rule, radix, Rule, RuleError, RuleStringError, RuleTable, State};
pub use config::{Config, InitialState, TableConfig, MAX_RADIUS};
pub use error::ConfigError;
pub use evolve::{evolve, neighborhood, step, Grid};
pub use init::{init_random, init_simple};
pub use random_table::{Constraint, RandomTable, MAX_TABLE_SIZE};
pub use simulation::Simulation;
