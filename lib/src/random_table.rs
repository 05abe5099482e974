//! Random rule tables, built with the "random-table" method of
//! C. G. Langton, *Computation at the edge of chaos: phase transitions and
//! emergent computation*, Physica D 42 (1990).

use crate::{config::TableConfig, error::ConfigError};
use ca_rules1d::{radix::int_to_digits, Rule, RuleTable, State};
use enumflags2::{bitflags, BitFlags};
use rand::{seq::SliceRandom, Rng};
use std::sync::Arc;

/// The maximum number of entries of a random rule table.
pub const MAX_TABLE_SIZE: usize = 1 << 24;

/// Optional constraints on a random rule table.
#[bitflags]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// Every uniform neighborhood maps to its own state.
    StrongQuiescence,

    /// Every neighborhood maps to the same state as its mirror image.
    Isotropic,
}

/// One way to decide the next state of a neighborhood.
///
/// When building a table, the policies are tried in order, and the first one
/// that gives a state wins.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Policy {
    /// A uniform neighborhood maps to its own state.
    StrongQuiescence,

    /// A neighborhood whose mirror image is already in the table maps to the
    /// same state.
    Isotropy,

    /// With probability `1 - lambda`, map to the quiescent state. Otherwise,
    /// map to one of the other states, chosen uniformly.
    Draw {
        lambda: f64,
        quiescent_state: State,
        others: Vec<State>,
    },
}

impl Policy {
    /// The chain of policies for the given constraints, always ending with a
    /// [`Draw`](Policy::Draw).
    fn chain(
        constraints: BitFlags<Constraint>,
        states: State,
        lambda: f64,
        quiescent_state: State,
    ) -> Vec<Self> {
        let mut policies = Vec::with_capacity(3);

        if constraints.contains(Constraint::StrongQuiescence) {
            policies.push(Self::StrongQuiescence);
        }

        if constraints.contains(Constraint::Isotropic) {
            policies.push(Self::Isotropy);
        }

        policies.push(Self::Draw {
            lambda,
            quiescent_state,
            others: (0..states).filter(|&s| s != quiescent_state).collect(),
        });

        policies
    }

    /// Decide the next state of a neighborhood, given the part of the table
    /// built so far.
    ///
    /// Returns [`None`] if this policy does not apply.
    pub(crate) fn decide<R: Rng + ?Sized>(
        &self,
        neighborhood: &[State],
        table: &RuleTable,
        rng: &mut R,
    ) -> Option<State> {
        match self {
            Self::StrongQuiescence => {
                let (&first, rest) = neighborhood.split_first()?;
                rest.iter().all(|&cell| cell == first).then_some(first)
            }
            Self::Isotropy => {
                let mirror = neighborhood.iter().rev().copied().collect::<Vec<_>>();
                table.get(&mirror)
            }
            Self::Draw {
                lambda,
                quiescent_state,
                others,
            } => {
                if rng.gen::<f64>() < 1.0 - lambda {
                    Some(*quiescent_state)
                } else {
                    others.choose(rng).copied()
                }
            }
        }
    }
}

/// A random rule table, together with its actual lambda and its quiescent
/// state.
///
/// # Example
///
/// ```
/// use ca1d_lib::{RandomTable, TableConfig};
/// use rand::SeedableRng;
/// use rand_xoshiro::Xoshiro256PlusPlus;
///
/// let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
/// let config = TableConfig::new().with_strong_quiescence().with_quiescent_state(0);
/// let random_table = RandomTable::generate(3, 1, &config, &mut rng).unwrap();
///
/// assert_eq!(random_table.table.len(), 27);
/// assert_eq!(random_table.table.get(&[2, 2, 2]), Some(2));
/// assert_eq!(random_table.quiescent_state, 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RandomTable {
    /// The rule table, with an entry for each of the `k^(2r+1)` neighborhoods.
    pub table: Arc<RuleTable>,

    /// The fraction of neighborhoods that map to a non-quiescent state.
    ///
    /// This may differ from the target lambda, because of randomness and of
    /// the constraints.
    pub actual_lambda: f64,

    /// The quiescent state.
    pub quiescent_state: State,
}

impl RandomTable {
    /// Generate a random rule table for an automaton with `states` states and
    /// the given radius.
    ///
    /// All `k^(2r+1)` neighborhoods are visited in lexicographic order. The
    /// next state of each neighborhood is decided as follows, in order:
    ///
    /// 1. With [strong quiescence](TableConfig::strong_quiescence), a uniform
    ///    neighborhood maps to its own state.
    /// 2. With [isotropy](TableConfig::isotropic), if the mirror image of the
    ///    neighborhood was visited before, it maps to the same state.
    /// 3. Otherwise, it maps to the quiescent state with probability
    ///    `1 - lambda`, and to a uniformly chosen other state otherwise.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid for `states` (checked before
    /// anything is generated), or if the table would have more than
    /// [`MAX_TABLE_SIZE`] entries.
    pub fn generate<R: Rng + ?Sized>(
        states: State,
        radius: usize,
        config: &TableConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.check(states)?;

        let size = radius
            .checked_mul(2)
            .and_then(|n| n.checked_add(1))
            .ok_or(ConfigError::TableTooLarge)?;
        let total = u32::try_from(size)
            .ok()
            .and_then(|size| (states as usize).checked_pow(size))
            .filter(|&total| total <= MAX_TABLE_SIZE)
            .ok_or(ConfigError::TableTooLarge)?;

        let lambda = config.lambda_for(states);
        let quiescent_state = config
            .quiescent_state
            .unwrap_or_else(|| rng.gen_range(0..states));
        let policies = Policy::chain(config.constraints(), states, lambda, quiescent_state);

        let mut table = RuleTable::new();
        let mut quiescent_count = 0;

        for i in 0..total {
            let neighborhood = int_to_digits(i as u128, size, states)?;
            let state = policies
                .iter()
                .find_map(|policy| policy.decide(&neighborhood, &table, rng))
                .unwrap_or(quiescent_state);

            if state == quiescent_state {
                quiescent_count += 1;
            }

            table.insert(&neighborhood, state)?;
        }

        let actual_lambda = (total - quiescent_count) as f64 / total as f64;

        log::debug!(
            "Generated a random rule table with {} entries: target lambda {}, actual lambda {}, quiescent state {}",
            total,
            lambda,
            actual_lambda,
            quiescent_state
        );

        Ok(Self {
            table: Arc::new(table),
            actual_lambda,
            quiescent_state,
        })
    }

    /// A rule that looks up this table.
    ///
    /// The table is shared, not copied.
    pub fn rule(&self) -> Rule {
        Rule::Table(Arc::clone(&self.table))
    }
}

impl From<RandomTable> for Rule {
    fn from(random_table: RandomTable) -> Self {
        Self::Table(random_table.table)
    }
}
