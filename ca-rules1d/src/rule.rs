use crate::{
    radix::{self, check_base, digits_to_int, int_to_digits, neighborhood_key},
    RuleError,
};
use std::{
    collections::BTreeMap,
    fmt::{self, Debug, Display, Formatter},
    sync::Arc,
};

/// The state of a cell, a number in `0..k` for a `k`-color automaton.
pub type State = u8;

/// The maximum number of states.
///
/// Neighborhoods are written with one base-36 digit per cell.
pub const MAX_STATES: State = radix::MAX_BASE;

/// The maximum neighborhood size of a binary rule.
///
/// The binary expansion of a rule number has `2^n` digits for a neighborhood
/// of size `n`.
pub const MAX_BINARY_NEIGHBORHOOD_SIZE: usize = 16;

/// Index of a binary neighborhood, and the width of the rule expansion.
fn binary_index(neighborhood: &[State]) -> Result<(usize, usize), RuleError> {
    let size = neighborhood.len();
    if size > MAX_BINARY_NEIGHBORHOOD_SIZE {
        return Err(RuleError::NeighborhoodTooLarge(size));
    }
    let index = digits_to_int(neighborhood, 2)? as usize;
    Ok((index, 1 << size))
}

/// Number of digits of a totalistic rule, i.e. the number of possible sums.
fn totalistic_width(neighborhood_size: usize, states: State) -> Result<usize, RuleError> {
    check_base(states)?;
    neighborhood_size
        .checked_mul(states as usize - 1)
        .and_then(|width| width.checked_add(1))
        .ok_or(RuleError::NeighborhoodTooLarge(neighborhood_size))
}

/// Apply a binary rule numbered in the convention of *A New Kind of Science*.
///
/// The neighborhood is read as a binary number `s`. The rule number is written
/// in binary with `2^n` digits, where `n` is the size of the neighborhood.
/// The result is the digit at position `2^n - 1 - s`, so that the all-ones
/// neighborhood maps to the leftmost digit.
///
/// For example, rule 254 is:
///
/// ```text
/// 111 110 101 100 011 010 001 000
///  1   1   1   1   1   1   1   0
/// ```
///
/// ```rust
/// # use ca_rules1d::nks_rule;
/// assert_eq!(nks_rule(&[0, 0, 0], 254).unwrap(), 0);
/// assert_eq!(nks_rule(&[0, 0, 1], 254).unwrap(), 1);
/// ```
///
/// # Errors
///
/// Fails if the rule number has more than `2^n` binary digits, if the
/// neighborhood is not binary, or if it is larger than
/// [`MAX_BINARY_NEIGHBORHOOD_SIZE`].
pub fn nks_rule(neighborhood: &[State], number: u128) -> Result<State, RuleError> {
    let (index, width) = binary_index(neighborhood)?;
    let bits = int_to_digits(number, width, 2)?;
    Ok(bits[width - 1 - index])
}

/// Apply a binary rule with neighborhoods listed in lexicographic order.
///
/// Same as [`nks_rule`], except that the result is the digit at position `s`.
///
/// # Errors
///
/// Same as [`nks_rule`].
pub fn lexicographic_rule(neighborhood: &[State], number: u128) -> Result<State, RuleError> {
    let (index, width) = binary_index(neighborhood)?;
    let bits = int_to_digits(number, width, 2)?;
    Ok(bits[index])
}

/// Apply a `k`-color totalistic rule.
///
/// The rule number is written in base `k` with one digit for each possible sum
/// of the neighborhood, i.e. `n * (k - 1) + 1` digits for a neighborhood of size
/// `n` (`3k - 2` for radius 1). The rightmost digit is the result for sum 0.
///
/// ```rust
/// # use ca_rules1d::totalistic_rule;
/// // 777 is 1001210 in base 3.
/// assert_eq!(totalistic_rule(&[0, 0, 0], 3, 777).unwrap(), 0);
/// assert_eq!(totalistic_rule(&[0, 2, 0], 3, 777).unwrap(), 2);
/// assert_eq!(totalistic_rule(&[2, 2, 2], 3, 777).unwrap(), 1);
/// ```
///
/// # Errors
///
/// Fails with [`RuleError::OutOfRange`] if the rule number has too many
/// digits, and with [`RuleError::UnsupportedBase`] if `states` is not in
/// `2..=36`.
pub fn totalistic_rule(
    neighborhood: &[State],
    states: State,
    number: u128,
) -> Result<State, RuleError> {
    let width = totalistic_width(neighborhood.len(), states)?;
    let digits = int_to_digits(number, width, states)?;

    let sum = neighborhood.iter().try_fold(0, |sum, &cell| {
        if cell < states {
            Ok(sum + cell as usize)
        } else {
            Err(RuleError::InvalidDigit {
                digit: cell,
                base: states,
            })
        }
    })?;

    Ok(digits[width - 1 - sum])
}

/// Look up a neighborhood in a rule table.
///
/// # Errors
///
/// Fails with [`RuleError::MissingNeighborhood`] if the exact neighborhood is
/// not in the table.
pub fn table_rule(neighborhood: &[State], table: &RuleTable) -> Result<State, RuleError> {
    let key = neighborhood_key(neighborhood)?;
    table
        .get_key(&key)
        .ok_or(RuleError::MissingNeighborhood(key))
}

/// Reverse the binary expansion of a rule number.
///
/// This converts between the NKS numbering and the lexicographic numbering of
/// binary rules with neighborhoods of the given size:
///
/// ```rust
/// # use ca_rules1d::{lexicographic_rule, nks_rule, reverse_rule_number};
/// let reversed = reverse_rule_number(30, 3).unwrap();
/// assert_eq!(
///     nks_rule(&[1, 0, 0], 30).unwrap(),
///     lexicographic_rule(&[1, 0, 0], reversed).unwrap(),
/// );
/// ```
///
/// # Errors
///
/// Fails if the rule number does not fit in `2^n` binary digits, or if the
/// reversed number does not fit in a `u128`.
pub fn reverse_rule_number(number: u128, neighborhood_size: usize) -> Result<u128, RuleError> {
    if neighborhood_size > MAX_BINARY_NEIGHBORHOOD_SIZE {
        return Err(RuleError::NeighborhoodTooLarge(neighborhood_size));
    }
    let mut bits = int_to_digits(number, 1 << neighborhood_size, 2)?;
    bits.reverse();
    digits_to_int(&bits, 2)
}

/// A lookup table from neighborhoods to next states.
///
/// Neighborhoods are stored by their string form, one base-36 digit per cell
/// (see [`neighborhood_key`]). For automata with at most 10 states this is the
/// concatenation of the decimal digits, e.g. `"101"`.
///
/// ```rust
/// # use ca_rules1d::RuleTable;
/// let table: RuleTable = [("101", 1), ("111", 0), ("011", 0), ("110", 1)]
///     .into_iter()
///     .collect();
/// assert_eq!(table.get(&[1, 0, 1]), Some(1));
/// assert_eq!(table.get(&[0, 0, 0]), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    entries: BTreeMap<String, State>,
}

impl RuleTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a neighborhood.
    pub fn get(&self, neighborhood: &[State]) -> Option<State> {
        let key = neighborhood_key(neighborhood).ok()?;
        self.get_key(&key)
    }

    /// Look up a neighborhood by its string form.
    pub fn get_key(&self, key: &str) -> Option<State> {
        self.entries.get(key).copied()
    }

    /// Whether the table contains a neighborhood.
    pub fn contains(&self, neighborhood: &[State]) -> bool {
        self.get(neighborhood).is_some()
    }

    /// Insert a neighborhood, returning its previous next state if any.
    ///
    /// # Errors
    ///
    /// Fails if some cell of the neighborhood is not a base-36 digit.
    pub fn insert(
        &mut self,
        neighborhood: &[State],
        state: State,
    ) -> Result<Option<State>, RuleError> {
        let key = neighborhood_key(neighborhood)?;
        Ok(self.insert_key(key, state))
    }

    /// Insert a neighborhood by its string form.
    pub fn insert_key(&mut self, key: impl Into<String>, state: State) -> Option<State> {
        self.entries.insert(key.into(), state)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in lexicographic order of the keys.
    pub fn iter(&self) -> impl Iterator<Item = (&str, State)> + '_ {
        self.entries.iter().map(|(key, &state)| (key.as_str(), state))
    }
}

impl<K: Into<String>> FromIterator<(K, State)> for RuleTable {
    fn from_iter<I: IntoIterator<Item = (K, State)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, state)| (key.into(), state))
                .collect(),
        }
    }
}

/// A transition function that also sees the absolute index of the cell.
pub type RuleFn = dyn Fn(&[State], usize) -> State + Send + Sync;

/// A rule of a one-dimensional cellular automaton.
///
/// Every rule maps a neighborhood, i.e. the `2r + 1` cells centered on a cell,
/// to the next state of that cell. See [`evaluate`](Rule::evaluate).
///
/// Rule tables and functions are reference counted, so cloning a rule is cheap
/// and a rule can be shared between simulations running on different threads.
#[derive(Clone)]
pub enum Rule {
    /// A binary rule in the NKS numbering. See [`nks_rule`].
    Nks(u128),

    /// A binary rule in the lexicographic numbering. See [`lexicographic_rule`].
    Lexicographic(u128),

    /// A `k`-color totalistic rule. See [`totalistic_rule`].
    Totalistic {
        /// The number of states `k`.
        states: State,
        /// The rule number.
        number: u128,
    },

    /// A lookup table. See [`table_rule`].
    Table(Arc<RuleTable>),

    /// An arbitrary function of the neighborhood and the index of the cell.
    Function(Arc<RuleFn>),
}

impl Debug for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nks(number) => f.debug_tuple("Nks").field(number).finish(),
            Self::Lexicographic(number) => f.debug_tuple("Lexicographic").field(number).finish(),
            Self::Totalistic { states, number } => f
                .debug_struct("Totalistic")
                .field("states", states)
                .field("number", number)
                .finish(),
            Self::Table(table) => f
                .debug_struct("Table")
                .field("len", &table.len())
                .finish_non_exhaustive(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Rule numbers are written in the notation accepted by
/// [`parse_rule`](crate::parse_rule).
impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nks(number) => write!(f, "W{}", number),
            Self::Lexicographic(number) => write!(f, "L{}", number),
            Self::Totalistic { states, number } => write!(f, "K{},T{}", states, number),
            Self::Table(table) => write!(f, "table ({} entries)", table.len()),
            Self::Function(_) => write!(f, "function"),
        }
    }
}

impl From<RuleTable> for Rule {
    #[inline]
    fn from(table: RuleTable) -> Self {
        Self::Table(Arc::new(table))
    }
}

impl From<Arc<RuleTable>> for Rule {
    #[inline]
    fn from(table: Arc<RuleTable>) -> Self {
        Self::Table(table)
    }
}

impl Rule {
    /// Create a rule from a function of the neighborhood and the index of the
    /// cell.
    pub fn function(f: impl Fn(&[State], usize) -> State + Send + Sync + 'static) -> Self {
        Self::Function(Arc::new(f))
    }

    /// Number of states the rule is defined for.
    ///
    /// Tables and functions do not carry this information.
    pub const fn states(&self) -> Option<State> {
        match self {
            Self::Nks(_) | Self::Lexicographic(_) => Some(2),
            Self::Totalistic { states, .. } => Some(*states),
            Self::Table(_) | Self::Function(_) => None,
        }
    }

    /// Compute the next state of the cell at `index`, given its neighborhood.
    ///
    /// Only [`Function`](Rule::Function) rules make use of the index.
    pub fn evaluate(&self, neighborhood: &[State], index: usize) -> Result<State, RuleError> {
        match self {
            Self::Nks(number) => nks_rule(neighborhood, *number),
            Self::Lexicographic(number) => lexicographic_rule(neighborhood, *number),
            Self::Totalistic { states, number } => totalistic_rule(neighborhood, *states, *number),
            Self::Table(table) => table_rule(neighborhood, table),
            Self::Function(f) => Ok(f(neighborhood, index)),
        }
    }

    /// Check that the rule can be applied to an automaton with the given number
    /// of states and neighborhood size.
    ///
    /// Tables are not checked for completeness: a table only needs entries for
    /// the neighborhoods that actually occur.
    pub fn check(&self, states: State, neighborhood_size: usize) -> Result<(), RuleError> {
        check_base(states)?;

        if let Some(expected) = self.states() {
            if expected != states {
                return Err(RuleError::StatesMismatch {
                    expected,
                    found: states,
                });
            }
        }

        match self {
            Self::Nks(number) | Self::Lexicographic(number) => {
                if neighborhood_size > MAX_BINARY_NEIGHBORHOOD_SIZE {
                    return Err(RuleError::NeighborhoodTooLarge(neighborhood_size));
                }
                int_to_digits(*number, 1 << neighborhood_size, 2)?;
            }
            Self::Totalistic { states, number } => {
                let width = totalistic_width(neighborhood_size, *states)?;
                int_to_digits(*number, width, *states)?;
            }
            Self::Table(_) | Self::Function(_) => {}
        }

        Ok(())
    }
}
