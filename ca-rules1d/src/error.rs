use thiserror::Error;

/// An error that can occur when encoding, decoding or evaluating a rule.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The base, i.e. the number of states, is not in `2..=36`.
    #[error("The number of states {0} is not supported (must be between 2 and 36)")]
    UnsupportedBase(u32),

    /// The number does not fit in the required number of digits.
    #[error("The rule number {number} does not fit in {width} digits")]
    OutOfRange {
        /// The number that was being encoded.
        number: u128,
        /// The required number of digits.
        width: usize,
    },

    /// A digit is not smaller than the base.
    #[error("The digit {digit} is not valid in base {base}")]
    InvalidDigit {
        /// The offending digit.
        digit: u8,
        /// The base.
        base: u8,
    },

    /// The value of a sequence of digits does not fit in a `u128`.
    #[error("The number is too large")]
    Overflow,

    /// The neighborhood is not in the rule table.
    #[error("Could not find the neighborhood '{0}' in the table")]
    MissingNeighborhood(String),

    /// The rule is defined for a different number of states.
    #[error("The rule has {expected} states, but the automaton has {found}")]
    StatesMismatch {
        /// The number of states of the rule.
        expected: u8,
        /// The number of states of the automaton.
        found: u8,
    },

    /// The neighborhood is too large for a binary rule.
    #[error("The neighborhood size {0} is too large for a binary rule")]
    NeighborhoodTooLarge(usize),
}

/// An error that can occur when parsing a rule string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RuleStringError {
    /// The syntax of the rule string is invalid.
    #[error("The syntax of the rule string is invalid")]
    InvalidSyntax,
    /// The number of states is not in `2..=36`.
    #[error("The number of states must be between 2 and 36")]
    InvalidNumberOfStates,
}
