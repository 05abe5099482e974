use ca_rules1d::RuleError;
use thiserror::Error;

/// An error that can occur when initializing a simulation or a random rule
/// table from a configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The width or the number of steps is zero.
    #[error("The width or the number of steps is zero")]
    InvalidSize,

    /// The number of states is not in `2..=36`.
    #[error("The number of states {0} is not supported (must be between 2 and 36)")]
    UnsupportedStates(u8),

    /// The radius is larger than [`MAX_RADIUS`](crate::MAX_RADIUS).
    #[error("The radius {0} is too large (must be at most {max})", max = crate::MAX_RADIUS)]
    RadiusTooLarge(usize),

    /// The quiescent state is not one of the states.
    #[error("The quiescent state {state} must be smaller than the number of states {states}")]
    InvalidQuiescentState {
        /// The quiescent state.
        state: u8,
        /// The number of states.
        states: u8,
    },

    /// Lambda is not a number in `[0, 1]`.
    #[error("Lambda must be a number between 0 and 1")]
    InvalidLambda,

    /// The random rule table would have too many entries.
    #[error("The rule table would have too many entries")]
    TableTooLarge,

    /// The initial row does not match the width or the number of states.
    #[error("The initial row does not match the width or the number of states")]
    InvalidInitialState,

    /// The rule cannot be used with this configuration.
    #[error("Invalid rule: {0}")]
    InvalidRule(#[from] RuleError),
}
