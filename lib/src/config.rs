use crate::{error::ConfigError, random_table::Constraint};
use ca_rules1d::{State, MAX_STATES};
#[cfg(feature = "clap")]
use clap::{Args, ValueEnum};
use enumflags2::BitFlags;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use strum::{Display, EnumIter, EnumString};

/// The maximum radius of a neighborhood.
pub const MAX_RADIUS: usize = 1 << 10;

/// How to build the initial row.
///
/// The default is [`Simple`](InitialState::Simple).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString)]
#[cfg_attr(feature = "clap", derive(ValueEnum))]
pub enum InitialState {
    /// All cells are `0`, except the center cell which is `1`.
    ///
    /// See [`init_simple`](crate::init_simple).
    #[default]
    #[strum(serialize = "simple")]
    #[cfg_attr(feature = "clap", value(name = "simple", alias = "s"))]
    Simple,

    /// Every cell is chosen uniformly at random among all states.
    ///
    /// See [`init_random`](crate::init_random).
    #[strum(serialize = "random")]
    #[cfg_attr(feature = "clap", value(name = "random", alias = "r"))]
    Random,
}

/// The configuration of a simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(Args))]
pub struct Config {
    /// Width of the world, i.e. the number of cells in a row.
    ///
    /// The row wraps around: the left neighbor of the first cell is the last cell.
    #[cfg_attr(feature = "clap", arg(short, long, default_value = "64"))]
    pub width: usize,

    /// Number of generations, including the initial row.
    #[cfg_attr(feature = "clap", arg(short = 'n', long, default_value = "32"))]
    pub steps: usize,

    /// Radius of the neighborhood.
    ///
    /// The neighborhood of a cell consists of the cell itself and `radius`
    /// cells on each side.
    #[cfg_attr(feature = "clap", arg(short, long, default_value = "1"))]
    pub radius: usize,

    /// Number of states.
    ///
    /// It must be between 2 and 36.
    #[cfg_attr(feature = "clap", arg(short = 'k', long, default_value = "2"))]
    pub states: State,

    /// How to build the initial row.
    #[cfg_attr(feature = "clap", arg(short, long, value_enum, default_value = "simple"))]
    pub init: InitialState,

    /// Random seed for the initial row and for random rule tables.
    ///
    /// If this is [`None`], then the seed is randomly generated.
    #[cfg_attr(feature = "clap", arg(long))]
    pub seed: Option<u64>,
}

impl Config {
    /// Create a new configuration for a binary automaton of radius 1.
    #[inline]
    pub const fn new(width: usize, steps: usize) -> Self {
        Self {
            width,
            steps,
            radius: 1,
            states: 2,
            init: InitialState::Simple,
            seed: None,
        }
    }

    /// Set the radius of the neighborhood.
    #[inline]
    pub const fn with_radius(mut self, radius: usize) -> Self {
        self.radius = radius;
        self
    }

    /// Set the number of states.
    #[inline]
    pub const fn with_states(mut self, states: State) -> Self {
        self.states = states;
        self
    }

    /// Set how to build the initial row.
    #[inline]
    pub const fn with_init(mut self, init: InitialState) -> Self {
        self.init = init;
        self
    }

    /// Set the random seed.
    ///
    /// See [`seed`](Config::seed) for more details.
    #[inline]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of cells in a neighborhood, i.e. `2 * radius + 1`.
    ///
    /// Saturates at [`usize::MAX`] for radii that [`check`](Config::check)
    /// rejects.
    #[inline]
    pub const fn neighborhood_size(&self) -> usize {
        self.radius.saturating_mul(2).saturating_add(1)
    }

    /// A random number generator seeded from [`seed`](Config::seed),
    /// or from system entropy if there is no seed.
    pub fn rng(&self) -> Xoshiro256PlusPlus {
        self.seed.map_or_else(
            Xoshiro256PlusPlus::from_entropy,
            Xoshiro256PlusPlus::seed_from_u64,
        )
    }

    /// Check whether the configuration is valid.
    pub fn check(self) -> Result<Self, ConfigError> {
        if self.width == 0 || self.steps == 0 {
            return Err(ConfigError::InvalidSize);
        }

        if self.radius > MAX_RADIUS {
            return Err(ConfigError::RadiusTooLarge(self.radius));
        }

        check_states(self.states)?;

        Ok(self)
    }
}

/// Check that the number of states is in `2..=36`.
pub(crate) const fn check_states(states: State) -> Result<(), ConfigError> {
    if states < 2 || states > MAX_STATES {
        Err(ConfigError::UnsupportedStates(states))
    } else {
        Ok(())
    }
}

/// The configuration of a random rule table.
///
/// See [`RandomTable`](crate::RandomTable).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "clap", derive(Args))]
pub struct TableConfig {
    /// Target fraction of neighborhoods that map to a non-quiescent state.
    ///
    /// If this is [`None`], then `1 - 1/k` is used, so that all `k` states are
    /// equally represented in the table.
    #[cfg_attr(feature = "clap", arg(short, long))]
    pub lambda: Option<f64>,

    /// The quiescent state.
    ///
    /// If this is [`None`], then it is chosen at random.
    #[cfg_attr(feature = "clap", arg(short, long))]
    pub quiescent_state: Option<State>,

    /// Whether every uniform neighborhood maps to its own state.
    ///
    /// For example, `111` maps to `1` and `222` maps to `2`.
    #[cfg_attr(feature = "clap", arg(short = 'S', long))]
    pub strong_quiescence: bool,

    /// Whether every neighborhood maps to the same state as its mirror image.
    ///
    /// For example, `001` and `100` map to the same state.
    #[cfg_attr(feature = "clap", arg(short = 'I', long))]
    pub isotropic: bool,
}

impl TableConfig {
    /// Create a new configuration with no constraints.
    #[inline]
    pub const fn new() -> Self {
        Self {
            lambda: None,
            quiescent_state: None,
            strong_quiescence: false,
            isotropic: false,
        }
    }

    /// Set the target lambda.
    ///
    /// See [`lambda`](TableConfig::lambda) for more details.
    #[inline]
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = Some(lambda);
        self
    }

    /// Set the quiescent state.
    #[inline]
    pub const fn with_quiescent_state(mut self, quiescent_state: State) -> Self {
        self.quiescent_state = Some(quiescent_state);
        self
    }

    /// Enable strong quiescence.
    ///
    /// See [`strong_quiescence`](TableConfig::strong_quiescence) for more details.
    #[inline]
    pub const fn with_strong_quiescence(mut self) -> Self {
        self.strong_quiescence = true;
        self
    }

    /// Enable isotropy.
    ///
    /// See [`isotropic`](TableConfig::isotropic) for more details.
    #[inline]
    pub const fn with_isotropy(mut self) -> Self {
        self.isotropic = true;
        self
    }

    /// The enabled constraints.
    pub fn constraints(&self) -> BitFlags<Constraint> {
        let mut constraints = BitFlags::empty();
        if self.strong_quiescence {
            constraints |= Constraint::StrongQuiescence;
        }
        if self.isotropic {
            constraints |= Constraint::Isotropic;
        }
        constraints
    }

    /// The target lambda for an automaton with the given number of states.
    pub fn lambda_for(&self, states: State) -> f64 {
        self.lambda.unwrap_or(1.0 - 1.0 / states as f64)
    }

    /// Check whether the configuration is valid for an automaton with the
    /// given number of states.
    pub fn check(&self, states: State) -> Result<(), ConfigError> {
        check_states(states)?;

        if let Some(state) = self.quiescent_state {
            if state >= states {
                return Err(ConfigError::InvalidQuiescentState { state, states });
            }
        }

        if self
            .lambda
            .is_some_and(|lambda| !(0.0..=1.0).contains(&lambda))
        {
            return Err(ConfigError::InvalidLambda);
        }

        Ok(())
    }
}
