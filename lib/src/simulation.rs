use crate::{
    config::{Config, InitialState},
    error::ConfigError,
    evolve::{evolve, Grid},
    init::{init_random, init_simple},
};
use ca_rules1d::{Rule, RuleError, State};
use rand::Rng;

/// A simulation: a configuration, a rule, and an initial row.
///
/// # Example
///
/// ```
/// use ca1d_lib::{parse_rule, Config, Simulation};
///
/// // Rule 30 on a row of 11 cells, for 6 generations.
/// let config = Config::new(11, 6);
/// let simulation = Simulation::new(config, parse_rule("W30").unwrap()).unwrap();
/// let grid = simulation.run().unwrap();
///
/// assert_eq!(grid.generations(), 6);
/// assert_eq!(grid.row(0).unwrap(), &[0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    /// The configuration.
    config: Config,

    /// The rule.
    rule: Rule,

    /// The initial row.
    initial: Vec<State>,
}

impl Simulation {
    /// Create a new simulation.
    ///
    /// A random initial row is drawn from [`Config::rng`].
    pub fn new(config: Config, rule: Rule) -> Result<Self, ConfigError> {
        let mut rng = config.rng();
        Self::with_rng(config, rule, &mut rng)
    }

    /// Create a new simulation, drawing a random initial row from the given
    /// random number generator.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid, or if the rule does not fit the
    /// number of states and the radius, e.g. a totalistic rule number with too
    /// many digits.
    pub fn with_rng<R: Rng + ?Sized>(
        config: Config,
        rule: Rule,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        let config = config.check()?;
        rule.check(config.states, config.neighborhood_size())?;

        let initial = match config.init {
            InitialState::Simple => init_simple(config.width, 1),
            InitialState::Random => init_random(config.width, config.states, rng),
        };

        log::debug!(
            "New simulation: rule {}, {} states, radius {}, width {}, {} steps, {} initial row",
            rule,
            config.states,
            config.radius,
            config.width,
            config.steps,
            config.init
        );

        Ok(Self {
            config,
            rule,
            initial,
        })
    }

    /// Replace the initial row.
    ///
    /// # Errors
    ///
    /// Fails if the row does not have the configured width, or if some cell is
    /// not a valid state.
    pub fn with_initial_row(mut self, row: Vec<State>) -> Result<Self, ConfigError> {
        if row.len() != self.config.width || row.iter().any(|&cell| cell >= self.config.states) {
            return Err(ConfigError::InvalidInitialState);
        }
        self.initial = row;
        Ok(self)
    }

    /// The configuration.
    #[inline]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The rule.
    #[inline]
    pub const fn rule(&self) -> &Rule {
        &self.rule
    }

    /// The initial row.
    #[inline]
    pub fn initial_row(&self) -> &[State] {
        &self.initial
    }

    /// Run the simulation.
    ///
    /// The same simulation can be run any number of times, always giving the
    /// same grid.
    pub fn run(&self) -> Result<Grid, RuleError> {
        let grid = evolve(&self.initial, self.config.steps, &self.rule, self.config.radius)?;
        log::debug!("Computed {} generations", grid.generations());
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ca_rules1d::RuleTable;

    #[test]
    fn test_simple_initial_row() {
        let simulation = Simulation::new(Config::new(5, 3), Rule::Nks(254)).unwrap();
        assert_eq!(simulation.initial_row(), &[0, 0, 1, 0, 0]);

        let grid = simulation.run().unwrap();
        assert_eq!(grid.row(2).unwrap(), &[1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_random_initial_row() {
        let config = Config::new(50, 3)
            .with_states(3)
            .with_init(InitialState::Random)
            .with_seed(11);
        let rule = Rule::Totalistic {
            states: 3,
            number: 777,
        };
        let a = Simulation::new(config.clone(), rule.clone()).unwrap();
        let b = Simulation::new(config, rule).unwrap();
        assert_eq!(a.initial_row(), b.initial_row());
        assert!(a.initial_row().iter().all(|&cell| cell < 3));
        assert_eq!(a.run().unwrap(), b.run().unwrap());
    }

    #[test]
    fn test_invalid_rule() {
        let config = Config::new(5, 3).with_states(3);
        assert_eq!(
            Simulation::new(
                config.clone(),
                Rule::Totalistic {
                    states: 3,
                    number: 2187,
                },
            )
            .unwrap_err(),
            ConfigError::InvalidRule(RuleError::OutOfRange {
                number: 2187,
                width: 7
            })
        );
        assert!(matches!(
            Simulation::new(config, Rule::Nks(30)),
            Err(ConfigError::InvalidRule(RuleError::StatesMismatch { .. }))
        ));
        assert_eq!(
            Simulation::new(Config::new(0, 3), Rule::Nks(30)).unwrap_err(),
            ConfigError::InvalidSize
        );
    }

    #[test]
    fn test_radius_too_large() {
        let radius = usize::MAX / 2 + 1;
        assert_eq!(
            Simulation::new(Config::new(10, 3).with_radius(radius), Rule::Nks(30)).unwrap_err(),
            ConfigError::RadiusTooLarge(radius)
        );

        let rule = Rule::Totalistic {
            states: 3,
            number: 0,
        };
        let config = Config::new(10, 3).with_states(3).with_radius(100_000_000);
        assert_eq!(
            Simulation::new(config, rule).unwrap_err(),
            ConfigError::RadiusTooLarge(100_000_000)
        );
    }

    #[test]
    fn test_with_initial_row() {
        let simulation = Simulation::new(Config::new(3, 2), Rule::Nks(30)).unwrap();
        let simulation = simulation.with_initial_row(vec![1, 0, 0]).unwrap();
        assert_eq!(simulation.run().unwrap().row(1).unwrap(), &[1, 1, 1]);

        assert_eq!(
            simulation.clone().with_initial_row(vec![0, 0]).unwrap_err(),
            ConfigError::InvalidInitialState
        );
        assert_eq!(
            simulation.with_initial_row(vec![0, 2, 0]).unwrap_err(),
            ConfigError::InvalidInitialState
        );
    }

    #[test]
    fn test_run_fails_on_missing_neighborhood() {
        let table: RuleTable = [("000", 0)].into_iter().collect();
        let simulation = Simulation::new(Config::new(5, 3), Rule::from(table)).unwrap();
        assert_eq!(
            simulation.run(),
            Err(RuleError::MissingNeighborhood("001".to_string()))
        );
    }
}
