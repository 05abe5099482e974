use ca1d_lib::{parse_rule, Config, Rule, TableConfig};
use clap::{error::ErrorKind, Args, CommandFactory, Parser, Subcommand};

/// Simulate one-dimensional cellular automata.
#[derive(Debug, Parser)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print digits instead of colored cells, even on a terminal.
    ///
    /// State `0` is printed as `.`, and other states as `1`-`9` then `A`-`Z`.
    #[arg(long, global = true)]
    pub plain: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a rule given by a rule string.
    Rule(RuleArgs),

    /// Run a randomly generated rule table.
    Random(RandomArgs),
}

#[derive(Debug, Args)]
pub struct RuleArgs {
    /// The rule string, e.g. `W30`, `L120` or `K3,T777`.
    #[arg(value_parser = parse_rule)]
    pub rule: Rule,

    #[command(flatten)]
    pub config: Config,
}

#[derive(Debug, Args)]
pub struct RandomArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub table: TableConfig,
}

impl Cli {
    /// Parse and validate the command line arguments.
    pub fn parse_and_validate() -> Self {
        let args = Self::parse();

        let command = match args.command {
            Command::Rule(RuleArgs { rule, config }) => {
                let config = Self::check_config(config);
                if let Err(e) = rule.check(config.states, config.neighborhood_size()) {
                    Self::command().error(ErrorKind::ValueValidation, e).exit();
                }
                Command::Rule(RuleArgs { rule, config })
            }
            Command::Random(RandomArgs { config, table }) => {
                let config = Self::check_config(config);
                if let Err(e) = table.check(config.states) {
                    Self::command().error(ErrorKind::ValueValidation, e).exit();
                }
                Command::Random(RandomArgs { config, table })
            }
        };

        Self { command, ..args }
    }

    /// Validate the configuration, or exit with an error message.
    fn check_config(config: Config) -> Config {
        match config.check() {
            Ok(config) => config,
            Err(e) => Self::command().error(ErrorKind::ValueValidation, e).exit(),
        }
    }
}
