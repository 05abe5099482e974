mod args;
mod render;

use crate::args::{Cli, Command};
use ca1d_lib::{RandomTable, Simulation};
use color_eyre::Result;
use crossterm::tty::IsTty;
use std::io::{stdout, BufWriter};

fn main() -> Result<()> {
    env_logger::init();

    let args = Cli::parse_and_validate();
    let color = !args.plain && stdout().is_tty();

    let (simulation, label) = match args.command {
        Command::Rule(args) => {
            let label = format!(
                "{}, {} states, radius {}",
                args.rule, args.config.states, args.config.radius
            );
            (Simulation::new(args.config, args.rule)?, label)
        }
        Command::Random(args) => {
            let mut rng = args.config.rng();
            let random_table = RandomTable::generate(
                args.config.states,
                args.config.radius,
                &args.table,
                &mut rng,
            )?;

            println!("Actual lambda: {:.4}", random_table.actual_lambda);
            println!("Quiescent state: {}", random_table.quiescent_state);

            let label = format!(
                "Random table, {} states, radius {}, lambda {:.4}",
                args.config.states, args.config.radius, random_table.actual_lambda
            );
            let rule = random_table.rule();
            (Simulation::with_rng(args.config, rule, &mut rng)?, label)
        }
    };

    let grid = simulation.run()?;
    log::info!(
        "Rendering {} generations of width {}",
        grid.generations(),
        grid.width()
    );

    let mut out = BufWriter::new(stdout().lock());
    render::render(
        &mut out,
        &grid,
        simulation.config().states,
        &label,
        color,
    )?;

    Ok(())
}
