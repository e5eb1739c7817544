mod experiment;
mod targets;

use experiment::{DisplayMode, ExperimentConfig};

use evoprop::logging::{EvolutionLogger, ReportingLevel};
use evoprop::networks::sampling::{sample_targets, Grid};
use evoprop::trials::lattice;
use evoprop::Population;

use log::info;
use rand::{rngs::StdRng, SeedableRng};

use std::error::Error;
use std::{env, fs};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config: ExperimentConfig = match env::args().nth(1) {
        Some(path) => ron::from_str(&fs::read_to_string(path)?)?,
        None => ExperimentConfig::default(),
    };

    let population = evolve(&config)?;
    let champion = population.champion();
    println!(
        "{} after {} generations: error {:.5}, mean error {:.5}",
        config.target,
        population.generation(),
        champion.error(),
        champion.mean_error()
    );
    println!("{}", champion);

    let target = config.target;
    let values = match config.display {
        DisplayMode::Output => champion.clone().sample_outputs(&config.grid)?,
        DisplayMode::Error => champion
            .clone()
            .sample_errors(&config.grid, |x| target.label(x))?,
        DisplayMode::Test => sample_targets(&config.grid, |x| target.label(x)),
    };
    print!("{}", format_grid(&config.grid, &values, 2));
    Ok(())
}

/// Evolves a population on the configured target, refining the
/// champion with backpropagation every `backprop_interval` generations.
fn evolve(config: &ExperimentConfig) -> Result<Population, Box<dyn Error>> {
    if config.network.input_count.get() != 2 {
        return Err("surface targets take exactly two inputs".into());
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut population =
        Population::new(config.population.clone(), config.network.clone(), &mut rng);
    let target = config.target;
    let inputs = lattice(
        2,
        config.lattice.low,
        config.lattice.high,
        config.lattice.spacing,
    );
    population.create_trials(inputs, |x| target.label(x))?;

    let mut mutation = config.mutation;
    let mut logger = EvolutionLogger::new(ReportingLevel::NoNetworks);
    let mut last_error = f64::INFINITY;
    for generation in 1..=config.generations {
        let error = population.run_generation(&mutation, &mut rng)?;
        mutation.anneal(error == last_error);
        last_error = error;

        if config.backprop_interval > 0 && generation % config.backprop_interval == 0 {
            population.train_backpropagation(config.backprop_epochs)?;
        }
        if config.report_interval > 0 && generation % config.report_interval == 0 {
            logger.log(
                &population,
                &|n| [n.error(), n.mean_error()],
                ["error", "mean_error"],
            );
            if let Some(log) = logger.last() {
                info!("{}", log);
            }
        }
    }
    Ok(population)
}

/// Lays out a row-major matrix sampled over `grid`, with the
/// first axis values as a header row and the second axis
/// values as a header column.
fn format_grid(grid: &Grid, values: &[Vec<f64>], decimals: usize) -> String {
    let width = decimals + 4;
    let mut out = format!("{:>width$}", "", width = width);
    for c in 0..grid.columns {
        out += &format!(
            " {:>width$.decimals$}",
            grid.point(0, c)[0],
            width = width,
            decimals = decimals
        );
    }
    out.push('\n');
    for (r, row) in values.iter().enumerate() {
        out += &format!(
            "{:>width$.decimals$}",
            grid.point(r, 0)[1],
            width = width,
            decimals = decimals
        );
        for value in row {
            out += &format!(
                " {:>width$.decimals$}",
                value,
                width = width,
                decimals = decimals
            );
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::TargetFunction;
    use evoprop::PopulationConfig;
    use std::num::NonZeroUsize;

    fn small_experiment() -> ExperimentConfig {
        let default = ExperimentConfig::default();
        ExperimentConfig {
            population: PopulationConfig {
                size: NonZeroUsize::new(6).unwrap(),
                ..PopulationConfig::zero()
            },
            network: evoprop::networks::NetworkConfig {
                hidden_sizes: vec![4],
                ..default.network.clone()
            },
            target: TargetFunction::Xy,
            lattice: experiment::LatticeConfig {
                low: -1.0,
                high: 1.0,
                spacing: 0.5,
            },
            generations: 12,
            backprop_interval: 4,
            backprop_epochs: 3,
            report_interval: 5,
            ..default
        }
    }

    #[test]
    fn evolve_runs_all_generations() {
        let population = evolve(&small_experiment()).unwrap();
        assert_eq!(population.generation(), 12);
        assert_eq!(population.networks().len(), 6);
        assert_eq!(population.trials().len(), 25);
    }

    #[test]
    fn evolve_is_reproducible() {
        let a = evolve(&small_experiment()).unwrap();
        let b = evolve(&small_experiment()).unwrap();
        assert_eq!(a.champion().error(), b.champion().error());
    }

    #[test]
    fn evolve_rejects_other_input_counts() {
        let mut config = small_experiment();
        config.network.input_count = NonZeroUsize::new(3).unwrap();
        assert!(evolve(&config).is_err());
    }

    #[test]
    fn grid_layout() {
        let grid = Grid {
            axis1: (1.0, -1.0),
            axis2: (0.0, 1.0),
            rows: 2,
            columns: 3,
        };
        let text = format_grid(&grid, &[vec![0.5, 0.25, 0.0], vec![-1.0, 1.0, 0.126]], 2);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "         1.00   0.00  -1.00");
        assert_eq!(lines[1], "  0.00   0.50   0.25   0.00");
        assert_eq!(lines[2], "  1.00  -1.00   1.00   0.13");
    }
}
