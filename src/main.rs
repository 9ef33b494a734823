use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use gridcolor::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridcolor")]
#[command(about = "Random grid graphs: component coloring and percolation estimates", long_about = None)]
struct Cli {
    /// Deterministic base seed (defaults to the wall clock, in seconds)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one random grid, color its components and write a Graphviz file
    #[command(alias = "1")]
    Color {
        /// Grid side length
        size: usize,
        /// Include down-right diagonal edges (true/false)
        #[arg(action = ArgAction::Set)]
        diagonal: bool,
        /// Edge probability in [0, 1]
        probability: f64,
        /// Pin vertices to their grid positions (true/false)
        #[arg(action = ArgAction::Set)]
        pin: bool,
        /// Output file
        #[arg(long, short, default_value = "grid.dot")]
        output: PathBuf,
    },
    /// Mean number of connected components over many random grids
    #[command(alias = "2")]
    Average {
        /// Grid side length
        size: usize,
        /// Include down-right diagonal edges (true/false)
        #[arg(action = ArgAction::Set)]
        diagonal: bool,
        /// Edge probability in [0, 1]
        probability: f64,
        /// Number of sampled grids
        #[arg(long, default_value_t = SearchConfig::default().average_trials)]
        trials: usize,
    },
    /// Edge probability whose mean component count matches a target
    #[command(alias = "3")]
    Optimal {
        /// Grid side length
        size: usize,
        /// Include down-right diagonal edges (true/false)
        #[arg(action = ArgAction::Set)]
        diagonal: bool,
        /// Target number of connected components
        target: usize,
        /// Bisection steps before giving up
        #[arg(long, default_value_t = SearchConfig::default().max_iterations)]
        max_iterations: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = SearchConfig {
        seed: cli.seed,
        ..SearchConfig::default()
    };

    match cli.command {
        Commands::Color {
            size,
            diagonal,
            probability,
            pin,
            output,
        } => {
            let mut rng = trial_rng(cfg.base_seed(), 0);
            let graph = generate_grid(&mut rng, &GridSpec::new(size, probability, diagonal))?;
            let coloring = Coloring::compute(&graph);
            save_graphviz(&output, &graph, coloring.colors(), pin)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("Number of colors: {}", coloring.components());
            println!("Diagram written to {}", output.display());
        }
        Commands::Average {
            size,
            diagonal,
            probability,
            trials,
        } => {
            let mean = expected_components(size, probability, diagonal, trials, cfg.base_seed())?;
            println!(
                "Mean number of connected components for a {size}x{size} grid at p = {probability}: {mean}"
            );
        }
        Commands::Optimal {
            size,
            diagonal,
            target,
            max_iterations,
        } => {
            let cfg = SearchConfig {
                max_iterations,
                ..cfg
            };
            match optimal_probability(size, target, diagonal, &cfg) {
                Ok(est) => println!(
                    "Optimal probability for {target} connected components on a {size}x{size} grid: {} (mean {}, {} iterations)",
                    est.probability, est.mean_components, est.iterations
                ),
                Err(e @ SearchError::NotConverged { .. }) => {
                    eprintln!("Search failed: {e}");
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn numeric_alias_selects_color() {
        let cli = Cli::try_parse_from(["gridcolor", "1", "2", "true", "0.5", "false"]).unwrap();
        match cli.command {
            Commands::Color {
                size,
                diagonal,
                probability,
                pin,
                output,
            } => {
                assert_eq!(size, 2);
                assert!(diagonal);
                assert_eq!(probability, 0.5);
                assert!(!pin);
                assert_eq!(output, PathBuf::from("grid.dot"));
            }
            _ => panic!("expected the color subcommand"),
        }
    }

    #[test]
    fn numeric_aliases_select_average_and_optimal() {
        let cli = Cli::try_parse_from(["gridcolor", "2", "4", "false", "0.25"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Average {
                size: 4,
                diagonal: false,
                trials: 1000,
                ..
            }
        ));

        let cli = Cli::try_parse_from(["gridcolor", "--seed", "9", "3", "3", "true", "5"]).unwrap();
        assert_eq!(cli.seed, Some(9));
        assert!(matches!(
            cli.command,
            Commands::Optimal {
                size: 3,
                diagonal: true,
                target: 5,
                ..
            }
        ));
    }

    #[test]
    fn unknown_subcommand_fails_with_usage() {
        let err = Cli::try_parse_from(["gridcolor", "4"]).err().unwrap();
        assert_ne!(err.exit_code(), 0);
        assert!(err.to_string().contains("Usage"));
    }

    #[test]
    fn missing_arguments_fail() {
        let err = Cli::try_parse_from(["gridcolor", "average", "4", "true"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_ne!(err.exit_code(), 0);

        let err = Cli::try_parse_from(["gridcolor"]).err().unwrap();
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn malformed_boolean_is_rejected() {
        assert!(Cli::try_parse_from(["gridcolor", "color", "2", "yes", "0.5", "false"]).is_err());
    }
}
