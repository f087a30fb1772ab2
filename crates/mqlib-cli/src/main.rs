//! MQLib D-Wave Command-Line Interface
//!
//! Runs the D-Wave heuristics on a single MQLib QUBO instance and inspects
//! what would be sent to the samplers.
//!
//! ```text
//! mqlib-dwave run -i data/ferro.txt -H dwave-sa --results-file results.csv
//! mqlib-dwave run -i data/ferro.txt -H dwave-qpu --results-file results.csv \
//!     --errors-file errors.txt --skip-existing
//! mqlib-dwave terms -i data/ferro.txt
//! mqlib-dwave config -c dwave_config.json
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::run::RunOptions;
use commands::{config, run, terms, version};

/// MQLib heuristics on D-Wave's quantum and simulated annealers
#[derive(Parser)]
#[command(name = "mqlib-dwave")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an instance with one D-Wave heuristic
    Run {
        /// QUBO instance in MQLib text format
        #[arg(short, long)]
        input: String,

        /// Heuristic (dwave-sa, dwave-qpu)
        #[arg(short = 'H', long, default_value = "dwave-sa")]
        heuristic: String,

        /// Runtime limit in seconds, recorded with the result
        #[arg(short, long, default_value = "1.0")]
        runtime_limit: f64,

        /// Re-check every reported solution against the instance
        #[arg(long)]
        validate: bool,

        /// D-Wave configuration file (defaults to $MQLIB_DWAVE_CONFIG, then ./dwave_config.json)
        #[arg(short, long)]
        config: Option<String>,

        /// Append the result to this CSV file
        #[arg(long)]
        results_file: Option<String>,

        /// Append a `<graph> :: <message>` line here when no solution is reported
        #[arg(long)]
        errors_file: Option<String>,

        /// Do nothing if the results file already has a row for this graph
        #[arg(long, requires = "results_file")]
        skip_existing: bool,

        /// Seed recorded with the result (the samplers are not seeded)
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Print the QUBO triples the adapters send for an instance
    Terms {
        /// QUBO instance in MQLib text format
        #[arg(short, long)]
        input: String,
    },

    /// Print the effective D-Wave configuration
    Config {
        /// Configuration file (same lookup as `run` when omitted)
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Run {
            input,
            heuristic,
            runtime_limit,
            validate,
            config,
            results_file,
            errors_file,
            skip_existing,
            seed,
        } => run::execute(
            &input,
            &heuristic,
            &RunOptions {
                runtime_limit,
                validate,
                config: config.as_deref(),
                results_file: results_file.as_deref(),
                errors_file: errors_file.as_deref(),
                skip_existing,
                seed,
            },
        ),

        Commands::Terms { input } => terms::execute(&input),

        Commands::Config { config } => config::execute(config.as_deref()),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
