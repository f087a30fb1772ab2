//! Run command implementation.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use mqlib_adapter_dwave::{AdapterOutcome, DWaveQpu, DWaveSa};
use mqlib_dwave::{ConfigLocator, DWaveConfig, OceanBridge};
use mqlib_qubo::{QuboInstance, QuboSolution};

use super::common::{
    Heuristic, ResultRow, already_recorded, append_error, append_result, graph_name,
    load_instance,
};

/// Options of the run command.
#[derive(Debug, Clone)]
pub struct RunOptions<'a> {
    pub runtime_limit: f64,
    pub validate: bool,
    pub config: Option<&'a str>,
    pub results_file: Option<&'a str>,
    pub errors_file: Option<&'a str>,
    pub skip_existing: bool,
    pub seed: u64,
}

/// Execute the run command.
pub fn execute(input: &str, heuristic: &str, opts: &RunOptions<'_>) -> Result<()> {
    let heuristic = Heuristic::parse(heuristic)?;
    let graph = graph_name(input);

    if let (true, Some(path)) = (opts.skip_existing, opts.results_file) {
        if already_recorded(Path::new(path), &graph)? {
            println!(
                "{} Skipping {} (already in {})",
                style("•").dim(),
                style(&graph).green(),
                path
            );
            return Ok(());
        }
    }

    println!(
        "{} Running {} on {}",
        style("→").cyan().bold(),
        style(heuristic.name()).yellow(),
        style(input).green(),
    );

    let instance = load_instance(input)?;
    println!(
        "  Loaded: {} variables, {} quadratic terms",
        instance.size(),
        instance.edge_count()
    );

    let locator = match opts.config {
        Some(path) => {
            let locator = ConfigLocator::from_arg(path);
            let cfg = DWaveConfig::load(&locator)
                .with_context(|| format!("Invalid D-Wave configuration: {path}"))?;
            match heuristic {
                Heuristic::Qpu => println!(
                    "  Config: solver {}, {} reads, anneal time {}",
                    cfg.dwave.qpu.solver, cfg.dwave.qpu.num_reads, cfg.dwave.qpu.anneal_time
                ),
                Heuristic::Sa => println!(
                    "  Config: {} reads, {} sweeps",
                    cfg.dwave.sa.num_reads, cfg.dwave.sa.num_sweeps
                ),
            }
            locator
        }
        None => ConfigLocator::Defaults,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} [{elapsed}]")
            .context("Invalid progress template")?,
    );
    spinner.set_message(format!("Waiting for {}...", heuristic.name()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let (outcome, best) = solve(
        heuristic,
        &instance,
        opts.runtime_limit,
        opts.validate,
        &locator.as_bridge_arg(),
    );
    spinner.finish_and_clear();
    info!("{}: {}", heuristic.name(), outcome);

    let Some(best) = best else {
        let message = format!("{} reported no solution ({})", heuristic.name(), outcome);
        if let Some(path) = opts.errors_file {
            append_error(Path::new(path), &graph, &message)?;
        }
        anyhow::bail!(message);
    };

    println!(
        "{} Best objective: {}",
        style("✓").green().bold(),
        style(best.weight()).bold()
    );
    println!("  Assignment: {} of {} variables set", best.ones(), instance.size());

    if let Some(path) = opts.results_file {
        let row = ResultRow {
            timestamp: chrono::Utc::now().timestamp_millis() as f64 / 1000.0,
            graph: &graph,
            heuristic: heuristic.code(),
            seed: opts.seed,
            limit: opts.runtime_limit,
            objective: best.weight(),
        };
        append_result(Path::new(path), &row)?;
        println!("  Result appended to {}", style(path).green());
    }

    Ok(())
}

fn solve(
    heuristic: Heuristic,
    instance: &QuboInstance,
    runtime_limit: f64,
    validate: bool,
    config_locator: &str,
) -> (AdapterOutcome, Option<QuboSolution>) {
    match heuristic {
        Heuristic::Qpu => {
            let qpu = DWaveQpu::with_config(
                instance,
                runtime_limit,
                validate,
                None,
                &OceanBridge,
                config_locator,
            );
            (qpu.outcome().clone(), qpu.heuristic().best().cloned())
        }
        Heuristic::Sa => {
            let sa = DWaveSa::with_config(
                instance,
                runtime_limit,
                validate,
                None,
                &OceanBridge,
                config_locator,
            );
            (sa.outcome().clone(), sa.heuristic().best().cloned())
        }
    }
}
