//! Shared helpers for CLI commands.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use mqlib_adapter_dwave::{DWaveQpu, DWaveSa};
use mqlib_qubo::QuboInstance;

/// Load a QUBO instance in MQLib text format.
pub fn load_instance(path: &str) -> Result<QuboInstance> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    QuboInstance::load(path).with_context(|| format!("Failed to load instance: {path}"))
}

/// The D-Wave heuristics selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    Qpu,
    Sa,
}

impl Heuristic {
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "dwave-qpu" | "dwaveqpu" | "qpu" => Ok(Heuristic::Qpu),
            "dwave-sa" | "dwavesa" | "sa" => Ok(Heuristic::Sa),
            other => {
                anyhow::bail!("Unknown heuristic: '{other}'. Available: dwave-sa, dwave-qpu")
            }
        }
    }

    /// Adapter name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Qpu => DWaveQpu::NAME,
            Heuristic::Sa => DWaveSa::NAME,
        }
    }

    /// Heuristic code written to result files.
    pub fn code(self) -> &'static str {
        match self {
            Heuristic::Qpu => "DWAVEQPU",
            Heuristic::Sa => "DWAVESA",
        }
    }
}

/// Graph name recorded for an instance path: its file name.
pub fn graph_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// One row of a results file.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow<'a> {
    pub timestamp: f64,
    pub graph: &'a str,
    pub heuristic: &'a str,
    pub seed: u64,
    pub limit: f64,
    pub objective: f64,
}

pub const RESULTS_HEADER: &str = "timestamp,graphname,heuristic,seed,limit,objective";

/// Append `row` to the CSV file at `path`, writing the header if the file
/// does not exist yet.
pub fn append_result(path: &Path, row: &ResultRow<'_>) -> Result<()> {
    let is_new = !path.is_file();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open results file: {}", path.display()))?;

    if is_new {
        writeln!(file, "{RESULTS_HEADER}")?;
    }
    writeln!(
        file,
        "{:.3},{},{},{},{},{}",
        row.timestamp, row.graph, row.heuristic, row.seed, row.limit, row.objective
    )
    .with_context(|| format!("Failed to write results file: {}", path.display()))?;
    Ok(())
}

/// Whether the results file at `path` already holds a row for `graph`.
///
/// A missing file holds nothing.
pub fn already_recorded(path: &Path, graph: &str) -> Result<bool> {
    if !path.is_file() {
        return Ok(false);
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read results file: {}", path.display()))?;

    Ok(content
        .lines()
        .map(|line| line.split(','))
        .filter_map(|mut fields| Some((fields.next()?, fields.next()?)))
        .any(|(first, name)| first != "timestamp" && name == graph))
}

/// Append `<graph> :: <message>` to the error log at `path`.
pub fn append_error(path: &Path, graph: &str, message: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open errors file: {}", path.display()))?;
    writeln!(file, "{graph} :: {message}")
        .with_context(|| format!("Failed to write errors file: {}", path.display()))?;
    Ok(())
}
