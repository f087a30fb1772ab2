//! Terms command implementation.

use anyhow::Result;
use mqlib_adapter_dwave::qubo_terms;

use super::common::load_instance;

/// Execute the terms command: print the adapter triples as JSON.
pub fn execute(input: &str) -> Result<()> {
    let instance = load_instance(input)?;
    let triples: Vec<(usize, usize, f64)> = qubo_terms(&instance)
        .into_iter()
        .map(|t| (t.i, t.j, t.w))
        .collect();

    println!("{}", serde_json::to_string_pretty(&triples)?);
    Ok(())
}
