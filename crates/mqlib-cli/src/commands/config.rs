//! Config command implementation.

use anyhow::{Context, Result};
use console::style;
use mqlib_dwave::{ConfigLocator, DWaveConfig};

/// Execute the config command.
pub fn execute(config: Option<&str>) -> Result<()> {
    let locator = config.map(ConfigLocator::from_arg).unwrap_or_default();

    match locator.resolve() {
        Some(path) => eprintln!("{} {}", style("Source:").dim(), path.display()),
        None => eprintln!("{} built-in defaults", style("Source:").dim()),
    }

    let cfg = DWaveConfig::load(&locator).context("Failed to load D-Wave configuration")?;
    println!("{}", serde_json::to_string_pretty(&cfg)?);
    Ok(())
}
