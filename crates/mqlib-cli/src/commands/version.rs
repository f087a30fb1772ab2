//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - MQLib heuristics on D-Wave annealers",
        style("mqlib-dwave").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  mqlib-qubo           QUBO instances, solutions and heuristic base");
    println!("  mqlib-dwave          Embedded-Python bridge to Ocean samplers");
    println!("  mqlib-adapter-dwave  DWaveQPU and DWaveSA heuristics");
    println!("  mqlib-cli            Command-line interface");
    println!();
    let support = if mqlib_dwave::is_enabled() {
        style("compiled").green()
    } else {
        style("not compiled").red()
    };
    println!("D-Wave support: {support}");
}
