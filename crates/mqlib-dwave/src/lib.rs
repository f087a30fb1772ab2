//! # mqlib-dwave
//!
//! Bridge from native MQLib QUBO heuristics to D-Wave's Ocean samplers,
//! which only exist as Python packages. The crate embeds a Python
//! interpreter, hands a QUBO in triple form to the `mqlib_dwave` helper
//! module and brings the best sample back.
//!
//! ## Architecture
//!
//! ```text
//!                  ┌──────────────────────┐
//!                  │  DWaveQpu / DWaveSa  │   (mqlib-adapter-dwave)
//!                  └──────────┬───────────┘
//!                             │ &[QuboTerm], SolverBackend, config
//!                  ┌──────────┴───────────┐
//!                  │     mqlib-dwave      │
//!                  │                      │
//!                  │  run_dwave_solver    │ ← uniform DWaveResult, no unwinding
//!                  │  solve_qubo          │ ← marshalling + typed errors
//!                  │  runtime             │ ← one interpreter per process, GIL scope
//!                  └──────────┬───────────┘
//!                             │ pyo3
//!               ┌─────────────┴─────────────┐
//!               │  python/mqlib_dwave.py    │
//!               │  dimod + dwave-system     │
//!               └───────────────────────────┘
//! ```
//!
//! ## Build switch
//!
//! The `dwave` feature (on by default) links the interpreter. Without it the
//! same API is compiled and every solve fails with
//! [`NOT_COMPILED_MESSAGE`], so callers never branch on the build.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mqlib_dwave::{QuboTerm, SolverBackend, run_dwave_solver};
//!
//! let terms = [
//!     QuboTerm::diagonal(0, 1.0),
//!     QuboTerm::diagonal(1, 1.0),
//!     QuboTerm::off_diagonal(0, 1, 1.0),
//! ];
//!
//! let res = run_dwave_solver(&terms, SolverBackend::Sa, "");
//! match res.error {
//!     Some(msg) => eprintln!("solve failed: {msg}"),
//!     None => println!("{:?} -> {}", res.best_sample, res.best_weight),
//! }
//! ```

pub mod backend;
pub mod bridge;
pub mod config;
pub mod error;
pub mod runtime;
pub mod solver;
pub mod term;

pub use backend::SolverBackend;
pub use bridge::{run_dwave_solver, solve_qubo};
pub use config::{ConfigError, ConfigLocator, DWaveConfig, QpuSettings, SaSettings};
pub use error::{BridgeError, BridgeResult, NOT_COMPILED_MESSAGE, UNKNOWN_MESSAGE};
pub use runtime::{HELPER_DIR, RuntimeInfo, ensure_runtime, runtime_info, venv_site_packages};
pub use solver::{OceanBridge, QuboSolver};
pub use term::{DWaveResult, QuboTerm, Sample, score_terms};

#[cfg(feature = "dwave")]
pub use pyo3;

/// Whether the embedded-interpreter bridge was compiled in.
pub const fn is_enabled() -> bool {
    cfg!(feature = "dwave")
}
