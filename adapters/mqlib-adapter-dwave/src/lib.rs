//! D-Wave heuristics for MQLib
//!
//! Two heuristics that hand a [`QuboInstance`](mqlib_qubo::QuboInstance) to
//! D-Wave's Ocean samplers through [`mqlib_dwave`]:
//!
//! | Heuristic    | Backend | Sampler                        |
//! |--------------|---------|--------------------------------|
//! | [`DWaveQpu`] | `qpu`   | `EmbeddingComposite(DWaveSampler)` |
//! | [`DWaveSa`]  | `sa`    | `SimulatedAnnealingSampler`    |
//!
//! Constructing an adapter runs the whole attempt. A successful sample is
//! re-scored against the instance and reported to the heuristic base exactly
//! once; any failure prints one diagnostic line to stderr and reports
//! nothing.
//!
//! # Example
//!
//! ```no_run
//! use mqlib_adapter_dwave::DWaveSa;
//! use mqlib_qubo::QuboInstance;
//!
//! let qi = QuboInstance::from_terms(2, [(0, 0, 1.0), (1, 1, 1.0), (0, 1, 1.0)])?;
//! let sa = DWaveSa::new(&qi, 10.0, false, None);
//!
//! if let Some(best) = sa.heuristic().best() {
//!     println!("{best}");
//! }
//! # Ok::<(), mqlib_qubo::QuboError>(())
//! ```

mod attempt;
mod qpu;
mod sa;
mod terms;

pub use attempt::AdapterOutcome;
pub use qpu::DWaveQpu;
pub use sa::DWaveSa;
pub use terms::qubo_terms;
