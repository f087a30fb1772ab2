//! The single crossing point into the Python helper.
//!
//! ```text
//!   &[QuboTerm] ──→ list[tuple[int, int, float]] ─┐
//!   SolverBackend ──→ "qpu" | "sa" ───────────────┼──→ mqlib_dwave.solve_qubo(...)
//!   config locator ──→ str | None ────────────────┘            │
//!                                                              ▼
//!   Sample { assignment, weight } ←── (list[int], float) ──────┘
//! ```
//!
//! [`solve_qubo`] is the typed core. [`run_dwave_solver`] wraps it into the
//! uniform [`DWaveResult`] shape and contains panics, so nothing unwinds out
//! of the bridge and nothing is printed.

use std::panic::{self, AssertUnwindSafe};

#[cfg(feature = "dwave")]
use pyo3::prelude::*;
#[cfg(feature = "dwave")]
use pyo3::types::PyList;
use tracing::{debug, instrument};

use crate::backend::SolverBackend;
use crate::error::{BridgeError, BridgeResult};
use crate::term::{DWaveResult, QuboTerm, Sample};

#[cfg(feature = "dwave")]
use crate::runtime::{self, HELPER_ENTRY_POINT, HELPER_MODULE};

/// Solve `terms` with the helper and return the typed sample.
///
/// `config` is the path of a JSON configuration document, or `None` to let
/// the helper fall back to its defaults and environment. The terms are not
/// re-validated.
#[instrument(skip(terms), fields(terms = terms.len()))]
pub fn solve_qubo(
    terms: &[QuboTerm],
    backend: SolverBackend,
    config: Option<&str>,
) -> BridgeResult<Sample> {
    #[cfg(feature = "dwave")]
    {
        runtime::with_gil(|py| call_helper(py, terms, backend, config))
    }

    #[cfg(not(feature = "dwave"))]
    {
        let _ = (terms, backend, config);
        Err(BridgeError::NotCompiled)
    }
}

/// Solve `terms` and coerce every outcome into a [`DWaveResult`].
///
/// An empty `config_locator` means "no configuration document". With the
/// `dwave` feature, an empty `terms` slice returns an empty sample with no
/// error and never starts the interpreter.
pub fn run_dwave_solver(
    terms: &[QuboTerm],
    backend: SolverBackend,
    config_locator: &str,
) -> DWaveResult {
    if cfg!(feature = "dwave") && terms.is_empty() {
        debug!("{} called with no terms", backend);
        return DWaveResult::default();
    }

    let config = (!config_locator.is_empty()).then_some(config_locator);

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| solve_qubo(terms, backend, config)))
        .unwrap_or_else(|payload| Err(BridgeError::from_panic(payload.as_ref())));

    match outcome {
        Ok(sample) => {
            debug!(
                "{} sample: {} variables, weight {}",
                backend,
                sample.assignment.len(),
                sample.weight
            );
            DWaveResult::from(sample)
        }
        Err(err) => {
            debug!("{} solve failed: {}", backend, err);
            DWaveResult::failed(err.to_string())
        }
    }
}

#[cfg(feature = "dwave")]
fn call_helper(
    py: Python<'_>,
    terms: &[QuboTerm],
    backend: SolverBackend,
    config: Option<&str>,
) -> BridgeResult<Sample> {
    let module = py
        .import(HELPER_MODULE)
        .map_err(|e| BridgeError::Import(exception_message(py, &e)))?;
    let entry = module
        .getattr(HELPER_ENTRY_POINT)
        .map_err(|e| BridgeError::Import(exception_message(py, &e)))?;

    let py_terms = PyList::new(py, terms.iter().map(|t| (t.i, t.j, t.w)))
        .map_err(|e| BridgeError::Marshal(exception_message(py, &e)))?;

    let result = entry
        .call1((py_terms, backend.as_str(), config))
        .map_err(|e| match exception_message(py, &e) {
            msg if msg.is_empty() => BridgeError::Unknown,
            msg => BridgeError::HelperRaised(msg),
        })?;

    unmarshal(py, &result)
}

#[cfg(feature = "dwave")]
fn unmarshal(py: Python<'_>, result: &Bound<'_, PyAny>) -> BridgeResult<Sample> {
    let marshal = |e: PyErr| BridgeError::Marshal(exception_message(py, &e));

    let len = result.len().map_err(marshal)?;
    if len != 2 {
        return Err(BridgeError::Marshal(format!(
            "{HELPER_ENTRY_POINT} must return (assignment, weight), got a sequence of length {len}"
        )));
    }

    let raw = result
        .get_item(0)
        .and_then(|item| item.extract::<Vec<i64>>().map_err(Into::into))
        .map_err(marshal)?;
    let weight = result
        .get_item(1)
        .and_then(|item| item.extract::<f64>().map_err(Into::into))
        .map_err(marshal)?;

    let assignment = raw
        .iter()
        .enumerate()
        .map(|(index, &value)| match value {
            0 | 1 => Ok(value as u8),
            other => Err(BridgeError::Marshal(format!(
                "assignment entry {index} is {other}, expected 0 or 1"
            ))),
        })
        .collect::<BridgeResult<Vec<u8>>>()?;

    if !weight.is_finite() {
        return Err(BridgeError::Marshal(format!(
            "weight must be finite, got {weight}"
        )));
    }

    Ok(Sample { assignment, weight })
}

/// `str(exception)` for a Python error.
#[cfg(feature = "dwave")]
fn exception_message(py: Python<'_>, err: &PyErr) -> String {
    err.value(py).to_string()
}
