//! Solver seam used by the heuristic adapters.

use crate::backend::SolverBackend;
use crate::bridge::run_dwave_solver;
use crate::term::{DWaveResult, QuboTerm};

/// Anything that can turn a triple sequence into a [`DWaveResult`].
///
/// Implementations must not panic and must report failures through
/// [`DWaveResult::error`].
pub trait QuboSolver: Send + Sync {
    fn solve(
        &self,
        terms: &[QuboTerm],
        backend: SolverBackend,
        config_locator: &str,
    ) -> DWaveResult;
}

/// The production solver: the embedded Ocean helper.
#[derive(Debug, Clone, Copy, Default)]
pub struct OceanBridge;

impl QuboSolver for OceanBridge {
    fn solve(
        &self,
        terms: &[QuboTerm],
        backend: SolverBackend,
        config_locator: &str,
    ) -> DWaveResult {
        run_dwave_solver(terms, backend, config_locator)
    }
}

impl<F> QuboSolver for F
where
    F: Fn(&[QuboTerm], SolverBackend, &str) -> DWaveResult + Send + Sync,
{
    fn solve(
        &self,
        terms: &[QuboTerm],
        backend: SolverBackend,
        config_locator: &str,
    ) -> DWaveResult {
        self(terms, backend, config_locator)
    }
}
