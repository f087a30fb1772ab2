//! Heuristic backed by a D-Wave quantum annealer.

use std::sync::Arc;

use mqlib_dwave::{OceanBridge, QuboSolver, QuboTerm, SolverBackend};
use mqlib_qubo::{QuboCallback, QuboHeuristic, QuboInstance};

use crate::attempt::{AdapterKind, AdapterOutcome, Attempt};

/// Solves the instance on the QPU during construction.
///
/// The attempt reports at most one solution. Failures are written as a
/// single line to stderr and leave the heuristic without a solution.
#[derive(Debug)]
pub struct DWaveQpu<'a> {
    attempt: Attempt<'a>,
}

impl<'a> DWaveQpu<'a> {
    /// Name used in diagnostics and result files.
    pub const NAME: &'static str = "DWaveQPU";

    const KIND: AdapterKind = AdapterKind {
        name: Self::NAME,
        backend: SolverBackend::Qpu,
    };

    /// Run one attempt through the embedded Ocean helper with its default
    /// configuration lookup.
    pub fn new(
        instance: &'a QuboInstance,
        runtime_limit: f64,
        validation: bool,
        callback: Option<Arc<dyn QuboCallback>>,
    ) -> Self {
        Self::with_solver(instance, runtime_limit, validation, callback, &OceanBridge)
    }

    /// Run one attempt through `solver`.
    pub fn with_solver<S: QuboSolver + ?Sized>(
        instance: &'a QuboInstance,
        runtime_limit: f64,
        validation: bool,
        callback: Option<Arc<dyn QuboCallback>>,
        solver: &S,
    ) -> Self {
        Self::with_config(instance, runtime_limit, validation, callback, solver, "")
    }

    /// Run one attempt through `solver`, handing it `config_locator`.
    pub fn with_config<S: QuboSolver + ?Sized>(
        instance: &'a QuboInstance,
        runtime_limit: f64,
        validation: bool,
        callback: Option<Arc<dyn QuboCallback>>,
        solver: &S,
        config_locator: &str,
    ) -> Self {
        let attempt = Self::KIND.run(
            instance,
            runtime_limit,
            validation,
            callback,
            solver,
            config_locator,
        );
        Self { attempt }
    }

    /// The heuristic base the solution was reported through.
    pub fn heuristic(&self) -> &QuboHeuristic<'a> {
        &self.attempt.heuristic
    }

    /// The triples handed to the solver.
    pub fn terms(&self) -> &[QuboTerm] {
        &self.attempt.terms
    }

    pub fn outcome(&self) -> &AdapterOutcome {
        &self.attempt.outcome
    }
}

#[cfg(test)]
mod tests {
    use mqlib_dwave::DWaveResult;

    use super::*;

    #[test]
    fn test_qpu_backend_is_used() {
        let qi = QuboInstance::from_terms(1, [(0, 0, 3.5)]).unwrap();
        let solver = |terms: &[QuboTerm], backend: SolverBackend, cfg: &str| {
            assert_eq!(backend, SolverBackend::Qpu);
            assert!(cfg.is_empty());
            assert_eq!(terms, &[QuboTerm::diagonal(0, 3.5)]);
            DWaveResult {
                best_sample: vec![1],
                best_weight: 3.5,
                error: None,
            }
        };

        let qpu = DWaveQpu::with_solver(&qi, 1.0, false, None, &solver);
        assert_eq!(qpu.outcome(), &AdapterOutcome::Reported { weight: 3.5 });
        assert_eq!(qpu.heuristic().best().map(|s| s.assignment()), Some(&[1u8][..]));
    }

    #[test]
    fn test_qpu_error_leaves_no_solution() {
        let qi = QuboInstance::from_terms(1, [(0, 0, 3.5)]).unwrap();
        let solver = |_: &[QuboTerm], _: SolverBackend, _: &str| {
            DWaveResult::failed("Solver Advantage2_system1.8 unavailable")
        };

        let qpu = DWaveQpu::with_solver(&qi, 1.0, false, None, &solver);
        assert!(!qpu.outcome().is_reported());
        assert!(qpu.heuristic().best().is_none());
        assert_eq!(qpu.terms().len(), 1);
    }
}
