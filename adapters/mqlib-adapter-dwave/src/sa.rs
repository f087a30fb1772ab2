//! Heuristic backed by D-Wave's classical simulated-annealing sampler.

use std::sync::Arc;

use mqlib_dwave::{OceanBridge, QuboSolver, QuboTerm, SolverBackend};
use mqlib_qubo::{QuboCallback, QuboHeuristic, QuboInstance};

use crate::attempt::{AdapterKind, AdapterOutcome, Attempt};

/// Solves the instance with simulated annealing during construction.
#[derive(Debug)]
pub struct DWaveSa<'a> {
    attempt: Attempt<'a>,
}

impl<'a> DWaveSa<'a> {
    pub const NAME: &'static str = "DWaveSA";

    const KIND: AdapterKind = AdapterKind {
        name: Self::NAME,
        backend: SolverBackend::Sa,
    };

    pub fn new(
        instance: &'a QuboInstance,
        runtime_limit: f64,
        validation: bool,
        callback: Option<Arc<dyn QuboCallback>>,
    ) -> Self {
        Self::with_solver(instance, runtime_limit, validation, callback, &OceanBridge)
    }

    pub fn with_solver<S: QuboSolver + ?Sized>(
        instance: &'a QuboInstance,
        runtime_limit: f64,
        validation: bool,
        callback: Option<Arc<dyn QuboCallback>>,
        solver: &S,
    ) -> Self {
        Self::with_config(instance, runtime_limit, validation, callback, solver, "")
    }

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

    pub fn heuristic(&self) -> &QuboHeuristic<'a> {
        &self.attempt.heuristic
    }

    pub fn terms(&self) -> &[QuboTerm] {
        &self.attempt.terms
    }

    pub fn outcome(&self) -> &AdapterOutcome {
        &self.attempt.outcome
    }
}
