//! The solve attempt shared by both adapters.

use std::fmt;
use std::sync::Arc;

use mqlib_dwave::{QuboSolver, QuboTerm, SolverBackend, score_terms};
use mqlib_qubo::{QuboCallback, QuboHeuristic, QuboInstance, QuboSolution};
use tracing::{debug, warn};

use crate::terms::qubo_terms;

/// What a single adapter attempt produced.
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterOutcome {
    /// A solution was reported to the heuristic base.
    Reported { weight: f64 },
    /// The solver returned an error message.
    SolverError(String),
    /// The solver returned neither an error nor a sample.
    NoSample,
    /// The sample came back but could not be reported.
    Rejected(String),
}

impl AdapterOutcome {
    pub fn is_reported(&self) -> bool {
        matches!(self, AdapterOutcome::Reported { .. })
    }
}

impl fmt::Display for AdapterOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdapterOutcome::Reported { weight } => write!(f, "reported weight {weight}"),
            AdapterOutcome::SolverError(msg) => write!(f, "solver error: {msg}"),
            AdapterOutcome::NoSample => write!(f, "no sample returned"),
            AdapterOutcome::Rejected(msg) => write!(f, "rejected: {msg}"),
        }
    }
}

/// State left behind by one completed attempt.
#[derive(Debug)]
pub(crate) struct Attempt<'a> {
    pub(crate) heuristic: QuboHeuristic<'a>,
    pub(crate) terms: Vec<QuboTerm>,
    pub(crate) outcome: AdapterOutcome,
}

/// Which adapter is running.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AdapterKind {
    pub(crate) name: &'static str,
    pub(crate) backend: SolverBackend,
}

impl AdapterKind {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn run<'a, S>(
        self,
        instance: &'a QuboInstance,
        runtime_limit: f64,
        validation: bool,
        callback: Option<Arc<dyn QuboCallback>>,
        solver: &S,
        config_locator: &str,
    ) -> Attempt<'a>
    where
        S: QuboSolver + ?Sized,
    {
        let mut heuristic = QuboHeuristic::new(instance, runtime_limit, validation, callback);
        let terms = qubo_terms(instance);
        debug!(
            "{}: sending {} terms for {} variables to the {} backend",
            self.name,
            terms.len(),
            instance.size(),
            self.backend
        );

        let result = solver.solve(&terms, self.backend, config_locator);

        let outcome = match result.error {
            Some(msg) if !msg.is_empty() => {
                eprintln!("{} error: {}", self.name, msg);
                AdapterOutcome::SolverError(msg)
            }
            _ if result.best_sample.is_empty() => {
                eprintln!("{}: no sample returned", self.name);
                AdapterOutcome::NoSample
            }
            _ => self.submit(
                &mut heuristic,
                &terms,
                result.best_sample,
                result.best_weight,
            ),
        };

        Attempt {
            heuristic,
            terms,
            outcome,
        }
    }

    fn submit(
        self,
        heuristic: &mut QuboHeuristic<'_>,
        terms: &[QuboTerm],
        sample: Vec<u8>,
        helper_weight: f64,
    ) -> AdapterOutcome {
        let n = heuristic.instance().size();
        if sample.len() != n {
            let msg = format!("sample has {} variables, instance has {}", sample.len(), n);
            eprintln!("{} error: {}", self.name, msg);
            return AdapterOutcome::Rejected(msg);
        }

        let rescored = score_terms(terms, &sample);
        if (rescored - helper_weight).abs() > 1e-9 * helper_weight.abs().max(1.0) {
            warn!(
                "{}: solver weight {} disagrees with re-scored weight {}",
                self.name, helper_weight, rescored
            );
        }

        let reported = QuboSolution::new(sample, heuristic.instance())
            .and_then(|solution| {
                let weight = solution.weight();
                heuristic.report(solution).map(|_| weight)
            });

        match reported {
            Ok(weight) => AdapterOutcome::Reported { weight },
            Err(e) => {
                let msg = e.to_string();
                eprintln!("{} error: {}", self.name, msg);
                AdapterOutcome::Rejected(msg)
            }
        }
    }
}
