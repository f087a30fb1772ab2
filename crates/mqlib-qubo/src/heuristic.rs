//! Heuristic base and solution reporting.
//!
//! Every heuristic owns a [`QuboHeuristic`] and pushes candidate solutions
//! through [`QuboHeuristic::report`]. The base keeps the incumbent, the
//! improvement history, and forwards improvements to an optional callback.
//! It does not stop the heuristic; `report` only tells the caller whether the
//! runtime limit has been reached.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{QuboError, QuboResult};
use crate::instance::QuboInstance;
use crate::solution::QuboSolution;

/// Receives every new best solution reported by a heuristic.
pub trait QuboCallback: Send + Sync {
    /// Called with the new incumbent and the time since the heuristic started.
    fn report(&self, solution: &QuboSolution, elapsed: Duration);
}

/// State shared by all QUBO heuristics.
pub struct QuboHeuristic<'a> {
    instance: &'a QuboInstance,
    runtime_limit: f64,
    validation: bool,
    callback: Option<Arc<dyn QuboCallback>>,
    start: Instant,
    best: Option<QuboSolution>,
    best_time: Option<Duration>,
    history: Vec<(f64, f64)>,
}

impl<'a> QuboHeuristic<'a> {
    /// Create the base state. `runtime_limit` is in seconds.
    pub fn new(
        instance: &'a QuboInstance,
        runtime_limit: f64,
        validation: bool,
        callback: Option<Arc<dyn QuboCallback>>,
    ) -> Self {
        Self {
            instance,
            runtime_limit,
            validation,
            callback,
            start: Instant::now(),
            best: None,
            best_time: None,
            history: Vec::new(),
        }
    }

    /// Report a candidate solution.
    ///
    /// Returns `Ok(true)` while the runtime limit has not been reached. With
    /// validation enabled, a solution whose weight disagrees with the
    /// instance is rejected and nothing is recorded.
    pub fn report(&mut self, solution: QuboSolution) -> QuboResult<bool> {
        if self.validation {
            self.validate(&solution)?;
        }

        let elapsed = self.start.elapsed();
        let improved = self
            .best
            .as_ref()
            .is_none_or(|best| solution.improves_on(best));

        if improved {
            debug!(
                "New best solution: weight {} after {:?}",
                solution.weight(),
                elapsed
            );
            self.history.push((elapsed.as_secs_f64(), solution.weight()));
            if let Some(callback) = &self.callback {
                callback.report(&solution, elapsed);
            }
            self.best = Some(solution);
            self.best_time = Some(elapsed);
        }

        Ok(elapsed.as_secs_f64() < self.runtime_limit)
    }

    fn validate(&self, solution: &QuboSolution) -> QuboResult<()> {
        let recomputed = self.instance.objective(solution.assignment())?;
        let reported = solution.weight();
        if (recomputed - reported).abs() > 1e-9 * reported.abs().max(1.0) {
            return Err(QuboError::ValidationFailed {
                reported,
                recomputed,
            });
        }
        Ok(())
    }

    /// The instance being solved.
    pub fn instance(&self) -> &'a QuboInstance {
        self.instance
    }

    /// Best solution reported so far.
    pub fn best(&self) -> Option<&QuboSolution> {
        self.best.as_ref()
    }

    /// Time at which the best solution was reported.
    pub fn best_time(&self) -> Option<Duration> {
        self.best_time
    }

    /// `(elapsed_secs, weight)` for every improvement, in report order.
    pub fn history(&self) -> &[(f64, f64)] {
        &self.history
    }

    /// Runtime limit in seconds.
    pub fn runtime_limit(&self) -> f64 {
        self.runtime_limit
    }

    /// Whether reported solutions are validated.
    pub fn validation(&self) -> bool {
        self.validation
    }

    /// Time since the heuristic started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl fmt::Debug for QuboHeuristic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuboHeuristic")
            .field("size", &self.instance.size())
            .field("runtime_limit", &self.runtime_limit)
            .field("validation", &self.validation)
            .field("has_callback", &self.callback.is_some())
            .field("best", &self.best)
            .finish_non_exhaustive()
    }
}
