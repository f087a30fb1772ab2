//! QUBO triples and the solver result shapes.

use serde::{Deserialize, Serialize};

/// One `(i, j, w)` QUBO coefficient.
///
/// Diagonal terms (`i == j`) are linear coefficients; off-diagonal terms are
/// quadratic and carry the full contribution of the unordered pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuboTerm {
    pub i: usize,
    pub j: usize,
    pub w: f64,
}

impl QuboTerm {
    /// Linear coefficient on variable `i`.
    pub fn diagonal(i: usize, w: f64) -> Self {
        Self { i, j: i, w }
    }

    /// Quadratic coefficient on the pair, stored with `i <= j`.
    pub fn off_diagonal(i: usize, j: usize, w: f64) -> Self {
        Self {
            i: i.min(j),
            j: i.max(j),
            w,
        }
    }

    pub fn is_diagonal(&self) -> bool {
        self.i == self.j
    }

    /// Contribution of this term to the objective of `assignment`.
    fn contribution(&self, assignment: &[u8]) -> f64 {
        let set = |k: usize| assignment.get(k).copied() == Some(1);
        if set(self.i) && set(self.j) {
            self.w
        } else {
            0.0
        }
    }
}

impl From<(usize, usize, f64)> for QuboTerm {
    fn from((i, j, w): (usize, usize, f64)) -> Self {
        Self { i, j, w }
    }
}

/// Re-score an assignment against a triple sequence.
///
/// Indices beyond the end of `assignment` count as 0.
pub fn score_terms(terms: &[QuboTerm], assignment: &[u8]) -> f64 {
    terms.iter().map(|t| t.contribution(assignment)).sum()
}

/// A successful sample from the helper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// 0/1 value per variable.
    pub assignment: Vec<u8>,
    /// Objective value reported by the helper (maximization convention).
    pub weight: f64,
}

/// Uniform result of [`run_dwave_solver`](crate::run_dwave_solver).
///
/// On failure `best_sample` is empty, `best_weight` is 0 and `error` holds
/// the message. An empty `best_sample` with no error means the helper
/// returned nothing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DWaveResult {
    pub best_sample: Vec<u8>,
    pub best_weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DWaveResult {
    /// A failed solve carrying `message`.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            best_sample: Vec::new(),
            best_weight: 0.0,
            error: Some(message.into()),
        }
    }

    /// Whether no error was reported.
    pub fn is_ok(&self) -> bool {
        self.error.as_deref().is_none_or(str::is_empty)
    }
}

impl From<Sample> for DWaveResult {
    fn from(sample: Sample) -> Self {
        Self {
            best_sample: sample.assignment,
            best_weight: sample.weight,
            error: None,
        }
    }
}
