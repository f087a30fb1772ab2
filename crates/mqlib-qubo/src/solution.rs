//! QUBO solutions.

use serde::{Deserialize, Serialize};

use crate::error::QuboResult;
use crate::instance::QuboInstance;

/// A 0/1 assignment together with its objective value.
///
/// The weight is always computed from the instance, never taken on trust
/// from whoever produced the assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuboSolution {
    assignment: Vec<u8>,
    weight: f64,
}

impl QuboSolution {
    /// Build a solution from a bit vector, scoring it against `instance`.
    pub fn new(assignment: Vec<u8>, instance: &QuboInstance) -> QuboResult<Self> {
        let weight = instance.objective(&assignment)?;
        Ok(Self { assignment, weight })
    }

    /// The 0/1 assignment, indexed by variable.
    pub fn assignment(&self) -> &[u8] {
        &self.assignment
    }

    /// Objective value under the maximization convention.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Number of variables set to 1.
    pub fn ones(&self) -> usize {
        self.assignment.iter().filter(|&&x| x == 1).count()
    }

    /// Whether this solution is strictly better than `other`.
    pub fn improves_on(&self, other: &QuboSolution) -> bool {
        self.weight > other.weight
    }
}

impl std::fmt::Display for QuboSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for bit in &self.assignment {
            write!(f, "{bit}")?;
        }
        write!(f, " ({})", self.weight)
    }
}
