//! Solver backend selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which Ocean sampler the helper should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverBackend {
    /// D-Wave quantum processing unit behind an embedding composite.
    Qpu,
    /// Classical simulated annealing sampler.
    Sa,
}

impl SolverBackend {
    /// Token passed to the helper.
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverBackend::Qpu => "qpu",
            SolverBackend::Sa => "sa",
        }
    }
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolverBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "qpu" => Ok(SolverBackend::Qpu),
            "sa" => Ok(SolverBackend::Sa),
            other => Err(format!("Unknown backend: '{other}'. Available: qpu, sa")),
        }
    }
}
