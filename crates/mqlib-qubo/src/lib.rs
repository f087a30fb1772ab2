//! MQLib QUBO framework types
//!
//! The pieces of the heuristic framework that the D-Wave bridge consumes:
//!
//! - [`QuboInstance`]: sparse instance with linear coefficients and
//!   canonical off-diagonal pairs, plus the MQLib text-format reader
//! - [`QuboSolution`]: a 0/1 assignment scored against an instance
//! - [`QuboHeuristic`]: the base every heuristic reports solutions through
//! - [`QuboCallback`]: observer notified on every new incumbent
//!
//! # Example
//!
//! ```
//! use mqlib_qubo::{QuboHeuristic, QuboInstance, QuboSolution};
//!
//! let qi = QuboInstance::from_terms(2, [(0, 0, 1.0), (1, 1, 1.0), (0, 1, 1.0)])?;
//! let mut base = QuboHeuristic::new(&qi, 10.0, true, None);
//!
//! base.report(QuboSolution::new(vec![1, 1], &qi)?)?;
//! assert_eq!(base.best().map(|s| s.weight()), Some(3.0));
//! # Ok::<(), mqlib_qubo::QuboError>(())
//! ```

pub mod error;
pub mod heuristic;
pub mod instance;
pub mod solution;

pub use error::{QuboError, QuboResult};
pub use heuristic::{QuboCallback, QuboHeuristic};
pub use instance::{MAX_VARIABLES, QuboInstance};
pub use solution::QuboSolution;
