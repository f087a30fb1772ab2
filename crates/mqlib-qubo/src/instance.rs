//! Sparse QUBO instance.
//!
//! The instance stores a dense linear-coefficient vector and a sorted list of
//! non-zero off-diagonal pairs. Every pair is kept once in canonical
//! `(min, max)` form, so iteration never yields `(j, i)` after `(i, j)`.
//!
//! The objective follows the maximization convention
//!
//! ```text
//! f(x) = sum_i lin[i] * x_i + sum_{(i, j), i < j} w_ij * x_i * x_j
//! ```

use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{QuboError, QuboResult};

/// Largest variable count [`QuboInstance::parse`] accepts from a header.
pub const MAX_VARIABLES: usize = 1 << 26;

/// A QUBO instance with `n` binary variables.
#[derive(Debug, Clone, PartialEq)]
pub struct QuboInstance {
    n: usize,
    lin: Vec<f64>,
    nonzero: Vec<((usize, usize), f64)>,
}

impl QuboInstance {
    /// Create an instance with `n` variables and no coefficients.
    pub fn empty(n: usize) -> Self {
        Self {
            n,
            lin: vec![0.0; n],
            nonzero: Vec::new(),
        }
    }

    /// Build an instance from `(i, j, w)` entries.
    ///
    /// Diagonal entries accumulate into the linear coefficients; off-diagonal
    /// entries are canonicalized to `(min, max)` and summed. Pairs whose total
    /// is zero are dropped.
    pub fn from_terms<I>(n: usize, terms: I) -> QuboResult<Self>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut lin = vec![0.0; n];
        let mut pairs: FxHashMap<(usize, usize), f64> = FxHashMap::default();

        for (i, j, w) in terms {
            for index in [i, j] {
                if index >= n {
                    return Err(QuboError::InvalidIndex { index, size: n });
                }
            }
            if !w.is_finite() {
                return Err(QuboError::InvalidWeight { i, j, weight: w });
            }
            if i == j {
                lin[i] += w;
            } else {
                *pairs.entry((i.min(j), i.max(j))).or_insert(0.0) += w;
            }
        }

        let mut nonzero: Vec<_> = pairs.into_iter().filter(|&(_, w)| w != 0.0).collect();
        nonzero.sort_unstable_by_key(|&(pair, _)| pair);

        Ok(Self { n, lin, nonzero })
    }

    /// Parse an instance in the MQLib text format.
    ///
    /// The first data line is `n m`, followed by `m` lines `i j w` with
    /// 1-based indices. `i == j` sets a linear coefficient. Blank lines and
    /// lines starting with `#` are skipped.
    ///
    /// The header is not trusted for allocation: `n` is capped at
    /// [`MAX_VARIABLES`] and `m` is only compared against the entries found.
    pub fn parse(source: &str) -> QuboResult<Self> {
        let mut lines = source
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        let (header_line, header) = lines.next().ok_or_else(|| QuboError::Parse {
            line: 0,
            message: "missing `n m` header".into(),
        })?;
        let mut fields = header.split_whitespace();
        let n: usize = parse_field(fields.next(), header_line, "variable count")?;
        let m: usize = parse_field(fields.next(), header_line, "entry count")?;
        if n > MAX_VARIABLES {
            return Err(QuboError::Parse {
                line: header_line,
                message: format!("variable count {n} exceeds {MAX_VARIABLES}"),
            });
        }

        let mut entries = Vec::new();
        for (line_no, line) in lines {
            let mut fields = line.split_whitespace();
            let i: usize = parse_field(fields.next(), line_no, "row index")?;
            let j: usize = parse_field(fields.next(), line_no, "column index")?;
            let w: f64 = parse_field(fields.next(), line_no, "weight")?;
            if i == 0 || j == 0 {
                return Err(QuboError::Parse {
                    line: line_no,
                    message: "indices are 1-based".into(),
                });
            }
            entries.push((i - 1, j - 1, w));
        }

        if entries.len() != m {
            return Err(QuboError::Parse {
                line: header_line,
                message: format!("header declares {m} entries, found {}", entries.len()),
            });
        }

        debug!("Parsed QUBO instance: {} variables, {} entries", n, m);
        Self::from_terms(n, entries)
    }

    /// Read and parse an instance file.
    pub fn load(path: impl AsRef<Path>) -> QuboResult<Self> {
        let source = fs::read_to_string(path)?;
        Self::parse(&source)
    }

    /// Number of variables.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Linear coefficients, one per variable.
    pub fn lin(&self) -> &[f64] {
        &self.lin
    }

    /// Number of non-zero off-diagonal pairs.
    pub fn edge_count(&self) -> usize {
        self.nonzero.len()
    }

    /// Iterate over non-zero off-diagonal pairs as `((i, j), w)` with `i < j`.
    pub fn nonzero(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.nonzero.iter().copied()
    }

    /// Objective value of a 0/1 assignment.
    pub fn objective(&self, assignment: &[u8]) -> QuboResult<f64> {
        self.check_assignment(assignment)?;

        let linear: f64 = self
            .lin
            .iter()
            .zip(assignment)
            .filter(|&(_, &x)| x == 1)
            .map(|(w, _)| w)
            .sum();
        let quadratic: f64 = self
            .nonzero
            .iter()
            .filter(|&&((i, j), _)| assignment[i] == 1 && assignment[j] == 1)
            .map(|&(_, w)| w)
            .sum();

        Ok(linear + quadratic)
    }

    /// Check that `assignment` has length `n` and only 0/1 entries.
    pub fn check_assignment(&self, assignment: &[u8]) -> QuboResult<()> {
        if assignment.len() != self.n {
            return Err(QuboError::DimensionMismatch {
                expected: self.n,
                actual: assignment.len(),
            });
        }
        if let Some((index, &value)) = assignment.iter().enumerate().find(|&(_, &x)| x > 1) {
            return Err(QuboError::InvalidBit { index, value });
        }
        Ok(())
    }
}

fn parse_field<T: std::str::FromStr>(
    field: Option<&str>,
    line: usize,
    what: &str,
) -> QuboResult<T> {
    let raw = field.ok_or_else(|| QuboError::Parse {
        line,
        message: format!("missing {what}"),
    })?;
    raw.parse().map_err(|_| QuboError::Parse {
        line,
        message: format!("invalid {what}: '{raw}'"),
    })
}
