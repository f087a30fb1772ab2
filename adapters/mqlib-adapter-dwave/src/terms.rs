//! Instance to triple-sequence conversion.

use mqlib_dwave::QuboTerm;
use mqlib_qubo::QuboInstance;

/// The triples sent to the solver for `instance`.
///
/// Diagonal terms come first in increasing variable order, followed by the
/// off-diagonal pairs in the instance's canonical order. Zero coefficients
/// are never emitted.
pub fn qubo_terms(instance: &QuboInstance) -> Vec<QuboTerm> {
    let mut terms = Vec::with_capacity(instance.size() + instance.edge_count());

    terms.extend(
        instance
            .lin()
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w != 0.0)
            .map(|(i, &w)| QuboTerm::diagonal(i, w)),
    );
    terms.extend(
        instance
            .nonzero()
            .filter(|&(_, w)| w != 0.0)
            .map(|((i, j), w)| QuboTerm::off_diagonal(i, j, w)),
    );

    terms
}
