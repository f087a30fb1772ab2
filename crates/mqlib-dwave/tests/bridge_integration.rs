//! Bridge tests against the in-process mock helper.

#![cfg(feature = "dwave")]

mod common;

use std::thread;

use mqlib_dwave::runtime::HELPER_DIR;
use mqlib_dwave::{
    BridgeError, QuboTerm, SolverBackend, UNKNOWN_MESSAGE, ensure_runtime, run_dwave_solver,
    runtime_info, score_terms, solve_qubo,
};
use proptest::prelude::*;

use common::{install_mock_helper, sys_path_count};

fn terms(raw: &[(usize, usize, f64)]) -> Vec<QuboTerm> {
    raw.iter().copied().map(QuboTerm::from).collect()
}

// ---------------------------------------------------------------------------
// Successful solves
// ---------------------------------------------------------------------------

#[test]
fn test_trivial_linear_sa() {
    install_mock_helper();
    let res = run_dwave_solver(&terms(&[(0, 0, 3.5)]), SolverBackend::Sa, "");
    assert_eq!(res.error, None);
    assert_eq!(res.best_sample, vec![1]);
    assert_eq!(res.best_weight, 3.5);
}

#[test]
fn test_antiferromagnet_sa() {
    install_mock_helper();
    let res = run_dwave_solver(&terms(&[(0, 1, -2.0)]), SolverBackend::Sa, "");
    assert!(res.is_ok());
    assert_eq!(res.best_sample.len(), 2);
    assert_ne!(res.best_sample, vec![1, 1]);
    assert_eq!(res.best_weight, 0.0);
}

#[test]
fn test_ferromagnet_sa() {
    install_mock_helper();
    let t = terms(&[(0, 0, 1.0), (1, 1, 1.0), (0, 1, 1.0)]);
    let res = run_dwave_solver(&t, SolverBackend::Sa, "");
    assert!(res.is_ok());
    assert_eq!(res.best_sample, vec![1, 1]);
    assert_eq!(res.best_weight, 3.0);
}

#[test]
fn test_qpu_backend_token_is_passed() {
    install_mock_helper();
    let res = run_dwave_solver(&terms(&[(0, 0, 1.0)]), SolverBackend::Qpu, "");
    assert!(res.is_ok());
    assert_eq!(res.best_sample, vec![1]);
}

#[test]
fn test_empty_terms() {
    install_mock_helper();
    let res = run_dwave_solver(&[], SolverBackend::Sa, "");
    assert!(res.is_ok());
    assert!(res.best_sample.is_empty());
    assert_eq!(res.best_weight, 0.0);
}

#[test]
fn test_concurrent_callers_are_serialized() {
    install_mock_helper();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            thread::spawn(|| {
                let t = terms(&[(0, 0, 1.0), (1, 1, 1.0), (0, 1, 1.0)]);
                run_dwave_solver(&t, SolverBackend::Sa, "")
            })
        })
        .collect();

    for handle in handles {
        let res = handle.join().unwrap();
        assert_eq!(res.best_sample, vec![1, 1]);
        assert_eq!(res.best_weight, 3.0);
    }
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn test_helper_exception_message_is_verbatim() {
    install_mock_helper();
    let res = run_dwave_solver(&terms(&[(0, 0, 1.0)]), SolverBackend::Qpu, "raise:auth failure");
    assert!(res.best_sample.is_empty());
    assert_eq!(res.best_weight, 0.0);
    assert_eq!(res.error.as_deref(), Some("auth failure"));

    let err = solve_qubo(&terms(&[(0, 0, 1.0)]), SolverBackend::Qpu, Some("raise:auth failure"))
        .unwrap_err();
    assert_eq!(err, BridgeError::HelperRaised("auth failure".into()));
}

#[test]
fn test_exception_without_message_is_unknown() {
    install_mock_helper();
    let res = run_dwave_solver(&terms(&[(0, 0, 1.0)]), SolverBackend::Sa, "raise-empty");
    assert_eq!(res.error.as_deref(), Some(UNKNOWN_MESSAGE));
}

#[test]
fn test_single_element_result_is_marshal_error() {
    install_mock_helper();
    let res = run_dwave_solver(&terms(&[(0, 0, 1.0)]), SolverBackend::Sa, "single");
    assert!(res.best_sample.is_empty());
    assert_eq!(res.best_weight, 0.0);
    assert!(!res.error.unwrap_or_default().is_empty());

    let err = solve_qubo(&terms(&[(0, 0, 1.0)]), SolverBackend::Sa, Some("single")).unwrap_err();
    assert!(matches!(err, BridgeError::Marshal(_)));
}

#[test]
fn test_non_binary_assignment_is_rejected() {
    install_mock_helper();
    let err = solve_qubo(&terms(&[(0, 0, 1.0)]), SolverBackend::Sa, Some("bad-bit")).unwrap_err();
    match err {
        BridgeError::Marshal(msg) => assert!(msg.contains("expected 0 or 1"), "{msg}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_wrong_weight_type_is_rejected() {
    install_mock_helper();
    let res = run_dwave_solver(&terms(&[(0, 0, 1.0)]), SolverBackend::Sa, "bad-weight");
    assert!(res.best_sample.is_empty());
    assert!(!res.is_ok());
}

#[test]
fn test_nan_weight_is_rejected() {
    install_mock_helper();
    let err = solve_qubo(&terms(&[(0, 0, 1.0)]), SolverBackend::Sa, Some("nan")).unwrap_err();
    assert!(matches!(err, BridgeError::Marshal(_)));
}

// ---------------------------------------------------------------------------
// Interpreter lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_search_path_prepared_once() {
    install_mock_helper();
    for _ in 0..3 {
        ensure_runtime().unwrap();
        run_dwave_solver(&terms(&[(0, 0, 1.0)]), SolverBackend::Sa, "");
    }

    let info = runtime_info().expect("runtime started");
    assert_eq!(info.search_paths[0], HELPER_DIR);
    for entry in &info.search_paths {
        assert_eq!(sys_path_count(entry), 1, "{entry} inserted more than once");
    }
    assert!(info.version.0 >= 3);
}

// ---------------------------------------------------------------------------
// Round trip
// ---------------------------------------------------------------------------

fn arb_terms() -> impl Strategy<Value = Vec<QuboTerm>> {
    (1usize..7).prop_flat_map(|n| {
        let linear = prop::collection::vec(-5.0f64..5.0, n);
        let pairs = prop::collection::btree_map((0..n, 0..n), -5.0f64..5.0, 0..8);
        (linear, pairs).prop_map(|(linear, pairs)| {
            let mut out: Vec<QuboTerm> = linear
                .into_iter()
                .enumerate()
                .filter(|&(_, w)| w != 0.0)
                .map(|(i, w)| QuboTerm::diagonal(i, w))
                .collect();
            let mut seen = std::collections::BTreeSet::new();
            for ((i, j), w) in pairs {
                let t = QuboTerm::off_diagonal(i, j, w);
                if t.i != t.j && w != 0.0 && seen.insert((t.i, t.j)) {
                    out.push(t);
                }
            }
            out
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_weight_matches_rescore(t in arb_terms()) {
        install_mock_helper();
        let res = run_dwave_solver(&t, SolverBackend::Sa, "");
        prop_assert!(res.is_ok());

        let n = t.iter().map(|term| term.i.max(term.j) + 1).max().unwrap_or(0);
        prop_assert_eq!(res.best_sample.len(), n);
        prop_assert!(res.best_sample.iter().all(|&x| x <= 1));

        let rescored = score_terms(&t, &res.best_sample);
        prop_assert!((rescored - res.best_weight).abs() <= 1e-9 * res.best_weight.abs().max(1.0));
    }
}
