//! The shipped `python/mqlib_dwave.py` helper, driven through the bridge
//! with an in-process stand-in for the Ocean samplers.

#![cfg(feature = "dwave")]

use std::ffi::{CStr, CString};
use std::sync::Once;

use mqlib_dwave::pyo3::prelude::*;
use mqlib_dwave::pyo3::types::PyModule;
use mqlib_dwave::{QuboTerm, SolverBackend, ensure_runtime, run_dwave_solver};

const HELPER_SOURCE: &str = include_str!("../../../python/mqlib_dwave.py");

/// Exhaustive minimiser exposing the sampler surface the helper uses.
const FAKE_OCEAN: &CStr = cr#"
import itertools

calls = []


class _Sample:
    def __init__(self, sample, energy):
        self.sample = sample
        self.energy = energy


class _SampleSet:
    def __init__(self, first):
        self.first = first


def _brute_force(Q):
    variables = sorted({v for pair in Q for v in pair})
    best = None
    for bits in itertools.product((0, 1), repeat=len(variables)):
        x = dict(zip(variables, bits))
        energy = sum(c for (a, b), c in Q.items() if x[a] and x[b])
        if best is None or energy < best.energy:
            best = _Sample(x, energy)
    return _SampleSet(best)


class SimulatedAnnealingSampler:
    def sample_qubo(self, Q, **kwargs):
        calls.append(("sa", kwargs))
        return _brute_force(Q)


class DWaveSampler:
    def __init__(self, solver=None):
        self.solver = solver


class EmbeddingComposite:
    def __init__(self, child):
        self.child = child

    def sample_qubo(self, Q, **kwargs):
        calls.append(("qpu", dict(kwargs, solver=self.child.solver)))
        return _brute_force(Q)
"#;

static INSTALL: Once = Once::new();

fn install_helper() {
    INSTALL.call_once(|| {
        ensure_runtime().unwrap();
        Python::attach(register_modules);
    });
}

fn register_modules(py: Python<'_>) {
    let modules = py.import("sys").unwrap().getattr("modules").unwrap();
    let ocean = PyModule::from_code(py, FAKE_OCEAN, c"fake_ocean.py", c"fake_ocean").unwrap();
    for name in ["fake_ocean", "dwave", "dwave.samplers", "dwave.system"] {
        modules.set_item(name, &ocean).unwrap();
    }

    let source = CString::new(HELPER_SOURCE).unwrap();
    let helper = PyModule::from_code(py, &source, c"mqlib_dwave.py", c"mqlib_dwave").unwrap();
    modules.set_item("mqlib_dwave", helper).unwrap();
}

/// `(backend, kwargs as JSON)` for every sampler call so far.
fn sampler_calls() -> Vec<(String, serde_json::Value)> {
    Python::attach(|py| {
        let json = py.import("json").unwrap();
        let calls = py.import("fake_ocean").unwrap().getattr("calls").unwrap();
        let dumped: String = json
            .call_method1("dumps", (calls,))
            .unwrap()
            .extract::<String>()
            .unwrap();
        serde_json::from_str(&dumped).unwrap()
    })
}

fn terms(raw: &[(usize, usize, f64)]) -> Vec<QuboTerm> {
    raw.iter().copied().map(QuboTerm::from).collect()
}

#[test]
fn test_ferromagnet() {
    install_helper();
    let t = terms(&[(0, 0, 1.0), (1, 1, 1.0), (0, 1, 1.0)]);
    let res = run_dwave_solver(&t, SolverBackend::Sa, "");
    assert_eq!(res.error, None);
    assert_eq!(res.best_sample, vec![1, 1]);
    assert_eq!(res.best_weight, 3.0);
}

#[test]
fn test_pair_counts_once() {
    // Doubling the pair would make a single variable the optimum.
    install_helper();
    let t = terms(&[(0, 0, 1.0), (1, 1, 1.0), (0, 1, -0.75)]);
    let res = run_dwave_solver(&t, SolverBackend::Sa, "");
    assert_eq!(res.best_sample, vec![1, 1]);
    assert_eq!(res.best_weight, 1.25);
}

#[test]
fn test_variables_without_terms_are_zero() {
    install_helper();
    let res = run_dwave_solver(&terms(&[(2, 2, 1.0)]), SolverBackend::Sa, "");
    assert_eq!(res.error, None);
    assert_eq!(res.best_sample, vec![0, 0, 1]);
    assert_eq!(res.best_weight, 1.0);
}

#[test]
fn test_qpu_uses_default_settings() {
    install_helper();
    let res = run_dwave_solver(&terms(&[(0, 0, 2.5)]), SolverBackend::Qpu, "");
    assert_eq!(res.best_sample, vec![1]);

    let qpu_calls: Vec<_> = sampler_calls()
        .into_iter()
        .filter(|(backend, _)| backend == "qpu")
        .collect();
    assert!(!qpu_calls.is_empty());
    let (_, kwargs) = &qpu_calls[0];
    assert_eq!(kwargs["num_reads"], 100);
    assert_eq!(kwargs["annealing_time"], 250);
    assert_eq!(kwargs["solver"]["name"], "Advantage2_system1.8");
}

#[test]
fn test_explicit_config_overrides_named_keys() {
    install_helper();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dwave.json");
    std::fs::write(&path, r#"{"dwave": {"sa": {"num_sweeps": 7}}}"#).unwrap();

    let res = run_dwave_solver(
        &terms(&[(0, 0, 1.0)]),
        SolverBackend::Sa,
        &path.display().to_string(),
    );
    assert!(res.is_ok(), "{:?}", res.error);

    let call = sampler_calls()
        .into_iter()
        .find(|(backend, kwargs)| backend == "sa" && kwargs["num_sweeps"] == 7);
    let (_, kwargs) = call.expect("sampler called with the configured sweeps");
    assert_eq!(kwargs["num_reads"], 100);
}
