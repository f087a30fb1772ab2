//! In-process stand-in for the `mqlib_dwave` Python helper.
//!
//! The mock is a brute-force maximizer under the same convention as the
//! real helper. Its behavior is selected through the configuration
//! argument, which the real helper treats as a file path:
//!
//! | config          | behavior                                  |
//! |-----------------|-------------------------------------------|
//! | `None`          | solve exactly                             |
//! | `raise:<msg>`   | raise `RuntimeError(<msg>)`               |
//! | `raise-empty`   | raise `RuntimeError()` with no message    |
//! | `single`        | return a 1-tuple                          |
//! | `bad-bit`       | return an assignment containing a 2       |
//! | `bad-weight`    | return a string weight                    |
//! | `nan`           | return a NaN weight                       |

#![allow(dead_code)]

use std::ffi::CStr;

use mqlib_dwave::pyo3::prelude::*;
use mqlib_dwave::pyo3::types::PyModule;

const MOCK_HELPER: &CStr = cr#"
import itertools


def solve_qubo(terms, backend, config_json_path=None):
    if backend not in ("qpu", "sa"):
        raise ValueError("Unknown backend: " + str(backend))
    if config_json_path is not None and not isinstance(config_json_path, str):
        raise TypeError("config path must be str or None")
    if config_json_path == "":
        raise ValueError("empty config path must arrive as None")

    mode = config_json_path or ""
    if mode.startswith("raise:"):
        raise RuntimeError(mode[len("raise:"):])
    if mode == "raise-empty":
        raise RuntimeError()
    if mode == "single":
        return ([1],)
    if mode == "bad-bit":
        return ([0, 2], 0.0)
    if mode == "bad-weight":
        return ([0], "heavy")
    if mode == "nan":
        return ([0], float("nan"))

    for t in terms:
        ok = (
            isinstance(t, tuple)
            and len(t) == 3
            and type(t[0]) is int
            and type(t[1]) is int
            and type(t[2]) is float
        )
        if not ok:
            raise TypeError("malformed term " + repr(t))

    n = max((max(i, j) for i, j, _ in terms), default=-1) + 1
    best, best_weight = [0] * n, 0.0
    for bits in itertools.product((0, 1), repeat=n):
        weight = sum(w for i, j, w in terms if bits[i] and bits[j])
        if weight > best_weight:
            best, best_weight = list(bits), weight
    return best, best_weight
"#;

/// Start the runtime and register the mock under the helper's name.
pub fn install_mock_helper() {
    mqlib_dwave::ensure_runtime().expect("embedded interpreter failed to start");

    Python::attach(|py| {
        let modules = py.import("sys").unwrap().getattr("modules").unwrap();
        if modules.contains("mqlib_dwave").unwrap() {
            return;
        }
        let module = PyModule::from_code(py, MOCK_HELPER, c"mock_mqlib_dwave.py", c"mqlib_dwave")
            .expect("mock helper does not compile");
        modules.set_item("mqlib_dwave", module).unwrap();
    });
}

/// Occurrences of `entry` in `sys.path`.
pub fn sys_path_count(entry: &str) -> usize {
    Python::attach(|py| {
        let path: Vec<String> = py
            .import("sys")
            .unwrap()
            .getattr("path")
            .unwrap()
            .extract::<Vec<String>>()
            .unwrap();
        path.iter().filter(|p| p.as_str() == entry).count()
    })
}
