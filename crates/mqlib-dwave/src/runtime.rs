//! Process-wide embedded Python interpreter.
//!
//! The interpreter is started at most once per process, on the first call
//! to [`ensure_runtime`]. Startup also prepares `sys.path`:
//!
//! 1. [`HELPER_DIR`] (relative to the working directory) is prepended so the
//!    `mqlib_dwave` helper is importable;
//! 2. if it exists, `.venv/lib/python<MAJOR>.<MINOR>/site-packages` is
//!    prepended so a project-local virtual environment (holding `dimod` and
//!    the Ocean SDK) wins over the system packages.
//!
//! A missing virtual environment is not an error. A failed startup is
//! remembered and returned to every later caller; it is never retried.
//!
//! The interpreter lives until the process exits. It is not finalized
//! explicitly: pyo3 does not support tearing down an interpreter that may
//! still be referenced by live objects, so process exit reclaims it.
//!
//! All work on Python objects goes through [`with_gil`], which holds the
//! global interpreter lock for exactly the duration of the closure.

use std::sync::OnceLock;

#[cfg(feature = "dwave")]
use pyo3::prelude::*;
#[cfg(feature = "dwave")]
use tracing::debug;

use crate::error::{BridgeError, BridgeResult};

/// Directory holding the helper module, relative to the working directory.
pub const HELPER_DIR: &str = "python";

/// Name of the helper module.
pub const HELPER_MODULE: &str = "mqlib_dwave";

/// Callable looked up on the helper module.
pub const HELPER_ENTRY_POINT: &str = "solve_qubo";

/// Description of the running interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    /// `(major, minor)` interpreter version.
    pub version: (u8, u8),
    /// Entries this process prepended to `sys.path`, in insertion order.
    pub search_paths: Vec<String>,
}

static RUNTIME: OnceLock<Result<RuntimeInfo, String>> = OnceLock::new();

/// Start the interpreter if needed and return its description.
///
/// Thread-safe and idempotent: concurrent first callers block until one of
/// them has finished startup.
pub fn ensure_runtime() -> BridgeResult<&'static RuntimeInfo> {
    if !crate::is_enabled() {
        return Err(BridgeError::NotCompiled);
    }

    RUNTIME
        .get_or_init(start)
        .as_ref()
        .map_err(|msg| BridgeError::RuntimeInit(msg.clone()))
}

/// The interpreter description, if startup already succeeded.
pub fn runtime_info() -> Option<&'static RuntimeInfo> {
    RUNTIME.get().and_then(|r| r.as_ref().ok())
}

/// Project-local virtual environment site-packages for a given version.
pub fn venv_site_packages(major: u8, minor: u8) -> String {
    format!(".venv/lib/python{major}.{minor}/site-packages")
}

/// Run `f` with the interpreter lock held.
///
/// The lock is released on every exit path, including errors and panics
/// unwinding out of `f`.
#[cfg(feature = "dwave")]
pub fn with_gil<F, R>(f: F) -> BridgeResult<R>
where
    F: for<'py> FnOnce(Python<'py>) -> BridgeResult<R>,
{
    ensure_runtime()?;
    Python::attach(f)
}

#[cfg(feature = "dwave")]
fn start() -> Result<RuntimeInfo, String> {
    use std::panic;

    let started = panic::catch_unwind(|| {
        Python::initialize();
        Python::attach(prepare_search_path)
    });

    match started {
        Ok(Ok(info)) => {
            debug!(
                "Python {}.{} initialized, sys.path prepended with {:?}",
                info.version.0, info.version.1, info.search_paths
            );
            Ok(info)
        }
        Ok(Err(err)) => Err(err.to_string()),
        Err(payload) => Err(BridgeError::from_panic(payload.as_ref()).to_string()),
    }
}

#[cfg(not(feature = "dwave"))]
fn start() -> Result<RuntimeInfo, String> {
    Err(BridgeError::NotCompiled.to_string())
}

#[cfg(feature = "dwave")]
fn prepare_search_path(py: Python<'_>) -> PyResult<RuntimeInfo> {
    let sys = py.import("sys")?;
    let path = sys.getattr("path")?;

    path.call_method1("insert", (0, HELPER_DIR))?;
    let mut search_paths = vec![HELPER_DIR.to_string()];

    let version_info = sys.getattr("version_info")?;
    let major: u8 = version_info.getattr("major")?.extract()?;
    let minor: u8 = version_info.getattr("minor")?.extract()?;

    let venv = venv_site_packages(major, minor);
    if std::path::Path::new(&venv).is_dir() {
        match path.call_method1("insert", (0, venv.as_str())) {
            Ok(_) => search_paths.push(venv),
            Err(err) => debug!("Skipping virtual environment {venv}: {err}"),
        }
    } else {
        debug!("No virtual environment at {venv}");
    }

    Ok(RuntimeInfo {
        version: (major, minor),
        search_paths,
    })
}
