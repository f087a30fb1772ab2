//! Solver configuration document.
//!
//! The helper reads a JSON document of the form
//!
//! ```json
//! { "dwave": {
//!     "qpu": { "num_reads": 100, "anneal_time": 250, "solver": "Advantage2_system1.8" },
//!     "sa":  { "num_reads": 100, "num_sweeps": 1000 } } }
//! ```
//!
//! Every key is optional; a partial document only overrides the keys it
//! names, and unknown keys are kept. [`DWaveConfig::load`] reproduces the
//! helper's view natively so it can be validated and displayed before a
//! solve is attempted.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "MQLIB_DWAVE_CONFIG";

/// File looked up in the working directory when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = "dwave_config.json";

/// Errors raised while loading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DWaveConfig {
    pub dwave: SolverSettings,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-backend settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub qpu: QpuSettings,
    pub sa: SaSettings,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Settings for the quantum processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QpuSettings {
    pub num_reads: u32,
    /// Annealing time in microseconds.
    pub anneal_time: f64,
    /// Requested solver name; the helper falls back to any available solver.
    pub solver: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for QpuSettings {
    fn default() -> Self {
        Self {
            num_reads: 100,
            anneal_time: 250.0,
            solver: "Advantage2_system1.8".to_string(),
            extra: Map::new(),
        }
    }
}

/// Settings for the simulated annealing sampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaSettings {
    pub num_reads: u32,
    pub num_sweeps: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SaSettings {
    fn default() -> Self {
        Self {
            num_reads: 100,
            num_sweeps: 1000,
            extra: Map::new(),
        }
    }
}

/// Where the configuration document comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigLocator {
    /// No explicit document; the helper uses its defaults and environment.
    #[default]
    Defaults,
    /// An explicit document path.
    Path(PathBuf),
}

impl ConfigLocator {
    /// Interpret a command-line style argument; empty means [`Defaults`](Self::Defaults).
    pub fn from_arg(arg: &str) -> Self {
        if arg.is_empty() {
            ConfigLocator::Defaults
        } else {
            ConfigLocator::Path(PathBuf::from(arg))
        }
    }

    /// The string handed to the bridge (empty for defaults).
    pub fn as_bridge_arg(&self) -> String {
        match self {
            ConfigLocator::Defaults => String::new(),
            ConfigLocator::Path(path) => path.display().to_string(),
        }
    }

    /// The file the helper would read, if any.
    ///
    /// Search order: explicit path, then [`CONFIG_ENV_VAR`], then
    /// [`DEFAULT_CONFIG_FILE`] in the working directory.
    pub fn resolve(&self) -> Option<PathBuf> {
        self.resolve_with(env::var(CONFIG_ENV_VAR).ok(), Path::new("."))
    }

    fn resolve_with(&self, env_value: Option<String>, cwd: &Path) -> Option<PathBuf> {
        match self {
            ConfigLocator::Path(path) => Some(expand_home(path)),
            ConfigLocator::Defaults => match env_value.filter(|v| !v.is_empty()) {
                Some(value) => Some(expand_home(Path::new(&value))).filter(|p| p.is_file()),
                None => Some(cwd.join(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()),
            },
        }
    }
}

impl DWaveConfig {
    /// Load the effective configuration for `locator`.
    ///
    /// Stricter than the helper for explicit paths. Here a
    /// [`ConfigLocator::Path`] that does not exist is
    /// [`ConfigError::NotFound`], while the helper handed the same path reads
    /// an empty document and solves with its defaults. Callers that validate
    /// with `load` before a solve (the CLI does) therefore reject a typo that
    /// the helper alone would ignore. The implicit lookups behave the same on
    /// both sides: a missing environment or working-directory file means
    /// defaults.
    pub fn load(locator: &ConfigLocator) -> Result<Self, ConfigError> {
        match locator.resolve() {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse a configuration file, filling in defaults for missing keys.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&source).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
