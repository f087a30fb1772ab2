//! Error types for the bridge.
//!
//! The `Display` text of every variant is exactly the message handed back
//! to adapters in [`DWaveResult::error`](crate::DWaveResult), so variants
//! that carry foreign text print it verbatim.

use std::any::Any;

use thiserror::Error;

/// Message reported when the crate is built without the `dwave` feature.
pub const NOT_COMPILED_MESSAGE: &str = "D-Wave support not compiled (USE_DWAVE not defined)";

/// Message reported for failures that carry no text of their own.
pub const UNKNOWN_MESSAGE: &str = "Unknown exception in run_dwave_solver";

/// Errors that can occur while crossing into the Python helper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BridgeError {
    /// The `dwave` feature is disabled.
    #[error("{}", NOT_COMPILED_MESSAGE)]
    NotCompiled,

    /// The embedded interpreter could not be started.
    #[error("{0}")]
    RuntimeInit(String),

    /// The helper module or its entry point could not be loaded.
    #[error("{0}")]
    Import(String),

    /// The helper raised an exception.
    #[error("{0}")]
    HelperRaised(String),

    /// Arguments or the helper's return value could not be converted.
    #[error("{0}")]
    Marshal(String),

    /// A native panic with a message escaped the foreign call.
    #[error("{0}")]
    Native(String),

    /// A failure without any message.
    #[error("{}", UNKNOWN_MESSAGE)]
    Unknown,
}

impl BridgeError {
    /// Classify a caught panic payload.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned());

        match message {
            Some(msg) if !msg.is_empty() => BridgeError::Native(msg),
            _ => BridgeError::Unknown,
        }
    }
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
