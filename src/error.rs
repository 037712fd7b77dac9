//! # Dispatch Error Types
//!
//! Structured error handling for the dispatch core using thiserror,
//! covering the full taxonomy from deployment-time configuration defects
//! (invalid or duplicate handlers, missing role declarations) to runtime
//! routing and execution failures.

use crate::handler::DispatchMode;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by handler validation, registration, routing and invocation.
///
/// Configuration-time variants (`InvalidTarget`, `ContractMismatch`,
/// `InvalidHandler`, `DuplicateHandler`, `MissingRoleAnnotation`) indicate a
/// defect that must be fixed before the deployment is usable. Runtime
/// variants (`MissingHandler`, `HandlerExecution`, `Transport`) surface to
/// the immediate caller; only `MissingHandler` is ever recovered, by the
/// sender facade's legacy fallback.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("invalid handler target: {reason}")]
    InvalidTarget { reason: String },

    #[error("handler contract mismatch: {reason}")]
    ContractMismatch { reason: String },

    #[error("invalid handler registration for {handler}: {reason}")]
    InvalidHandler { handler: String, reason: String },

    #[error("duplicate handler registration for '{name}' ({mode})")]
    DuplicateHandler { name: String, mode: DispatchMode },

    #[error("no handler registered for '{name}' ({mode})")]
    MissingHandler { name: String, mode: DispatchMode },

    #[error("error while invoking handler {handler} with envelope {envelope_id}")]
    HandlerExecution {
        handler: String,
        envelope_id: Uuid,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("no service component role declared by {declared_by}")]
    MissingRoleAnnotation { declared_by: String },

    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("legacy transport send failed")]
    Transport {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("configuration error: {reason}")]
    Configuration { reason: String },
}

impl DispatchError {
    /// Create an invalid target error
    pub fn invalid_target(reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            reason: reason.into(),
        }
    }

    /// Create a contract mismatch error
    pub fn contract_mismatch(reason: impl Into<String>) -> Self {
        Self::ContractMismatch {
            reason: reason.into(),
        }
    }

    /// Create an invalid handler registration error
    pub fn invalid_handler(handler: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHandler {
            handler: handler.into(),
            reason: reason.into(),
        }
    }

    /// Create a duplicate handler error
    pub fn duplicate_handler(name: impl Into<String>, mode: DispatchMode) -> Self {
        Self::DuplicateHandler {
            name: name.into(),
            mode,
        }
    }

    /// Create a missing handler error
    pub fn missing_handler(name: impl Into<String>, mode: DispatchMode) -> Self {
        Self::MissingHandler {
            name: name.into(),
            mode,
        }
    }

    /// Create a handler execution error carrying the original cause
    pub fn handler_execution(
        handler: impl Into<String>,
        envelope_id: Uuid,
        source: anyhow::Error,
    ) -> Self {
        Self::HandlerExecution {
            handler: handler.into(),
            envelope_id,
            source: source.into(),
        }
    }

    /// Create a missing role annotation error
    pub fn missing_role(declared_by: impl Into<String>) -> Self {
        Self::MissingRoleAnnotation {
            declared_by: declared_by.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Create a legacy transport error carrying the original cause
    pub fn transport(source: anyhow::Error) -> Self {
        Self::Transport {
            source: source.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }
}

impl From<config::ConfigError> for DispatchError {
    fn from(err: config::ConfigError) -> Self {
        DispatchError::configuration(err.to_string())
    }
}

/// Result type alias for dispatch operations
pub type DispatchResult<T> = Result<T, DispatchError>;
