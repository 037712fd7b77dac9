//! # Handler Invocation
//!
//! The uniform interface every handler is exposed through, the descriptor
//! data model produced by the external discovery step, and the invocation
//! wrapper that validates a candidate once at registration and executes it
//! with tracing on every dispatch.
//!
//! ## Dispatch modes
//!
//! A handler is either synchronous (the caller awaits a result envelope) or
//! asynchronous (the caller awaits nothing). The designation is a
//! return-value contract only: both modes execute the handler body inline on
//! the calling task, with no queueing or deferred execution inside the core.
//!
//! ## Usage
//!
//! ```rust
//! use courier_core::handler::{CandidateMethod, EnvelopeHandler, HandlerMethod, HandlerResponse, ReturnKind};
//! use courier_core::messaging::Envelope;
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct AuditHandler;
//!
//! #[async_trait]
//! impl EnvelopeHandler for AuditHandler {
//!     async fn handle(&self, _envelope: &Envelope) -> anyhow::Result<HandlerResponse> {
//!         Ok(HandlerResponse::Void)
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let candidate = CandidateMethod::asynchronous("audit.record", "handle", Arc::new(AuditHandler));
//! let method = HandlerMethod::new("AuditHandler", &candidate, &ReturnKind::Void).unwrap();
//! let envelope = Envelope::new("audit.record", serde_json::json!({}));
//! let response = method.execute(&envelope).await.unwrap();
//! assert_eq!(response, HandlerResponse::Void);
//! # });
//! ```

pub mod descriptor;
pub mod handler_method;

pub use descriptor::{CandidateMethod, HandlerDescriptor, ParameterKind, ReturnKind};
pub use handler_method::HandlerMethod;

use crate::messaging::Envelope;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a caller interacts with a handler's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// The caller blocks for a result envelope
    Synchronous,
    /// The caller expects no result
    Asynchronous,
}

impl DispatchMode {
    /// Whether this mode carries a result envelope back to the caller
    pub fn is_synchronous(self) -> bool {
        matches!(self, DispatchMode::Synchronous)
    }
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchMode::Synchronous => write!(f, "synchronous"),
            DispatchMode::Asynchronous => write!(f, "asynchronous"),
        }
    }
}

/// Result of one handler invocation: a response envelope or the void
/// placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerResponse {
    /// A synchronous handler's result envelope
    Envelope(Envelope),
    /// An asynchronous handler's "nothing" result
    Void,
}

/// Uniform capability interface every handler target is exposed through.
///
/// The external discovery step adapts each discovered handler method into
/// one implementation of this trait; the invocation wrapper holds the trait
/// object, never a named method. Failures are opaque to the dispatch core
/// and are re-wrapped with causal context by the wrapper.
#[async_trait]
pub trait EnvelopeHandler: Send + Sync {
    /// Handle one envelope, producing a response envelope or nothing.
    async fn handle(&self, envelope: &Envelope) -> anyhow::Result<HandlerResponse>;
}
