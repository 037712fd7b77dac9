//! # Dispatcher
//!
//! Per-role invocation entry point: resolve the binding in the owning
//! component's registry, execute it, hand the result back. One operation per
//! dispatch mode.

use crate::error::{DispatchError, DispatchResult};
use crate::handler::{DispatchMode, HandlerResponse};
use crate::messaging::Envelope;
use crate::registry::HandlerRegistry;
use std::sync::Arc;

/// Stateless dispatch facade over one component's registry.
///
/// Immutable after construction; holds no envelope-scoped state, so
/// concurrent dispatch calls are independent and need no locking beyond the
/// registry's own read-only guarantee.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<HandlerRegistry>,
}

impl Dispatcher {
    /// Create a dispatcher over a frozen registry
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self { registry }
    }

    /// Dispatch an envelope to its synchronous handler and return the
    /// result envelope.
    ///
    /// `MissingHandler` propagates unmodified. A void response from a
    /// binding that validated as synchronous means the discovery descriptor
    /// lied about the return kind; that surfaces as `ContractMismatch`.
    pub async fn synchronous_dispatch(&self, envelope: &Envelope) -> DispatchResult<Envelope> {
        let method = self
            .registry
            .lookup(envelope.name(), DispatchMode::Synchronous)?;

        match method.execute(envelope).await? {
            HandlerResponse::Envelope(result) => Ok(result),
            HandlerResponse::Void => Err(DispatchError::contract_mismatch(format!(
                "synchronous handler {} returned no envelope for '{}'",
                method.identity(),
                envelope.name()
            ))),
        }
    }

    /// Dispatch an envelope to its asynchronous handler.
    ///
    /// `MissingHandler` propagates unmodified. An envelope response from a
    /// binding that validated as asynchronous surfaces as
    /// `ContractMismatch`.
    pub async fn asynchronous_dispatch(&self, envelope: &Envelope) -> DispatchResult<()> {
        let method = self
            .registry
            .lookup(envelope.name(), DispatchMode::Asynchronous)?;

        match method.execute(envelope).await? {
            HandlerResponse::Void => Ok(()),
            HandlerResponse::Envelope(_) => Err(DispatchError::contract_mismatch(format!(
                "asynchronous handler {} returned an envelope for '{}'",
                method.identity(),
                envelope.name()
            ))),
        }
    }
}
