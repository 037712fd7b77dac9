//! # Handler Method Wrapper
//!
//! Encapsulates one validated invocation target together with its dispatch
//! mode. Asynchronous handler methods produce the void placeholder whereas
//! synchronous handler methods must produce an envelope.
//!
//! Validation happens exactly once, at registration; execution reuses the
//! validated wrapper for every subsequent dispatch of that name.

use super::descriptor::{CandidateMethod, ParameterKind, ReturnKind};
use super::{EnvelopeHandler, HandlerResponse};
use crate::error::{DispatchError, DispatchResult};
use crate::messaging::Envelope;
use std::fmt;
use std::sync::Arc;
use tracing::{trace, Level};

/// A validated handler target bound to one dispatch mode for its lifetime.
pub struct HandlerMethod {
    target: Arc<dyn EnvelopeHandler>,
    identity: String,
    synchronous: bool,
}

impl HandlerMethod {
    /// Validate a candidate against the result kind it will be registered
    /// under and wrap it for dispatch.
    ///
    /// The check order is fixed: parameter count, parameter type, then the
    /// return-kind checks. For a multiply-invalid candidate the earliest
    /// failing check determines the error kind.
    pub fn new(
        handler_name: &str,
        candidate: &CandidateMethod,
        expected: &ReturnKind,
    ) -> DispatchResult<Self> {
        if candidate.parameters.len() != 1 {
            return Err(DispatchError::invalid_target(format!(
                "handler method must have exactly one parameter; found {}",
                candidate.parameters.len()
            )));
        }

        if candidate.parameters[0] != ParameterKind::Envelope {
            return Err(DispatchError::invalid_target(format!(
                "handler method must take an envelope as the argument, not a {}",
                candidate.parameters[0]
            )));
        }

        let synchronous = *expected != ReturnKind::Void;

        if !synchronous && candidate.returns != ReturnKind::Void {
            return Err(DispatchError::invalid_target(
                "asynchronous handler must return nothing",
            ));
        }
        if synchronous && *expected != ReturnKind::Envelope {
            return Err(DispatchError::contract_mismatch(format!(
                "synchronous handler must be declared to return an envelope, not a {expected}"
            )));
        }
        if synchronous && candidate.returns != ReturnKind::Envelope {
            return Err(DispatchError::contract_mismatch(format!(
                "synchronous handler must return an envelope, not a {}",
                candidate.returns
            )));
        }

        Ok(Self {
            target: Arc::clone(&candidate.target),
            identity: format!("{handler_name}.{}", candidate.method_name),
            synchronous,
        })
    }

    /// Whether this handler method returns a result envelope
    pub fn is_synchronous(&self) -> bool {
        self.synchronous
    }

    /// Trace identity of the wrapped target ("HandlerType.method")
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Invoke the target with the envelope.
    ///
    /// Emits a trace event before and after invocation; the envelope
    /// rendering is only computed while the trace level is enabled. Any
    /// failure raised by the target is re-raised as `HandlerExecution` with
    /// the original failure attached as cause, so callers can tell handler
    /// logic failure apart from routing failure. The raw response is
    /// returned unchanged.
    pub async fn execute(&self, envelope: &Envelope) -> DispatchResult<HandlerResponse> {
        if tracing::enabled!(Level::TRACE) {
            trace!(
                "Dispatching to handler {} : {}",
                self.identity,
                envelope.trace_string()
            );
        }

        let response = self
            .target
            .handle(envelope)
            .await
            .map_err(|source| DispatchError::handler_execution(&self.identity, envelope.id(), source))?;

        if tracing::enabled!(Level::TRACE) {
            match &response {
                HandlerResponse::Envelope(result) => trace!(
                    "Response received from handler {} : {}",
                    self.identity,
                    result.trace_string()
                ),
                HandlerResponse::Void => trace!(
                    "Response from handler {} with id {} was void",
                    self.identity,
                    envelope.id()
                ),
            }
        }

        Ok(response)
    }
}

impl fmt::Debug for HandlerMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerMethod")
            .field("identity", &self.identity)
            .field("synchronous", &self.synchronous)
            .finish()
    }
}

impl fmt::Display for HandlerMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HandlerMethod[{}]", self.identity)
    }
}
