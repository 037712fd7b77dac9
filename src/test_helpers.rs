//! # Test Helpers
//!
//! Recording handlers and transports shared by unit and integration tests.
//! These live in `src/` so both `#[cfg(test)]` modules and the `tests/`
//! directory can use them.

use crate::dispatch::{LegacySender, LegacySenderFactory};
use crate::handler::{EnvelopeHandler, HandlerResponse};
use crate::messaging::Envelope;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;

/// Build a minimal envelope for tests
pub fn test_envelope(name: &str) -> Envelope {
    Envelope::new(name, json!({}))
}

/// Asynchronous handler that records every envelope it receives
#[derive(Default)]
pub struct RecordingHandler {
    recorded: Mutex<Vec<Envelope>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Envelopes received so far, in order
    pub fn recorded(&self) -> Vec<Envelope> {
        self.recorded.lock().clone()
    }
}

#[async_trait]
impl EnvelopeHandler for RecordingHandler {
    async fn handle(&self, envelope: &Envelope) -> anyhow::Result<HandlerResponse> {
        self.recorded.lock().push(envelope.clone());
        Ok(HandlerResponse::Void)
    }
}

/// Synchronous handler that records and returns the envelope it received
#[derive(Default)]
pub struct EchoHandler {
    recorded: Mutex<Vec<Envelope>>,
}

impl EchoHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<Envelope> {
        self.recorded.lock().clone()
    }
}

#[async_trait]
impl EnvelopeHandler for EchoHandler {
    async fn handle(&self, envelope: &Envelope) -> anyhow::Result<HandlerResponse> {
        self.recorded.lock().push(envelope.clone());
        Ok(HandlerResponse::Envelope(envelope.clone()))
    }
}

/// Synchronous handler that answers with a response envelope caused by the
/// request
pub struct RespondingHandler {
    response_name: String,
}

impl RespondingHandler {
    pub fn new(response_name: impl Into<String>) -> Self {
        Self {
            response_name: response_name.into(),
        }
    }
}

#[async_trait]
impl EnvelopeHandler for RespondingHandler {
    async fn handle(&self, envelope: &Envelope) -> anyhow::Result<HandlerResponse> {
        let response = envelope.respond_with(self.response_name.clone(), json!({"handled": true}));
        Ok(HandlerResponse::Envelope(response))
    }
}

/// Handler that always fails with the configured message
pub struct FailingHandler {
    message: String,
}

impl FailingHandler {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl EnvelopeHandler for FailingHandler {
    async fn handle(&self, _envelope: &Envelope) -> anyhow::Result<HandlerResponse> {
        Err(anyhow::anyhow!(self.message.clone()))
    }
}

/// Legacy transport that records every envelope sent through it
#[derive(Default)]
pub struct RecordingLegacySender {
    recorded: Mutex<Vec<Envelope>>,
}

impl RecordingLegacySender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<Envelope> {
        self.recorded.lock().clone()
    }
}

#[async_trait]
impl LegacySender for RecordingLegacySender {
    async fn send(&self, envelope: &Envelope) -> anyhow::Result<()> {
        self.recorded.lock().push(envelope.clone());
        Ok(())
    }
}

/// Legacy transport that always fails
#[derive(Default)]
pub struct FailingLegacySender;

#[async_trait]
impl LegacySender for FailingLegacySender {
    async fn send(&self, _envelope: &Envelope) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("legacy transport unavailable"))
    }
}

/// Factory that hands out the same legacy sender for every destination
pub struct StaticLegacyFactory {
    sender: Arc<dyn LegacySender>,
}

impl StaticLegacyFactory {
    pub fn new(sender: Arc<dyn LegacySender>) -> Self {
        Self { sender }
    }
}

impl LegacySenderFactory for StaticLegacyFactory {
    fn legacy_sender_for(&self, _destination: crate::component::Component) -> Option<Arc<dyn LegacySender>> {
        Some(Arc::clone(&self.sender))
    }
}
