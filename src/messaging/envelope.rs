//! # Envelope Structures
//!
//! Defines the immutable message unit routed by the dispatch core: a logical
//! name plus identifiers and causation chain in the metadata, and an opaque
//! structured payload. The core never inspects the payload.

use serde::{Deserialize, Serialize};
use serde_json;
use uuid::Uuid;

/// Metadata carried by every envelope.
///
/// The `name` addresses a handler; everything else exists for correlation
/// and tracing, never for routing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnvelopeMetadata {
    /// Unique id of this envelope instance
    pub id: Uuid,
    /// Logical name used to resolve a handler (e.g. "shop.findRecipe")
    pub name: String,
    /// Client correlation identifier, if the caller supplied one
    pub correlation_id: Option<String>,
    /// Session identifier, if the caller supplied one
    pub session_id: Option<String>,
    /// User identifier, if the caller supplied one
    pub user_id: Option<String>,
    /// Ordered ancestry of envelope ids this message was caused by
    pub causation: Vec<Uuid>,
}

impl EnvelopeMetadata {
    /// Create metadata with a fresh id and an empty causation chain
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            correlation_id: None,
            session_id: None,
            user_id: None,
            causation: Vec::new(),
        }
    }
}

/// An immutable named message with structured metadata and an opaque payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    /// Envelope metadata
    pub metadata: EnvelopeMetadata,
    /// Opaque structured payload; never interpreted by the dispatch core
    pub payload: serde_json::Value,
}

/// Serialization view for the bounded trace rendering. Field order is part
/// of the rendering contract: id, name, correlation, session, user, causation.
#[derive(Serialize)]
struct TraceMetadata<'a> {
    id: &'a Uuid,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    session: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a str>,
    causation: &'a [Uuid],
}

impl Envelope {
    /// Create a new envelope with a fresh id and an empty causation chain
    pub fn new(name: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            metadata: EnvelopeMetadata::new(name),
            payload,
        }
    }

    /// Create an envelope with fully explicit metadata
    pub fn with_metadata(metadata: EnvelopeMetadata, payload: serde_json::Value) -> Self {
        Self { metadata, payload }
    }

    /// Logical name used for handler resolution
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Unique id of this envelope instance
    pub fn id(&self) -> Uuid {
        self.metadata.id
    }

    /// Build a response envelope caused by this one.
    ///
    /// The response gets a fresh id, carries this envelope's correlation,
    /// session and user identifiers, and extends the causation chain with
    /// this envelope's id.
    pub fn respond_with(&self, name: impl Into<String>, payload: serde_json::Value) -> Envelope {
        let mut causation = self.metadata.causation.clone();
        causation.push(self.metadata.id);

        Envelope {
            metadata: EnvelopeMetadata {
                id: Uuid::new_v4(),
                name: name.into(),
                correlation_id: self.metadata.correlation_id.clone(),
                session_id: self.metadata.session_id.clone(),
                user_id: self.metadata.user_id.clone(),
                causation,
            },
            payload,
        }
    }

    /// Bounded textual rendering for trace diagnostics.
    ///
    /// Renders the metadata as compact JSON in a fixed field order and never
    /// includes the payload.
    pub fn trace_string(&self) -> String {
        let view = TraceMetadata {
            id: &self.metadata.id,
            name: &self.metadata.name,
            correlation: self.metadata.correlation_id.as_deref(),
            session: self.metadata.session_id.as_deref(),
            user: self.metadata.user_id.as_deref(),
            causation: &self.metadata.causation,
        };
        serde_json::to_string(&view)
            .unwrap_or_else(|_| format!("{{\"id\":\"{}\"}}", self.metadata.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_creation() {
        let envelope = Envelope::new("shop.findRecipe", json!({"recipeId": "1234"}));

        assert_eq!(envelope.name(), "shop.findRecipe");
        assert!(envelope.metadata.causation.is_empty());
        assert!(envelope.metadata.correlation_id.is_none());
        assert_eq!(envelope.payload, json!({"recipeId": "1234"}));
    }

    #[test]
    fn test_envelope_json_serialization() {
        let envelope = Envelope::new("shop.create", json!({"name": "Chocolate Cake"}));

        let serialized = serde_json::to_value(&envelope).unwrap();
        let deserialized: Envelope = serde_json::from_value(serialized).unwrap();

        assert_eq!(envelope, deserialized);
    }

    #[test]
    fn test_respond_with_extends_causation() {
        let mut metadata = EnvelopeMetadata::new("shop.findRecipe");
        metadata.correlation_id = Some("correlation-1".to_string());
        metadata.session_id = Some("session-1".to_string());
        metadata.user_id = Some("user-1".to_string());
        let request = Envelope::with_metadata(metadata, json!({}));

        let response = request.respond_with("shop.recipeFound", json!({"found": true}));

        assert_ne!(response.id(), request.id());
        assert_eq!(response.metadata.causation, vec![request.id()]);
        assert_eq!(
            response.metadata.correlation_id.as_deref(),
            Some("correlation-1")
        );
        assert_eq!(response.metadata.session_id.as_deref(), Some("session-1"));
        assert_eq!(response.metadata.user_id.as_deref(), Some("user-1"));
    }

    #[test]
    fn test_respond_with_chains_existing_causation() {
        let origin = Envelope::new("shop.create", json!({}));
        let first = origin.respond_with("shop.created", json!({}));
        let second = first.respond_with("shop.createConfirmed", json!({}));

        assert_eq!(second.metadata.causation, vec![origin.id(), first.id()]);
    }

    #[test]
    fn test_trace_string_renders_metadata_only() {
        let mut metadata = EnvelopeMetadata::new("test.command.do-something");
        metadata.correlation_id = Some("d51597dc".to_string());
        metadata.session_id = Some("45b0c3fe".to_string());
        metadata.user_id = Some("72251abb".to_string());
        let envelope = Envelope::with_metadata(metadata, json!({"secret": "payload"}));

        let rendered = envelope.trace_string();

        assert!(rendered.contains("\"name\":\"test.command.do-something\""));
        assert!(rendered.contains("\"correlation\":\"d51597dc\""));
        assert!(rendered.contains("\"session\":\"45b0c3fe\""));
        assert!(rendered.contains("\"user\":\"72251abb\""));
        assert!(rendered.contains("\"causation\":[]"));
        assert!(!rendered.contains("payload"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_trace_string_field_order() {
        let envelope = Envelope::new("shop.create", json!({}));
        let rendered = envelope.trace_string();

        let id_at = rendered.find("\"id\"").unwrap();
        let name_at = rendered.find("\"name\"").unwrap();
        let causation_at = rendered.find("\"causation\"").unwrap();
        assert!(id_at < name_at);
        assert!(name_at < causation_at);
    }

    #[test]
    fn test_trace_string_omits_absent_identifiers() {
        let envelope = Envelope::new("shop.create", json!({}));
        let rendered = envelope.trace_string();

        assert!(!rendered.contains("\"correlation\""));
        assert!(!rendered.contains("\"session\""));
        assert!(!rendered.contains("\"user\""));
    }
}
