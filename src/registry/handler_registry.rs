//! # Handler Registry Storage
//!
//! Maps `(name, mode)` keys to validated handler methods. Duplicate and
//! shape defects are detected eagerly at registration so a broken deployment
//! fails before the first dispatch, never during it.

use crate::error::{DispatchError, DispatchResult};
use crate::events::EventPublisher;
use crate::handler::{DispatchMode, HandlerDescriptor, HandlerMethod};
use crate::logging::log_registry_operation;
use serde_json::json;
use std::collections::HashMap;
use std::fmt;

/// Reserved name pattern matching any name not otherwise bound.
pub const WILDCARD: &str = "*";

/// Key for binding lookup in the registry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerKey {
    pub name: String,
    pub mode: DispatchMode,
}

impl HandlerKey {
    /// Create a new handler key
    pub fn new(name: impl Into<String>, mode: DispatchMode) -> Self {
        Self {
            name: name.into(),
            mode,
        }
    }
}

impl fmt::Display for HandlerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.mode)
    }
}

/// Registry statistics
#[derive(Debug, Clone)]
pub struct RegistryStats {
    pub total_bindings: usize,
    pub synchronous_bindings: usize,
    pub asynchronous_bindings: usize,
    pub names: Vec<String>,
}

/// Binding storage for one component instance.
///
/// Built once during initialization, read-only afterwards.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    bindings: HashMap<HandlerKey, HandlerMethod>,
    event_publisher: Option<EventPublisher>,
}

impl HandlerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            event_publisher: None,
        }
    }

    /// Create a registry that publishes registration lifecycle events
    pub fn with_event_publisher(event_publisher: EventPublisher) -> Self {
        Self {
            bindings: HashMap::new(),
            event_publisher: Some(event_publisher),
        }
    }

    /// Register every candidate method of one discovered handler object.
    ///
    /// The candidate's declared return kind determines its mode: void means
    /// asynchronous, envelope-returning means synchronous. Shape defects
    /// surface as `InvalidHandler` and a second binding for an already-bound
    /// `(name, mode)` surfaces as `DuplicateHandler`; in both cases
    /// registration halts and previously inserted bindings stay intact.
    pub fn register(&mut self, descriptor: &HandlerDescriptor) -> DispatchResult<()> {
        for candidate in &descriptor.candidates {
            let method =
                HandlerMethod::new(&descriptor.handler_name, candidate, &candidate.returns)
                    .map_err(|err| {
                        DispatchError::invalid_handler(&descriptor.handler_name, err.to_string())
                    })?;

            let mode = if method.is_synchronous() {
                DispatchMode::Synchronous
            } else {
                DispatchMode::Asynchronous
            };

            let key = HandlerKey::new(&candidate.handles, mode);
            if self.bindings.contains_key(&key) {
                return Err(DispatchError::duplicate_handler(&candidate.handles, mode));
            }

            let identity = method.identity().to_string();
            self.bindings.insert(key, method);

            log_registry_operation(
                "register",
                Some(&candidate.handles),
                Some(&mode.to_string()),
                "registered",
                Some(&identity),
            );

            if let Some(publisher) = &self.event_publisher {
                publisher.publish(
                    "handler.registered",
                    json!({
                        "name": candidate.handles,
                        "mode": mode.to_string(),
                        "handler": identity,
                    }),
                );
            }
        }

        Ok(())
    }

    /// Resolve the binding for a name under one mode.
    ///
    /// Exact match first, wildcard fallback second; a miss under the
    /// requested mode is `MissingHandler` even when the name is bound under
    /// the other mode.
    pub fn lookup(&self, name: &str, mode: DispatchMode) -> DispatchResult<&HandlerMethod> {
        if let Some(method) = self.bindings.get(&HandlerKey::new(name, mode)) {
            return Ok(method);
        }

        self.bindings
            .get(&HandlerKey::new(WILDCARD, mode))
            .ok_or_else(|| DispatchError::missing_handler(name, mode))
    }

    /// Get registry statistics
    pub fn stats(&self) -> RegistryStats {
        let synchronous_bindings = self
            .bindings
            .keys()
            .filter(|key| key.mode.is_synchronous())
            .count();

        let mut names: Vec<String> = self.bindings.keys().map(|key| key.name.clone()).collect();
        names.sort();
        names.dedup();

        RegistryStats {
            total_bindings: self.bindings.len(),
            synchronous_bindings,
            asynchronous_bindings: self.bindings.len() - synchronous_bindings,
            names,
        }
    }
}
