//! # Dispatcher Cache
//!
//! Role-keyed cache of dispatchers. Deployment wiring inserts one dispatcher
//! per component during initialization; the sender facade resolves
//! destination dispatchers from here.

use super::Dispatcher;
use crate::component::Component;
use crate::registry::HandlerRegistry;
use dashmap::DashMap;
use std::sync::Arc;

/// Thread-safe map from component role to its dispatcher.
///
/// A lookup for a role with no inserted dispatcher creates one over an empty
/// registry: dispatch against it fails with `MissingHandler`, which is
/// exactly what lets the sender facade fall through to the legacy transport
/// for roles that have not migrated in-process yet.
#[derive(Debug, Default)]
pub struct DispatcherCache {
    dispatchers: DashMap<Component, Arc<Dispatcher>>,
}

impl DispatcherCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            dispatchers: DashMap::new(),
        }
    }

    /// Insert the dispatcher owned by a component
    pub fn insert(&self, component: Component, dispatcher: Arc<Dispatcher>) {
        self.dispatchers.insert(component, dispatcher);
    }

    /// Get the dispatcher for a component, creating an empty one on demand
    pub fn dispatcher_for(&self, component: Component) -> Arc<Dispatcher> {
        self.dispatchers
            .entry(component)
            .or_insert_with(|| Arc::new(Dispatcher::new(Arc::new(HandlerRegistry::new()))))
            .clone()
    }
}
