//! # Sender Facade
//!
//! Outbound routing for a calling component: resolve the dispatcher for the
//! caller's target role once, then try every send in-process first and fall
//! back to the legacy external transport only when no in-process handler is
//! bound for the envelope's name.
//!
//! ## Failover rule
//!
//! The two-tier behavior exists so newly migrated in-process handlers
//! transparently supersede an existing external broker route: while both
//! exist, in-process wins; once the external route is retired, misses become
//! terminal. Only `MissingHandler` triggers the fallback; a handler that
//! exists and fails is never retried against the legacy transport.

use super::{Dispatcher, DispatcherCache};
use crate::component::Component;
use crate::config::DispatchConfig;
use crate::error::{DispatchError, DispatchResult};
use crate::logging::log_dispatch_operation;
use crate::messaging::Envelope;
use async_trait::async_trait;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;

/// The static role context of an outbound caller.
///
/// The external discovery step materializes this from the caller's role
/// marker; a caller without a marker has `component: None` and cannot obtain
/// a sender.
#[derive(Debug, Clone)]
pub struct CallingContext {
    /// Type name of the declaring caller, used in diagnostics
    pub declared_by: String,
    /// The caller's declared role, if any
    pub component: Option<Component>,
}

impl CallingContext {
    /// Context for a caller with a declared role
    pub fn new(declared_by: impl Into<String>, component: Component) -> Self {
        Self {
            declared_by: declared_by.into(),
            component: Some(component),
        }
    }

    /// Context for a caller without a role marker
    pub fn unannotated(declared_by: impl Into<String>) -> Self {
        Self {
            declared_by: declared_by.into(),
            component: None,
        }
    }
}

/// Opaque external fallback transport, addressed by role.
///
/// The dispatch core knows nothing about it beyond "it either succeeds or
/// raises".
#[async_trait]
pub trait LegacySender: Send + Sync {
    /// Send an envelope to the outside world
    async fn send(&self, envelope: &Envelope) -> anyhow::Result<()>;
}

/// Supplies the legacy transport handle for a destination role, if one is
/// configured.
pub trait LegacySenderFactory: Send + Sync {
    /// The legacy sender for a destination role, or `None` when the role has
    /// no external route
    fn legacy_sender_for(&self, destination: Component) -> Option<Arc<dyn LegacySender>>;
}

/// Factory for deployments with no external broker routes at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLegacyTransport;

impl LegacySenderFactory for NoLegacyTransport {
    fn legacy_sender_for(&self, _destination: Component) -> Option<Arc<dyn LegacySender>> {
        None
    }
}

/// Outbound sender resolved for one calling role.
pub struct Sender {
    dispatcher: Arc<Dispatcher>,
    legacy: Option<Arc<dyn LegacySender>>,
}

impl Sender {
    /// Create a sender over a destination dispatcher and an optional legacy
    /// route
    pub fn new(dispatcher: Arc<Dispatcher>, legacy: Option<Arc<dyn LegacySender>>) -> Self {
        Self { dispatcher, legacy }
    }

    /// Send an envelope to whichever handler owns its name.
    ///
    /// In-process dispatch is attempted exactly once. A `MissingHandler`
    /// miss falls back to the legacy transport when one is configured and
    /// propagates unmodified when none is; every other failure propagates
    /// without touching the legacy transport.
    pub async fn send(&self, envelope: &Envelope) -> DispatchResult<()> {
        match self.dispatcher.asynchronous_dispatch(envelope).await {
            Ok(()) => Ok(()),
            Err(err @ DispatchError::MissingHandler { .. }) => match &self.legacy {
                Some(legacy) => {
                    log_dispatch_operation(
                        "send",
                        envelope.name(),
                        Some(envelope.id()),
                        "legacy_fallback",
                        None,
                    );
                    legacy
                        .send(envelope)
                        .await
                        .map_err(DispatchError::transport)
                }
                None => Err(err),
            },
            Err(other) => Err(other),
        }
    }
}

impl fmt::Debug for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sender")
            .field("dispatcher", &self.dispatcher)
            .field("legacy", &self.legacy.as_ref().map(|_| "<Arc<dyn LegacySender>>"))
            .finish()
    }
}

/// Resolves and caches one [`Sender`] per calling role.
pub struct SenderFactory {
    dispatcher_cache: Arc<DispatcherCache>,
    legacy_factory: Arc<dyn LegacySenderFactory>,
    legacy_enabled: bool,
    senders: DashMap<Component, Arc<Sender>>,
}

impl SenderFactory {
    /// Create a factory with legacy fallback enabled
    pub fn new(
        dispatcher_cache: Arc<DispatcherCache>,
        legacy_factory: Arc<dyn LegacySenderFactory>,
    ) -> Self {
        Self {
            dispatcher_cache,
            legacy_factory,
            legacy_enabled: true,
            senders: DashMap::new(),
        }
    }

    /// Create a factory honoring the configured legacy fallback toggle
    pub fn with_config(
        dispatcher_cache: Arc<DispatcherCache>,
        legacy_factory: Arc<dyn LegacySenderFactory>,
        config: &DispatchConfig,
    ) -> Self {
        Self {
            dispatcher_cache,
            legacy_factory,
            legacy_enabled: config.legacy_fallback_enabled,
            senders: DashMap::new(),
        }
    }

    /// Resolve the sender for a calling context.
    ///
    /// Resolution happens once per calling role and is cached for the role's
    /// lifetime. A context without a role fails with
    /// `MissingRoleAnnotation`; a role this facade has no routing for
    /// (inbound-only roles) fails with `InvalidArgument`.
    pub fn sender_for(&self, context: &CallingContext) -> DispatchResult<Arc<Sender>> {
        let component = context
            .component
            .ok_or_else(|| DispatchError::missing_role(&context.declared_by))?;

        let destination = component.default_destination().ok_or_else(|| {
            DispatchError::invalid_argument(format!(
                "no sender routing for component {component} declared by {}",
                context.declared_by
            ))
        })?;

        if let Some(sender) = self.senders.get(&component) {
            return Ok(Arc::clone(&sender));
        }

        let dispatcher = self.dispatcher_cache.dispatcher_for(destination);
        let legacy = if self.legacy_enabled {
            self.legacy_factory.legacy_sender_for(destination)
        } else {
            None
        };

        let sender = self
            .senders
            .entry(component)
            .or_insert_with(|| Arc::new(Sender::new(dispatcher, legacy)));
        Ok(Arc::clone(&sender))
    }
}

impl fmt::Debug for SenderFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SenderFactory")
            .field("legacy_enabled", &self.legacy_enabled)
            .field("cached_senders", &self.senders.len())
            .finish()
    }
}
