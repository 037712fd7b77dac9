//! # Dispatch Entry Points
//!
//! The per-role invocation entry point ([`Dispatcher`]), the role-keyed
//! dispatcher cache, and the outbound sender facade with legacy-transport
//! failover.
//!
//! ## Control flow
//!
//! An external caller obtains a [`Sender`] for its own declared role. The
//! sender holds the dispatcher for the caller's target role (resolved once,
//! cached) and attempts every send in-process first; only a missing
//! in-process binding falls back to the legacy transport, so newly migrated
//! handlers transparently supersede an external broker route without a
//! coordinated cutover.

pub mod dispatcher;
pub mod dispatcher_cache;
pub mod sender;

pub use dispatcher::Dispatcher;
pub use dispatcher_cache::DispatcherCache;
pub use sender::{
    CallingContext, LegacySender, LegacySenderFactory, NoLegacyTransport, Sender, SenderFactory,
};
