#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Courier Core Rust
//!
//! Message-dispatch core for services built from independently deployed
//! components that exchange immutable, named envelopes.
//!
//! ## Overview
//!
//! Producers address messages by logical name (e.g.
//! `"context.command.do-something"`) and never know which component, if any,
//! will process them. This crate owns the three places where routing
//! correctness is decided:
//!
//! - binding logical names to handler targets, with eager duplicate and
//!   shape checking (the handler registry),
//! - enforcing the synchronous/asynchronous result contract of each handler
//!   and executing it with tracing (the invocation wrapper),
//! - outbound routing that resolves a dispatcher per calling role and fails
//!   over to a legacy transport when no in-process handler exists (the
//!   sender facade).
//!
//! Everything around these - component discovery, schema validation, broker
//! integration - is an external collaborator consumed as plain data or
//! through a trait seam.
//!
//! ## Module Organization
//!
//! - [`messaging`] - Envelope data model and trace rendering
//! - [`handler`] - Handler interface, discovery descriptors, invocation wrapper
//! - [`registry`] - Binding storage and lookup with wildcard fallback
//! - [`dispatch`] - Dispatcher, dispatcher cache, sender facade
//! - [`component`] - Service component roles and destination routing
//! - [`events`] - Registration lifecycle events
//! - [`error`] - Structured error handling
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use courier_core::component::Component;
//! use courier_core::dispatch::Dispatcher;
//! use courier_core::handler::{CandidateMethod, HandlerDescriptor};
//! use courier_core::messaging::Envelope;
//! use courier_core::registry::HandlerRegistry;
//! use courier_core::test_helpers::RecordingHandler;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! // Registration happens once, during initialization...
//! let mut registry = HandlerRegistry::new();
//! registry
//!     .register(&HandlerDescriptor::new(
//!         Component::CommandHandler,
//!         "RecipeCommandHandler",
//!         vec![CandidateMethod::asynchronous(
//!             "shop.create",
//!             "create",
//!             Arc::new(RecordingHandler::new()),
//!         )],
//!     ))
//!     .unwrap();
//!
//! // ...then the registry freezes and dispatch begins.
//! let dispatcher = Dispatcher::new(Arc::new(registry));
//! let envelope = Envelope::new("shop.create", serde_json::json!({"name": "Tiramisu"}));
//! dispatcher.asynchronous_dispatch(&envelope).await.unwrap();
//! # });
//! ```
//!
//! ## Concurrency
//!
//! Registration must complete before the first dispatch; that ordering is a
//! deployment-sequencing contract owned by the surrounding system. After
//! initialization the registry is read-only and safe for unsynchronized
//! concurrent lookup. Both dispatch modes execute the handler body inline on
//! the calling task - "asynchronous" refers to the return-value contract,
//! not to background execution.

pub mod component;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod handler;
pub mod logging;
pub mod messaging;
pub mod registry;
pub mod test_helpers;

pub use component::Component;
pub use config::DispatchConfig;
pub use dispatch::{
    CallingContext, Dispatcher, DispatcherCache, LegacySender, LegacySenderFactory,
    NoLegacyTransport, Sender, SenderFactory,
};
pub use error::{DispatchError, DispatchResult};
pub use events::{EventPublisher, PublishedEvent};
pub use handler::{
    CandidateMethod, DispatchMode, EnvelopeHandler, HandlerDescriptor, HandlerMethod,
    HandlerResponse, ParameterKind, ReturnKind,
};
pub use messaging::{Envelope, EnvelopeMetadata};
pub use registry::{HandlerKey, HandlerRegistry, RegistryStats, WILDCARD};
