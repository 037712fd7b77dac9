//! # Handler Registry
//!
//! Binding storage and resolution for one component instance.
//!
//! ## Overview
//!
//! A registry owns the complete set of `(name, mode)` bindings for its
//! component. Bindings are created from discovery descriptors during the
//! initialization phase and are immutable afterwards: registration goes
//! through `&mut HandlerRegistry`, then the deployment wiring freezes the
//! registry behind an `Arc` and every dispatch thread may look bindings up
//! without locking.
//!
//! ## Resolution rules
//!
//! - Exact `(name, mode)` match wins.
//! - Otherwise the wildcard binding `("*", mode)` is used if present.
//! - A binding registered under the other mode never satisfies a lookup.
//!
//! ## Usage
//!
//! ```rust
//! use courier_core::component::Component;
//! use courier_core::handler::{CandidateMethod, DispatchMode, HandlerDescriptor};
//! use courier_core::registry::HandlerRegistry;
//! use courier_core::test_helpers::RecordingHandler;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = HandlerRegistry::new();
//! registry.register(&HandlerDescriptor::new(
//!     Component::CommandHandler,
//!     "RecipeCommandHandler",
//!     vec![CandidateMethod::asynchronous(
//!         "shop.create",
//!         "create",
//!         Arc::new(RecordingHandler::new()),
//!     )],
//! ))?;
//!
//! let method = registry.lookup("shop.create", DispatchMode::Asynchronous)?;
//! assert!(!method.is_synchronous());
//! # Ok(())
//! # }
//! ```

pub mod handler_registry;

pub use handler_registry::{HandlerKey, HandlerRegistry, RegistryStats, WILDCARD};
