//! # Registration Event System
//!
//! Broadcast publisher for handler-registration lifecycle events, consumed
//! by monitoring and deployment tooling.

pub mod publisher;

pub use publisher::{EventPublisher, PublishedEvent};
