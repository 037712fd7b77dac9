//! # Envelope Data Model
//!
//! Immutable message units exchanged between service components. Envelopes
//! are consumed read-only by the dispatch core; producing and validating
//! them belongs to the surrounding system.

pub mod envelope;

pub use envelope::{Envelope, EnvelopeMetadata};
