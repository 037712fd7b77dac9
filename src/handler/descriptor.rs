//! # Handler Descriptors
//!
//! Plain-data output of the external component-discovery step.
//!
//! Discovery scans deployed objects for role markers and declared-name tags,
//! then materializes what it found as descriptor lists: one
//! [`HandlerDescriptor`] per discovered handler object, each carrying the
//! candidate methods with their declared logical name and raw signature.
//! The registry consumes these as ordinary data; no runtime type inspection
//! happens inside the dispatch core.

use super::EnvelopeHandler;
use crate::component::Component;
use std::fmt;
use std::sync::Arc;

/// Declared parameter type of a candidate handler method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterKind {
    /// The parameter is an envelope
    Envelope,
    /// Any other declared type; carries the type name for diagnostics
    Other(String),
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterKind::Envelope => write!(f, "Envelope"),
            ParameterKind::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Declared return kind of a candidate handler method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnKind {
    /// The method returns nothing
    Void,
    /// The method returns an envelope
    Envelope,
    /// Any other declared type; carries the type name for diagnostics
    Other(String),
}

impl fmt::Display for ReturnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnKind::Void => write!(f, "void"),
            ReturnKind::Envelope => write!(f, "Envelope"),
            ReturnKind::Other(name) => write!(f, "{name}"),
        }
    }
}

/// One candidate handler method on a discovered handler object.
#[derive(Clone)]
pub struct CandidateMethod {
    /// Logical name this candidate claims to handle, or the wildcard `"*"`
    pub handles: String,
    /// Method name on the handler object, used for trace identity
    pub method_name: String,
    /// Declared parameter types, in order
    pub parameters: Vec<ParameterKind>,
    /// Declared return kind
    pub returns: ReturnKind,
    /// The invocation target the discovery step adapted the method into
    pub target: Arc<dyn EnvelopeHandler>,
}

impl CandidateMethod {
    /// Create a candidate with an explicit signature
    pub fn new(
        handles: impl Into<String>,
        method_name: impl Into<String>,
        parameters: Vec<ParameterKind>,
        returns: ReturnKind,
        target: Arc<dyn EnvelopeHandler>,
    ) -> Self {
        Self {
            handles: handles.into(),
            method_name: method_name.into(),
            parameters,
            returns,
            target,
        }
    }

    /// Create a well-formed synchronous candidate: one envelope parameter,
    /// envelope return
    pub fn synchronous(
        handles: impl Into<String>,
        method_name: impl Into<String>,
        target: Arc<dyn EnvelopeHandler>,
    ) -> Self {
        Self::new(
            handles,
            method_name,
            vec![ParameterKind::Envelope],
            ReturnKind::Envelope,
            target,
        )
    }

    /// Create a well-formed asynchronous candidate: one envelope parameter,
    /// void return
    pub fn asynchronous(
        handles: impl Into<String>,
        method_name: impl Into<String>,
        target: Arc<dyn EnvelopeHandler>,
    ) -> Self {
        Self::new(
            handles,
            method_name,
            vec![ParameterKind::Envelope],
            ReturnKind::Void,
            target,
        )
    }
}

impl fmt::Debug for CandidateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateMethod")
            .field("handles", &self.handles)
            .field("method_name", &self.method_name)
            .field("parameters", &self.parameters)
            .field("returns", &self.returns)
            .field("target", &"<Arc<dyn EnvelopeHandler>>".to_string())
            .finish()
    }
}

/// One discovered handler object together with its declared role and
/// candidate methods.
#[derive(Clone)]
pub struct HandlerDescriptor {
    /// Role the handler object was discovered under
    pub component: Component,
    /// Type name of the handler object, used for trace identity
    pub handler_name: String,
    /// Candidate handler methods found on the object
    pub candidates: Vec<CandidateMethod>,
}

impl HandlerDescriptor {
    /// Create a descriptor for one discovered handler object
    pub fn new(
        component: Component,
        handler_name: impl Into<String>,
        candidates: Vec<CandidateMethod>,
    ) -> Self {
        Self {
            component,
            handler_name: handler_name.into(),
            candidates,
        }
    }
}

impl fmt::Debug for HandlerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerDescriptor")
            .field("component", &self.component)
            .field("handler_name", &self.handler_name)
            .field("candidates", &self.candidates)
            .finish()
    }
}
