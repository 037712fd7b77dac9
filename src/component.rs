//! # Service Component Roles
//!
//! Every deployed component declares exactly one role. The role determines
//! which pillar of the service it belongs to (command, event or query flow)
//! and, for outbound-capable roles, which role's dispatcher the sender
//! facade routes to by default.
//!
//! Discovery produces these as plain data: the external scanning step tags
//! each discovered handler object with its declared role before the list
//! reaches the registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a deployed service component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Component {
    CommandApi,
    CommandController,
    CommandHandler,
    EventApi,
    EventProcessor,
    EventListener,
    QueryApi,
    QueryView,
}

impl Component {
    /// The role whose dispatcher an outbound sender for this role targets.
    ///
    /// Inbound-only roles (the end of each pillar) have no destination and
    /// cannot obtain a sender.
    pub fn default_destination(self) -> Option<Component> {
        match self {
            Component::CommandApi => Some(Component::CommandController),
            Component::CommandController => Some(Component::CommandHandler),
            Component::EventApi => Some(Component::EventProcessor),
            Component::EventProcessor => Some(Component::EventListener),
            Component::QueryApi => Some(Component::QueryView),
            Component::CommandHandler | Component::EventListener | Component::QueryView => None,
        }
    }

    /// Whether this role only receives messages.
    pub fn is_inbound_only(self) -> bool {
        self.default_destination().is_none()
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::CommandApi => "COMMAND_API",
            Component::CommandController => "COMMAND_CONTROLLER",
            Component::CommandHandler => "COMMAND_HANDLER",
            Component::EventApi => "EVENT_API",
            Component::EventProcessor => "EVENT_PROCESSOR",
            Component::EventListener => "EVENT_LISTENER",
            Component::QueryApi => "QUERY_API",
            Component::QueryView => "QUERY_VIEW",
        };
        write!(f, "{name}")
    }
}
