//! # Dispatch Configuration
//!
//! Ambient configuration for the dispatch core, layered from an optional
//! `courier` config file and `COURIER_`-prefixed environment variables.
//! Everything has a documented default; the core is fully usable with no
//! configuration present.

use crate::error::DispatchResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Capacity of the registration-event broadcast channel
    pub event_channel_capacity: usize,
    /// Whether sender facades fall back to the legacy transport on a missing
    /// in-process handler
    pub legacy_fallback_enabled: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            event_channel_capacity: 1000,
            legacy_fallback_enabled: true,
        }
    }
}

impl DispatchConfig {
    /// Load configuration from `courier.*` (if present) and the
    /// `COURIER_` environment prefix
    pub fn load() -> DispatchResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("courier").required(false))
            .add_source(config::Environment::with_prefix("COURIER"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = DispatchConfig::default();
        assert_eq!(config.event_channel_capacity, 1000);
        assert!(config.legacy_fallback_enabled);
    }

    #[test]
    fn test_load_without_sources_yields_defaults() {
        let config = DispatchConfig::load().unwrap();
        assert_eq!(config.event_channel_capacity, 1000);
        assert!(config.legacy_fallback_enabled);
    }
}
