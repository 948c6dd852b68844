//! Builder and configuration for registries.

use crate::registry::Registry;
use crate::transitions::TransitionTable;
use serde::{Deserialize, Serialize};

/// Registry settings that can be loaded from configuration files.
///
/// Hooks are code and live in the [`TransitionTable`]; everything else a
/// registry needs is plain data.
///
/// # Example
///
/// ```rust
/// use hookstate::builder::RegistryConfig;
///
/// let config = RegistryConfig::from_json(r#"{ "initial_state": "birth" }"#).unwrap();
///
/// assert_eq!(config.initial_state.as_deref(), Some("birth"));
/// assert!(!config.reenter_same_state);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Name every new State enters on creation
    pub initial_state: Option<String>,

    /// Whether `to(name)` runs again when already in `name`.
    /// When `false` such a call changes nothing.
    pub reenter_same_state: bool,
}

impl RegistryConfig {
    /// Parse a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Builder for [`Registry`] with a fluent API.
#[derive(Default)]
pub struct RegistryBuilder {
    transitions: TransitionTable,
    config: RegistryConfig,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transition table. Defaults to an empty table.
    pub fn transitions(mut self, table: TransitionTable) -> Self {
        self.transitions = table;
        self
    }

    /// Set the name new States enter on creation.
    pub fn initial_state(mut self, name: impl Into<String>) -> Self {
        self.config.initial_state = Some(name.into());
        self
    }

    /// Choose whether same-name transitions run again.
    pub fn reenter_same_state(mut self, reenter: bool) -> Self {
        self.config.reenter_same_state = reenter;
        self
    }

    /// Replace all settings with `config`.
    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Registry {
        Registry::with_config(self.transitions, self.config)
    }
}
