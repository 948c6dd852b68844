//! Keyed registry of States sharing one transition table.

use crate::builder::{RegistryBuilder, RegistryConfig};
use crate::core::Fields;
use crate::state::State;
use crate::transitions::{TransitionError, TransitionTable};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Maps caller keys to [`State`]s.
///
/// The registry owns the transition table every State consults and the
/// optional initial name each new State enters on creation. States are
/// never removed; creating a State under a taken key replaces the old one.
///
/// # Example
///
/// ```rust
/// use hookstate::{Registry, TransitionTable};
///
/// let mut registry = Registry::new(TransitionTable::new(), Some("birth"));
/// let id = registry.create("first").unwrap().id();
///
/// assert_eq!(registry.get("first").map(|s| s.id()), Some(id));
/// assert!(registry.get("second").is_none());
/// ```
#[derive(Debug)]
pub struct Registry {
    transitions: Arc<TransitionTable>,
    config: RegistryConfig,
    states: HashMap<String, State>,
}

impl Registry {
    /// Create a registry with a transition table and optional initial name.
    pub fn new(transitions: TransitionTable, initial_state: Option<&str>) -> Self {
        Self::with_config(
            transitions,
            RegistryConfig {
                initial_state: initial_state.map(str::to_string),
                ..RegistryConfig::default()
            },
        )
    }

    /// Create a registry from a table and a full configuration.
    pub fn with_config(transitions: TransitionTable, config: RegistryConfig) -> Self {
        Self {
            transitions: Arc::new(transitions),
            config,
            states: HashMap::new(),
        }
    }

    /// Start a [`RegistryBuilder`].
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Create an empty State under `key`.
    ///
    /// See [`Registry::create_with`].
    pub fn create(&mut self, key: &str) -> Result<&mut State, TransitionError> {
        self.create_with(key, Fields::new())
    }

    /// Create a State under `key` seeded with `data`.
    ///
    /// When the registry has an initial name the new State transitions into
    /// it before being registered. Any State already stored at `key` is
    /// replaced.
    ///
    /// # Errors
    ///
    /// Fails when the initial transition's hook fails. Nothing is registered
    /// in that case and a State previously stored at `key` stays in place.
    pub fn create_with(&mut self, key: &str, data: Fields) -> Result<&mut State, TransitionError> {
        let mut state = State::new(
            key,
            data,
            Arc::clone(&self.transitions),
            self.config.reenter_same_state,
        );

        if let Some(initial) = &self.config.initial_state {
            state.to(initial)?;
        }

        let state = match self.states.entry(key.to_string()) {
            Entry::Occupied(mut entry) => {
                debug!(key, "replacing existing state");
                entry.insert(state);
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                debug!(key, "state created");
                entry.insert(state)
            }
        };
        Ok(state)
    }

    /// The State stored at `key`, if any.
    pub fn get(&self, key: &str) -> Option<&State> {
        self.states.get(key)
    }

    /// Mutable access to the State stored at `key`, if any.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut State> {
        self.states.get_mut(key)
    }

    /// Whether a State is stored at `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.states.contains_key(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.states.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of registered States.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no State has been created yet.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Name every new State enters on creation.
    pub fn initial_state(&self) -> Option<&str> {
        self.config.initial_state.as_deref()
    }

    /// Whether same-name transitions run again.
    pub fn reenter_same_state(&self) -> bool {
        self.config.reenter_same_state
    }

    /// Transition table shared by every State.
    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }
}
