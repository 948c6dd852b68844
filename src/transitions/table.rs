//! Transition tables and hook resolution.

use crate::core::Record;
use crate::transitions::error::HookError;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Separator between the two names of an edge key.
pub const KEY_SEPARATOR: char = ':';

/// Callback run when a State enters a name.
///
/// Arguments are the record before the transition, a mutable draft of the
/// record after it, and the milliseconds elapsed since the previous
/// snapshot became current. Changes to the draft are committed only if
/// the hook returns `Ok`.
pub type Hook = Arc<dyn Fn(&Record, &mut Record, i64) -> Result<(), HookError> + Send + Sync>;

/// Wrap a closure as a [`Hook`].
pub fn hook<F>(f: F) -> Hook
where
    F: Fn(&Record, &mut Record, i64) -> Result<(), HookError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Build the edge key `"from:to"`.
///
/// # Example
///
/// ```rust
/// use hookstate::transitions::transition_key;
///
/// assert_eq!(transition_key("birth", "dead"), "birth:dead");
/// ```
pub fn transition_key(from: &str, to: &str) -> String {
    format!("{from}{KEY_SEPARATOR}{to}")
}

/// Hook selected for a transition.
pub struct ResolvedHook<'a> {
    /// Table key the hook was registered under
    pub key: &'a str,
    pub hook: &'a Hook,
}

impl ResolvedHook<'_> {
    /// Run the hook against a draft of the next record.
    pub fn call(&self, from: &Record, to: &mut Record, duration_ms: i64) -> Result<(), HookError> {
        (self.hook)(from, to, duration_ms)
    }
}

/// Immutable mapping from transition keys to hooks.
///
/// Keys are either a bare name (`"dead"`, fires when entering `dead` from
/// anywhere) or an edge (`"birth:dead"`, fires only for that move). Build
/// one with [`crate::builder::TransitionTableBuilder`].
#[derive(Clone, Default)]
pub struct TransitionTable {
    hooks: HashMap<String, Hook>,
}

impl TransitionTable {
    /// Table with no hooks. Every transition is silent.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_hooks(hooks: HashMap<String, Hook>) -> Self {
        Self { hooks }
    }

    /// Pick the hook for a move from `current` into `to`.
    ///
    /// With a current name the edge key wins over the bare target key.
    /// Without one (first transition) only the bare key is consulted.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hookstate::builder::TransitionTableBuilder;
    ///
    /// let table = TransitionTableBuilder::new()
    ///     .on_edge("a", "b", |_, _, _| Ok(()))
    ///     .on("b", |_, _, _| Ok(()))
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(table.resolve(Some("a"), "b").unwrap().key, "a:b");
    /// assert_eq!(table.resolve(Some("c"), "b").unwrap().key, "b");
    /// assert_eq!(table.resolve(None, "b").unwrap().key, "b");
    /// assert!(table.resolve(None, "a").is_none());
    /// ```
    pub fn resolve(&self, current: Option<&str>, to: &str) -> Option<ResolvedHook<'_>> {
        current
            .and_then(|from| self.lookup(&transition_key(from, to)))
            .or_else(|| self.lookup(to))
    }

    fn lookup(&self, key: &str) -> Option<ResolvedHook<'_>> {
        self.hooks
            .get_key_value(key)
            .map(|(key, hook)| ResolvedHook { key, hook })
    }

    /// Hook registered under exactly `key`.
    pub fn get(&self, key: &str) -> Option<&Hook> {
        self.hooks.get(key)
    }

    /// Whether a hook is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.hooks.contains_key(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.hooks.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether the table has no hooks.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for TransitionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionTable")
            .field("keys", &self.keys())
            .finish()
    }
}
