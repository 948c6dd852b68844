//! Individually addressable states.
//!
//! A [`State`] pairs an immutable [`Snapshot`] with the name it most
//! recently entered. It moves between names with [`State::to`], which
//! resolves and runs at most one hook, and takes out-of-band patches with
//! [`State::set`], which never runs hooks and never touches `time`.

use crate::core::{Fields, Record, Snapshot, TransitionLog, TransitionRecord, TIME_KEY};
use crate::transitions::{TransitionError, TransitionTable};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, trace, warn};
use uuid::Uuid;

/// A keyed entity with a data snapshot and a current state name.
///
/// States are created through [`crate::Registry::create`]. A State is not
/// synchronized; callers sharing one across threads must serialize access
/// themselves.
///
/// # Example
///
/// ```rust
/// use hookstate::{fields, Registry, TransitionTableBuilder};
/// use serde_json::json;
///
/// let table = TransitionTableBuilder::new()
///     .on("birth", |_, to, _| {
///         to.insert("life", 1);
///         Ok(())
///     })
///     .build()
///     .unwrap();
///
/// let mut registry = Registry::new(table, Some("birth"));
/// let first = registry.create_with("first", fields! { "message" => "hi" }).unwrap();
///
/// assert_eq!(first.current_name(), Some("birth"));
/// assert_eq!(first.read().get("life"), Some(&json!(1)));
///
/// first.set("visits", 3);
/// first.to_with("dead", fields! { "message" => "bye" }).unwrap();
///
/// let record = first.read();
/// assert_eq!(record.get("message"), Some(&json!("bye")));
/// assert_eq!(record.get("visits"), Some(&json!(3)));
/// ```
#[derive(Debug)]
pub struct State {
    id: Uuid,
    key: String,
    current: Snapshot,
    current_name: Option<String>,
    transitions: Arc<TransitionTable>,
    reenter_same_state: bool,
    history: TransitionLog,
}

impl State {
    /// Create a State seeded with `data` and stamped with the current time.
    ///
    /// The State has no name until its first transition.
    pub(crate) fn new(
        key: &str,
        data: Fields,
        transitions: Arc<TransitionTable>,
        reenter_same_state: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            key: key.to_string(),
            current: Snapshot::new(data),
            current_name: None,
            transitions,
            reenter_same_state,
            history: TransitionLog::new(),
        }
    }

    /// Unique identity of this State object.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Registry key this State was created under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Name most recently entered, `None` before the first transition.
    pub fn current_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }

    /// Plain copy of the current snapshot, `time` included.
    ///
    /// The returned record is detached; changing it has no effect on the
    /// State.
    pub fn read(&self) -> Record {
        self.current.to_record()
    }

    /// The current immutable snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.current
    }

    /// Look up a single field of the current snapshot.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.current.get(field)
    }

    /// When the current snapshot became current.
    pub fn time(&self) -> DateTime<Utc> {
        self.current.time()
    }

    /// Committed transitions, oldest first.
    pub fn history(&self) -> &TransitionLog {
        &self.history
    }

    /// Transition into `name` without extra data.
    pub fn to(&mut self, name: &str) -> Result<(), TransitionError> {
        self.to_with(name, Fields::new())
    }

    /// Transition into `name`, merging `data` into the next snapshot.
    ///
    /// The next snapshot is the current one with `data` merged over it and
    /// `time` set to now. The hook resolved for the move (edge key first,
    /// then the bare name) sees the current record, a draft of the next one
    /// and the elapsed milliseconds; whatever it writes into the draft wins.
    ///
    /// Unless the State was created with re-entry enabled, transitioning
    /// into the name it is already in does nothing at all.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::HookFailed`] when the hook fails. The
    /// State is then exactly as it was before the call.
    pub fn to_with(&mut self, name: &str, data: Fields) -> Result<(), TransitionError> {
        if !self.reenter_same_state && self.current_name.as_deref() == Some(name) {
            debug!(key = %self.key, state = name, "already in state, transition skipped");
            return Ok(());
        }

        let mut next = self.current.merge(&data).with_time(Utc::now());
        let duration_ms = self.current.elapsed_ms(&next);

        let mut fired = None;
        if let Some(resolved) = self
            .transitions
            .resolve(self.current_name.as_deref(), name)
        {
            let from = self.current.to_record();
            let mut draft = next.to_record();

            if let Err(source) = resolved.call(&from, &mut draft, duration_ms) {
                warn!(
                    key = %self.key,
                    hook = resolved.key,
                    to = name,
                    error = %source,
                    "hook failed, transition abandoned"
                );
                return Err(TransitionError::HookFailed {
                    key: resolved.key.to_string(),
                    from: self.current_name.clone(),
                    to: name.to_string(),
                    source,
                });
            }

            next = next.merge_record(&draft);
            fired = Some(resolved.key.to_string());
        }

        debug!(
            key = %self.key,
            from = ?self.current_name,
            to = name,
            duration_ms,
            hook = ?fired,
            "transition committed"
        );

        self.history.push(TransitionRecord {
            from: self.current_name.take(),
            to: name.to_string(),
            timestamp: next.time(),
            duration_ms,
            hook: fired,
        });
        self.current = next;
        self.current_name = Some(name.to_string());
        Ok(())
    }

    /// Set one field outside the transition lifecycle.
    ///
    /// No hook runs, the name and `time` are left alone. Setting `time`
    /// itself is silently ignored.
    pub fn set<V: Into<Value>>(&mut self, key: &str, value: V) {
        if key == TIME_KEY {
            trace!(key = %self.key, "ignored direct write to reserved time field");
            return;
        }
        trace!(key = %self.key, field = key, "direct set");
        self.current = self.current.with_field(key, value.into());
    }

    /// Merge several fields outside the transition lifecycle.
    ///
    /// Same rules as [`State::set`]; a `time` entry is filtered out and the
    /// rest is applied.
    pub fn set_many(&mut self, fields: Fields) {
        if fields.contains_key(TIME_KEY) {
            trace!(key = %self.key, "dropped reserved time field from direct set");
        }
        trace!(key = %self.key, count = fields.len(), "direct set");
        self.current = self.current.merge(&fields);
    }
}
