//! Transition history tracking.
//!
//! Every committed transition of a State is appended to an immutable log,
//! so callers can see which names a State passed through and which hooks
//! fired along the way.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use hookstate::core::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: Some("birth".to_string()),
///     to: "dead".to_string(),
///     timestamp: Utc::now(),
///     duration_ms: 120,
///     hook: Some("birth:dead".to_string()),
/// };
/// assert_eq!(record.from.as_deref(), Some("birth"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Name left behind, `None` for a State's first transition
    pub from: Option<String>,
    /// Name entered
    pub to: String,
    /// Commit time, equal to the new snapshot's `time`
    pub timestamp: DateTime<Utc>,
    /// Milliseconds since the previous snapshot became current
    pub duration_ms: i64,
    /// Transition-table key whose hook ran, if any
    pub hook: Option<String>,
}

/// Ordered log of committed transitions.
///
/// The log is immutable - `record` returns a new log with the entry
/// appended.
///
/// # Example
///
/// ```rust
/// use hookstate::core::{TransitionLog, TransitionRecord};
/// use chrono::Utc;
///
/// let log = TransitionLog::new().record(TransitionRecord {
///     from: None,
///     to: "birth".to_string(),
///     timestamp: Utc::now(),
///     duration_ms: 0,
///     hook: Some("birth".to_string()),
/// });
///
/// let log = log.record(TransitionRecord {
///     from: Some("birth".to_string()),
///     to: "dead".to_string(),
///     timestamp: Utc::now(),
///     duration_ms: 5,
///     hook: None,
/// });
///
/// assert_eq!(log.get_path(), vec!["birth", "dead"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionLog {
    transitions: Vec<TransitionRecord>,
}

impl TransitionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a transition, returning a new log.
    ///
    /// The receiver is left untouched.
    pub fn record(&self, transition: TransitionRecord) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Append a transition in place.
    pub(crate) fn push(&mut self, transition: TransitionRecord) {
        self.transitions.push(transition);
    }

    /// Names traversed in order.
    ///
    /// Starts with the `from` name of the first entry when there was one,
    /// followed by the `to` name of every entry.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(from) = self.transitions.first().and_then(|t| t.from.as_deref()) {
            path.push(from);
        }
        for transition in &self.transitions {
            path.push(transition.to.as_str());
        }
        path
    }

    /// Hook keys that fired, in order.
    pub fn hooks_fired(&self) -> Vec<&str> {
        self.transitions
            .iter()
            .filter_map(|t| t.hook.as_deref())
            .collect()
    }

    /// Time between the first and the last transition.
    ///
    /// `None` when the log is empty or the clock went backwards.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// All transitions, oldest first.
    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    /// Most recent transition.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.transitions.last()
    }

    /// Number of committed transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether nothing has been committed yet.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
