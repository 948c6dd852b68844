//! Hookstate: a keyed registry of snapshot states with transition hooks
//!
//! A [`Registry`] maps caller keys to [`State`]s. Each State holds an
//! immutable data snapshot stamped with the time it became current, plus
//! the name it most recently entered. Moving to a new name runs at most one
//! hook from a shared [`TransitionTable`]; the hook sees the outgoing
//! record, a draft of the incoming one and the elapsed milliseconds, and may
//! amend the draft before it is committed.
//!
//! # Core Concepts
//!
//! - **Snapshot**: Immutable key/value data plus a reserved `time` stamp
//! - **Transition table**: Hooks keyed by `"to"` or `"from:to"`
//! - **Transition**: `to(name)` merges data, resolves a hook and commits
//! - **Direct set**: `set(key, value)` patches data without a transition
//!
//! Everything is synchronous and in-memory. Nothing is persisted and
//! nothing is synchronized internally.
//!
//! # Example
//!
//! ```rust
//! use hookstate::{Registry, TransitionTableBuilder};
//! use serde_json::json;
//!
//! let table = TransitionTableBuilder::new()
//!     .on("birth", |_, to, _| {
//!         to.insert("life", 1);
//!         Ok(())
//!     })
//!     .on_edge("birth", "dead", |_, to, duration| {
//!         to.insert("age", duration);
//!         Ok(())
//!     })
//!     .on("rebirth", |from, to, _| {
//!         let life = from.get("life").and_then(|v| v.as_i64()).unwrap_or(0);
//!         to.insert("life", life + 1);
//!         to.insert("age", 0);
//!         Ok(())
//!     })
//!     .build()
//!     .unwrap();
//!
//! let mut registry = Registry::new(table, Some("birth"));
//! let first = registry.create("first").unwrap();
//!
//! first.to("dead").unwrap();
//! first.to("rebirth").unwrap();
//!
//! assert_eq!(first.read().get("life"), Some(&json!(2)));
//! assert_eq!(first.history().get_path(), vec!["birth", "dead", "rebirth"]);
//! ```

pub mod builder;
pub mod core;
pub mod registry;
pub mod state;
pub mod transitions;

// Re-export commonly used types
pub use builder::{BuildError, RegistryBuilder, RegistryConfig, TransitionTableBuilder};
pub use core::{Fields, Record, Snapshot, TransitionLog, TransitionRecord, TIME_KEY};
pub use registry::Registry;
pub use state::State;
pub use transitions::{Hook, HookError, TransitionError, TransitionTable};
