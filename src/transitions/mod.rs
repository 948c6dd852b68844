//! Transition tables, hooks and their errors.
//!
//! A transition table maps bare names and `"from:to"` edges to hooks.
//! Resolution tries the edge first, then the bare target name.

mod error;
mod table;

pub use error::{HookError, TransitionError};
pub use table::{hook, transition_key, Hook, ResolvedHook, TransitionTable, KEY_SEPARATOR};
