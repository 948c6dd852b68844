//! Core data types.
//!
//! This module holds the plain values a State is made of:
//! - Immutable snapshots and their merge rules
//! - Detached records handed to readers and hooks
//! - The immutable transition log
//!
//! Nothing in here knows about transition tables or registries.

mod history;
mod record;
mod snapshot;

pub use history::{TransitionLog, TransitionRecord};
pub use record::Record;
pub use serde_json::Value;
pub use snapshot::{fields_from_value, Fields, FieldsError, Snapshot, TIME_KEY};
