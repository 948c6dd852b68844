//! Builder API for transition tables and registries.
//!
//! This module provides fluent builders and a data macro for setting up a
//! registry with minimal boilerplate.

pub mod error;
pub mod macros;
pub mod registry;
pub mod table;

pub use error::{BuildError, TableError};
pub use registry::{RegistryBuilder, RegistryConfig};
pub use table::TransitionTableBuilder;
