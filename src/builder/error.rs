//! Build errors for transition tables.

use thiserror::Error;

/// A single problem found in a transition table under construction.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableError {
    #[error("Transition key is empty")]
    EmptyKey,

    #[error("Transition key '{key}' registered more than once")]
    DuplicateKey { key: String },
}

/// Errors that can occur when building a transition table.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Invalid transition table: {}", describe(.0))]
    InvalidTable(Vec<TableError>),
}

fn describe(errors: &[TableError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
