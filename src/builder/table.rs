//! Builder for transition tables.

use crate::builder::error::{BuildError, TableError};
use crate::core::Record;
use crate::transitions::{hook, transition_key, Hook, HookError, TransitionTable};
use std::collections::{HashMap, HashSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for [`TransitionTable`] with a fluent API.
///
/// Problems are collected rather than reported one at a time: `build`
/// returns every empty or duplicated key in a single error.
///
/// # Example
///
/// ```rust
/// use hookstate::builder::TransitionTableBuilder;
///
/// let table = TransitionTableBuilder::new()
///     .on("birth", |_, to, _| {
///         to.insert("age", 0);
///         Ok(())
///     })
///     .on_edge("birth", "dead", |_, to, duration| {
///         to.insert("age", duration);
///         Ok(())
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(table.keys(), vec!["birth", "birth:dead"]);
/// ```
#[derive(Default)]
pub struct TransitionTableBuilder {
    entries: Vec<(String, Hook)>,
}

impl TransitionTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` whenever a State enters `to`, whatever it left.
    pub fn on<F>(self, to: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Record, &mut Record, i64) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.on_key(to, f)
    }

    /// Run `f` only when a State moves from `from` into `to`.
    pub fn on_edge<F>(self, from: &str, to: &str, f: F) -> Self
    where
        F: Fn(&Record, &mut Record, i64) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.on_key(transition_key(from, to), f)
    }

    /// Register `f` under a raw table key, bare or `"from:to"`.
    pub fn on_key<F>(self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Record, &mut Record, i64) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.hook(key, hook(f))
    }

    /// Register an already wrapped hook.
    pub fn hook(mut self, key: impl Into<String>, hook: Hook) -> Self {
        self.entries.push((key.into(), hook));
        self
    }

    /// Check every entry, accumulating all problems.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<TableError>> {
        let mut seen = HashSet::new();
        let checks: Vec<Validation<(), NonEmptyVec<TableError>>> = self
            .entries
            .iter()
            .map(|(key, _)| {
                if key.is_empty() {
                    Validation::fail(TableError::EmptyKey)
                } else if !seen.insert(key.as_str()) {
                    Validation::fail(TableError::DuplicateKey { key: key.clone() })
                } else {
                    Validation::success(())
                }
            })
            .collect();

        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the table.
    pub fn build(self) -> Result<TransitionTable, BuildError> {
        if let Validation::Failure(errors) = self.validate() {
            return Err(BuildError::InvalidTable(errors.iter().cloned().collect()));
        }

        let hooks: HashMap<String, Hook> = self.entries.into_iter().collect();
        Ok(TransitionTable::from_hooks(hooks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_builds_empty_table() {
        let table = TransitionTableBuilder::new().build().unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn edge_registers_compound_key() {
        let table = TransitionTableBuilder::new()
            .on_edge("birth", "dead", |_, _, _| Ok(()))
            .build()
            .unwrap();

        assert!(table.contains("birth:dead"));
        assert!(!table.contains("dead"));
    }

    #[test]
    fn validation_accumulates_all_problems() {
        let result = TransitionTableBuilder::new()
            .on("", |_, _, _| Ok(()))
            .on("birth", |_, _, _| Ok(()))
            .on_key("birth", |_, _, _| Ok(()))
            .on_edge("a", "b", |_, _, _| Ok(()))
            .on_key("a:b", |_, _, _| Ok(()))
            .build();

        match result {
            Err(BuildError::InvalidTable(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.contains(&TableError::EmptyKey));
                assert!(errors.contains(&TableError::DuplicateKey {
                    key: "birth".to_string()
                }));
                assert!(errors.contains(&TableError::DuplicateKey {
                    key: "a:b".to_string()
                }));
            }
            _ => panic!("Expected InvalidTable error"),
        }
    }

    #[test]
    fn validate_succeeds_for_distinct_keys() {
        let builder = TransitionTableBuilder::new()
            .on("birth", |_, _, _| Ok(()))
            .on_edge("birth", "dead", |_, _, _| Ok(()))
            .on("rebirth", |_, _, _| Ok(()));

        assert!(builder.validate().is_success());
    }

    #[test]
    fn prebuilt_hook_is_registered() {
        let shared = hook(|_, _, _| Ok(()));
        let table = TransitionTableBuilder::new()
            .hook("a", shared.clone())
            .hook("b", shared)
            .build()
            .unwrap();

        assert_eq!(table.keys(), vec!["a", "b"]);
    }
}
