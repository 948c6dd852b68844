//! Transition error types.

use std::error::Error as StdError;
use thiserror::Error;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Failure raised by a transition hook.
///
/// Returning this from a hook abandons the transition in progress.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl HookError {
    /// Create a hook failure with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a hook failure wrapping an underlying error.
    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that can occur while transitioning a State.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Hook '{key}' failed entering '{to}': {source}")]
    HookFailed {
        key: String,
        from: Option<String>,
        to: String,
        source: HookError,
    },
}

impl TransitionError {
    /// Transition-table key of the hook that failed.
    pub fn key(&self) -> &str {
        match self {
            Self::HookFailed { key, .. } => key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn hook_error_displays_message() {
        let error = HookError::new("not allowed");
        assert_eq!(error.to_string(), "not allowed");
        assert!(error.source().is_none());
    }

    #[test]
    fn hook_error_keeps_source() {
        let parse = "x".parse::<i32>().unwrap_err();
        let error = HookError::with_source("bad counter", parse);

        assert_eq!(error.message(), "bad counter");
        assert!(error.source().is_some());
    }

    #[test]
    fn transition_error_names_hook_and_target() {
        let error = TransitionError::HookFailed {
            key: "birth:dead".to_string(),
            from: Some("birth".to_string()),
            to: "dead".to_string(),
            source: HookError::new("refused"),
        };

        assert_eq!(error.key(), "birth:dead");
        assert_eq!(
            error.to_string(),
            "Hook 'birth:dead' failed entering 'dead': refused"
        );
        assert!(error.source().is_some());
    }
}
