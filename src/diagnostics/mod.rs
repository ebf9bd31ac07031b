use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::ir::Type;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Inline error: call to '{function}' binds {found} argument(s) but the function declares {expected} parameter(s)")]
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("Inline error: method call to '{function}' has no receiver argument")]
    MissingReceiver { function: String },

    #[error("Inline error: '{function}' returns {result:?}; only void functions can be inlined at a call statement")]
    NonVoidFunction { function: String, result: Type },

    #[error("Config error: {msg}")]
    Config { msg: String, path: Option<PathBuf> },
}

impl TransformError {
    pub fn arity(function: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::ArityMismatch {
            function: function.into(),
            expected,
            found,
        }
    }

    pub fn missing_receiver(function: impl Into<String>) -> Self {
        Self::MissingReceiver {
            function: function.into(),
        }
    }

    pub fn non_void(function: impl Into<String>, result: Type) -> Self {
        Self::NonVoidFunction {
            function: function.into(),
            result,
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            msg: msg.into(),
            path: None,
        }
    }

    pub fn config_at(msg: impl Into<String>, path: PathBuf) -> Self {
        Self::Config {
            msg: msg.into(),
            path: Some(path),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// A parameter bound to a non-lvalue argument is written in the inlined body.
    StoreToNonLvalueArgument,
    /// The inlined body returns before its last statement.
    EarlyReturnInInlinedBody,
}

/// A non-fatal finding reported by a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformWarning {
    pub kind: WarningKind,
    pub msg: String,
}

impl TransformWarning {
    pub fn new(kind: WarningKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
        }
    }
}

impl fmt::Display for TransformWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning: {}", self.msg)
    }
}
