//! Recoverable error types for bank loading and session configuration.
//!
//! Neither kind is fatal: the offending step is re-presented to the
//! administrator and no session is created. Invalid actions inside a running
//! session are not errors at all; see [`crate::session::QuizSession`].

use std::collections::BTreeSet;

use thiserror::Error;

/// Errors produced while loading a question bank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The header row lacks one or more required columns.
    #[error("question bank is missing required columns: {}", join_columns(.0))]
    MissingColumns(BTreeSet<String>),

    /// The header is valid but no data rows follow it.
    #[error("no questions found in the question bank")]
    EmptyBank,

    /// The source could not be read or is not well-formed delimited text.
    #[error("question bank could not be read: {0}")]
    Unreadable(String),
}

fn join_columns(columns: &BTreeSet<String>) -> String {
    columns.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Errors produced while building a [`crate::config::SessionConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The field could not be parsed as a number.
    #[error("{0} is not a number")]
    NotANumber(String),

    /// The field must be strictly positive.
    #[error("{0} must be greater than zero")]
    NonPositive(String),
}

impl LoadError {
    /// Returns `true` if the user can correct the input and retry.
    pub fn is_recoverable(&self) -> bool {
        true
    }
}

impl ConfigError {
    /// Returns `true` if the user can correct the input and retry.
    pub fn is_recoverable(&self) -> bool {
        true
    }

    /// The name of the offending input field.
    pub fn field(&self) -> &str {
        match self {
            ConfigError::NotANumber(field) | ConfigError::NonPositive(field) => field,
        }
    }
}
