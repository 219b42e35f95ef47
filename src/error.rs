//! Error types returned by the tokenizer.

use std::fmt;

use crate::pattern::PatternError;

/// A failed class or pattern registration.
///
/// Registration never fails at the call site; the first such error is kept
/// on the tokenizer and returned by the next `run` or `matches`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// A class with this name already exists (built-in or user defined).
    DuplicateClass(String),
    /// Class names may not contain `{` or `}`.
    InvalidClassName(String),
    /// An alternation class was registered with no alternatives.
    NoAlternatives(String),
    /// A pattern failed to compile.
    Pattern {
        pattern: String,
        error: PatternError,
    },
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateClass(name) => write!(f, "class '{name}' is already defined"),
            Self::InvalidClassName(name) => write!(f, "invalid class name {name:?}"),
            Self::NoAlternatives(name) => write!(f, "class '{name}' has no alternatives"),
            Self::Pattern { pattern, error } => write!(f, "in pattern {pattern:?}: {error}"),
        }
    }
}

// The pattern error is part of the message, so it is not also a source.
impl std::error::Error for RegistrationError {}

/// Errors returned by `Tokenizer::run` and `Tokenizer::matches`.
///
/// Wrapped errors are transparent: `Display` shows the wrapped message and
/// `source` continues with the wrapped error's own source.
#[derive(Debug)]
pub enum Error {
    Registration(RegistrationError),
    /// A pattern callback failed; the run stopped at that token.
    Callback(anyhow::Error),
    /// No pattern matched at `pos` and unmatched input is an error.
    Unmatched { pos: usize, ch: char },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registration(err) => write!(f, "{err}"),
            Self::Callback(err) => write!(f, "{err}"),
            Self::Unmatched { pos, ch } => write!(f, "unmatched {ch:?} at offset {pos}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Registration(err) => std::error::Error::source(err),
            Self::Callback(err) => std::error::Error::source(&**err),
            Self::Unmatched { .. } => None,
        }
    }
}

impl From<RegistrationError> for Error {
    fn from(err: RegistrationError) -> Self {
        Self::Registration(err)
    }
}
