//! Crate-level error types.

use std::fmt;

/// Errors produced while loading bodies and options, or resolving bodies.
#[derive(Debug)]
pub enum NavError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// The body table could not be parsed.
    BodyTable(String),
    /// The options file could not be parsed or serialized.
    Options(String),
    /// No body is registered under this key.
    NotFound(String),
    /// Two bodies share a key or display name.
    DuplicateBody(String),
    /// A body failed validation.
    InvalidBody { key: String, reason: String },
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::BodyTable(msg) => write!(f, "body table error: {msg}"),
            Self::Options(msg) => write!(f, "options error: {msg}"),
            Self::NotFound(key) => write!(f, "no body named '{key}'"),
            Self::DuplicateBody(key) => write!(f, "body '{key}' is declared twice"),
            Self::InvalidBody { key, reason } => write!(f, "invalid body '{key}': {reason}"),
        }
    }
}

impl std::error::Error for NavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for NavError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
