//! # Error Types: Structural and Value-Level Failures
//!
//! Defines the error types shared across the transpiler. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - [`StructuralError`] is the only fatal error class. It means the input
//!   could not be decoded into the intermediate model at all.
//! - [`DimensionError`] and [`VersionError`] describe a single bad value.
//!   Callers wrap them into a [`crate::Report`] entry scoped to the item
//!   that owns the value.

use thiserror::Error;

use crate::node::Position;

/// Failure to decode the input document into the intermediate model.
///
/// No partial document is ever produced alongside this error.
#[derive(Error, Debug)]
pub enum StructuralError {
    /// The input is not valid UTF-8.
    #[error("document is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// The YAML could not be tokenized or did not match the schema's types.
    #[error("failed to decode document{}: {message}", located(.position))]
    Decode {
        /// Decoder message.
        message: String,
        /// Location reported by the decoder, when it has one.
        position: Option<Position>,
    },
}

impl StructuralError {
    /// Build a decode error from a `serde_yaml` error, keeping its location.
    pub fn from_yaml(err: &serde_yaml::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
            position: err.location().map(|loc| Position::new(loc.line(), loc.column())),
        }
    }

    /// Source position of the failure, if known.
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Encoding(_) => None,
            Self::Decode { position, .. } => *position,
        }
    }
}

fn located(position: &Option<Position>) -> String {
    position.map(|p| format!(" at {p}")).unwrap_or_default()
}

/// A size string that cannot be expressed as a whole number of MiB.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DimensionError {
    /// The magnitude is below zero.
    #[error("invalid dimension (negative): {0:?}")]
    Negative(String),

    /// The byte count is not an integer multiple of 1 MiB.
    #[error("invalid dimension (finest granularity is 1 MiB): {0:?}")]
    Granularity(String),

    /// The string does not follow the `<number><unit>` grammar.
    #[error("invalid dimension {input:?}: {reason}")]
    Syntax {
        /// The offending input.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The magnitude does not fit the output integer.
    #[error("invalid dimension (too large): {0:?}")]
    Overflow(String),
}

/// A version string that is not `major.minor.patch`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Wrong number of components or a non-numeric component.
    #[error("invalid version {0:?}: expected major.minor.patch")]
    Malformed(String),
}
