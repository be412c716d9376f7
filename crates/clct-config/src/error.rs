//! # Family Resolution Errors
//!
//! Failures of the version-gated resolver. None of these are fatal to the
//! document: each one is turned into a report entry scoped to the family
//! block, and only that family is left out of the output.

use thiserror::Error;

use clct_core::VersionError;

use crate::families::Family;

/// Why a family block could not be resolved to an option schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The block has no `version` key.
    #[error("{family} version is required")]
    MissingVersion {
        /// Family whose block lacks a version.
        family: Family,
    },

    /// The `version` value is not `major.minor.patch`.
    #[error("{family} version is not valid: {source}")]
    MalformedVersion {
        /// Family whose version is malformed.
        family: Family,
        /// Parser failure.
        source: VersionError,
    },

    /// The `version` value is a sequence, mapping or tagged value.
    #[error("{family} version must be a scalar")]
    VersionNotScalar {
        /// Family whose version is not a scalar.
        family: Family,
    },

    /// The version predates the oldest supported schema.
    #[error("{family} version is not valid (too old)")]
    TooOld {
        /// Family whose version is too old.
        family: Family,
    },

    /// The major version is newer than any known schema.
    #[error("{family} version is not valid (too new)")]
    TooNew {
        /// Family whose version is too new.
        family: Family,
    },

    /// The options did not decode into the chosen schema.
    #[error("{family} options are not valid: {message}")]
    InvalidOptions {
        /// Family whose options failed to decode.
        family: Family,
        /// Decoder message.
        message: String,
    },

    /// An option holds a value outside its allowed set.
    #[error("{family} option {key} must be one of {allowed}, got {value:?}")]
    InvalidValue {
        /// Family that owns the option.
        family: Family,
        /// Option key.
        key: &'static str,
        /// The value given.
        value: String,
        /// Allowed values, comma separated.
        allowed: &'static str,
    },
}
