//! Error types for this library.
//!
//! File-level failures are reported through `anyhow` with the offending path
//! attached. The types here cover problems with the data itself.

use std::num::ParseIntError;

use thiserror::Error;

/// We were asked to sample from a token set with no tokens in it.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("no tokens to sample from (check the extraction step and the tokens file)")]
pub struct EmptyPopulationError;

/// The z-score used to build a confidence interval was unusable.
#[derive(Debug, Error, PartialEq)]
#[error("z-score must be a positive, finite number, got {z}")]
pub struct InvalidZScoreError {
    /// The rejected value.
    pub z: f64,
}

/// Errors which can occur while parsing an assessment metadata file.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum MetaError {
    /// `TOTAL_UNIQUE_TYPES` had a value that was not a non-negative integer.
    #[error("value {value:?} for {key} is not a non-negative integer")]
    #[non_exhaustive]
    InvalidValue {
        /// The key whose value was rejected.
        key: &'static str,
        /// The raw value.
        value: String,
        /// The underlying parse error.
        source: ParseIntError,
    },

    /// `TOTAL_UNIQUE_TYPES` never appeared.
    #[error("metadata is missing {key}")]
    #[non_exhaustive]
    MissingKey {
        /// The key we were looking for.
        key: &'static str,
    },
}
