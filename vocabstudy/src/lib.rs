//! Tools for estimating how much of a Tamil textbook's vocabulary a learner
//! already knows.
//!
//! The workflow has three steps, each exposed as a `vocabstudy` subcommand:
//!
//! 1. [`extract`] turns OCR text from the textbook into a list of unique
//!    Tamil word types.
//! 2. [`sample`] draws a reproducible random sample from that list and
//!    writes it out as a table for the learner to fill in.
//! 3. [`score`] reads the completed table and estimates the learner's
//!    vocabulary with a Wilson score interval.

#![warn(missing_docs)]

use std::result;

pub mod assessment;
pub mod errors;
pub mod extract;
pub mod meta;
pub mod report;
pub mod sample;
pub mod score;
pub mod tokens;
pub mod ui;

pub use anyhow::Error;

/// Our standard result type. Library functions that only fail in one
/// specific way name their error type explicitly.
pub type Result<T, E = Error> = result::Result<T, E>;
