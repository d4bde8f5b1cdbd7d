//! Assessment metadata: the facts the scorer needs about how a sample was
//! drawn.
//!
//! On disk this is a small `KEY=VALUE` file stored next to the assessment
//! table, so `week3.csv` is accompanied by `week3.meta.txt`. Only
//! `TOTAL_UNIQUE_TYPES` is needed for scoring. The other keys are recorded for
//! reproducibility, and files written by hand (or by older tools) may lack
//! them or carry values we can't use.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context as _;
use log::{debug, warn};

use crate::{errors::MetaError, Result};

const TOTAL_UNIQUE_TYPES: &str = "TOTAL_UNIQUE_TYPES";
const SAMPLE_SIZE: &str = "SAMPLE_SIZE";
const SEED: &str = "SEED";

/// Information recorded by the sampler and consumed by the scorer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssessmentMeta {
    /// The number of unique word types in the population (`T`).
    pub total_unique_types: usize,
    /// The number of tokens actually sampled, if recorded.
    pub sample_size: Option<usize>,
    /// The seed used to draw the sample, if recorded as a `u64`.
    pub seed: Option<u64>,
}

impl AssessmentMeta {
    /// Parse metadata from its `KEY=VALUE` text form.
    ///
    /// `TOTAL_UNIQUE_TYPES` must be present and be a non-negative integer.
    /// Lines without `=`, unknown keys, and unusable `SAMPLE_SIZE` or `SEED`
    /// values are skipped. If a key appears twice, the last value wins.
    pub fn from_str(data: &str) -> Result<AssessmentMeta, MetaError> {
        let mut total: Option<usize> = None;
        let mut sample_size = None;
        let mut seed = None;
        for (idx, raw) in data.trim_start_matches('\u{FEFF}').lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                debug!("ignoring metadata line {}: {:?}", idx + 1, raw);
                continue;
            };
            let value = value.trim();
            match key.trim() {
                TOTAL_UNIQUE_TYPES => {
                    total = Some(value.parse().map_err(|source| MetaError::InvalidValue {
                        key: TOTAL_UNIQUE_TYPES,
                        value: value.to_owned(),
                        source,
                    })?)
                }
                SAMPLE_SIZE => sample_size = parse_optional(SAMPLE_SIZE, value),
                SEED => seed = parse_optional(SEED, value),
                _ => {}
            }
        }
        Ok(AssessmentMeta {
            total_unique_types: total.ok_or(MetaError::MissingKey {
                key: TOTAL_UNIQUE_TYPES,
            })?,
            sample_size,
            seed,
        })
    }

    /// Load the metadata file at `path`.
    pub fn from_path(path: &Path) -> Result<AssessmentMeta> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("could not read metadata from {}", path.display()))?;
        AssessmentMeta::from_str(&data)
            .with_context(|| format!("could not parse metadata in {}", path.display()))
    }

    /// Write this metadata to `path`.
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_string())
            .with_context(|| format!("could not write metadata to {}", path.display()))
    }
}

impl fmt::Display for AssessmentMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}={}", TOTAL_UNIQUE_TYPES, self.total_unique_types)?;
        if let Some(sample_size) = self.sample_size {
            writeln!(f, "{}={}", SAMPLE_SIZE, sample_size)?;
        }
        if let Some(seed) = self.seed {
            writeln!(f, "{}={}", SEED, seed)?;
        }
        Ok(())
    }
}

/// The metadata path that goes with an assessment table: the table's
/// extension is replaced by `meta.txt`.
pub fn meta_path_for(assessment_path: &Path) -> PathBuf {
    assessment_path.with_extension("meta.txt")
}

fn parse_optional<T: FromStr>(key: &str, value: &str) -> Option<T> {
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("ignoring metadata {}={:?}", key, value);
            None
        }
    }
}
