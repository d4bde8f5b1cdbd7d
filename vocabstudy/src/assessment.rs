//! The assessment table: one row per sampled token, filled in by the learner.

use std::{
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    meta::{meta_path_for, AssessmentMeta},
    sample::Sample,
    Result,
};

/// A single row of the assessment table. Column names match the headers in
/// the CSV file, which are meant to be read by a person filling it in.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct AssessmentRecord {
    /// The sampled token.
    pub word: String,

    /// Does the learner recognize this word? Only this column is scored.
    #[serde(rename = "passive_known(Y/N)")]
    pub passive_known: String,

    /// Can the learner produce this word? Recorded but not scored.
    #[serde(rename = "active_known(Y/N)", default)]
    pub active_known: String,

    /// Free-form gloss or example sentence.
    #[serde(default)]
    pub definition_or_example: String,

    /// Anything else.
    #[serde(default)]
    pub notes: String,
}

impl AssessmentRecord {
    /// A blank row for `word`, waiting to be filled in.
    pub fn blank(word: &str) -> AssessmentRecord {
        AssessmentRecord {
            word: word.to_owned(),
            ..AssessmentRecord::default()
        }
    }

    /// Did the learner mark this word as passively known?
    pub fn is_passive_known(&self) -> bool {
        is_yes(&self.passive_known)
    }
}

/// Interpret a judgment cell. Anything that starts with `Y` or `y` after
/// trimming counts as "yes". Everything else, including a blank cell or a
/// typo, counts as "no".
pub fn is_yes(value: &str) -> bool {
    value.trim().to_uppercase().starts_with('Y')
}

/// Write blank assessment rows for every token in `sample`.
pub fn write_records<W: Write>(wtr: W, sample: &Sample) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(wtr);
    for word in &sample.tokens {
        wtr.serialize(AssessmentRecord::blank(word))
            .context("error serializing assessment row")?;
    }
    // A sample with no rows would otherwise produce an empty file with no
    // header at all.
    if sample.tokens.is_empty() {
        wtr.write_record(HEADERS)
            .context("error writing assessment header")?;
    }
    wtr.flush().context("error flushing assessment table")?;
    Ok(())
}

/// Read assessment rows from CSV data with a header line.
pub fn read_records<R: Read>(rdr: R) -> Result<Vec<AssessmentRecord>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
    let mut records = vec![];
    for (idx, row) in rdr.deserialize().enumerate() {
        let record: AssessmentRecord =
            row.with_context(|| format!("could not parse assessment row {}", idx + 1))?;
        records.push(record);
    }
    Ok(records)
}

const HEADERS: [&str; 5] = [
    "word",
    "passive_known(Y/N)",
    "active_known(Y/N)",
    "definition_or_example",
    "notes",
];

/// A completed (or not yet completed) assessment, together with the metadata
/// that describes how it was sampled.
#[derive(Clone, Debug)]
pub struct Assessment {
    /// Where the table was loaded from.
    pub path: PathBuf,
    /// The rows of the table.
    pub records: Vec<AssessmentRecord>,
    /// Sampling metadata, if we could find it.
    pub meta: Option<AssessmentMeta>,
}

impl Assessment {
    /// Write the assessment table for `sample` to `path`, and its metadata
    /// next to it. Parent directories are created as needed. Returns the path
    /// of the metadata file.
    pub fn create(path: &Path, sample: &Sample) -> Result<PathBuf> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("could not create {}", parent.display()))?;
        }
        let mut buffer = Vec::<u8>::new();
        write_records(&mut buffer, sample)?;
        fs::write(path, &buffer)
            .with_context(|| format!("could not write {}", path.display()))?;

        let meta_path = meta_path_for(path);
        sample.meta().write_to_path(&meta_path)?;
        debug!("wrote {} and {}", path.display(), meta_path.display());
        Ok(meta_path)
    }

    /// Load the assessment table at `path`.
    ///
    /// If `meta_path` is given, that metadata file must exist and parse.
    /// Otherwise we look for the file named by [`meta_path_for`], and carry
    /// on without metadata if there isn't one.
    pub fn load(path: &Path, meta_path: Option<&Path>) -> Result<Assessment> {
        let file = fs::File::open(path)
            .with_context(|| format!("could not open {}", path.display()))?;
        let records = read_records(file)
            .with_context(|| format!("could not read assessment {}", path.display()))?;

        let meta = match meta_path {
            Some(meta_path) => Some(AssessmentMeta::from_path(meta_path)?),
            None => {
                let implied = meta_path_for(path);
                if implied.exists() {
                    Some(AssessmentMeta::from_path(&implied)?)
                } else {
                    info!(
                        "no metadata at {}; skipping in-text extrapolation",
                        implied.display()
                    );
                    None
                }
            }
        };

        Ok(Assessment {
            path: path.to_owned(),
            records,
            meta,
        })
    }
}
