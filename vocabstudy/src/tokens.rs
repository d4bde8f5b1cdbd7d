//! Token lists: the population of unique word types we sample from.

use std::{collections::HashSet, fs, path::Path};

use anyhow::Context as _;
use log::debug;

use crate::Result;

/// A set of unique tokens which remembers the order in which it first saw
/// each one. That order is what makes seeded sampling reproducible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenSet {
    tokens: Vec<String>,
}

impl TokenSet {
    /// Build a token set from lines of text. Each line is trimmed, blank lines
    /// are skipped, and only the first occurrence of a token is kept.
    pub fn from_lines<I, S>(lines: I) -> TokenSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut tokens = vec![];
        for line in lines {
            let token = line.as_ref().trim();
            if token.is_empty() || seen.contains(token) {
                continue;
            }
            seen.insert(token.to_owned());
            tokens.push(token.to_owned());
        }
        TokenSet { tokens }
    }

    /// Parse a newline-separated token list.
    pub fn from_str(data: &str) -> TokenSet {
        TokenSet::from_lines(data.trim_start_matches('\u{FEFF}').lines())
    }

    /// Load the token list found at the specified path.
    pub fn from_path(path: &Path) -> Result<TokenSet> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("could not read tokens from {}", path.display()))?;
        let set = TokenSet::from_str(&data);
        debug!("loaded {} unique tokens from {}", set.len(), path.display());
        Ok(set)
    }

    /// Write this token set to `path`, one token per line, creating parent
    /// directories as needed.
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("could not create {}", parent.display()))?;
        }
        fs::write(path, self.to_string())
            .with_context(|| format!("could not write tokens to {}", path.display()))
    }

    /// The number of unique tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Are there no tokens at all?
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The tokens, in first-seen order.
    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    /// Iterate over the tokens in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.as_str())
    }
}

impl std::fmt::Display for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}
