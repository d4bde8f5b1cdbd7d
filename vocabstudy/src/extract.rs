//! Pulling Tamil word tokens out of OCR text.
//!
//! The OCR engine itself runs elsewhere. We receive its plain-text output,
//! one string per page, and reduce it to a set of candidate word types.

use std::{borrow::Cow, collections::BTreeSet};

use lazy_static::lazy_static;
use regex::Regex;

use crate::tokens::TokenSet;

/// Default minimum token length, in characters.
pub const DEFAULT_MIN_CHARS: usize = 2;

/// Default maximum token length, in characters.
pub const DEFAULT_MAX_CHARS: usize = 20;

lazy_static! {
    /// Anything that is neither in the Tamil Unicode block nor whitespace.
    static ref NON_TAMIL: Regex = Regex::new(r"[^\u{0B80}-\u{0BFF}\s]").unwrap();

    /// Runs of whitespace.
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Replace everything except Tamil letters and whitespace with spaces.
pub fn keep_tamil_and_spaces(text: &str) -> Cow<'_, str> {
    NON_TAMIL.replace_all(text, " ")
}

/// Split OCR text into Tamil tokens whose length (in Unicode scalar values)
/// falls within `min_chars..=max_chars`. Short and very long runs are almost
/// always OCR noise.
pub fn tokenize_tamil(text: &str, min_chars: usize, max_chars: usize) -> Vec<String> {
    let tamil = keep_tamil_and_spaces(text);
    WHITESPACE
        .split(tamil.trim())
        .filter(|t| !t.is_empty())
        .filter(|t| {
            let len = t.chars().count();
            min_chars <= len && len <= max_chars
        })
        .map(|t| t.to_owned())
        .collect()
}

/// Accumulates unique tokens over the pages of a document.
#[derive(Debug)]
pub struct TokenExtractor {
    min_chars: usize,
    max_chars: usize,
    tokens: BTreeSet<String>,
}

impl TokenExtractor {
    /// Create an extractor which keeps tokens of `min_chars..=max_chars`
    /// characters.
    pub fn new(min_chars: usize, max_chars: usize) -> TokenExtractor {
        TokenExtractor {
            min_chars,
            max_chars,
            tokens: BTreeSet::new(),
        }
    }

    /// Add the OCR text of one page. Returns how many tokens on the page
    /// passed the length filter, including ones we have already seen.
    pub fn add_page(&mut self, text: &str) -> usize {
        let page_tokens = tokenize_tamil(text, self.min_chars, self.max_chars);
        let count = page_tokens.len();
        self.tokens.extend(page_tokens);
        count
    }

    /// The number of unique tokens seen so far.
    pub fn unique_count(&self) -> usize {
        self.tokens.len()
    }

    /// Finish extraction, returning the unique tokens sorted by code point.
    pub fn into_token_set(self) -> TokenSet {
        TokenSet::from_lines(self.tokens)
    }
}

impl Default for TokenExtractor {
    fn default() -> Self {
        TokenExtractor::new(DEFAULT_MIN_CHARS, DEFAULT_MAX_CHARS)
    }
}
