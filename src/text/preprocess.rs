// Description text -> normalized token sequence.
//
// Pipeline: lowercase the whole text, pull out word runs, keep only purely
// alphanumeric ASCII tokens, drop stopwords. The result keeps the original
// left-to-right order and repeated words stay repeated, because scoring
// counts every occurrence.

use anyhow::{Context, Result};
use regex_lite::Regex;

use super::stopwords::StopwordSet;

/// Word runs: ASCII letters, the basic Cyrillic alphabet, digits and underscore.
/// Anything else (whitespace, punctuation, accented letters) separates tokens.
const WORD_PATTERN: &str = r"[a-zA-ZА-я0-9_]+";

/// Immutable preprocessing context, built once per run and shared by
/// reference with every scoring step.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    word_run: Regex,
    stopwords: StopwordSet,
}

impl Preprocessor {
    pub fn new(stopwords: StopwordSet) -> Result<Self> {
        let word_run = Regex::new(WORD_PATTERN).context("Failed to compile tokenizer pattern")?;
        Ok(Self {
            word_run,
            stopwords,
        })
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Turn raw description text into its token sequence.
    pub fn preprocess(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.word_run
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|token| is_plain_alphanumeric(token))
            .filter(|token| !self.stopwords.contains(token))
            .map(str::to_string)
            .collect()
    }
}

/// The authoritative token filter: non-empty and ASCII letters/digits only.
/// Drops underscore-joined and Cyrillic runs that the tokenizer lets through.
fn is_plain_alphanumeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_alphanumeric())
}
