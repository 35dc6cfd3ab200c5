// Stopword sets for the preprocessor.
//
// The built-in list is small on purpose: it drops function words, single
// letters and single digits, and leaves content words alone. The ISO list
// from the `stop-words` crate is far more aggressive (it removes words like
// "information" and "world") and is opt-in via SECTOR_STOPWORDS=iso.

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

use crate::config::StopwordSource;

const BUILTIN: &[&str] = &[
    "about", "above", "after", "again", "all", "also", "am", "an", "and", "another", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "came", "can", "cannot", "come", "could", "did", "do", "does", "doing",
    "during", "each", "few", "for", "from", "further", "get", "got", "has", "had", "he",
    "have", "her", "here", "him", "himself", "his", "how", "if", "in", "into", "is", "it",
    "its", "itself", "like", "make", "many", "me", "might", "more", "most", "much", "must",
    "my", "myself", "never", "now", "of", "on", "only", "or", "other", "our", "ours",
    "ourselves", "out", "over", "own", "said", "same", "see", "should", "since", "so", "some",
    "still", "such", "take", "than", "that", "the", "their", "theirs", "them", "themselves",
    "then", "there", "these", "they", "this", "those", "through", "to", "too", "under",
    "until", "up", "very", "was", "way", "we", "well", "were", "what", "where", "when",
    "which", "while", "who", "whom", "with", "would", "why", "you", "your", "yours",
    "yourself",
    // single letters
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q",
    "r", "s", "t", "u", "v", "w", "x", "y", "z",
    // single digits
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9",
];

/// A fixed set of lowercase words the preprocessor drops.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// The compact built-in English list.
    pub fn builtin() -> Self {
        Self::from_words(BUILTIN.iter().copied())
    }

    /// The English list shipped by the `stop-words` crate.
    pub fn iso() -> Self {
        let words: Vec<String> = get(LANGUAGE::English);
        Self::from_words(words)
    }

    pub fn for_source(source: &StopwordSource) -> Self {
        match source {
            StopwordSource::Builtin => Self::builtin(),
            StopwordSource::Iso => Self::iso(),
        }
    }

    /// Build a set from arbitrary words. Entries are lowercased so they line
    /// up with the lowercased tokens they are compared against.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
