// JSON thesaurus backend.
//
// The file maps a word to a list of synonym groups:
//
//   { "loan": [["loan", "loans"], ["credit"]], "bank": [["bank", "banks"]] }
//
// Each group is one lookup entry. Keys match case-insensitively. Useful for
// curated sector vocabularies and for deterministic runs without WordNet.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use super::traits::{LexicalKnowledgeBase, SynonymEntry};

/// An in-memory thesaurus keyed by lowercased word.
#[derive(Debug, Clone, Default)]
pub struct Thesaurus {
    groups: HashMap<String, Vec<Vec<String>>>,
}

impl Thesaurus {
    /// Load a thesaurus from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read thesaurus: {}", path.display()))?;
        let thesaurus = Self::from_json(&raw)
            .with_context(|| format!("Invalid thesaurus: {}", path.display()))?;
        info!(
            words = thesaurus.groups.len(),
            path = %path.display(),
            "Loaded thesaurus"
        );
        Ok(thesaurus)
    }

    /// Parse a thesaurus from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self> {
        let parsed: HashMap<String, Vec<Vec<String>>> = serde_json::from_str(raw)
            .context("Thesaurus must be a JSON object of word -> [[synonym, ...], ...]")?;
        Ok(parsed.into_iter().collect())
    }

    /// Add one synonym group for `word`. Repeated calls add further groups.
    pub fn insert<I, S>(&mut self, word: &str, group: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups
            .entry(word.to_lowercase())
            .or_default()
            .push(group.into_iter().map(Into::into).collect());
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<(String, Vec<Vec<String>>)> for Thesaurus {
    fn from_iter<T: IntoIterator<Item = (String, Vec<Vec<String>>)>>(iter: T) -> Self {
        let mut thesaurus = Self::default();
        for (word, groups) in iter {
            let key = word.to_lowercase();
            thesaurus.groups.entry(key.clone()).or_default();
            for group in groups {
                thesaurus.insert(&key, group);
            }
        }
        thesaurus
    }
}

#[async_trait]
impl LexicalKnowledgeBase for Thesaurus {
    fn name(&self) -> &'static str {
        "thesaurus"
    }

    async fn lookup(&self, word: &str) -> Result<Option<Vec<SynonymEntry>>> {
        let key = word.trim().to_lowercase();
        Ok(self.groups.get(&key).map(|groups| {
            groups
                .iter()
                .enumerate()
                .map(|(i, group)| SynonymEntry {
                    source: format!("{key}#{i}"),
                    synonyms: group.clone(),
                })
                .collect()
        }))
    }
}
