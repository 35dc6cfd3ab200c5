// Scoring engine: descriptions x keywords -> corpus of sparse counts.
//
// Synonym sets don't depend on the sector, so each distinct keyword is
// expanded once per run, with at most `concurrency` knowledge base lookups
// in flight. Scoring itself is pure: each sector's description is
// preprocessed once and every token that falls in a keyword's synonym set
// adds one to that keyword's count.

use std::collections::{HashMap, HashSet};

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use super::corpus::{Corpus, SectorScores};
use crate::lexicon::expander::{SynonymExpander, SynonymSet};
use crate::sources::{Description, Keyword};
use crate::text::preprocess::Preprocessor;

/// Synonym sets for a run, keyed by the keyword as written in the input.
pub type SynonymTable = HashMap<String, SynonymSet>;

/// Immutable scoring context shared across the whole run.
pub struct ScoringEngine {
    preprocessor: Preprocessor,
    expander: SynonymExpander,
    concurrency: usize,
}

impl ScoringEngine {
    pub fn new(preprocessor: Preprocessor, expander: SynonymExpander, concurrency: usize) -> Self {
        Self {
            preprocessor,
            expander,
            concurrency: concurrency.max(1),
        }
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    /// Expand every distinct keyword, running lookups concurrently.
    pub async fn expand_keywords(&self, keywords: &[Keyword]) -> SynonymTable {
        let mut seen = HashSet::new();
        let distinct: Vec<&str> = keywords
            .iter()
            .map(Keyword::as_str)
            .filter(|k| seen.insert(*k))
            .collect();

        info!(
            keywords = distinct.len(),
            concurrency = self.concurrency,
            "Expanding keywords"
        );

        let expander = &self.expander;
        let table: SynonymTable = stream::iter(distinct.into_iter().map(|keyword| async move {
            let set = expander.expand(keyword).await;
            debug!(keyword, forms = set.len(), "Expanded keyword");
            (keyword.to_string(), set)
        }))
        .buffer_unordered(self.concurrency)
        .collect()
        .await;

        table
    }

    /// Score every sector against every keyword.
    pub async fn score(&self, descriptions: &[Description], keywords: &[Keyword]) -> Corpus {
        self.score_with_progress(descriptions, keywords, |_| {}).await
    }

    /// Like `score`, calling `on_sector` as each sector finishes.
    pub async fn score_with_progress<F>(
        &self,
        descriptions: &[Description],
        keywords: &[Keyword],
        mut on_sector: F,
    ) -> Corpus
    where
        F: FnMut(&SectorScores),
    {
        let synonyms = self.expand_keywords(keywords).await;

        let corpus: Corpus = descriptions
            .iter()
            .map(|description| {
                let tokens = self.preprocessor.preprocess(&description.text);
                let scores = score_sector(&description.sector, &tokens, keywords, &synonyms);
                debug!(
                    sector = %description.sector,
                    tokens = tokens.len(),
                    matched = scores.len(),
                    total = scores.total(),
                    "Scored sector"
                );
                on_sector(&scores);
                scores
            })
            .collect();

        info!(sectors = corpus.len(), "Scoring complete");
        corpus
    }
}

/// Count, per keyword, the tokens that fall in its synonym set.
///
/// Every matching token position adds one. Keywords missing from `synonyms`
/// match only their own lowercased form.
pub fn score_sector(
    sector: &str,
    tokens: &[String],
    keywords: &[Keyword],
    synonyms: &SynonymTable,
) -> SectorScores {
    let mut scores = SectorScores::new(sector);

    for keyword in keywords {
        let count = match synonyms.get(keyword.as_str()) {
            Some(set) => count_matches(tokens, set),
            None => {
                let lower = keyword.as_str().to_lowercase();
                tokens.iter().filter(|t| **t == lower).count()
            }
        };
        scores.record(keyword.as_str(), u32::try_from(count).unwrap_or(u32::MAX));
    }

    scores
}

fn count_matches(tokens: &[String], set: &SynonymSet) -> usize {
    tokens.iter().filter(|t| set.contains(t)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    /// Build a synonym table from `(keyword, "space separated forms")` pairs.
    fn table(entries: &[(&str, &str)]) -> SynonymTable {
        entries
            .iter()
            .map(|&(keyword, forms)| {
                let mut set: SynonymSet = forms.split_whitespace().collect();
                set.insert(keyword);
                (keyword.to_string(), set)
            })
            .collect()
    }

    #[test]
    fn test_counts_every_occurrence() {
        let toks = tokens(&["banks", "offer", "loans", "credit", "banks"]);
        let keywords = vec![Keyword::new("loan"), Keyword::new("bank")];
        let synonyms = table(&[("loan", "loans credit"), ("bank", "banks")]);

        let scores = score_sector("finance", &toks, &keywords, &synonyms);
        let pairs: Vec<(&str, u32)> = scores.iter().collect();
        assert_eq!(pairs, vec![("loan", 2), ("bank", 2)]);
    }

    #[test]
    fn test_zero_match_keyword_is_absent() {
        let toks = tokens(&["banks", "offer"]);
        let keywords = vec![Keyword::new("derivative"), Keyword::new("bank")];
        let synonyms = table(&[("derivative", ""), ("bank", "banks")]);

        let scores = score_sector("finance", &toks, &keywords, &synonyms);
        assert_eq!(scores.get("derivative"), None);
        assert_eq!(scores.get("bank"), Some(1));
        assert_eq!(scores.len(), 1);
    }

    #[test]
    fn test_missing_synonym_set_matches_literal_keyword() {
        let toks = tokens(&["bank", "bank", "river"]);
        let keywords = vec![Keyword::new("Bank")];
        let scores = score_sector("finance", &toks, &keywords, &SynonymTable::new());
        assert_eq!(scores.get("Bank"), Some(2));
    }

    #[test]
    fn test_duplicate_keyword_accumulates() {
        let toks = tokens(&["bank"]);
        let keywords = vec![Keyword::new("bank"), Keyword::new("loan"), Keyword::new("bank")];
        let synonyms = table(&[("bank", ""), ("loan", "")]);
        let scores = score_sector("finance", &toks, &keywords, &synonyms);
        let pairs: Vec<(&str, u32)> = scores.iter().collect();
        assert_eq!(pairs, vec![("bank", 2)]);
    }

    #[test]
    fn test_empty_tokens_empty_scores() {
        let keywords = vec![Keyword::new("bank")];
        let synonyms = table(&[("bank", "banks")]);
        assert!(score_sector("empty", &[], &keywords, &synonyms).is_empty());
    }
}
