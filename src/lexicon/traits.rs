// Knowledge base trait: the swap-ready abstraction.
//
// A lookup has three outcomes that callers may want to tell apart in logs:
// the lookup failed (Err), the word is unknown (Ok(None)), or the word was
// found (Ok(Some(entries))). For scoring all three reduce to a synonym set.

use anyhow::Result;
use async_trait::async_trait;

/// One result entry for a word: a sense, synset or synonym group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymEntry {
    /// Where this entry came from (e.g. "noun:08420278" for a WordNet synset)
    pub source: String,
    /// Word forms in this entry, as the backend spells them
    pub synonyms: Vec<String>,
}

/// Trait for synonym lookups. Implementations are async because the real
/// backends read files or call HTTP APIs.
#[async_trait]
pub trait LexicalKnowledgeBase: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Wait until the backend is allowed to issue another lookup.
    ///
    /// Rate-limited backends override this. Callers await it before starting
    /// the lookup timeout, so time spent queued never counts against a lookup.
    async fn throttle(&self) {}

    /// Look up every entry for a single word.
    async fn lookup(&self, word: &str) -> Result<Option<Vec<SynonymEntry>>>;
}
