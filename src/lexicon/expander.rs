// Synonym expansion: keyword -> closure set of lowercase word forms.
//
// The set always contains the lowercased keyword. Whatever the knowledge
// base does (finds the word, doesn't know it, errors, hangs past the
// timeout) expansion succeeds; the worst case is the keyword alone.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::traits::LexicalKnowledgeBase;

/// The lowercase word forms that count as a match for one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SynonymSet {
    forms: HashSet<String>,
}

impl SynonymSet {
    pub fn contains(&self, token: &str) -> bool {
        self.forms.contains(token)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    pub fn insert(&mut self, form: &str) {
        self.forms.insert(form.to_lowercase());
    }

    /// Forms in sorted order, for stable display.
    pub fn sorted(&self) -> Vec<&str> {
        let mut forms: Vec<&str> = self.forms.iter().map(String::as_str).collect();
        forms.sort_unstable();
        forms
    }
}

impl<S: AsRef<str>> FromIterator<S> for SynonymSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut set = Self::default();
        for form in iter {
            set.insert(form.as_ref());
        }
        set
    }
}

/// How the knowledge base answered, kept for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Word found; number of entries returned
    Found(usize),
    /// Word unknown to the knowledge base
    Unknown,
    /// Lookup errored; the message is kept for display
    Failed(String),
    /// Lookup did not finish within the timeout
    TimedOut,
}

/// Expands keywords through a knowledge base.
#[derive(Clone)]
pub struct SynonymExpander {
    kb: Arc<dyn LexicalKnowledgeBase>,
    timeout: Duration,
}

impl SynonymExpander {
    pub fn new(kb: Arc<dyn LexicalKnowledgeBase>, timeout: Duration) -> Self {
        Self { kb, timeout }
    }

    /// Compute the synonym set for `keyword`. Never fails.
    pub async fn expand(&self, keyword: &str) -> SynonymSet {
        self.expand_with_outcome(keyword).await.0
    }

    /// Like `expand`, also reporting how the lookup went.
    pub async fn expand_with_outcome(&self, keyword: &str) -> (SynonymSet, LookupOutcome) {
        let mut set = SynonymSet::default();

        // Queueing for a rate-limited backend is not part of the timeout
        self.kb.throttle().await;
        let outcome = match tokio::time::timeout(self.timeout, self.kb.lookup(keyword)).await {
            Ok(Ok(Some(entries))) => {
                for entry in &entries {
                    for synonym in &entry.synonyms {
                        set.insert(synonym);
                    }
                }
                LookupOutcome::Found(entries.len())
            }
            Ok(Ok(None)) => {
                debug!(keyword, backend = self.kb.name(), "Word not in knowledge base");
                LookupOutcome::Unknown
            }
            Ok(Err(e)) => {
                warn!(
                    keyword,
                    backend = self.kb.name(),
                    error = %e,
                    "Synonym lookup failed, using keyword alone"
                );
                LookupOutcome::Failed(format!("{e:#}"))
            }
            Err(_) => {
                warn!(
                    keyword,
                    backend = self.kb.name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Synonym lookup timed out, using keyword alone"
                );
                LookupOutcome::TimedOut
            }
        };

        set.insert(keyword);
        (set, outcome)
    }
}
