// HTTP client for the Datamuse word-finding API.
//
// `GET /words?rel_syn=<word>` returns the word's synonyms as a flat list.
// The whole list becomes a single lookup entry; an empty list means the
// word is unknown to Datamuse. `throttle` paces requests through a rate
// limiter so a concurrent scoring run does not hammer the public endpoint.
// Datamuse also returns a relevance score per word; only the word is kept.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::rate_limiter::RateLimiter;
use super::traits::{LexicalKnowledgeBase, SynonymEntry};

/// Most synonyms requested per word.
const MAX_RESULTS: u32 = 100;

/// A single word in a Datamuse response.
#[derive(Debug, Clone, Deserialize)]
pub struct DatamuseWord {
    pub word: String,
}

/// Client for the Datamuse API.
pub struct DatamuseClient {
    client: reqwest::Client,
    base_url: String,
    rate_limiter: RateLimiter,
}

impl DatamuseClient {
    /// Create a client pointing at the given base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("sectormatch/0.1 (synonym-lookup)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_client(base_url, client))
    }

    /// Create a client around an already configured `reqwest::Client`.
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            // Datamuse has no hard QPS limit, but stays friendly at 10/s
            rate_limiter: RateLimiter::new(10.0),
        }
    }
}

#[async_trait]
impl LexicalKnowledgeBase for DatamuseClient {
    fn name(&self) -> &'static str {
        "datamuse"
    }

    async fn throttle(&self) {
        self.rate_limiter.acquire().await;
    }

    async fn lookup(&self, word: &str) -> Result<Option<Vec<SynonymEntry>>> {
        let url = format!("{}/words", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("rel_syn", word), ("max", &MAX_RESULTS.to_string())])
            .send()
            .await
            .context("Datamuse API request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Datamuse API returned {}: {}", status, body);
        }

        let words = response
            .json::<Vec<DatamuseWord>>()
            .await
            .context("Failed to parse Datamuse response")?;

        debug!(word, results = words.len(), "Datamuse lookup");
        Ok(entries_from_response(word, words))
    }
}

/// Convert a Datamuse word list into lookup entries.
pub fn entries_from_response(word: &str, words: Vec<DatamuseWord>) -> Option<Vec<SynonymEntry>> {
    if words.is_empty() {
        return None;
    }
    Some(vec![SynonymEntry {
        source: format!("datamuse:{word}"),
        synonyms: words.into_iter().map(|w| w.word).collect(),
    }])
}
