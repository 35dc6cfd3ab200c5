// Lexical knowledge base: trait-based abstraction for swappable synonym sources.
//
// The LexicalKnowledgeBase trait defines the lookup interface. WordNet is the
// default backend; a JSON thesaurus and the Datamuse API are alternatives.
// The SynonymExpander sits on top and turns lookups into synonym sets.

pub mod datamuse;
pub mod expander;
pub mod rate_limiter;
pub mod thesaurus;
pub mod traits;
pub mod wordnet;

use std::sync::Arc;

use anyhow::Result;

use crate::config::{Config, LexiconBackend};
use traits::LexicalKnowledgeBase;

/// Open the knowledge base selected by the configuration.
pub async fn open(config: &Config) -> Result<Arc<dyn LexicalKnowledgeBase>> {
    config.require_lexicon()?;
    let kb: Arc<dyn LexicalKnowledgeBase> = match config.lexicon_backend {
        LexiconBackend::WordNet => {
            Arc::new(wordnet::WordNetDatabase::open(&config.wordnet_dir).await?)
        }
        LexiconBackend::Thesaurus => Arc::new(thesaurus::Thesaurus::load(&config.thesaurus_path)?),
        LexiconBackend::Datamuse => Arc::new(datamuse::DatamuseClient::new(&config.datamuse_url)?),
    };
    Ok(kb)
}
