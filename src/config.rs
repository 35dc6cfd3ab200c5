use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Which lexical knowledge base backs synonym expansion.
#[derive(Debug, Clone, PartialEq)]
pub enum LexiconBackend {
    /// Local WordNet dict files (default), no network or rate limits
    WordNet,
    /// JSON thesaurus file, for curated vocabularies
    Thesaurus,
    /// Datamuse `rel_syn` API, requires network access
    Datamuse,
}

/// Which stopword list the preprocessor filters with.
#[derive(Debug, Clone, PartialEq)]
pub enum StopwordSource {
    /// Compact built-in list of English function words
    Builtin,
    /// The much larger stopwords-iso English list from the `stop-words` crate
    Iso,
}

/// Default base URL for the Datamuse API.
pub const DEFAULT_DATAMUSE_URL: &str = "https://api.datamuse.com";

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy. Input paths can be
/// overridden per invocation by CLI flags.
#[derive(Debug, Clone)]
pub struct Config {
    pub descriptions_path: PathBuf,
    pub keywords_path: PathBuf,
    pub lexicon_backend: LexiconBackend,
    /// WordNet `dict` directory (index.* and data.* files)
    pub wordnet_dir: PathBuf,
    pub thesaurus_path: PathBuf,
    pub datamuse_url: String,
    /// Maximum knowledge base lookups in flight at once
    pub lookup_concurrency: usize,
    /// A lookup slower than this degrades to "keyword alone"
    pub lookup_timeout: Duration,
    pub stopwords: StopwordSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            descriptions_path: PathBuf::from("sub-sector-desc.json"),
            keywords_path: PathBuf::from("keywords.json"),
            lexicon_backend: LexiconBackend::WordNet,
            wordnet_dir: default_wordnet_dir(),
            thesaurus_path: PathBuf::from("thesaurus.json"),
            datamuse_url: DEFAULT_DATAMUSE_URL.to_string(),
            lookup_concurrency: 8,
            lookup_timeout: Duration::from_secs(10),
            stopwords: StopwordSource::Builtin,
        }
    }
}

/// Returns the default WordNet directory.
/// Uses the platform data directory: ~/.local/share/sectormatch/wordnet/ on Linux.
pub fn default_wordnet_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sectormatch")
        .join("wordnet")
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional. Malformed values are an error rather than
    /// a silent fallback, since they would change the report.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let lexicon_backend = match env::var("SECTOR_LEXICON").as_deref() {
            Ok("thesaurus") => LexiconBackend::Thesaurus,
            Ok("datamuse") => LexiconBackend::Datamuse,
            Ok("wordnet") | Err(_) => LexiconBackend::WordNet,
            Ok(other) => anyhow::bail!(
                "SECTOR_LEXICON must be one of wordnet, thesaurus, datamuse (got {other:?})"
            ),
        };

        let stopwords = match env::var("SECTOR_STOPWORDS").as_deref() {
            Ok("iso") => StopwordSource::Iso,
            Ok("builtin") | Err(_) => StopwordSource::Builtin,
            Ok(other) => {
                anyhow::bail!("SECTOR_STOPWORDS must be builtin or iso (got {other:?})")
            }
        };

        let lookup_concurrency = match env::var("SECTOR_LOOKUP_CONCURRENCY") {
            Ok(raw) => parse_concurrency(&raw)?,
            Err(_) => defaults.lookup_concurrency,
        };

        let lookup_timeout = match env::var("SECTOR_LOOKUP_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => defaults.lookup_timeout,
        };

        Ok(Self {
            descriptions_path: env::var("SECTOR_DESCRIPTIONS")
                .map(PathBuf::from)
                .unwrap_or(defaults.descriptions_path),
            keywords_path: env::var("SECTOR_KEYWORDS")
                .map(PathBuf::from)
                .unwrap_or(defaults.keywords_path),
            lexicon_backend,
            wordnet_dir: env::var("WORDNET_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.wordnet_dir),
            thesaurus_path: env::var("THESAURUS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.thesaurus_path),
            datamuse_url: env::var("DATAMUSE_URL").unwrap_or(defaults.datamuse_url),
            lookup_concurrency,
            lookup_timeout,
            stopwords,
        })
    }

    /// Validate that the chosen lexicon backend has what it needs.
    /// Call this before scoring so a missing resource aborts the run up front.
    pub fn require_lexicon(&self) -> Result<()> {
        match self.lexicon_backend {
            LexiconBackend::WordNet => {
                if !crate::lexicon::wordnet::dict_files_present(&self.wordnet_dir) {
                    anyhow::bail!(
                        "WordNet dict files not found in {}\n\
                         Point WORDNET_DIR at a WordNet 3.x `dict` directory,\n\
                         or set SECTOR_LEXICON=thesaurus to use a JSON thesaurus instead.",
                        self.wordnet_dir.display()
                    );
                }
                Ok(())
            }
            LexiconBackend::Thesaurus => {
                if !self.thesaurus_path.is_file() {
                    anyhow::bail!(
                        "Thesaurus file not found at {}. Set THESAURUS_PATH.",
                        self.thesaurus_path.display()
                    );
                }
                Ok(())
            }
            LexiconBackend::Datamuse => {
                if self.datamuse_url.is_empty() {
                    anyhow::bail!("DATAMUSE_URL is empty");
                }
                Ok(())
            }
        }
    }
}

fn parse_concurrency(raw: &str) -> Result<usize> {
    let value: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("SECTOR_LOOKUP_CONCURRENCY is not a number: {raw:?}"))?;
    if value == 0 {
        anyhow::bail!("SECTOR_LOOKUP_CONCURRENCY must be at least 1");
    }
    Ok(value)
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("SECTOR_LOOKUP_TIMEOUT_SECS is not a number: {raw:?}"))?;
    if !secs.is_finite() || secs <= 0.0 {
        anyhow::bail!("SECTOR_LOOKUP_TIMEOUT_SECS must be positive (got {raw})");
    }
    Ok(Duration::from_secs_f64(secs))
}
