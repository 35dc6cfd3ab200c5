use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use sectormatch::config::Config;
use sectormatch::lexicon::expander::{LookupOutcome, SynonymExpander};
use sectormatch::output::{report, terminal};
use sectormatch::scoring::engine::ScoringEngine;
use sectormatch::sources::{descriptions, keywords};
use sectormatch::text::preprocess::Preprocessor;
use sectormatch::text::stopwords::StopwordSet;

/// sectormatch: score sector descriptions against a keyword vocabulary.
///
/// Each keyword is expanded through a lexical knowledge base (WordNet by
/// default), and every token of a sector's description that is the keyword
/// or one of its synonyms adds one to that keyword's score.
#[derive(Parser)]
#[command(name = "sectormatch", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every sector and print the JSON report
    Score {
        /// Description document (overrides SECTOR_DESCRIPTIONS)
        #[arg(long)]
        descriptions: Option<PathBuf>,

        /// Keyword document (overrides SECTOR_KEYWORDS)
        #[arg(long)]
        keywords: Option<PathBuf>,

        /// Write the report to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Also print a colored per-sector summary to stderr
        #[arg(long)]
        summary: bool,
    },

    /// Show the synonym set the knowledge base produces for each word
    Synonyms {
        /// Words to expand
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Show the token sequence of each sector description
    Tokens {
        /// Description document (overrides SECTOR_DESCRIPTIONS)
        #[arg(long)]
        descriptions: Option<PathBuf>,

        /// Only show this sector
        #[arg(long)]
        sector: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Structured logging on stderr; stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sectormatch=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Score {
            descriptions: descriptions_path,
            keywords: keywords_path,
            output,
            summary,
        } => {
            let descriptions_path =
                descriptions_path.unwrap_or_else(|| config.descriptions_path.clone());
            let keywords_path = keywords_path.unwrap_or_else(|| config.keywords_path.clone());

            // Both inputs must load before any lookup happens
            let descriptions = descriptions::load_descriptions(&descriptions_path)?;
            let keywords = keywords::load_keywords(&keywords_path)?;

            let engine = build_engine(&config).await?;

            let pb = ProgressBar::new(descriptions.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  Scoring [{bar:30}] {pos}/{len} sectors ({eta})")
                    .context("Invalid progress bar template")?,
            );

            let corpus = engine
                .score_with_progress(&descriptions, &keywords, |_| pb.inc(1))
                .await;
            pb.finish_and_clear();

            let report = report::assemble(&corpus);
            let rendered = report::render_json(&report)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &rendered)
                        .with_context(|| format!("Failed to write report: {}", path.display()))?;
                    info!(path = %path.display(), "Report written");
                }
                None => print!("{rendered}"),
            }

            if summary {
                terminal::display_summary(&report);
            }
        }

        Commands::Synonyms { words } => {
            let kb = sectormatch::lexicon::open(&config).await?;
            let backend = kb.name();
            let expander = SynonymExpander::new(kb, config.lookup_timeout);

            for word in &words {
                let (set, outcome) = expander.expand_with_outcome(word).await;
                let status = match outcome {
                    LookupOutcome::Found(n) => format!("{n} entries").green(),
                    LookupOutcome::Unknown => "unknown word".yellow(),
                    LookupOutcome::Failed(e) => format!("lookup failed: {e}").red(),
                    LookupOutcome::TimedOut => "lookup timed out".red(),
                };
                println!("{} [{}: {}]", word.bold(), backend, status);
                println!("  {}", set.sorted().join(", ").dimmed());
            }
        }

        Commands::Tokens {
            descriptions: descriptions_path,
            sector,
        } => {
            let descriptions_path =
                descriptions_path.unwrap_or_else(|| config.descriptions_path.clone());
            let descriptions = descriptions::load_descriptions(&descriptions_path)?;
            let preprocessor = Preprocessor::new(StopwordSet::for_source(&config.stopwords))?;

            let mut shown = 0;
            for description in descriptions
                .iter()
                .filter(|d| sector.as_deref().map_or(true, |s| s == d.sector))
            {
                let tokens = preprocessor.preprocess(&description.text);
                println!("{} ({} tokens)", description.sector.bold(), tokens.len());
                println!("  {}", tokens.join(" ").dimmed());
                shown += 1;
            }

            if let (Some(name), 0) = (&sector, shown) {
                anyhow::bail!("No sector named {name:?} in {}", descriptions_path.display());
            }
        }
    }

    Ok(())
}

/// Build the scoring context: preprocessor, knowledge base and expander.
async fn build_engine(config: &Config) -> Result<ScoringEngine> {
    let preprocessor = Preprocessor::new(StopwordSet::for_source(&config.stopwords))?;
    info!(
        stopwords = preprocessor.stopwords().len(),
        source = ?config.stopwords,
        "Preprocessor ready"
    );

    let kb = sectormatch::lexicon::open(config).await?;
    info!(backend = kb.name(), "Knowledge base ready");

    let expander = SynonymExpander::new(kb, config.lookup_timeout);
    Ok(ScoringEngine::new(
        preprocessor,
        expander,
        config.lookup_concurrency,
    ))
}
