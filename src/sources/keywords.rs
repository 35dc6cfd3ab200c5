// Keyword document: a JSON array of objects, each carrying a `word` field.
//
// Other fields on an entry are ignored. An entry without a string `word`
// fails the whole load rather than becoming an empty keyword that silently
// matches nothing.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

use super::descriptions::json_kind;
use super::Keyword;

/// Read and parse the keyword document at `path`.
pub fn load_keywords(path: &Path) -> Result<Vec<Keyword>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read keyword file: {}", path.display()))?;
    let keywords = parse_keywords(&raw)
        .with_context(|| format!("Invalid keyword file: {}", path.display()))?;

    info!(
        keywords = keywords.len(),
        path = %path.display(),
        "Loaded keywords"
    );
    Ok(keywords)
}

/// Parse a keyword document from a JSON string, preserving entry order.
pub fn parse_keywords(raw: &str) -> Result<Vec<Keyword>> {
    let value: Value = serde_json::from_str(raw).context("Keyword document is not valid JSON")?;

    let Value::Array(entries) = value else {
        anyhow::bail!("Keyword document must be a JSON array of {{\"word\": ...}} entries");
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| keyword_from_entry(index, entry))
        .collect()
}

fn keyword_from_entry(index: usize, entry: &Value) -> Result<Keyword> {
    let Value::Object(fields) = entry else {
        anyhow::bail!(
            "Keyword entry #{index} must be an object, found {}",
            json_kind(entry)
        );
    };

    match fields.get("word") {
        Some(Value::String(word)) => Ok(Keyword(word.clone())),
        Some(other) => anyhow::bail!(
            "Keyword entry #{index} has a `word` field that is {}, expected a string",
            json_kind(other)
        ),
        None => anyhow::bail!("Keyword entry #{index} is missing its `word` field"),
    }
}
