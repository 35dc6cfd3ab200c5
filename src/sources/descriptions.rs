// Sector description document: a JSON object of `sector -> description`.
//
// Key order in the document defines the order of sectors in the report,
// which is why serde_json is built with `preserve_order`.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

use super::Description;

/// Read and parse the description document at `path`.
pub fn load_descriptions(path: &Path) -> Result<Vec<Description>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read description file: {}", path.display()))?;
    let descriptions = parse_descriptions(&raw)
        .with_context(|| format!("Invalid description file: {}", path.display()))?;

    info!(
        sectors = descriptions.len(),
        path = %path.display(),
        "Loaded sector descriptions"
    );
    Ok(descriptions)
}

/// Parse a description document from a JSON string, preserving key order.
pub fn parse_descriptions(raw: &str) -> Result<Vec<Description>> {
    let value: Value = serde_json::from_str(raw).context("Description document is not valid JSON")?;

    let Value::Object(map) = value else {
        anyhow::bail!("Description document must be a JSON object of sector -> description");
    };

    map.into_iter()
        .map(|(sector, text)| match text {
            Value::String(text) => Ok(Description { sector, text }),
            other => anyhow::bail!(
                "Description for sector {sector:?} must be a string, found {}",
                json_kind(&other)
            ),
        })
        .collect()
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
