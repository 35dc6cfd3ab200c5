// Report assembly: corpus -> `sector -> {"Keywords": [...], "Scores": [...]}`.
//
// The two arrays are parallel: index i of Scores is the count for index i
// of Keywords. Sector order follows the corpus, which follows the input.

use anyhow::{Context, Result};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::scoring::corpus::{Corpus, SectorScores};

/// One sector's entry in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorReport {
    #[serde(skip)]
    pub sector: String,
    #[serde(rename = "Keywords")]
    keywords: Vec<String>,
    #[serde(rename = "Scores")]
    scores: Vec<u32>,
}

impl SectorReport {
    /// Build from a sector's scores; the arrays come out the same length
    /// by construction.
    pub fn from_scores(scores: &SectorScores) -> Self {
        let (keywords, counts) = scores
            .iter()
            .map(|(keyword, count)| (keyword.to_string(), count))
            .unzip();
        Self {
            sector: scores.sector.clone(),
            keywords,
            scores: counts,
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    /// `(keyword, score)` pairs in report order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, u32)> {
        self.keywords
            .iter()
            .map(String::as_str)
            .zip(self.scores.iter().copied())
    }

    /// The highest-scoring keyword; the earliest one wins ties.
    pub fn top(&self) -> Option<(&str, u32)> {
        let mut best: Option<(&str, u32)> = None;
        for (keyword, score) in self.pairs() {
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((keyword, score));
            }
        }
        best
    }
}

/// The full report, serialized as an ordered JSON object keyed by sector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub sectors: Vec<SectorReport>,
}

impl Report {
    pub fn get(&self, sector: &str) -> Option<&SectorReport> {
        self.sectors.iter().find(|s| s.sector == sector)
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sectors.len()))?;
        for sector in &self.sectors {
            map.serialize_entry(&sector.sector, sector)?;
        }
        map.end()
    }
}

/// Convert the scored corpus into the report shape.
pub fn assemble(corpus: &Corpus) -> Report {
    Report {
        sectors: corpus.iter().map(SectorReport::from_scores).collect(),
    }
}

/// Render the report as pretty JSON with a 4-space indent and trailing newline.
pub fn render_json(report: &Report) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    report
        .serialize(&mut serializer)
        .context("Failed to serialize report")?;

    let mut rendered = String::from_utf8(buf).context("Report is not valid UTF-8")?;
    rendered.push('\n');
    Ok(rendered)
}
