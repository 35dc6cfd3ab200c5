// WordNet backend: reads the plain-text WordNet 3.x `dict` database.
//
// The four `index.<pos>` files map a lemma to the byte offsets of its synsets
// in the matching `data.<pos>` file. Index files are small enough to hold in
// memory; synsets are read on demand by seeking to their offset, so every
// lookup is real file I/O.
//
// Format reference: wndb(5WN).
//   index line: lemma pos synset_cnt p_cnt [ptr_symbol...] sense_cnt tagsense_cnt offset...
//   data line:  offset lex_filenum ss_type w_cnt(hex) word lex_id [word lex_id...] p_cnt ... | gloss

use std::collections::HashMap;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};
use tracing::{debug, info, warn};

use super::traits::{LexicalKnowledgeBase, SynonymEntry};

/// The parts of speech WordNet stores, in lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartOfSpeech {
    Adjective,
    Adverb,
    Noun,
    Verb,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
    ];

    /// File suffix used by the dict directory (`index.adj`, `data.adj`, ...).
    pub fn file_suffix(self) -> &'static str {
        match self {
            PartOfSpeech::Adjective => "adj",
            PartOfSpeech::Adverb => "adv",
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
        }
    }
}

/// Check whether every index and data file exists in `dir`.
pub fn dict_files_present(dir: &Path) -> bool {
    PartOfSpeech::ALL.iter().all(|pos| {
        dir.join(format!("index.{}", pos.file_suffix())).is_file()
            && dir.join(format!("data.{}", pos.file_suffix())).is_file()
    })
}

/// One part of speech: its in-memory index and the path of its data file.
struct PosTable {
    pos: PartOfSpeech,
    index: HashMap<String, Vec<u64>>,
    data_path: PathBuf,
}

/// A WordNet database opened from a `dict` directory.
pub struct WordNetDatabase {
    tables: Vec<PosTable>,
}

impl WordNetDatabase {
    /// Open the database, loading all four index files.
    pub async fn open(dir: &Path) -> Result<Self> {
        let mut tables = Vec::with_capacity(PartOfSpeech::ALL.len());

        for pos in PartOfSpeech::ALL {
            let index_path = dir.join(format!("index.{}", pos.file_suffix()));
            let raw = tokio::fs::read_to_string(&index_path)
                .await
                .with_context(|| format!("Failed to read WordNet index: {}", index_path.display()))?;
            let index = parse_index(&raw)
                .with_context(|| format!("Malformed WordNet index: {}", index_path.display()))?;

            tables.push(PosTable {
                pos,
                index,
                data_path: dir.join(format!("data.{}", pos.file_suffix())),
            });
        }

        info!(
            lemmas = tables.iter().map(|t| t.index.len()).sum::<usize>(),
            dir = %dir.display(),
            "Opened WordNet database"
        );

        Ok(Self { tables })
    }

    /// Read and parse the synset stored at `offset` in a data file.
    async fn read_synset(&self, table: &PosTable, offset: u64) -> Result<Vec<String>> {
        let file = tokio::fs::File::open(&table.data_path)
            .await
            .with_context(|| format!("Failed to open {}", table.data_path.display()))?;
        let mut reader = BufReader::new(file);
        reader.seek(SeekFrom::Start(offset)).await?;

        let mut line = String::new();
        reader.read_line(&mut line).await?;

        let (found_offset, words) = parse_data_line(&line).with_context(|| {
            format!(
                "Malformed synset at offset {offset} in {}",
                table.data_path.display()
            )
        })?;
        if found_offset != offset {
            anyhow::bail!(
                "Synset offset mismatch in {}: expected {offset}, found {found_offset}",
                table.data_path.display()
            );
        }
        Ok(words)
    }
}

#[async_trait]
impl LexicalKnowledgeBase for WordNetDatabase {
    fn name(&self) -> &'static str {
        "wordnet"
    }

    async fn lookup(&self, word: &str) -> Result<Option<Vec<SynonymEntry>>> {
        let lemma = normalize_lemma(word);
        let mut entries = Vec::new();
        let mut last_error = None;

        for table in &self.tables {
            let Some(offsets) = table.index.get(&lemma) else {
                continue;
            };
            for &offset in offsets {
                match self.read_synset(table, offset).await {
                    Ok(synonyms) => entries.push(SynonymEntry {
                        source: format!("{}:{offset:08}", table.pos.file_suffix()),
                        synonyms,
                    }),
                    Err(e) => {
                        warn!(
                            lemma = %lemma,
                            pos = table.pos.file_suffix(),
                            offset,
                            error = %e,
                            "Skipping unreadable synset"
                        );
                        last_error = Some(e);
                    }
                }
            }
        }

        debug!(lemma = %lemma, synsets = entries.len(), "WordNet lookup");

        // Only an error when the lemma is indexed but none of its synsets read
        if entries.is_empty() {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        if entries.is_empty() {
            Ok(None)
        } else {
            Ok(Some(entries))
        }
    }
}

/// WordNet lemmas are lowercase with underscores in place of spaces.
fn normalize_lemma(word: &str) -> String {
    word.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Parse an index file into `lemma -> synset offsets`.
///
/// License header lines start with a space and are skipped. The synset
/// offsets are always the last `synset_cnt` fields on the line.
fn parse_index(raw: &str) -> Result<HashMap<String, Vec<u64>>> {
    let mut index = HashMap::new();

    for (line_no, line) in raw.lines().enumerate() {
        if line.starts_with(' ') || line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            anyhow::bail!("line {}: too few fields", line_no + 1);
        }
        let synset_cnt: usize = fields[2]
            .parse()
            .with_context(|| format!("line {}: bad synset_cnt {:?}", line_no + 1, fields[2]))?;
        if synset_cnt == 0 || synset_cnt > fields.len() - 4 {
            anyhow::bail!("line {}: synset_cnt {synset_cnt} out of range", line_no + 1);
        }

        let offsets = fields[fields.len() - synset_cnt..]
            .iter()
            .map(|f| {
                f.parse::<u64>()
                    .with_context(|| format!("line {}: bad offset {f:?}", line_no + 1))
            })
            .collect::<Result<Vec<u64>>>()?;

        index.insert(fields[0].to_string(), offsets);
    }

    Ok(index)
}

/// Parse a data line into its offset and word list.
fn parse_data_line(line: &str) -> Result<(u64, Vec<String>)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        anyhow::bail!("too few fields");
    }

    let offset: u64 = fields[0]
        .parse()
        .with_context(|| format!("bad synset offset {:?}", fields[0]))?;
    let w_cnt = usize::from_str_radix(fields[3], 16)
        .with_context(|| format!("bad word count {:?}", fields[3]))?;

    // Words and lex_ids alternate after w_cnt
    let words_end = 4 + w_cnt * 2;
    if fields.len() < words_end {
        anyhow::bail!("word count {w_cnt} exceeds line length");
    }

    let words = fields[4..words_end]
        .iter()
        .step_by(2)
        .map(|w| strip_adjective_marker(w).to_string())
        .collect();

    Ok((offset, words))
}

/// Adjective lemmas may carry a syntactic marker: `(a)`, `(p)` or `(ip)`.
fn strip_adjective_marker(word: &str) -> &str {
    match word.find('(') {
        Some(idx) if word.ends_with(')') => &word[..idx],
        _ => word,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index_skips_header() {
        let raw = "  1 This software and database is being provided\n\
                   bank n 2 3 @ ~ + 2 1 08420278 09213565\n\
                   loan n 1 2 @ ~ 1 1 13398953\n";
        let index = parse_index(raw).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index["bank"], vec![8420278, 9213565]);
        assert_eq!(index["loan"], vec![13398953]);
    }

    #[test]
    fn test_parse_index_rejects_bad_count() {
        assert!(parse_index("bank n x 0 1 0 08420278\n").is_err());
        assert!(parse_index("bank n 9 0 1 0 08420278\n").is_err());
    }

    #[test]
    fn test_parse_data_line() {
        let line = "08420278 14 n 03 depository_financial_institution 0 bank 0 banking_concern 0 \
                    001 @ 08054721 n 0000 | a financial institution\n";
        let (offset, words) = parse_data_line(line).unwrap();
        assert_eq!(offset, 8420278);
        assert_eq!(
            words,
            vec!["depository_financial_institution", "bank", "banking_concern"]
        );
    }

    #[test]
    fn test_parse_data_line_hex_count_and_markers() {
        // 0a = 10 words would overrun; 02 with adjective markers
        let line = "00001740 00 a 02 able(a) 0 capable(p) 0 000 | having the means\n";
        let (_, words) = parse_data_line(line).unwrap();
        assert_eq!(words, vec!["able", "capable"]);

        let bad = "00001740 00 a 0a able 0 000 | gloss\n";
        assert!(parse_data_line(bad).is_err());
    }

    #[test]
    fn test_normalize_lemma() {
        assert_eq!(normalize_lemma("Bank"), "bank");
        assert_eq!(normalize_lemma("  Central  Bank "), "central_bank");
    }
}
