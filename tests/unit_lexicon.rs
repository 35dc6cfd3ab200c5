// Unit tests for the lexical knowledge base backends and the expander.
//
// WordNet is exercised against a small dict directory written to a temp
// dir, with synset offsets computed the same way the real files lay them out.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use sectormatch::lexicon::datamuse::DatamuseClient;
use sectormatch::lexicon::expander::{LookupOutcome, SynonymExpander};
use sectormatch::lexicon::thesaurus::Thesaurus;
use sectormatch::lexicon::traits::LexicalKnowledgeBase;
use sectormatch::lexicon::wordnet::{dict_files_present, WordNetDatabase};

/// Write `data.<suffix>` and return the byte offset of each synset line.
fn write_data(dir: &Path, suffix: &str, ss_type: char, synsets: &[&str]) -> Vec<u64> {
    let mut content = String::from("  1 Fixture WordNet data file\n");
    let mut offsets = Vec::new();
    for synset in synsets {
        let offset = content.len() as u64;
        let words: Vec<&str> = synset.split_whitespace().collect();
        let word_fields: Vec<String> = words.iter().map(|w| format!("{w} 0")).collect();
        content.push_str(&format!(
            "{offset:08} 00 {ss_type} {:02x} {} 000 | fixture gloss\n",
            words.len(),
            word_fields.join(" ")
        ));
        offsets.push(offset);
    }
    std::fs::write(dir.join(format!("data.{suffix}")), content).unwrap();
    offsets
}

/// Write `index.<suffix>` from `(lemma, offsets)` pairs.
fn write_index(dir: &Path, suffix: &str, pos: char, entries: &[(&str, Vec<u64>)]) {
    let mut content = String::from("  1 Fixture WordNet index file\n");
    for (lemma, offsets) in entries {
        let offsets: Vec<String> = offsets.iter().map(|o| format!("{o:08}")).collect();
        content.push_str(&format!(
            "{lemma} {pos} {n} 0 {n} 0 {}\n",
            offsets.join(" "),
            n = offsets.len()
        ));
    }
    std::fs::write(dir.join(format!("index.{suffix}")), content).unwrap();
}

/// A dict with two senses of "bank", a noun and a verb sense of "loan",
/// one index entry that points into the middle of a line, and one whose
/// second offset does.
fn fixture_dict() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path();

    let nouns = write_data(
        path,
        "noun",
        'n',
        &[
            "depository_financial_institution bank banking_concern banking_company",
            "bank",
            "loan",
            "credit recognition",
        ],
    );
    write_index(
        path,
        "noun",
        'n',
        &[
            ("bank", vec![nouns[0], nouns[1]]),
            ("loan", vec![nouns[2]]),
            ("credit", vec![nouns[3]]),
            ("broken", vec![1]),
            ("mixed", vec![nouns[3], 1]),
        ],
    );

    let verbs = write_data(path, "verb", 'v', &["lend loan"]);
    write_index(
        path,
        "verb",
        'v',
        &[("loan", vec![verbs[0]]), ("lend", vec![verbs[0]])],
    );

    let adjs = write_data(path, "adj", 'a', &["long-term(a) long-run(a)"]);
    write_index(path, "adj", 'a', &[("long-term", vec![adjs[0]])]);

    write_data(path, "adv", 'r', &[]);
    write_index(path, "adv", 'r', &[]);

    dir
}

// ============================================================
// WordNet
// ============================================================

#[test]
fn dict_presence_check() {
    let dict = fixture_dict();
    assert!(dict_files_present(dict.path()));

    let empty = tempfile::tempdir().unwrap();
    assert!(!dict_files_present(empty.path()));
}

#[tokio::test]
async fn wordnet_returns_one_entry_per_synset() {
    let dict = fixture_dict();
    let db = WordNetDatabase::open(dict.path()).await.unwrap();

    let entries = db.lookup("bank").await.unwrap().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(
        entries[0].synonyms,
        vec![
            "depository_financial_institution",
            "bank",
            "banking_concern",
            "banking_company"
        ]
    );
    assert_eq!(entries[1].synonyms, vec!["bank"]);
    assert!(entries[0].source.starts_with("noun:"));
}

#[tokio::test]
async fn wordnet_searches_every_part_of_speech() {
    let dict = fixture_dict();
    let db = WordNetDatabase::open(dict.path()).await.unwrap();

    let entries = db.lookup("Loan").await.unwrap().unwrap();
    let sources: Vec<&str> = entries.iter().map(|e| e.source.split(':').next().unwrap()).collect();
    assert_eq!(sources, vec!["noun", "verb"]);
}

#[tokio::test]
async fn wordnet_strips_adjective_markers() {
    let dict = fixture_dict();
    let db = WordNetDatabase::open(dict.path()).await.unwrap();

    let entries = db.lookup("long-term").await.unwrap().unwrap();
    assert_eq!(entries[0].synonyms, vec!["long-term", "long-run"]);
}

#[tokio::test]
async fn wordnet_unknown_word_is_none() {
    let dict = fixture_dict();
    let db = WordNetDatabase::open(dict.path()).await.unwrap();
    assert!(db.lookup("derivative").await.unwrap().is_none());
}

#[tokio::test]
async fn wordnet_bad_offset_is_an_error() {
    let dict = fixture_dict();
    let db = WordNetDatabase::open(dict.path()).await.unwrap();
    assert!(db.lookup("broken").await.is_err());
}

#[tokio::test]
async fn wordnet_skips_unreadable_synset_and_keeps_the_rest() {
    let dict = fixture_dict();
    let db = WordNetDatabase::open(dict.path()).await.unwrap();

    let entries = db.lookup("mixed").await.unwrap().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].synonyms, vec!["credit", "recognition"]);
}

#[tokio::test]
async fn wordnet_open_missing_dir_fails() {
    let empty = tempfile::tempdir().unwrap();
    assert!(WordNetDatabase::open(empty.path()).await.is_err());
}

// ============================================================
// SynonymExpander over real backends
// ============================================================

fn expander(kb: impl LexicalKnowledgeBase + 'static) -> SynonymExpander {
    SynonymExpander::new(Arc::new(kb), Duration::from_secs(5))
}

#[tokio::test]
async fn expand_unions_all_synsets() {
    let dict = fixture_dict();
    let db = WordNetDatabase::open(dict.path()).await.unwrap();
    let set = expander(db).expand("LOAN").await;
    assert_eq!(set.sorted(), vec!["lend", "loan"]);
}

#[tokio::test]
async fn expand_absorbs_wordnet_errors() {
    let dict = fixture_dict();
    let db = WordNetDatabase::open(dict.path()).await.unwrap();
    let (set, outcome) = expander(db).expand_with_outcome("broken").await;
    assert!(matches!(outcome, LookupOutcome::Failed(_)));
    assert_eq!(set.sorted(), vec!["broken"]);
}

#[tokio::test]
async fn expand_keeps_good_synsets_next_to_a_bad_one() {
    let dict = fixture_dict();
    let db = WordNetDatabase::open(dict.path()).await.unwrap();
    let (set, outcome) = expander(db).expand_with_outcome("mixed").await;
    assert_eq!(outcome, LookupOutcome::Found(1));
    assert_eq!(set.sorted(), vec!["credit", "mixed", "recognition"]);
}

#[tokio::test]
async fn expand_always_contains_lowercased_keyword() {
    let thesaurus = Thesaurus::from_json(r#"{"bank": [["banks", "lender"]]}"#).unwrap();
    let exp = expander(thesaurus);
    for keyword in ["Bank", "DERIVATIVE", "Hedge", "bank"] {
        let set = exp.expand(keyword).await;
        assert!(
            set.contains(&keyword.to_lowercase()),
            "{keyword} missing from its own synonym set"
        );
    }
}

#[tokio::test]
async fn thesaurus_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("thesaurus.json");
    std::fs::write(&path, r#"{"loan": [["loans"], ["credit"]]}"#).unwrap();

    let thesaurus = Thesaurus::load(&path).unwrap();
    assert_eq!(thesaurus.len(), 1);
    let set = expander(thesaurus).expand("loan").await;
    assert_eq!(set.sorted(), vec!["credit", "loan", "loans"]);
}

// ============================================================
// Datamuse over a local HTTP server
// ============================================================

/// Serve exactly one HTTP response on a local port and return its base URL.
async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        // Drain the request head before answering
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    format!("http://{addr}")
}

/// Client for the local server; bypasses any proxy set in the environment.
fn local_client(base_url: &str) -> DatamuseClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    DatamuseClient::with_client(base_url, http)
}

#[tokio::test]
async fn datamuse_server_error_degrades_to_keyword() {
    let base_url = serve_once("500 Internal Server Error", "upstream down").await;
    let client = local_client(&base_url);

    let (set, outcome) = expander(client).expand_with_outcome("Loan").await;
    assert!(
        matches!(outcome, LookupOutcome::Failed(ref msg) if msg.contains("500")),
        "unexpected outcome: {outcome:?}"
    );
    assert_eq!(set.sorted(), vec!["loan"]);
}

#[tokio::test]
async fn datamuse_lookup_reports_http_status() {
    let base_url = serve_once("503 Service Unavailable", "").await;
    let client = local_client(&base_url);

    let err = client.lookup("loan").await.unwrap_err();
    assert!(format!("{err:#}").contains("503"));
}

#[tokio::test]
async fn datamuse_success_expands_from_response() {
    let base_url = serve_once(
        "200 OK",
        r#"[{"word":"credit","score":1520},{"word":"Advance","score":980}]"#,
    )
    .await;
    let client = local_client(&base_url);

    let (set, outcome) = expander(client).expand_with_outcome("loan").await;
    assert_eq!(outcome, LookupOutcome::Found(1));
    assert_eq!(set.sorted(), vec!["advance", "credit", "loan"]);
}

#[tokio::test]
async fn datamuse_empty_response_is_unknown() {
    let base_url = serve_once("200 OK", "[]").await;
    let client = local_client(&base_url);

    let (set, outcome) = expander(client).expand_with_outcome("zzyzx").await;
    assert_eq!(outcome, LookupOutcome::Unknown);
    assert_eq!(set.sorted(), vec!["zzyzx"]);
}
