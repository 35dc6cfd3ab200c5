// Unit tests for text preprocessing and input parsing.
//
// Tests the preprocessor contract (lowercasing, word-run tokenization,
// alphanumeric filter, stopword removal, order preservation) and the input
// document parsers' failure modes.

use sectormatch::sources::descriptions::parse_descriptions;
use sectormatch::sources::keywords::parse_keywords;
use sectormatch::sources::Keyword;
use sectormatch::text::preprocess::Preprocessor;
use sectormatch::text::stopwords::StopwordSet;

fn builtin() -> Preprocessor {
    Preprocessor::new(StopwordSet::builtin()).unwrap()
}

// ============================================================
// Preprocessor
// ============================================================

#[test]
fn preprocess_is_case_insensitive() {
    assert_eq!(builtin().preprocess("Bank BANK bank"), vec!["bank", "bank", "bank"]);
}

#[test]
fn preprocess_is_deterministic() {
    let pp = builtin();
    let text = "Insurers underwrite risk; reinsurers underwrite insurers' risk.";
    assert_eq!(pp.preprocess(text), pp.preprocess(text));
}

#[test]
fn preprocess_keeps_order_and_repeats() {
    assert_eq!(
        builtin().preprocess("Solar, wind & solar storage"),
        vec!["solar", "wind", "solar", "storage"]
    );
}

#[test]
fn preprocess_splits_on_apostrophes_and_hyphens() {
    assert_eq!(
        builtin().preprocess("insurers' long-term reinsurance"),
        vec!["insurers", "long", "term", "reinsurance"]
    );
}

#[test]
fn preprocess_custom_stopwords() {
    let pp = Preprocessor::new(StopwordSet::from_words(["offer"])).unwrap();
    assert_eq!(pp.preprocess("Banks offer the loans"), vec!["banks", "the", "loans"]);
}

#[test]
fn preprocess_no_stopwords_keeps_everything_alphanumeric() {
    let pp = Preprocessor::new(StopwordSet::from_words(Vec::<String>::new())).unwrap();
    assert_eq!(pp.preprocess("A and B"), vec!["a", "and", "b"]);
}

#[test]
fn preprocess_iso_list_is_stricter_than_builtin() {
    let iso = Preprocessor::new(StopwordSet::iso()).unwrap();
    let text = "the and of for";
    assert!(iso.preprocess(text).is_empty());
    assert!(StopwordSet::iso().len() > StopwordSet::builtin().len());
}

// ============================================================
// Input documents
// ============================================================

#[test]
fn descriptions_keep_key_order() {
    let raw = r#"{"Utilities": "power", "Banking": "loans", "Agriculture": "crops"}"#;
    let sectors: Vec<String> = parse_descriptions(raw)
        .unwrap()
        .into_iter()
        .map(|d| d.sector)
        .collect();
    assert_eq!(sectors, vec!["Utilities", "Banking", "Agriculture"]);
}

#[test]
fn descriptions_invalid_json_is_error() {
    assert!(parse_descriptions("{not json").is_err());
}

#[test]
fn keywords_ignore_extra_fields() {
    let raw = r#"[{"id": 1, "word": "loan", "tags": ["x"]}]"#;
    assert_eq!(parse_keywords(raw).unwrap(), vec![Keyword::new("loan")]);
}

#[test]
fn keywords_missing_word_fails_fast() {
    let raw = r#"[{"word": "loan"}, {"word": "bank"}, {"label": "credit"}]"#;
    let msg = format!("{:#}", parse_keywords(raw).unwrap_err());
    assert!(msg.contains("#2"), "error should name the entry: {msg}");
}

#[test]
fn keywords_empty_array_is_valid() {
    assert!(parse_keywords("[]").unwrap().is_empty());
}
