// sectormatch: keyword and synonym scoring of sector descriptions
//
// This is the library root. Each module corresponds to one stage of the
// pipeline: load inputs, preprocess text, expand keywords through a lexical
// knowledge base, count matches, assemble the report.

pub mod config;
pub mod lexicon;
pub mod output;
pub mod scoring;
pub mod sources;
pub mod text;
