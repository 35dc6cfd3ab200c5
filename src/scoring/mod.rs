// Keyword scoring: per-sector occurrence counts of keywords and synonyms.

pub mod corpus;
pub mod engine;
