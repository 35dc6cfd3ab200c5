// Text preprocessing: tokenization and stopword filtering.

pub mod preprocess;
pub mod stopwords;
