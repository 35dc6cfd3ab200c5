// Input documents: sector descriptions and the keyword vocabulary.
//
// Both documents are loaded once per run and treated as read-only. Any
// failure to read or parse them aborts the run before scoring starts.

pub mod descriptions;
pub mod keywords;

/// A sector and the free text that describes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub sector: String,
    pub text: String,
}

impl Description {
    pub fn new(sector: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sector: sector.into(),
            text: text.into(),
        }
    }
}

/// A single word to detect in descriptions, as written in the keyword document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keyword(pub String);

impl Keyword {
    pub fn new(word: impl Into<String>) -> Self {
        Self(word.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
