//! Whitespace normalization
//!
//! Every maximal run of whitespace becomes a single space and the ends are
//! trimmed. Matching always runs on normalized text, which is what makes
//! translation insensitive to how a declaration was laid out.

use std::fmt;

/// Source text that has been through [`normalize`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NormalizedSource(String);

impl NormalizedSource {
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for NormalizedSource {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Collapse whitespace runs to one space and trim both ends
pub fn normalize(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for word in source.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
