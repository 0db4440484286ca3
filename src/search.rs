//! Tokenized, case-insensitive search used to filter reconciliation entries.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TOKEN_SEPARATOR: Regex =
        Regex::new("[ \t\u{00A0}\u{1680}\u{2000}-\u{200A}\u{202F}\u{205F}\u{3000}]+").unwrap();
}

/// A parsed search query.
///
/// A query wrapped in double quotes is one literal token; otherwise the query
/// is split on spaces, tabs and the Unicode space separators. An input matches
/// when it contains any token, ignoring case. A query without tokens matches
/// everything.
///
/// ```rust
/// use xliff_bridge::search::SearchQuery;
///
/// let query = SearchQuery::new("hello WORLD");
/// assert!(query.matches("Hello there"));
/// assert!(!SearchQuery::new("\"hello world\"").matches("hello there world"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    query: String,
    tokens: Vec<String>,
}

impl SearchQuery {
    pub fn new(query: &str) -> Self {
        let query = query.trim();
        Self {
            query: query.to_string(),
            tokens: tokenize(query),
        }
    }

    /// Replaces the query; tokens are only rebuilt when it changed.
    pub fn set(&mut self, query: &str) {
        if self.query != query.trim() {
            *self = Self::new(query);
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn matches(&self, input: &str) -> bool {
        if self.tokens.is_empty() {
            return true;
        }
        let input = input.to_lowercase();
        self.tokens.iter().any(|token| input.contains(token.as_str()))
    }

    /// Whether any of `inputs` matches.
    pub fn matches_any<'a>(&self, inputs: impl IntoIterator<Item = &'a str>) -> bool {
        self.tokens.is_empty() || inputs.into_iter().any(|input| self.matches(input))
    }
}

/// Splits a query into lowercase tokens.
pub fn tokenize(query: &str) -> Vec<String> {
    if query.len() > 1 && query.starts_with('"') && query.ends_with('"') {
        return vec![query[1..query.len() - 1].to_lowercase()];
    }
    TOKEN_SEPARATOR
        .split(query)
        .filter(|token| !token.trim().is_empty())
        .map(str::to_lowercase)
        .collect()
}
