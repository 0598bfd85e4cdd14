//! The `;`-delimited metadata line carried in the replay header.
//!
//! Each token is either `key:value` (split at the first `:`) or a bare
//! word such as a mod flag `m_chaos`. Token order is kept as read.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

const TOKEN_SEPARATOR: char = ';';
const KEY_SEPARATOR: char = ':';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    KeyValue { key: String, value: String },
    Bare(String),
}

impl Token {
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(KEY_SEPARATOR) {
            Some((key, value)) => Self::KeyValue {
                key: key.to_string(),
                value: value.to_string(),
            },
            None => Self::Bare(raw.to_string()),
        }
    }

    pub fn key_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::KeyValue {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn bare(text: impl Into<String>) -> Self {
        Self::Bare(text.into())
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Self::KeyValue { key, .. } => Some(key),
            Self::Bare(_) => None,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Self::KeyValue { value, .. } => Some(value),
            Self::Bare(_) => None,
        }
    }

    /// Whether the token's textual form begins with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        match self {
            Self::Bare(text) => text.starts_with(prefix),
            Self::KeyValue { key, value } => {
                if prefix.len() <= key.len() {
                    return key.starts_with(prefix);
                }
                match prefix.strip_prefix(key.as_str()) {
                    Some(rest) => match rest.strip_prefix(KEY_SEPARATOR) {
                        Some(rest) => value.starts_with(rest),
                        None => false,
                    },
                    None => false,
                }
            }
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyValue { key, value } => write!(f, "{key}{KEY_SEPARATOR}{value}"),
            Self::Bare(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataString {
    tokens: Vec<Token>,
}

impl MetadataString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never fails: empty segments are dropped, anything else becomes a
    /// token.
    pub fn parse(raw: &str) -> Self {
        let tokens = raw
            .split(TOKEN_SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .map(Token::parse)
            .collect();
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Value of the first `key:value` token with this key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tokens
            .iter()
            .find(|token| token.key() == Some(key))
            .and_then(Token::value)
    }

    /// The first matching value parsed as a float, or `default` when the
    /// key is absent or its value does not parse.
    pub fn get_float(&self, key: &str, default: f64) -> f64 {
        self.get(key)
            .and_then(|value| value.trim().parse::<f64>().ok())
            .unwrap_or(default)
    }

    pub fn remove_prefixed(&mut self, prefix: &str) -> Vec<Token> {
        self.extract(|token| token.starts_with(prefix))
    }

    pub fn remove_key(&mut self, key: &str) -> Vec<Token> {
        self.extract(|token| token.key() == Some(key))
    }

    pub fn append(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn serialize(&self) -> String {
        self.to_string()
    }

    fn extract(&mut self, mut matches: impl FnMut(&Token) -> bool) -> Vec<Token> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.tokens.len());
        for token in self.tokens.drain(..) {
            if matches(&token) {
                removed.push(token);
            } else {
                kept.push(token);
            }
        }
        self.tokens = kept;
        removed
    }
}

impl fmt::Display for MetadataString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, token) in self.tokens.iter().enumerate() {
            if index > 0 {
                write!(f, "{TOKEN_SEPARATOR}")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

impl FromStr for MetadataString {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<'a> IntoIterator for &'a MetadataString {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Token;

    #[test]
    fn key_value_prefix_spans_separator() {
        let token = Token::parse("s:++");
        assert!(token.starts_with("s:"));
        assert!(token.starts_with("s:+"));
        assert!(token.starts_with("s"));
        assert!(!token.starts_with("s:-"));
        assert!(!token.starts_with("sx"));
    }

    #[test]
    fn bare_prefix_matches_text() {
        let token = Token::parse("m_chaos");
        assert!(token.starts_with("m_"));
        assert!(!token.starts_with("s:"));
    }

    #[test]
    fn only_first_colon_splits() {
        let token = Token::parse("a:b:c");
        assert_eq!(token.key(), Some("a"));
        assert_eq!(token.value(), Some("b:c"));
        assert_eq!(token.to_string(), "a:b:c");
    }
}
