use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Presentation case applied when a token is drawn. Tokens themselves are never rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayCase {
    #[default]
    AsWritten,
    Upper,
}

impl DisplayCase {
    pub fn toggled(self) -> Self {
        match self {
            DisplayCase::AsWritten => DisplayCase::Upper,
            DisplayCase::Upper => DisplayCase::AsWritten,
        }
    }
}

/// A single word for RSVP display.
///
/// Always non-empty: the only constructor refuses empty text.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Token(String);

impl Token {
    /// Returns `None` for empty text.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn display(&self, case: DisplayCase) -> Cow<'_, str> {
        match case {
            DisplayCase::AsWritten => Cow::Borrowed(&self.0),
            DisplayCase::Upper => Cow::Owned(self.0.to_uppercase()),
        }
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_rejects_empty_text() {
        assert!(Token::new("").is_none());
        assert!(Token::new(String::new()).is_none());
    }

    #[test]
    fn test_token_keeps_text_verbatim() {
        let token = Token::new("Hello,").unwrap();
        assert_eq!(token.as_str(), "Hello,");
        assert_eq!(token.to_string(), "Hello,");
    }

    #[test]
    fn test_display_upper_does_not_mutate_token() {
        let token = Token::new("quick").unwrap();
        assert_eq!(token.display(DisplayCase::Upper), "QUICK");
        assert_eq!(token.display(DisplayCase::AsWritten), "quick");
        assert_eq!(token.as_str(), "quick");
    }

    #[test]
    fn test_display_case_toggle() {
        assert_eq!(DisplayCase::AsWritten.toggled(), DisplayCase::Upper);
        assert_eq!(DisplayCase::Upper.toggled(), DisplayCase::AsWritten);
    }
}
