//! # Text Module - Reference Text and Where It Comes From
//!
//! A [`ReferenceText`] is the fixed passage a user is asked to reproduce. It is
//! stored as a sequence of Unicode scalar values so that every comparison is a plain
//! index-by-index equality check. There is no reordering or shaping: right-to-left
//! scripts are compared in logical (storage) order, exactly as they are typed.
//!
//! Every metric divides by a length, so an empty reference text cannot be constructed.
//!
//! ```rust
//! use cadence::{ReferenceText, SessionError};
//!
//! let text = ReferenceText::new("café 🚀").unwrap();
//! assert_eq!(text.len(), 6);
//!
//! assert!(matches!(ReferenceText::new(""), Err(SessionError::MissingText)));
//! ```

use crate::error::SessionError;

/// Immutable reference text for a single attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceText {
    characters: Vec<char>,
}

impl ReferenceText {
    /// Create a reference text, rejecting empty content
    pub fn new(content: impl AsRef<str>) -> Result<Self, SessionError> {
        let characters: Vec<char> = content.as_ref().chars().collect();
        if characters.is_empty() {
            return Err(SessionError::MissingText);
        }

        Ok(Self { characters })
    }

    /// Number of characters in the text
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Character at `index`, if within the text
    pub fn get(&self, index: usize) -> Option<char> {
        self.characters.get(index).copied()
    }

    /// All characters of the text
    pub fn characters(&self) -> &[char] {
        &self.characters
    }

    /// The text as an owned string
    pub fn content(&self) -> String {
        self.characters.iter().collect()
    }
}

impl TryFrom<String> for ReferenceText {
    type Error = SessionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ReferenceText {
    type Error = SessionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Supplies reference texts for a language
///
/// Implementations may return `None` (or an empty string) when they have nothing to
/// offer; the session then refuses to start instead of running against an empty text.
pub trait TextProvider {
    /// A random passage for the given language code
    fn random_text(&mut self, language: &str) -> Option<String>;

    /// Fetch a passage and validate it as a [`ReferenceText`]
    fn reference_text(&mut self, language: &str) -> Result<ReferenceText, SessionError> {
        self.random_text(language)
            .ok_or(SessionError::MissingText)
            .and_then(ReferenceText::new)
    }
}

impl<F> TextProvider for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn random_text(&mut self, language: &str) -> Option<String> {
        self(language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_text_counts_characters() {
        let text = ReferenceText::new("hello").unwrap();
        assert_eq!(text.len(), 5);
        assert!(!text.is_empty());
        assert_eq!(text.get(1), Some('e'));
        assert_eq!(text.get(5), None);
        assert_eq!(text.content(), "hello");

        // Multi-byte characters count once each
        let text = ReferenceText::new("مرحبا").unwrap();
        assert_eq!(text.len(), 5);
        assert_eq!(text.get(0), Some('م'));
    }

    #[test]
    fn test_reference_text_rejects_empty() {
        assert!(matches!(
            ReferenceText::new(""),
            Err(SessionError::MissingText)
        ));
        assert!(ReferenceText::try_from(String::new()).is_err());
        // Whitespace is still content
        assert_eq!(ReferenceText::try_from(" ").unwrap().len(), 1);
    }

    #[test]
    fn test_closure_provider() {
        let mut provider = |language: &str| match language {
            "en" => Some("the quick fox".to_string()),
            "xx" => Some(String::new()),
            _ => None,
        };

        assert_eq!(provider.reference_text("en").unwrap().len(), 13);
        assert!(matches!(
            provider.reference_text("xx"),
            Err(SessionError::MissingText)
        ));
        assert!(matches!(
            provider.reference_text("de"),
            Err(SessionError::MissingText)
        ));
    }
}
