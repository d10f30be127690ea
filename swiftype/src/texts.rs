use std::collections::HashMap;

use cadence::TextProvider;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::{Rng, thread_rng};
use thiserror::Error;

use crate::language;

const BUILTIN: &str = include_str!("../texts/builtin.toml");

#[derive(Debug, Error)]
pub enum TextsError {
    #[error("Failed to parse built-in texts: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Practice passages shipped with the binary
///
/// Unknown language codes fall back to the English passages.
#[derive(Debug)]
pub struct BuiltinTexts<R: Rng = ThreadRng> {
    texts: HashMap<String, Vec<String>>,
    rng: R,
}

impl BuiltinTexts {
    pub fn load() -> Result<Self, TextsError> {
        Self::with_rng(thread_rng())
    }
}

impl<R: Rng> BuiltinTexts<R> {
    /// Load the passages, choosing among them with `rng`
    pub fn with_rng(rng: R) -> Result<Self, TextsError> {
        let texts = toml::from_str(BUILTIN)?;
        Ok(Self { texts, rng })
    }
}

/// Every passage for `language`
fn passages<'a>(texts: &'a HashMap<String, Vec<String>>, language: &str) -> &'a [String] {
    texts
        .get(language)
        .or_else(|| texts.get(language::LANGUAGES[0].code))
        .map(Vec::as_slice)
        .unwrap_or_default()
}

impl<R: Rng> TextProvider for BuiltinTexts<R> {
    fn random_text(&mut self, language: &str) -> Option<String> {
        passages(&self.texts, language)
            .choose(&mut self.rng)
            .cloned()
    }
}
