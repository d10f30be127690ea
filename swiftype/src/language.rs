//! Supported practice languages, and the channel announcing a change of language.

use std::sync::mpsc;

use strum::{Display, EnumString};

/// Writing direction of a language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    pub direction: Direction,
}

pub const LANGUAGES: &[Language] = &[
    Language {
        code: "en",
        name: "English",
        native_name: "English",
        direction: Direction::Ltr,
    },
    Language {
        code: "ar",
        name: "Arabic",
        native_name: "العربية",
        direction: Direction::Rtl,
    },
    Language {
        code: "fr",
        name: "French",
        native_name: "Français",
        direction: Direction::Ltr,
    },
    Language {
        code: "es",
        name: "Spanish",
        native_name: "Español",
        direction: Direction::Ltr,
    },
    Language {
        code: "de",
        name: "German",
        native_name: "Deutsch",
        direction: Direction::Ltr,
    },
    Language {
        code: "ja",
        name: "Japanese",
        native_name: "日本語",
        direction: Direction::Ltr,
    },
];

/// Look up a supported language by code
pub fn find(code: &str) -> Option<&'static Language> {
    LANGUAGES
        .iter()
        .find(|language| language.code.eq_ignore_ascii_case(code))
}

/// Look up a language, falling back to the first supported one
pub fn resolve(code: &str) -> &'static Language {
    find(code).unwrap_or(&LANGUAGES[0])
}

/// The language after `code` in the catalog, wrapping around
pub fn next(code: &str) -> &'static Language {
    let index = LANGUAGES
        .iter()
        .position(|language| language.code == resolve(code).code)
        .unwrap_or_default();
    &LANGUAGES[(index + 1) % LANGUAGES.len()]
}

/// Notification that the selected language changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageChange {
    pub previous: &'static Language,
    pub current: &'static Language,
}

/// Publish/subscribe channel for [`LanguageChange`]s
///
/// Every subscriber gets its own receiver. Subscribers that dropped their receiver are
/// pruned on the next publish.
#[derive(Debug, Default)]
pub struct LanguageBus {
    subscribers: Vec<mpsc::Sender<LanguageChange>>,
}

impl LanguageBus {
    pub fn subscribe(&mut self) -> mpsc::Receiver<LanguageChange> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Send `change` to every live subscriber, returning how many received it
    pub fn publish(&mut self, change: &LanguageChange) -> usize {
        self.subscribers
            .retain(|subscriber| subscriber.send(change.clone()).is_ok());
        tracing::debug!(
            from = change.previous.code,
            to = change.current.code,
            subscribers = self.subscribers.len(),
            "language changed"
        );
        self.subscribers.len()
    }
}
