//! # Key Module - Raw Key Tokens
//!
//! Hosts deliver keystrokes as raw tokens: either a single character (`"a"`, `" "`,
//! `"ä"`) or the name of a special key (`"Backspace"`, `"Shift"`, `"CapsLock"`).
//! This module turns those tokens into a [`Key`] the session can act on.
//!
//! | Token                         | Key                   | Effect on a session     |
//! |-------------------------------|-----------------------|-------------------------|
//! | one printable character       | [`Key::Char`]         | appended to the input   |
//! | `Backspace`                   | [`Key::Backspace`]    | removes the last char   |
//! | `Shift`, `Ctrl`, `Enter`, ... | [`Key::Modifier`]     | none                    |
//! | anything else                 | [`Key::Unrecognized`] | none                    |
//!
//! Special key names are matched case-insensitively.

use std::str::FromStr;

use strum::{Display, EnumString};

/// Non-printing keys that never change a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Modifier {
    Shift,
    #[strum(serialize = "Control", serialize = "Ctrl")]
    Control,
    #[strum(serialize = "Alt", serialize = "AltGraph", serialize = "Option")]
    Alt,
    #[strum(serialize = "Meta", serialize = "Super", serialize = "OS", serialize = "Command")]
    Meta,
    Tab,
    #[strum(serialize = "CapsLock", serialize = "Caps-Lock", serialize = "Caps")]
    CapsLock,
    #[strum(serialize = "Enter", serialize = "Return")]
    Enter,
    #[strum(serialize = "Escape", serialize = "Esc")]
    Escape,
}

/// A classified keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character to append to the input, including space
    Char(char),
    /// Remove the last typed character
    Backspace,
    /// A known non-printing key
    Modifier(Modifier),
    /// A token the engine does not know
    Unrecognized,
}

impl Key {
    /// Classify a raw key token
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cadence::{Key, Modifier};
    ///
    /// assert_eq!(Key::parse("a"), Key::Char('a'));
    /// assert_eq!(Key::parse(" "), Key::Char(' '));
    /// assert_eq!(Key::parse("Backspace"), Key::Backspace);
    /// assert_eq!(Key::parse("Ctrl"), Key::Modifier(Modifier::Control));
    /// assert_eq!(Key::parse("ArrowLeft"), Key::Unrecognized);
    /// ```
    pub fn parse(token: &str) -> Self {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(char), None) => Self::from(char),
            (Some(_), Some(_)) if token.eq_ignore_ascii_case("backspace") => Self::Backspace,
            (Some(_), Some(_)) => Modifier::from_str(token)
                .map(Self::Modifier)
                .unwrap_or(Self::Unrecognized),
            (None, _) => Self::Unrecognized,
        }
    }

    /// Returns true if the key can change a session's input
    pub const fn is_mutation(&self) -> bool {
        matches!(self, Self::Char(_) | Self::Backspace)
    }
}

impl From<char> for Key {
    /// Control characters are mapped onto the key that produces them, so a raw
    /// `'\t'` behaves like the `Tab` token rather than being typed.
    fn from(char: char) -> Self {
        match char {
            '\t' => Self::Modifier(Modifier::Tab),
            '\n' | '\r' => Self::Modifier(Modifier::Enter),
            '\u{1b}' => Self::Modifier(Modifier::Escape),
            '\u{8}' | '\u{7f}' => Self::Backspace,
            c if c.is_control() => Self::Unrecognized,
            c => Self::Char(c),
        }
    }
}

impl From<&str> for Key {
    fn from(token: &str) -> Self {
        Self::parse(token)
    }
}

impl From<Modifier> for Key {
    fn from(modifier: Modifier) -> Self {
        Self::Modifier(modifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_characters() {
        assert_eq!(Key::parse("x"), Key::Char('x'));
        assert_eq!(Key::parse(" "), Key::Char(' '));
        assert_eq!(Key::parse("é"), Key::Char('é'));
        assert_eq!(Key::parse("ب"), Key::Char('ب'));
        assert_eq!(Key::parse("の"), Key::Char('の'));
    }

    #[test]
    fn test_parse_modifiers() {
        for (token, modifier) in [
            ("Shift", Modifier::Shift),
            ("Ctrl", Modifier::Control),
            ("control", Modifier::Control),
            ("Alt", Modifier::Alt),
            ("Tab", Modifier::Tab),
            ("CapsLock", Modifier::CapsLock),
            ("caps-lock", Modifier::CapsLock),
            ("Enter", Modifier::Enter),
            ("Escape", Modifier::Escape),
            ("Meta", Modifier::Meta),
        ] {
            assert_eq!(Key::parse(token), Key::Modifier(modifier), "token {token}");
        }
    }

    #[test]
    fn test_parse_backspace_and_unknown() {
        assert_eq!(Key::parse("Backspace"), Key::Backspace);
        assert_eq!(Key::parse("BACKSPACE"), Key::Backspace);
        assert_eq!(Key::parse("ArrowUp"), Key::Unrecognized);
        assert_eq!(Key::parse("F5"), Key::Unrecognized);
        assert_eq!(Key::parse(""), Key::Unrecognized);
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(Key::from('\t'), Key::Modifier(Modifier::Tab));
        assert_eq!(Key::from('\n'), Key::Modifier(Modifier::Enter));
        assert_eq!(Key::from('\u{7f}'), Key::Backspace);
        assert_eq!(Key::from('\u{0}'), Key::Unrecognized);
        assert!(!Key::from('\u{1b}').is_mutation());
        assert!(Key::from('q').is_mutation());
    }
}
