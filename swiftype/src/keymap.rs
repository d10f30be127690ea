use cadence::{Key, Modifier};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

/// A trait defining helper methods for keyevents
pub trait KeyEventHelper {
    /// Returns true if the keyevent contains a pressed key
    fn is_press(&self) -> bool;

    /// Returns true if the keyevent contains the given modifiers
    fn has_mods(&self, mods: KeyModifiers) -> bool;
}

impl KeyEventHelper for KeyEvent {
    fn is_press(&self) -> bool {
        self.kind == KeyEventKind::Press
    }

    fn has_mods(&self, mods: KeyModifiers) -> bool {
        self.modifiers.contains(mods)
    }
}

/// What a key press means during practice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Forward to the typing session
    Type(Key),
    Finish,
    Restart,
    NextLanguage,
    RetrySave,
    Quit,
    /// Key releases and repeats of commands
    Nothing,
}

impl From<&KeyEvent> for Action {
    fn from(key: &KeyEvent) -> Self {
        if !key.is_press() {
            return Self::Nothing;
        }

        // AltGr arrives as CONTROL | ALT on Windows and types a character
        if key.has_mods(KeyModifiers::CONTROL) && !key.has_mods(KeyModifiers::ALT) {
            return match key.code {
                KeyCode::Char('f') => Self::Finish,
                KeyCode::Char('r') => Self::Restart,
                KeyCode::Char('l') => Self::NextLanguage,
                KeyCode::Char('s') => Self::RetrySave,
                KeyCode::Char('c' | 'q') => Self::Quit,
                _ => Self::Type(Key::Modifier(Modifier::Control)),
            };
        }

        match key.code {
            KeyCode::Esc => Self::Quit,
            code => Self::Type(key_from_code(code)),
        }
    }
}

/// Translate a terminal key code into an engine key
pub fn key_from_code(code: KeyCode) -> Key {
    match code {
        KeyCode::Char(character) => Key::Char(character),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Modifier(Modifier::Enter),
        KeyCode::Tab | KeyCode::BackTab => Key::Modifier(Modifier::Tab),
        KeyCode::Esc => Key::Modifier(Modifier::Escape),
        KeyCode::CapsLock => Key::Modifier(Modifier::CapsLock),
        KeyCode::Modifier(modifier) => match modifier {
            ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => {
                Key::Modifier(Modifier::Shift)
            }
            ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => {
                Key::Modifier(Modifier::Control)
            }
            ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => Key::Modifier(Modifier::Alt),
            ModifierKeyCode::LeftMeta
            | ModifierKeyCode::RightMeta
            | ModifierKeyCode::LeftSuper
            | ModifierKeyCode::RightSuper => Key::Modifier(Modifier::Meta),
            _ => Key::Unrecognized,
        },
        _ => Key::Unrecognized,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_printable_keys_type() {
        let key = press(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(Action::from(&key), Action::Type(Key::Char('a')));

        let key = press(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(Action::from(&key), Action::Type(Key::Char('A')));

        let key = press(KeyCode::Char('ب'), KeyModifiers::NONE);
        assert_eq!(Action::from(&key), Action::Type(Key::Char('ب')));
    }

    #[test]
    fn test_commands() {
        let ctrl = KeyModifiers::CONTROL;
        assert_eq!(Action::from(&press(KeyCode::Char('f'), ctrl)), Action::Finish);
        assert_eq!(Action::from(&press(KeyCode::Char('r'), ctrl)), Action::Restart);
        assert_eq!(Action::from(&press(KeyCode::Char('l'), ctrl)), Action::NextLanguage);
        assert_eq!(Action::from(&press(KeyCode::Char('s'), ctrl)), Action::RetrySave);
        assert_eq!(Action::from(&press(KeyCode::Char('q'), ctrl)), Action::Quit);
        assert_eq!(Action::from(&press(KeyCode::Esc, KeyModifiers::NONE)), Action::Quit);
        assert_eq!(
            Action::from(&press(KeyCode::Char('x'), ctrl)),
            Action::Type(Key::Modifier(Modifier::Control))
        );
    }

    #[test]
    fn test_alt_gr_characters_type() {
        let alt_gr = KeyModifiers::CONTROL | KeyModifiers::ALT;
        for character in ['@', '{', '\\', 'q'] {
            let key = press(KeyCode::Char(character), alt_gr);
            assert_eq!(Action::from(&key), Action::Type(Key::Char(character)));
        }
    }

    #[test]
    fn test_releases_do_nothing() {
        let key = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(Action::from(&key), Action::Nothing);
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(key_from_code(KeyCode::Backspace), Key::Backspace);
        assert_eq!(key_from_code(KeyCode::Enter), Key::Modifier(Modifier::Enter));
        assert_eq!(key_from_code(KeyCode::Left), Key::Unrecognized);
        assert_eq!(
            key_from_code(KeyCode::Modifier(ModifierKeyCode::LeftShift)),
            Key::Modifier(Modifier::Shift)
        );
    }
}
