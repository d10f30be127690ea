//! # Input Module - The Typed Characters
//!
//! The [`InputBuffer`] holds everything typed so far in the current attempt. It only
//! ever grows by one character (a keystroke) or shrinks by one (a backspace).
//!
//! The buffer does not know the reference text. In normal flow a session finishes as
//! soon as the input reaches the reference length, but the buffer itself accepts any
//! length so that the metrics can degrade gracefully (trailing characters are counted
//! as overflow errors) if a host ever drives it past the end.

/// Characters typed during a single attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    input: Vec<char>,
}

impl InputBuffer {
    /// Create an empty input buffer
    pub const fn new() -> Self {
        Self { input: vec![] }
    }

    /// Check if no characters have been typed yet
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Get the number of characters typed so far
    pub fn len(&self) -> usize {
        self.input.len()
    }

    /// Append a typed character, returning the index it was written to
    pub fn push(&mut self, char: char) -> usize {
        self.input.push(char);
        self.input.len() - 1
    }

    /// Remove the last typed character, if any
    pub fn pop(&mut self) -> Option<char> {
        self.input.pop()
    }

    /// Character typed at `index`
    pub fn get(&self, index: usize) -> Option<char> {
        self.input.get(index).copied()
    }

    /// All typed characters
    pub fn characters(&self) -> &[char] {
        &self.input
    }

    /// The typed characters as a string
    pub fn as_string(&self) -> String {
        self.input.iter().collect()
    }

    /// Check if the input has reached (or passed) the given text length
    pub fn is_fully_typed(&self, text_len: usize) -> bool {
        self.input.len() >= text_len
    }
}

impl FromIterator<char> for InputBuffer {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self {
            input: iter.into_iter().collect(),
        }
    }
}

impl From<&str> for InputBuffer {
    fn from(value: &str) -> Self {
        value.chars().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_buffer_basic() {
        let mut input = InputBuffer::new();
        assert!(input.is_empty());

        assert_eq!(input.push('a'), 0);
        assert_eq!(input.push('b'), 1);
        assert_eq!(input.len(), 2);
        assert_eq!(input.get(1), Some('b'));
        assert_eq!(input.as_string(), "ab");

        assert_eq!(input.pop(), Some('b'));
        assert_eq!(input.pop(), Some('a'));
        assert_eq!(input.pop(), None);
        assert!(input.is_empty());
    }

    #[test]
    fn test_input_buffer_fully_typed() {
        let input = InputBuffer::from("cat");
        assert!(!input.is_fully_typed(4));
        assert!(input.is_fully_typed(3));
        // Overflow still counts as fully typed
        assert!(input.is_fully_typed(2));
    }
}
