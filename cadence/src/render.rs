//! Per-character view of a session, for hosts that draw the text.
//!
//! Walks every position that is either part of the reference text or has been typed,
//! so overflow characters past the end of the text are visited too.

use crate::clock::Clock;
use crate::metrics::CharacterVerdict;
use crate::record::ResultStore;
use crate::session::TypingSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderingContext {
    pub index: usize,
    /// Reference character at this position, `None` for overflow
    pub expected: Option<char>,
    /// Typed character at this position, `None` if not typed yet
    pub typed: Option<char>,
    /// `None` until the position is typed
    pub verdict: Option<CharacterVerdict>,
    pub has_cursor: bool,
}

impl RenderingContext {
    /// The character a host should draw: what was typed, else what is expected
    pub fn display_char(&self) -> Option<char> {
        self.typed.or(self.expected)
    }
}

/// Iterator for rendering contexts
pub struct RenderingIterator<'a, C: Clock, S: ResultStore> {
    typing_session: &'a TypingSession<C, S>,
    index: usize,
    len: usize,
}

impl<'a, C: Clock, S: ResultStore> From<&'a TypingSession<C, S>> for RenderingIterator<'a, C, S> {
    fn from(value: &'a TypingSession<C, S>) -> Self {
        Self {
            len: value.text_len().max(value.input_len()),
            index: 0,
            typing_session: value,
        }
    }
}

impl<C: Clock, S: ResultStore> ExactSizeIterator for RenderingIterator<'_, C, S> {}

impl<C: Clock, S: ResultStore> std::iter::FusedIterator for RenderingIterator<'_, C, S> {}

impl<C: Clock, S: ResultStore> Iterator for RenderingIterator<'_, C, S> {
    type Item = RenderingContext;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }

        let reference = self.typing_session.reference();
        let typed = self.typing_session.typed().get(self.index);
        let verdict = typed
            .map(|typed| CharacterVerdict::classify(reference.characters(), self.index, typed));

        let context = RenderingContext {
            index: self.index,
            expected: reference.get(self.index),
            typed,
            verdict,
            has_cursor: self.index == self.typing_session.input_len(),
        };

        self.index += 1;
        Some(context)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len.saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<C: Clock, S: ResultStore> TypingSession<C, S> {
    /// Iterate over every drawable position of the current attempt
    pub fn render_iter(&self) -> RenderingIterator<'_, C, S> {
        RenderingIterator::from(self)
    }
}
