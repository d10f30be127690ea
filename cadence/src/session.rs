//! # Session Module - The Typing-Test State Machine
//!
//! This module provides [`TypingSession`], the single stateful component of the engine.
//! A session owns one reference text and the input typed against it, recomputes the
//! metrics after every change, and finishes exactly once.
//!
//! ## States
//!
//! | State      | Meaning                                  | Clock   |
//! |------------|------------------------------------------|---------|
//! | `Idle`     | nothing typed yet                        | stopped |
//! | `Active`   | typing in progress                       | running |
//! | `Finished` | terminal, metrics frozen, result emitted | stopped |
//!
//! ## Transitions
//!
//! - **Idle → Active** on the first appended character. Backspace and modifiers never
//!   start a session.
//! - **Active → Finished** as soon as the input is at least as long as the reference
//!   text, or when [`TypingSession::finish`] is called with enough input typed
//!   ([`Configuration::min_finish_chars`]).
//! - **Finished** ignores all keys. [`TypingSession::restart`] begins a fresh attempt in
//!   `Idle` with a new text.
//!
//! ## Usage Examples
//!
//! ### Automatic completion
//!
//! ```rust
//! use cadence::{Change, ManualClock, MemoryStore, ReferenceText, SessionState, TypingSession};
//!
//! let text = ReferenceText::new("cxt").unwrap();
//! let mut session = TypingSession::new(text, ManualClock::default(), MemoryStore::default());
//!
//! session.input("Shift").unwrap(); // ignored
//! assert_eq!(session.state(), SessionState::Idle);
//!
//! session.input('c').unwrap();
//! assert_eq!(session.state(), SessionState::Active);
//!
//! session.tick(); // one second passes
//! session.input('x').unwrap();
//!
//! let change = session.input('t').unwrap();
//! assert!(matches!(change, Change::Completed(_)));
//! assert_eq!(session.result().unwrap().elapsed_seconds, 1);
//! ```
//!
//! ### Manual finish
//!
//! ```rust
//! use cadence::{Configuration, Finish, FinishRejection, ManualClock, MemoryStore, ReferenceText, TypingSession};
//!
//! let text = ReferenceText::new("a fairly long passage of text").unwrap();
//! let mut session = TypingSession::new(text, ManualClock::default(), MemoryStore::default())
//!     .with_configuration(Configuration { min_finish_chars: 3 });
//!
//! session.input('a').unwrap();
//! assert!(matches!(
//!     session.finish().unwrap(),
//!     Finish::Rejected(FinishRejection::BelowThreshold { typed: 1, required: 3 })
//! ));
//!
//! session.input(' ').unwrap();
//! session.input('f').unwrap();
//! assert!(matches!(session.finish().unwrap(), Finish::Completed(_)));
//! ```

use strum::Display;
use tracing::{debug, info, trace, warn};

use crate::clock::{Clock, ManualClock};
use crate::config::Configuration;
use crate::error::SessionError;
use crate::input::InputBuffer;
use crate::key::Key;
use crate::metrics::{self, CharacterVerdict, SessionMetrics};
use crate::record::{MemoryStore, ResultRecord, ResultStore};
use crate::text::{ReferenceText, TextProvider};

/// Lifecycle state of an attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
pub enum SessionState {
    /// Nothing typed yet
    #[default]
    Idle,
    /// Typing in progress, clock running
    Active,
    /// Terminal, metrics frozen
    Finished,
}

/// What a keystroke did to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// The key had no effect (modifier, unknown token, empty backspace or finished session)
    Ignored,
    /// A character was added at `index`
    Appended {
        index: usize,
        char: char,
        verdict: CharacterVerdict,
    },
    /// The character at `index` was removed
    Deleted { index: usize, char: char },
    /// The character completed the text; the session is finished and the record stored
    Completed(ResultRecord),
}

/// Why a manual finish was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishRejection {
    /// Only an active session can be finished
    NotActive(SessionState),
    /// Not enough input has been typed yet
    BelowThreshold { typed: usize, required: usize },
}

/// Answer to a manual finish command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finish {
    /// The session is finished and the record stored
    Completed(ResultRecord),
    /// The command was not allowed; nothing changed
    Rejected(FinishRejection),
}

/// Everything that belongs to a single attempt
#[derive(Debug, Clone)]
struct Attempt {
    reference: ReferenceText,
    input: InputBuffer,
    state: SessionState,
    elapsed_seconds: u64,
    metrics: SessionMetrics,
    /// Set exactly once, when the attempt finishes
    record: Option<ResultRecord>,
    /// The record has not reached the store yet
    pending: bool,
}

impl Attempt {
    fn new(reference: ReferenceText) -> Self {
        Self {
            reference,
            input: InputBuffer::new(),
            state: SessionState::Idle,
            elapsed_seconds: 0,
            metrics: SessionMetrics::default(),
            record: None,
            pending: false,
        }
    }
}

/// A typing test in progress
///
/// Owns the reference text and input of the current attempt, plus the [`Clock`] and
/// [`ResultStore`] collaborators it reports to. All operations are synchronous; the host
/// is expected to serialize keystrokes and ticks.
///
/// The clock is released whenever the attempt ends: on completion, on restart, and
/// when the session is dropped.
#[derive(Debug)]
pub struct TypingSession<C: Clock = ManualClock, S: ResultStore = MemoryStore> {
    attempt: Attempt,
    clock: C,
    store: S,
    config: Configuration,
}

impl<C: Clock, S: ResultStore> TypingSession<C, S> {
    /// Create an idle session for the given text
    pub fn new(reference: ReferenceText, clock: C, store: S) -> Self {
        debug!(text_len = reference.len(), "typing session created");
        Self {
            attempt: Attempt::new(reference),
            clock,
            store,
            config: Configuration::default(),
        }
    }

    /// Create an idle session with a text from `provider`
    ///
    /// Fails with [`SessionError::MissingText`] if the provider has no (non-empty) text.
    pub fn from_provider<P: TextProvider + ?Sized>(
        provider: &mut P,
        language: &str,
        clock: C,
        store: S,
    ) -> Result<Self, SessionError> {
        let reference = provider.reference_text(language)?;
        Ok(Self::new(reference, clock, store))
    }

    /// Configure the session with custom settings (builder pattern)
    pub fn with_configuration(mut self, config: Configuration) -> Self {
        self.config = config;
        self
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SessionState {
        self.attempt.state
    }

    /// Latest metrics snapshot
    pub const fn metrics(&self) -> SessionMetrics {
        self.attempt.metrics
    }

    /// The reference text of the current attempt
    pub const fn reference(&self) -> &ReferenceText {
        &self.attempt.reference
    }

    /// The input typed so far
    pub const fn typed(&self) -> &InputBuffer {
        &self.attempt.input
    }

    /// Number of characters in the reference text
    pub fn text_len(&self) -> usize {
        self.attempt.reference.len()
    }

    /// Number of characters typed so far
    pub fn input_len(&self) -> usize {
        self.attempt.input.len()
    }

    /// Returns true if nothing is typed
    pub fn is_input_empty(&self) -> bool {
        self.attempt.input.is_empty()
    }

    /// The next character the user is expected to type, if any
    pub fn expected_character(&self) -> Option<char> {
        self.attempt.reference.get(self.attempt.input.len())
    }

    /// Get the typing completion percentage
    ///
    /// Returns a value between 0.0 and 100.0 representing how much of the
    /// text has been typed so far.
    pub fn completion_percentage(&self) -> f64 {
        let percent = (self.input_len() as f64 / self.text_len() as f64) * 100.0;
        percent.min(100.0)
    }

    /// The record emitted when the attempt finished
    pub const fn result(&self) -> Option<&ResultRecord> {
        self.attempt.record.as_ref()
    }

    /// Returns true if the attempt finished but its record is not stored yet
    pub const fn has_pending_result(&self) -> bool {
        self.attempt.pending
    }

    /// The minimum input a manual finish requires
    pub const fn config(&self) -> &Configuration {
        &self.config
    }

    /// Returns true if [`finish`](Self::finish) would currently be accepted
    pub fn can_finish(&self) -> bool {
        self.attempt.state == SessionState::Active
            && self.attempt.input.len() >= self.config.min_finish_chars
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    pub const fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Process a keystroke
    ///
    /// Accepts anything convertible into a [`Key`]: a `char`, a raw token such as
    /// `"Backspace"`, or a `Key` itself. Keys that cannot change the session are
    /// reported as [`Change::Ignored`].
    ///
    /// # Errors
    ///
    /// Only when this keystroke completes the text and the result cannot be stored.
    /// The session is finished regardless; see [`retry_persist`](Self::retry_persist).
    pub fn input(&mut self, key: impl Into<Key>) -> Result<Change, SessionError> {
        let key = key.into();

        if self.attempt.state == SessionState::Finished {
            trace!(?key, "session finished, key ignored");
            return Ok(Change::Ignored);
        }

        match key {
            Key::Modifier(_) | Key::Unrecognized => Ok(Change::Ignored),
            Key::Backspace => Ok(self.delete_input()),
            Key::Char(char) => self.add_input(char),
        }
    }

    /// Add character to input
    fn add_input(&mut self, char: char) -> Result<Change, SessionError> {
        let index = self.attempt.input.push(char);
        let verdict = CharacterVerdict::classify(self.attempt.reference.characters(), index, char);

        if self.attempt.state == SessionState::Idle {
            self.activate();
        }

        self.recompute();

        if self.attempt.input.is_fully_typed(self.attempt.reference.len()) {
            return self.complete().map(Change::Completed);
        }

        Ok(Change::Appended {
            index,
            char,
            verdict,
        })
    }

    /// Delete character from input
    fn delete_input(&mut self) -> Change {
        let Some(char) = self.attempt.input.pop() else {
            return Change::Ignored;
        };

        self.recompute();

        Change::Deleted {
            index: self.attempt.input.len(),
            char,
        }
    }

    /// Advance the elapsed time by one second
    ///
    /// Only counts while the session is active; idle and finished sessions return their
    /// metrics unchanged.
    pub fn tick(&mut self) -> SessionMetrics {
        if self.attempt.state != SessionState::Active {
            return self.attempt.metrics;
        }

        self.attempt.elapsed_seconds += 1;
        self.recompute()
    }

    /// Recompute the metrics from the current input and elapsed time
    pub fn recompute(&mut self) -> SessionMetrics {
        self.attempt.metrics = metrics::compute(
            self.attempt.reference.characters(),
            self.attempt.input.characters(),
            self.attempt.elapsed_seconds,
        );
        self.attempt.metrics
    }

    /// End the session before the whole text is typed
    ///
    /// Allowed only while active, and only once at least
    /// [`Configuration::min_finish_chars`] characters are typed. A refused finish
    /// changes nothing.
    ///
    /// # Errors
    ///
    /// When the result cannot be stored. The session is finished regardless.
    pub fn finish(&mut self) -> Result<Finish, SessionError> {
        let typed = self.attempt.input.len();
        let required = self.config.min_finish_chars;

        match self.attempt.state {
            SessionState::Active if typed >= required => self.complete().map(Finish::Completed),
            SessionState::Active => {
                debug!(typed, required, "manual finish refused");
                Ok(Finish::Rejected(FinishRejection::BelowThreshold {
                    typed,
                    required,
                }))
            }
            state => Ok(Finish::Rejected(FinishRejection::NotActive(state))),
        }
    }

    /// Try again to store a result whose first append failed
    ///
    /// Returns `Ok(true)` if a pending record was stored now, `Ok(false)` if nothing was
    /// pending.
    pub fn retry_persist(&mut self) -> Result<bool, SessionError> {
        match self.attempt.record.clone() {
            Some(record) if self.attempt.pending => self.persist(record).map(|_| true),
            _ => Ok(false),
        }
    }

    /// Begin a new attempt with `reference`
    ///
    /// Stops the clock and discards the current input and metrics. A record that was
    /// already stored stays stored; one that is still pending is dropped.
    pub fn restart(&mut self, reference: ReferenceText) {
        self.clock.stop();

        if self.attempt.pending {
            warn!("restarting with an unsaved result, the result is discarded");
        }

        debug!(
            previous_state = %self.attempt.state,
            text_len = reference.len(),
            "typing session restarted"
        );
        self.attempt = Attempt::new(reference);
    }

    /// Begin a new attempt with a fresh text from `provider`
    ///
    /// If the provider has no text, the current attempt is left untouched.
    pub fn restart_from<P: TextProvider + ?Sized>(
        &mut self,
        provider: &mut P,
        language: &str,
    ) -> Result<(), SessionError> {
        let reference = provider.reference_text(language)?;
        self.restart(reference);
        Ok(())
    }

    fn activate(&mut self) {
        self.attempt.state = SessionState::Active;
        self.clock.start();
        debug!("typing session active");
    }

    /// Transition into `Finished` and emit the record
    fn complete(&mut self) -> Result<ResultRecord, SessionError> {
        self.clock.stop();
        self.attempt.state = SessionState::Finished;

        // Finished is terminal, so this can only be reached once per attempt
        if let Some(record) = &self.attempt.record {
            return Ok(record.clone());
        }

        let metrics = self.recompute();
        let record = ResultRecord::new(&metrics, self.attempt.reference.len(), self.clock.now());
        self.attempt.record = Some(record.clone());
        self.attempt.pending = true;

        self.persist(record)
    }

    fn persist(&mut self, record: ResultRecord) -> Result<ResultRecord, SessionError> {
        match self.store.append(&record) {
            Ok(()) => {
                self.attempt.pending = false;
                info!(
                    wpm = record.words_per_minute,
                    accuracy = record.accuracy_percent,
                    errors = record.error_count,
                    seconds = record.elapsed_seconds,
                    "typing session finished"
                );
                Ok(record)
            }
            Err(source) => {
                warn!("failed to store result: {source}");
                Err(SessionError::Persist { record, source })
            }
        }
    }
}

impl<C: Clock, S: ResultStore> Drop for TypingSession<C, S> {
    fn drop(&mut self) {
        self.clock.stop();
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::error::StoreError;
    use crate::key::Modifier;

    fn session(text: &str) -> TypingSession {
        TypingSession::new(
            ReferenceText::new(text).unwrap(),
            ManualClock::default(),
            MemoryStore::default(),
        )
    }

    fn type_str<C: Clock, S: ResultStore>(session: &mut TypingSession<C, S>, text: &str) {
        for char in text.chars() {
            session.input(char).unwrap();
        }
    }

    /// A store whose appends fail until it is told otherwise
    #[derive(Default)]
    struct FlakyStore {
        failing: bool,
        attempts: usize,
        records: Vec<ResultRecord>,
    }

    impl ResultStore for FlakyStore {
        fn append(&mut self, record: &ResultRecord) -> Result<(), StoreError> {
            self.attempts += 1;
            if self.failing {
                return Err(StoreError::new("append", "disk full"));
            }
            self.records.push(record.clone());
            Ok(())
        }
    }

    #[test]
    fn test_cat_typed_correctly() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut session = TypingSession::new(
            ReferenceText::new("cat").unwrap(),
            ManualClock::fixed(at),
            MemoryStore::default(),
        );

        for key in ["c", "a", "t"] {
            session.input(key).unwrap();
        }

        assert_eq!(session.state(), SessionState::Finished);
        let metrics = session.metrics();
        assert_eq!(metrics.error_count, 0);
        assert_eq!(metrics.accuracy_percent, 100);
        assert_eq!(metrics.words_per_minute, 0);

        let records = session.store().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text_length, 3);
        assert_eq!(records[0].elapsed_seconds, 0);
        assert_eq!(records[0].timestamp, at);
        assert_eq!(session.result(), Some(&records[0]));
    }

    #[test]
    fn test_cat_with_mismatch() {
        let mut session = session("cat");
        session.input('c').unwrap();
        let change = session.input('x').unwrap();
        assert_eq!(
            change,
            Change::Appended {
                index: 1,
                char: 'x',
                verdict: CharacterVerdict::Incorrect
            }
        );
        let change = session.input('t').unwrap();

        let Change::Completed(record) = change else {
            panic!("expected completion, got {change:?}");
        };
        assert_eq!(record.error_count, 1);
        assert_eq!(record.accuracy_percent, 67);
    }

    #[test]
    fn test_overflow_key_is_ignored_after_completion() {
        let mut session = session("cat");
        type_str(&mut session, "cat");
        assert_eq!(session.state(), SessionState::Finished);

        assert_eq!(session.input('t').unwrap(), Change::Ignored);
        assert_eq!(session.input_len(), 3);
        assert_eq!(session.metrics().error_count, 0);
        assert_eq!(session.store().records().len(), 1);
    }

    #[test]
    fn test_first_character_activates() {
        let mut session = session("hello");
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.clock().is_running());

        session.input('h').unwrap();
        assert_eq!(session.state(), SessionState::Active);
        assert!(session.clock().is_running());
        assert_eq!(session.clock().starts(), 1);

        // Deleting everything keeps the session active
        session.input(Key::Backspace).unwrap();
        assert!(session.is_input_empty());
        assert_eq!(session.state(), SessionState::Active);

        // Typing again does not re-arm the clock
        session.input('h').unwrap();
        assert_eq!(session.clock().starts(), 1);
    }

    #[test]
    fn test_backspace_on_empty_input() {
        let mut session = session("hello");
        assert_eq!(session.input("Backspace").unwrap(), Change::Ignored);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.clock().is_running());
        assert_eq!(session.metrics(), SessionMetrics::default());
    }

    #[test]
    fn test_backspace_removes_last_character() {
        let mut session = session("hello");
        type_str(&mut session, "hx");
        assert_eq!(session.metrics().error_count, 1);

        let change = session.input(Key::Backspace).unwrap();
        assert_eq!(change, Change::Deleted { index: 1, char: 'x' });
        assert_eq!(session.metrics().error_count, 0);
        assert_eq!(session.metrics().accuracy_percent, 100);
        assert_eq!(session.typed().as_string(), "h");
    }

    #[test]
    fn test_modifiers_are_no_ops() {
        let mut session = session("hello");
        type_str(&mut session, "he");
        session.tick();

        let state = session.state();
        let metrics = session.metrics();
        let typed = session.typed().clone();

        for token in ["Shift", "Ctrl", "Alt", "Tab", "CapsLock", "Enter", "ArrowLeft", "F1"] {
            assert_eq!(session.input(token).unwrap(), Change::Ignored);
        }
        session.input(Key::Modifier(Modifier::Meta)).unwrap();
        session.input('\t').unwrap();

        assert_eq!(session.state(), state);
        assert_eq!(session.metrics(), metrics);
        assert_eq!(session.typed(), &typed);
    }

    #[test]
    fn test_modifiers_do_not_activate() {
        let mut session = session("hello");
        for token in ["Shift", "Enter", "Tab"] {
            session.input(token).unwrap();
        }
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.clock().starts(), 0);
    }

    #[test]
    fn test_ticks_only_count_while_active() {
        let mut session = session("one two three");
        assert_eq!(session.tick().elapsed_seconds, 0);

        type_str(&mut session, "one");
        assert_eq!(session.metrics().words_per_minute, 0);

        let metrics = session.tick();
        assert_eq!(metrics.elapsed_seconds, 1);
        assert_eq!(metrics.words_per_minute, 60);

        for _ in 0..5 {
            session.tick();
        }
        type_str(&mut session, " tw");
        // 2 words in 6 seconds
        assert_eq!(session.metrics().words_per_minute, 20);

        type_str(&mut session, "o three");
        assert_eq!(session.state(), SessionState::Finished);
        let frozen = session.metrics();
        assert_eq!(session.tick(), frozen);
        assert_eq!(session.metrics().elapsed_seconds, 6);
        assert_eq!(session.result().unwrap().words_per_minute, 30);
    }

    #[test]
    fn test_completion_stops_clock() {
        let mut session = session("ab");
        type_str(&mut session, "ab");
        assert!(!session.clock().is_running());
        assert_eq!(session.clock().stops(), 1);
    }

    #[test]
    fn test_single_character_text() {
        let mut session = session("a");
        let change = session.input('b').unwrap();
        assert!(matches!(change, Change::Completed(_)));
        assert_eq!(session.metrics().accuracy_percent, 0);
        assert_eq!(session.clock().starts(), 1);
        assert_eq!(session.clock().stops(), 1);
    }

    #[test]
    fn test_manual_finish_below_threshold() {
        let mut session = session(&"x".repeat(100));
        type_str(&mut session, &"x".repeat(10));

        assert!(!session.can_finish());
        let finish = session.finish().unwrap();
        assert_eq!(
            finish,
            Finish::Rejected(FinishRejection::BelowThreshold {
                typed: 10,
                required: 50
            })
        );
        assert_eq!(session.state(), SessionState::Active);
        assert!(session.clock().is_running());
        assert!(session.store().records().is_empty());
    }

    #[test]
    fn test_manual_finish_at_threshold() {
        let mut session = session(&"x".repeat(100));
        type_str(&mut session, &"x".repeat(50));
        session.tick();

        assert!(session.can_finish());
        let Finish::Completed(record) = session.finish().unwrap() else {
            panic!("finish should be accepted");
        };
        assert_eq!(record.text_length, 100);
        assert_eq!(record.elapsed_seconds, 1);
        assert_eq!(session.state(), SessionState::Finished);
        assert!(!session.clock().is_running());

        // A second finish is refused and nothing is emitted twice
        assert_eq!(
            session.finish().unwrap(),
            Finish::Rejected(FinishRejection::NotActive(SessionState::Finished))
        );
        assert_eq!(session.store().records().len(), 1);
    }

    #[test]
    fn test_manual_finish_when_idle() {
        let mut session = session("hello").with_configuration(Configuration {
            min_finish_chars: 0,
        });
        assert_eq!(
            session.finish().unwrap(),
            Finish::Rejected(FinishRejection::NotActive(SessionState::Idle))
        );
    }

    #[test]
    fn test_exactly_one_record_per_attempt() {
        let mut manual = session("abc").with_configuration(Configuration {
            min_finish_chars: 1,
        });
        manual.input('a').unwrap();
        manual.finish().unwrap();
        type_str(&mut manual, "bc");
        manual.finish().unwrap();
        assert_eq!(manual.store().records().len(), 1);

        let mut automatic = session("abc");
        type_str(&mut automatic, "abc");
        automatic.finish().unwrap();
        automatic.input('d').unwrap();
        assert_eq!(automatic.store().records().len(), 1);
    }

    #[test]
    fn test_persist_failure_keeps_session_finished() {
        let store = FlakyStore {
            failing: true,
            ..FlakyStore::default()
        };
        let mut session =
            TypingSession::new(ReferenceText::new("ab").unwrap(), ManualClock::default(), store);

        session.input('a').unwrap();
        let error = session.input('b').unwrap_err();
        let SessionError::Persist { record, .. } = error else {
            panic!("expected a persistence error");
        };
        assert_eq!(record.text_length, 2);
        assert_eq!(session.state(), SessionState::Finished);
        assert!(session.has_pending_result());
        assert_eq!(session.result(), Some(&record));

        // Still failing
        assert!(session.retry_persist().is_err());
        assert!(session.has_pending_result());

        session.store_mut().failing = false;
        assert!(session.retry_persist().unwrap());
        assert!(!session.has_pending_result());
        assert_eq!(session.store().records, vec![record]);
        assert_eq!(session.store().attempts, 3);

        // Nothing left to retry
        assert!(!session.retry_persist().unwrap());
        assert_eq!(session.store().attempts, 3);
    }

    #[test]
    fn test_restart_begins_fresh_attempt() {
        let mut session = session("cat");
        type_str(&mut session, "ca");
        session.tick();

        session.restart(ReferenceText::new("dog").unwrap());
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.is_input_empty());
        assert_eq!(session.metrics(), SessionMetrics::default());
        assert_eq!(session.reference().content(), "dog");
        assert!(!session.clock().is_running());
        assert!(session.result().is_none());

        type_str(&mut session, "dog");
        assert_eq!(session.metrics().elapsed_seconds, 0);
        assert_eq!(session.store().records().len(), 1);
    }

    #[test]
    fn test_restart_after_finish_keeps_stored_record() {
        let mut session = session("cat");
        type_str(&mut session, "cat");
        session.restart(ReferenceText::new("cow").unwrap());
        type_str(&mut session, "cow");
        assert_eq!(session.store().records().len(), 2);
    }

    #[test]
    fn test_restart_from_provider() {
        let mut provider = |language: &str| (language == "en").then(|| "fresh".to_string());

        let mut session = TypingSession::from_provider(
            &mut provider,
            "en",
            ManualClock::default(),
            MemoryStore::default(),
        )
        .unwrap();
        session.input('f').unwrap();

        // Missing text leaves the attempt untouched
        assert!(matches!(
            session.restart_from(&mut provider, "xx"),
            Err(SessionError::MissingText)
        ));
        assert_eq!(session.input_len(), 1);

        session.restart_from(&mut provider, "en").unwrap();
        assert!(session.is_input_empty());
        assert_eq!(session.text_len(), 5);
    }

    #[test]
    fn test_from_provider_rejects_empty_text() {
        let mut provider = |_: &str| Some(String::new());
        let result = TypingSession::from_provider(
            &mut provider,
            "en",
            ManualClock::default(),
            MemoryStore::default(),
        );
        assert!(matches!(result, Err(SessionError::MissingText)));
    }

    #[test]
    fn test_drop_releases_clock() {
        let mut clock = ManualClock::default();
        {
            let mut session = TypingSession::new(
                ReferenceText::new("hello").unwrap(),
                &mut clock,
                MemoryStore::default(),
            );
            session.input('h').unwrap();
            assert!(session.clock().is_running());
        }
        assert!(!clock.is_running());
        assert_eq!(clock.stops(), 1);
    }

    #[test]
    fn test_progress_and_expected_character() {
        let mut session = session("hello");
        assert_eq!(session.completion_percentage(), 0.0);
        assert_eq!(session.expected_character(), Some('h'));

        session.input('h').unwrap();
        assert_eq!(session.completion_percentage(), 20.0);
        assert_eq!(session.expected_character(), Some('e'));

        type_str(&mut session, "ello");
        assert_eq!(session.completion_percentage(), 100.0);
        assert_eq!(session.expected_character(), None);
    }

    #[test]
    fn test_rtl_session() {
        let mut session = session("سلام");
        type_str(&mut session, "سلام");
        assert_eq!(session.state(), SessionState::Finished);
        assert_eq!(session.metrics().accuracy_percent, 100);
    }
}
