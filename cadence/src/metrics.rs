//! # Metrics Module - Speed and Accuracy
//!
//! Pure functions computing a [`SessionMetrics`] snapshot from a reference text, the
//! typed input and the elapsed time. Nothing in here keeps state: a session calls
//! [`compute`] after every accepted mutation and every clock tick.
//!
//! ## Character Verdicts
//!
//! Every typed index is compared against the reference at the same index:
//!
//! ```text
//! Reference: [c][a][t]
//! Input:     [c][x][t][s]
//! Verdict:    ✓  ✗  ✓  +
//!             │  │  │  └── Overflow  (past the end of the reference, an error)
//!             │  │  └───── Correct
//!             │  └──────── Incorrect (an error)
//!             └─────────── Correct
//! ```
//!
//! ## Formulas
//!
//! - **Accuracy**: `round(correct / typed * 100)`, or `100` when nothing is typed
//! - **Words**: number of `' '`-separated tokens in the trimmed input
//! - **WPM**: `round(words / (elapsed_seconds / 60))`, or `0` when no time has passed
//!
//! All rounding is half-up and done in integer arithmetic.
//!
//! ```rust
//! use cadence::metrics;
//!
//! let reference: Vec<char> = "cat".chars().collect();
//! let input: Vec<char> = "cxt".chars().collect();
//!
//! let snapshot = metrics::compute(&reference, &input, 0);
//! assert_eq!(snapshot.error_count, 1);
//! assert_eq!(snapshot.accuracy_percent, 67);
//! assert_eq!(snapshot.words_per_minute, 0);
//! ```

use serde::{Deserialize, Serialize};

use crate::{SECONDS_PER_MINUTE, div_round_half_up};

/// Classification of a single typed character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterVerdict {
    /// Matches the reference at the same index
    Correct,
    /// Differs from the reference at the same index
    Incorrect,
    /// Typed past the end of the reference
    Overflow,
}

impl CharacterVerdict {
    /// Classify the typed character at `index`
    pub fn classify(reference: &[char], index: usize, typed: char) -> Self {
        match reference.get(index) {
            Some(&expected) if expected == typed => Self::Correct,
            Some(_) => Self::Incorrect,
            None => Self::Overflow,
        }
    }

    /// Returns true for both mismatches and overflow
    pub const fn is_error(&self) -> bool {
        !matches!(self, Self::Correct)
    }
}

/// Snapshot of the live metrics of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionMetrics {
    /// Running words-per-minute estimate
    pub words_per_minute: u32,
    /// Share of typed characters that match the reference, 0 - 100
    pub accuracy_percent: u8,
    /// Typed characters that do not match (mismatches and overflow)
    pub error_count: usize,
    /// Typed characters that match
    pub correct_count: usize,
    /// Whole seconds the session has been active
    pub elapsed_seconds: u64,
}

impl Default for SessionMetrics {
    /// Metrics of a session nothing has been typed into yet
    fn default() -> Self {
        Self {
            words_per_minute: 0,
            accuracy_percent: 100,
            error_count: 0,
            correct_count: 0,
            elapsed_seconds: 0,
        }
    }
}

impl SessionMetrics {
    /// Total typed characters the snapshot was computed from
    pub const fn typed(&self) -> usize {
        self.correct_count + self.error_count
    }
}

/// Compute a metrics snapshot
///
/// # Parameters
///
/// * `reference` - The reference text's characters
/// * `input` - The typed characters (may be longer than `reference`)
/// * `elapsed_seconds` - Whole seconds the session has been active
pub fn compute(reference: &[char], input: &[char], elapsed_seconds: u64) -> SessionMetrics {
    let correct_count = count_correct(reference, input);
    let error_count = input.len() - correct_count;

    SessionMetrics {
        words_per_minute: words_per_minute(word_count(input), elapsed_seconds),
        accuracy_percent: accuracy_percent(correct_count, input.len()),
        error_count,
        correct_count,
        elapsed_seconds,
    }
}

/// Number of typed characters matching the reference at the same index
pub fn count_correct(reference: &[char], input: &[char]) -> usize {
    input
        .iter()
        .zip(reference)
        .filter(|(typed, expected)| typed == expected)
        .count()
}

/// Accuracy as a whole percentage
///
/// An empty input is perfectly accurate.
pub fn accuracy_percent(correct: usize, typed: usize) -> u8 {
    if typed == 0 {
        return 100;
    }

    let percent = div_round_half_up(correct.min(typed) as u64 * 100, typed as u64);
    // Safety: correct <= typed, so the percentage is at most 100
    percent as u8
}

/// Count the words in the typed input
///
/// Words are the `' '`-separated tokens of the trimmed input. This deliberately
/// mirrors a naive split: consecutive spaces produce empty tokens, and an empty (or
/// all-whitespace) input still counts as one token.
pub fn word_count(input: &[char]) -> usize {
    let typed: String = input.iter().collect();
    typed.trim().split(' ').count()
}

/// Words per minute over the elapsed time
pub fn words_per_minute(words: usize, elapsed_seconds: u64) -> u32 {
    if elapsed_seconds == 0 {
        return 0;
    }

    let wpm = div_round_half_up(words as u64 * SECONDS_PER_MINUTE, elapsed_seconds);
    u32::try_from(wpm).unwrap_or(u32::MAX)
}
