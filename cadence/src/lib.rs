//! # Cadence - A Real-Time Typing-Metrics Engine
//!
//! Cadence is the engine behind a typing test: it owns the reference text and the
//! typed input, classifies every typed character, keeps words-per-minute and accuracy
//! up to date on every keystroke and clock tick, detects when the test is complete and
//! hands exactly one immutable [`ResultRecord`] to a [`ResultStore`].
//!
//! ## Session Lifecycle
//!
#![doc = simple_mermaid::mermaid!("../diagrams/session_lifecycle.mmd")]
//!
//! ## Quick Start
//!
//! ```rust
//! use cadence::{Change, ManualClock, MemoryStore, ReferenceText, SessionState, TypingSession};
//!
//! let text = ReferenceText::new("cat").unwrap();
//! let mut session = TypingSession::new(text, ManualClock::default(), MemoryStore::default());
//!
//! for key in ["c", "a", "t"] {
//!     session.input(key).unwrap();
//! }
//!
//! assert_eq!(session.state(), SessionState::Finished);
//! assert_eq!(session.metrics().accuracy_percent, 100);
//! assert_eq!(session.store().records().len(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`session`]: the [`TypingSession`] state machine
//! - [`key`]: raw key tokens and how they are classified
//! - [`metrics`]: pure metric computation ([`SessionMetrics`], [`CharacterVerdict`])
//! - [`record`]: the persisted [`ResultRecord`] and the [`ResultStore`] collaborator
//! - [`history`]: summaries over stored results
//! - [`render`]: per-character view for hosts that draw the text
//! - [`clock`]: the [`Clock`] collaborator
//! - [`text`]: [`ReferenceText`] and the [`TextProvider`] collaborator
//! - [`config`]: runtime policy values

pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod key;
pub mod metrics;
pub mod record;
pub mod render;
pub mod session;
pub mod text;

pub use clock::{Clock, ManualClock};
pub use config::Configuration;
pub use error::{SessionError, StoreError};
pub use history::{Achievement, GoalProgress, HistorySummary, PerformanceLevel, Recommendation};
pub use input::InputBuffer;
pub use key::{Key, Modifier};
pub use metrics::{CharacterVerdict, SessionMetrics};
pub use record::{MemoryStore, ResultRecord, ResultStore};
pub use session::{Change, Finish, FinishRejection, SessionState, TypingSession};
pub use text::{ReferenceText, TextProvider};

/// Seconds in a minute, used by every per-minute rate
const SECONDS_PER_MINUTE: u64 = 60;

/// Divide two non-negative integers, rounding half-up.
///
/// Exact integer arithmetic, so values landing on `.5` always round up.
pub(crate) const fn div_round_half_up(numerator: u64, denominator: u64) -> u64 {
    (numerator * 2 + denominator) / (denominator * 2)
}
