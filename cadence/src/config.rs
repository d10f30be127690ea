//! # Configuration Module - Session Policy
//!
//! Policy values a host may tune without changing how sessions behave otherwise.
//!
//! ## Usage
//!
//! ```rust
//! use cadence::config::Configuration;
//!
//! // Use default configuration
//! let config = Configuration::default();
//! assert_eq!(config.min_finish_chars, 50);
//!
//! // Allow finishing early after a single sentence
//! let config = Configuration {
//!     min_finish_chars: 20,
//! };
//! ```

use serde::{Deserialize, Serialize};

/// Runtime policy for typing sessions
///
/// Deserializable so hosts can embed it in their own settings files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Characters that must be typed before a session may be finished manually
    ///
    /// Sessions always finish on their own once the whole text is typed; this guard
    /// only applies to the explicit finish command.
    ///
    /// **Default**: 50 characters
    pub min_finish_chars: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            min_finish_chars: 50,
        }
    }
}
