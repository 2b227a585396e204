//! # Configuration Module - Analytics Thresholds
//!
//! Thresholds that decide which keystroke gaps count as pauses, which intervals feed the
//! rhythm analysis and how much output the derived reports carry.
//!
//! ## Usage
//!
//! ```rust
//! use cadence::Configuration;
//!
//! // Use default configuration
//! let config = Configuration::default();
//! assert_eq!(config.pause_threshold_ms, 1000);
//!
//! // Custom configuration
//! let config = Configuration {
//!     pause_threshold_ms: 1500, // Only count gaps longer than 1.5s as pauses
//!     ..Configuration::default()
//! };
//! ```
//!
//! Every field deserializes with its default when missing, so hosts can embed the
//! configuration in their own settings files and override single values.

use serde::{Deserialize, Serialize};

use crate::TimeDelta;

/// Runtime configuration for keystroke analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// A gap between keystrokes longer than this is a flow interruption
    ///
    /// **Default**: 1000 ms
    pub pause_threshold_ms: TimeDelta,

    /// Keystroke intervals must stay below this to count as rhythm samples
    ///
    /// Longer gaps are pauses, not rhythm.
    ///
    /// **Default**: 2000 ms
    pub rhythm_ceiling_ms: TimeDelta,

    /// Rhythm analysis reports zeroes until this many samples exist
    ///
    /// **Default**: 10
    pub min_rhythm_samples: usize,

    /// Number of characters reported by the problem character ranking
    ///
    /// **Default**: 5
    pub problem_character_limit: usize,

    /// Generic tips are added until at least this many tips are reported
    ///
    /// **Default**: 4
    pub min_tips: usize,

    /// Upper bound on reported tips
    ///
    /// **Default**: 6
    pub max_tips: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            pause_threshold_ms: 1000,
            rhythm_ceiling_ms: 2000,
            min_rhythm_samples: 10,
            problem_character_limit: 5,
            min_tips: 4,
            max_tips: 6,
        }
    }
}
