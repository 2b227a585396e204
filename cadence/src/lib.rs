//! # Cadence - Real-time Typing Analytics
//!
//! Cadence ingests the keystroke stream of a timed typing attempt and derives accuracy,
//! rhythm, error and behavioural metrics from it. The derived metrics feed a rule-based
//! personality profile and a ranked list of improvement tips.
//!
//! One [`TypingAnalytics`] instance belongs to one attempt. The host calls
//! [`TypingAnalytics::record_keystroke`] for every accepted keystroke (corrections included)
//! and [`TypingAnalytics::summary`] whenever it needs results.
//!
//! ```rust
//! use cadence::{Key, ManualClock, TypingAnalytics};
//!
//! let clock = ManualClock::new(0);
//! let mut analytics = TypingAnalytics::with_clock(clock.clone());
//!
//! for (position, char) in "hello".chars().enumerate() {
//!     clock.advance(180);
//!     analytics.record_keystroke(char, Some(char), true, None, position);
//! }
//! analytics.record_keystroke(Key::BACKSPACE, None, true, None, 5);
//!
//! let summary = analytics.summary();
//! assert_eq!(summary.key_events, 6);
//! assert_eq!(summary.backspaces, 1);
//! assert!(summary.tips.len() >= 4);
//! ```

pub mod clock;
pub mod config;
pub mod event;
mod evidence;
pub mod metrics;
pub mod profile;
pub mod summary;
pub mod tips;
pub mod tracker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Configuration;
pub use event::{CorrectionRecord, Key, KeystrokeEvent, NamedKey, PauseRecord};
pub use metrics::{CharacterSpeed, ProblemCharacter, Rhythm, TrueAccuracy};
pub use profile::{Archetype, PersonalityProfile, ProfileMetrics};
pub use summary::Summary;
pub use tips::{Priority, Tip, TipCategory, TipMetric};
pub use tracker::TypingAnalytics;

/// Milliseconds, as reported by a [`Clock`] or supplied by the host
pub type Timestamp = u64;

/// Signed distance between two timestamps in milliseconds.
///
/// Hosts are trusted to supply ordered timestamps, but an out-of-order event yields a negative
/// delta instead of wrapping.
pub type TimeDelta = i64;

const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Characters per minute for a mean keystroke interval, `0` when there is no usable interval
pub(crate) fn characters_per_minute(interval_ms: f64) -> f64 {
    if interval_ms > 0.0 {
        MILLIS_PER_MINUTE / interval_ms
    } else {
        0.0
    }
}

/// Rounds to one decimal place
pub(crate) fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Readable label for characters that render as whitespace
pub fn char_label(char: char) -> String {
    match char {
        ' ' => "SPACE".to_string(),
        '\t' => "TAB".to_string(),
        '\n' => "ENTER".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_characters_per_minute() {
        assert_eq!(characters_per_minute(200.0), 300.0);
        assert_eq!(characters_per_minute(0.0), 0.0);
        assert_eq!(characters_per_minute(-5.0), 0.0);
    }

    #[test]
    fn test_char_label() {
        assert_eq!(char_label(' '), "SPACE");
        assert_eq!(char_label('\n'), "ENTER");
        assert_eq!(char_label('q'), "q");
    }
}
