//! # Tracker Module - Keystroke Ingestion
//!
//! [`TypingAnalytics`] owns every piece of analytics state for one typing attempt. The host
//! feeds it keystrokes as they happen and reads derived results from it on demand.
//!
//! ## Ingestion
//!
#![doc = simple_mermaid::mermaid!("../diagrams/keystroke_ingestion.mmd")]
//!
//! Deletions count as corrections and never touch the timing samples, the error streak or the
//! per-character maps. Content keystrokes update the character totals. Every non-deletion
//! event, named keys included, contributes its interval to the timing samples.
//!
//! ## Usage Example
//!
//! ```rust
//! use cadence::{Key, TypingAnalytics};
//!
//! let mut analytics = TypingAnalytics::with_clock(|| 0_u64);
//!
//! analytics.record_keystroke('t', Some('t'), true, Some(0), 0);
//! analytics.record_keystroke('x', Some('h'), false, Some(210), 1);
//! analytics.record_keystroke(Key::BACKSPACE, None, true, Some(420), 2);
//! analytics.record_keystroke('h', Some('h'), true, Some(2_000), 1);
//!
//! let accuracy = analytics.calculate_true_accuracy();
//! assert_eq!(accuracy.raw, 67);
//! assert_eq!(accuracy.corrections, 1);
//! assert_eq!(analytics.pauses().len(), 1);
//! ```

use std::collections::{BTreeMap, HashMap};

use crate::config::Configuration;
use crate::event::{CorrectionRecord, Key, KeystrokeEvent, PauseRecord};
use crate::evidence::Evidence;
use crate::metrics::{CharacterSpeed, ErrorTally, ProblemCharacter, Rhythm, TrueAccuracy};
use crate::profile::{self, PersonalityProfile};
use crate::summary::Summary;
use crate::tips::{self, Tip};
use crate::{Clock, SystemClock, TimeDelta, Timestamp};

#[derive(Debug, Default, Clone)]
pub(crate) struct CounterData {
    pub backspaces: usize,
    pub consecutive_errors: usize,
    pub max_consecutive_errors: usize,
    pub characters_typed: usize,
    pub correct_typed: usize,
    pub errors_committed: usize,
    pub corrections_made: usize,
    pub flow_interruptions: usize,
}

/// Everything cleared by [`TypingAnalytics::reset`]
#[derive(Debug, Default, Clone)]
struct AttemptState {
    events: Vec<KeystrokeEvent>,
    corrections: Vec<CorrectionRecord>,
    pauses: Vec<PauseRecord>,
    char_errors: HashMap<char, ErrorTally>,
    char_velocities: HashMap<char, Vec<TimeDelta>>,
    rhythm_samples: Vec<TimeDelta>,
    counters: CounterData,
    last_key_time: Option<Timestamp>,
    current_position: usize,
}

/// Real-time analytics for a single typing attempt
///
/// Create one per attempt, or [`reset`](Self::reset) it when the attempt restarts. All
/// operations are synchronous and never fail; reading before any keystroke simply reports the
/// zero-data results.
///
/// # Thread Safety
///
/// Not meant to be shared. Each attempt owns its own instance; separate instances are fully
/// independent.
#[derive(Debug, Clone)]
pub struct TypingAnalytics<C = SystemClock> {
    clock: C,
    config: Configuration,
    state: AttemptState,
}

impl TypingAnalytics<SystemClock> {
    /// Analytics timed by the system clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for TypingAnalytics<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TypingAnalytics<C> {
    /// Analytics that ask `clock` for the time of keystrokes recorded without a timestamp
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            config: Configuration::default(),
            state: AttemptState::default(),
        }
    }

    /// Configure thresholds (builder pattern)
    ///
    /// ```rust
    /// use cadence::{Configuration, TypingAnalytics};
    ///
    /// let analytics = TypingAnalytics::new().with_configuration(Configuration {
    ///     pause_threshold_ms: 1500,
    ///     ..Configuration::default()
    /// });
    /// assert_eq!(analytics.configuration().pause_threshold_ms, 1500);
    /// ```
    pub fn with_configuration(mut self, config: Configuration) -> Self {
        self.config = config;
        self
    }

    pub const fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Clear all recorded state, keeping the clock and configuration
    pub fn reset(&mut self) {
        log::debug!(
            "Resetting analytics after {} keystrokes",
            self.state.events.len()
        );
        self.state = AttemptState::default();
    }

    /// Record a keystroke
    ///
    /// * `key` - The typed character, or a named key such as [`Key::BACKSPACE`]
    /// * `target` - The character expected at this position, if any
    /// * `is_correct` - The host's verdict for character keys
    /// * `timestamp` - Milliseconds; the engine's clock is asked when `None`
    /// * `position` - The host's index into the typed stream
    ///
    /// Returns the logged event.
    pub fn record_keystroke(
        &mut self,
        key: impl Into<Key>,
        target: Option<char>,
        is_correct: bool,
        timestamp: Option<Timestamp>,
        position: usize,
    ) -> &KeystrokeEvent {
        let key = key.into();
        let timestamp = timestamp.unwrap_or_else(|| self.clock.now());
        let time_delta = self
            .state
            .last_key_time
            .map_or(0, |last| timestamp as TimeDelta - last as TimeDelta);

        log::trace!(
            "keystroke {key:?} target={target:?} correct={is_correct} delta={time_delta}ms position={position}"
        );

        if key.is_deletion() {
            self.record_correction(timestamp, position);
        } else {
            if let Key::Char(_) = key {
                self.record_character(target, is_correct, time_delta);
            }
            self.record_timing(timestamp, time_delta, position);
        }

        self.state.last_key_time = Some(timestamp);
        self.state.current_position = position;

        let index = self.state.events.len();
        self.state.events.push(KeystrokeEvent {
            correction: key.is_deletion(),
            key,
            target,
            is_correct,
            timestamp,
            position,
            time_delta,
        });
        &self.state.events[index]
    }

    fn record_correction(&mut self, timestamp: Timestamp, position: usize) {
        let counters = &mut self.state.counters;
        counters.backspaces += 1;
        counters.corrections_made += 1;
        self.state.corrections.push(CorrectionRecord {
            timestamp,
            position,
            index: self.state.corrections.len(),
        });
    }

    fn record_character(&mut self, target: Option<char>, is_correct: bool, time_delta: TimeDelta) {
        let counters = &mut self.state.counters;
        counters.characters_typed += 1;

        if is_correct {
            counters.correct_typed += 1;
            counters.consecutive_errors = 0;
            if let Some(target) = target {
                self.state
                    .char_velocities
                    .entry(target)
                    .or_default()
                    .push(time_delta);
            }
        } else {
            counters.errors_committed += 1;
            counters.consecutive_errors += 1;
            counters.max_consecutive_errors = counters
                .max_consecutive_errors
                .max(counters.consecutive_errors);
            if let Some(target) = target {
                let first_seen = self.state.char_errors.len();
                self.state
                    .char_errors
                    .entry(target)
                    .or_insert(ErrorTally {
                        errors: 0,
                        first_seen,
                    })
                    .errors += 1;
            }
        }
    }

    fn record_timing(&mut self, timestamp: Timestamp, time_delta: TimeDelta, position: usize) {
        if time_delta > 0 && time_delta < self.config.rhythm_ceiling_ms {
            self.state.rhythm_samples.push(time_delta);
        }

        if time_delta > self.config.pause_threshold_ms {
            log::debug!("Flow interrupted for {time_delta}ms at position {position}");
            self.state.counters.flow_interruptions += 1;
            self.state.pauses.push(PauseRecord {
                timestamp,
                duration: time_delta,
                position,
            });
        }
    }

    /// Every recorded keystroke in arrival order
    pub fn events(&self) -> &[KeystrokeEvent] {
        &self.state.events
    }

    /// One record per deletion
    pub fn corrections(&self) -> &[CorrectionRecord] {
        &self.state.corrections
    }

    /// One record per flow interruption
    pub fn pauses(&self) -> &[PauseRecord] {
        &self.state.pauses
    }

    /// Position supplied with the latest keystroke
    pub const fn current_position(&self) -> usize {
        self.state.current_position
    }

    /// First-pass accuracy plus the capped correction bonus
    pub fn calculate_true_accuracy(&self) -> TrueAccuracy {
        let counters = &self.state.counters;
        TrueAccuracy::calculate(
            counters.characters_typed,
            counters.correct_typed,
            counters.errors_committed,
            counters.corrections_made,
        )
    }

    pub fn analyze_rhythm(&self) -> Rhythm {
        Rhythm::calculate(&self.state.rhythm_samples, self.config.min_rhythm_samples)
    }

    /// The characters with the most errors, worst first
    pub fn problem_characters(&self) -> Vec<ProblemCharacter> {
        ProblemCharacter::rank(&self.state.char_errors, self.config.problem_character_limit)
    }

    /// Speed per character, for characters typed correctly at least once
    pub fn character_speeds(&self) -> BTreeMap<char, CharacterSpeed> {
        self.state
            .char_velocities
            .iter()
            .filter_map(|(&char, deltas)| CharacterSpeed::calculate(deltas).map(|speed| (char, speed)))
            .collect()
    }

    pub fn generate_personality_profile(&self) -> PersonalityProfile {
        profile::classify(&self.evidence())
    }

    /// Between `min_tips` and `max_tips` tips, most important first
    pub fn generate_tips(&self) -> Vec<Tip> {
        tips::generate(&self.evidence(), &self.config)
    }

    /// Everything the host consumes, in one snapshot
    pub fn summary(&self) -> Summary {
        let evidence = self.evidence();
        let counters = &self.state.counters;

        log::debug!(
            "Summarising {} keystrokes ({} corrections, {} pauses)",
            evidence.key_events,
            counters.corrections_made,
            counters.flow_interruptions
        );

        Summary {
            key_events: evidence.key_events,
            corrections: self.state.corrections.len(),
            backspaces: counters.backspaces,
            pause_events: self.state.pauses.len(),
            flow_interruptions: counters.flow_interruptions,
            max_consecutive_errors: counters.max_consecutive_errors,
            accuracy: evidence.accuracy,
            rhythm: evidence.rhythm,
            problem_characters: evidence.problem_characters.clone(),
            character_speeds: self.character_speeds(),
            personality: profile::classify(&evidence),
            tips: tips::generate(&evidence, &self.config),
        }
    }

    pub(crate) fn evidence(&self) -> Evidence {
        Evidence::gather(
            &self.state.counters,
            self.state.events.len(),
            &self.state.pauses,
            self.calculate_true_accuracy(),
            self.analyze_rhythm(),
            self.problem_characters(),
        )
    }
}
