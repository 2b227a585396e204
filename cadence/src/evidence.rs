//! Inputs shared by the personality and tip rules
//!
//! Gathered once per report so every rule reads the same snapshot.

use crate::event::PauseRecord;
use crate::metrics::{ProblemCharacter, Rhythm, TrueAccuracy};
use crate::tracker::CounterData;
use crate::{TimeDelta, characters_per_minute};

/// Keystrokes per pause-frequency window
const PAUSE_WINDOW: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Evidence {
    pub rhythm: Rhythm,
    pub accuracy: TrueAccuracy,
    pub problem_characters: Vec<ProblemCharacter>,
    /// Every logged event, deletions and named keys included
    pub key_events: usize,
    pub backspaces: usize,
    pub corrections_made: usize,
    pub errors_committed: usize,
    pub characters_typed: usize,
    pub flow_interruptions: usize,
    pub max_consecutive_errors: usize,
    /// Mean pause length in milliseconds, `0` without pauses
    pub mean_pause: TimeDelta,
    /// Backspaces per logged event
    pub correction_ratio: f64,
    /// Flow interruptions per 50 logged events
    pub pause_frequency: f64,
    /// Characters per minute from the mean rhythm interval
    pub avg_speed: u64,
}

impl Evidence {
    pub fn gather(
        counters: &CounterData,
        key_events: usize,
        pauses: &[PauseRecord],
        accuracy: TrueAccuracy,
        rhythm: Rhythm,
        problem_characters: Vec<ProblemCharacter>,
    ) -> Self {
        let mean_pause = if pauses.is_empty() {
            0
        } else {
            let total: f64 = pauses.iter().map(|pause| pause.duration as f64).sum();
            (total / pauses.len() as f64).round() as TimeDelta
        };

        Self {
            rhythm,
            accuracy,
            problem_characters,
            key_events,
            backspaces: counters.backspaces,
            corrections_made: counters.corrections_made,
            errors_committed: counters.errors_committed,
            characters_typed: counters.characters_typed,
            flow_interruptions: counters.flow_interruptions,
            max_consecutive_errors: counters.max_consecutive_errors,
            mean_pause,
            correction_ratio: counters.backspaces as f64 / key_events.max(1) as f64,
            pause_frequency: counters.flow_interruptions as f64
                / (key_events as f64 / PAUSE_WINDOW).max(1.0),
            avg_speed: characters_per_minute(rhythm.average_interval as f64).round() as u64,
        }
    }

    /// Correction ratio as a whole percentage
    pub fn correction_percent(&self) -> u64 {
        (self.correction_ratio * 100.0).round() as u64
    }
}
