//! Derived metric calculators
//!
//! Pure functions over the counters and samples collected by the tracker. Results are rounded
//! for presentation; intermediate values keep full precision.

use std::collections::HashMap;

use serde::Serialize;

use crate::{TimeDelta, characters_per_minute, round_tenths};

/// Most accuracy bonus a typist can earn by correcting mistakes, in percentage points
const CORRECTION_BONUS_CAP: f64 = 5.0;

/// Typing accuracy with credit for corrections
///
/// Percentages are between 0 and 100. The adjusted value never drops below the raw one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrueAccuracy {
    /// First-pass accuracy
    pub raw: u32,
    /// Raw accuracy plus the correction bonus, capped at 100
    pub adjusted: u32,
    /// Percentage points earned by correcting, one decimal place
    pub correction_bonus: f64,
    pub corrections: usize,
    pub errors_committed: usize,
    pub correct_typed: usize,
    pub total_typed: usize,
}

impl TrueAccuracy {
    /// Calculate accuracy
    ///
    /// * `total_typed` - Content keystrokes
    /// * `correct_typed` - Content keystrokes marked correct
    /// * `errors_committed` - Content keystrokes marked wrong
    /// * `corrections` - Deletions
    ///
    /// An untouched session scores 100.
    pub fn calculate(
        total_typed: usize,
        correct_typed: usize,
        errors_committed: usize,
        corrections: usize,
    ) -> Self {
        if total_typed == 0 {
            return Self {
                raw: 100,
                adjusted: 100,
                correction_bonus: 0.0,
                corrections: 0,
                errors_committed: 0,
                correct_typed: 0,
                total_typed: 0,
            };
        }

        let base = 100.0 * correct_typed as f64 / total_typed as f64;
        let correction_ratio = corrections as f64 / errors_committed.max(1) as f64;
        let correction_bonus = (correction_ratio * CORRECTION_BONUS_CAP).min(CORRECTION_BONUS_CAP);
        let adjusted = (base + correction_bonus).min(100.0);

        Self {
            raw: base.round() as u32,
            adjusted: adjusted.round() as u32,
            correction_bonus: round_tenths(correction_bonus),
            corrections,
            errors_committed,
            correct_typed,
            total_typed,
        }
    }
}

/// Steadiness of the time between keystrokes
///
/// All zero when there were too few samples to judge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rhythm {
    /// 0 - 100, where 100 is perfectly even timing
    pub consistency: u32,
    /// Mean interval in milliseconds
    pub average_interval: u64,
    pub variance: u64,
    pub standard_deviation: u64,
}

impl Rhythm {
    /// Analyse keystroke intervals
    ///
    /// * `samples` - Intervals in milliseconds, all positive
    /// * `min_samples` - Fewer samples than this yields [`Rhythm::default`]
    pub fn calculate(samples: &[TimeDelta], min_samples: usize) -> Self {
        if samples.is_empty() || samples.len() < min_samples {
            return Self::default();
        }

        let count = samples.len() as f64;
        let average = samples.iter().map(|&sample| sample as f64).sum::<f64>() / count;
        let variance = samples
            .iter()
            .map(|&sample| (sample as f64 - average).powi(2))
            .sum::<f64>()
            / count;
        let standard_deviation = variance.sqrt();

        Self {
            consistency: coefficient_of_variation_score(standard_deviation, average),
            average_interval: average.round() as u64,
            variance: variance.round() as u64,
            standard_deviation: standard_deviation.round() as u64,
        }
    }

    /// Whether enough samples existed to analyse
    pub const fn has_data(&self) -> bool {
        self.average_interval > 0
    }
}

fn coefficient_of_variation_score(standard_deviation: f64, mean: f64) -> u32 {
    if mean <= 0.0 {
        return 0;
    }
    let score = 100.0 - (standard_deviation / mean * 100.0);
    score.clamp(0.0, 100.0).round() as u32
}

/// A character the typist kept getting wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProblemCharacter {
    pub char: char,
    pub errors: usize,
}

/// Error tally for one target character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ErrorTally {
    pub errors: usize,
    /// Order in which the character first failed
    pub first_seen: usize,
}

impl ProblemCharacter {
    /// Rank characters by error count, highest first
    ///
    /// Equal counts keep the order in which the characters first failed.
    pub(crate) fn rank(tallies: &HashMap<char, ErrorTally>, limit: usize) -> Vec<Self> {
        let mut ranked: Vec<(&char, &ErrorTally)> = tallies.iter().collect();
        ranked.sort_by(|(_, a), (_, b)| {
            b.errors
                .cmp(&a.errors)
                .then_with(|| a.first_seen.cmp(&b.first_seen))
        });
        ranked
            .into_iter()
            .take(limit)
            .map(|(&char, tally)| Self {
                char,
                errors: tally.errors,
            })
            .collect()
    }
}

/// Speed for a single character, from its correct keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSpeed {
    /// Mean time to type the character in milliseconds
    pub average_time: i64,
    /// Characters per minute at that pace
    pub speed: u64,
    pub samples: usize,
}

impl CharacterSpeed {
    /// `None` when there are no samples
    pub fn calculate(deltas: &[TimeDelta]) -> Option<Self> {
        if deltas.is_empty() {
            return None;
        }
        let average = deltas.iter().map(|&delta| delta as f64).sum::<f64>() / deltas.len() as f64;

        Some(Self {
            average_time: average.round() as i64,
            speed: characters_per_minute(average).round() as u64,
            samples: deltas.len(),
        })
    }
}
