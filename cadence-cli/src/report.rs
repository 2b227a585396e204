use std::fmt;

use cadence::{Summary, char_label};
use serde::Serialize;

use crate::recording::Replay;

/// Words per minute, counting whitespace-separated words
pub fn compute_wpm(text: &str, elapsed_seconds: f64) -> u64 {
    if elapsed_seconds <= 0.0 {
        return 0;
    }
    let words = text.split_whitespace().count();
    (words as f64 / elapsed_seconds * 60.0).round() as u64
}

/// Formats seconds as `m:ss`
pub fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Rounded percentage, 0 when nothing was attempted
pub fn pct(correct: usize, attempted: usize) -> u64 {
    if attempted == 0 {
        return 0;
    }
    (correct as f64 / attempted as f64 * 100.0).round() as u64
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassStats {
    pub attempted: usize,
    pub correct: usize,
}

impl ClassStats {
    pub fn percent(&self) -> u64 {
        pct(self.correct, self.attempted)
    }
}

/// Per-position accuracy of the final text, grouped by the target character's class
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharacterClasses {
    pub letters: ClassStats,
    pub numbers: ClassStats,
    pub symbols: ClassStats,
}

impl CharacterClasses {
    pub fn build(typed: &str, target: &str) -> Self {
        let mut classes = Self::default();
        for (typed, expected) in typed.chars().zip(target.chars()) {
            let stats = if expected.is_ascii_alphabetic() {
                &mut classes.letters
            } else if expected.is_ascii_digit() {
                &mut classes.numbers
            } else {
                &mut classes.symbols
            };
            stats.attempted += 1;
            if typed == expected {
                stats.correct += 1;
            }
        }
        classes
    }
}

/// Everything a finished attempt shows: the screen's own numbers plus the analytics summary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub wpm: u64,
    pub elapsed_seconds: f64,
    pub typed: String,
    pub target: String,
    pub character_classes: CharacterClasses,
    pub analytics: Summary,
}

impl Report {
    pub fn new(replay: Replay, target: &str, analytics: Summary) -> Self {
        let elapsed_seconds = replay.elapsed_ms as f64 / 1000.0;
        Self {
            wpm: compute_wpm(&replay.typed, elapsed_seconds),
            elapsed_seconds,
            character_classes: CharacterClasses::build(&replay.typed, target),
            typed: replay.typed,
            target: target.to_string(),
            analytics,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = &self.analytics;
        let accuracy = &summary.accuracy;
        let rhythm = &summary.rhythm;

        writeln!(f, "Results")?;
        writeln!(f, "  WPM          {}", self.wpm)?;
        writeln!(f, "  Time         {}", format_time(self.elapsed_seconds as u64))?;
        writeln!(
            f,
            "  Accuracy     {}% (raw {}%, +{:.1} correction bonus)",
            accuracy.adjusted, accuracy.raw, accuracy.correction_bonus
        )?;
        if rhythm.has_data() {
            writeln!(
                f,
                "  Rhythm       {}% consistent, {}ms average interval",
                rhythm.consistency, rhythm.average_interval
            )?;
        } else {
            writeln!(f, "  Rhythm       not enough keystrokes")?;
        }
        writeln!(
            f,
            "  Keystrokes   {} ({} corrections, {} pauses)",
            summary.key_events, summary.corrections, summary.pause_events
        )?;

        writeln!(f)?;
        writeln!(f, "Character classes")?;
        for (name, stats) in [
            ("letters", self.character_classes.letters),
            ("numbers", self.character_classes.numbers),
            ("symbols", self.character_classes.symbols),
        ] {
            writeln!(
                f,
                "  {name:<12} {}/{} ({}%)",
                stats.correct,
                stats.attempted,
                stats.percent()
            )?;
        }

        if !summary.problem_characters.is_empty() {
            writeln!(f)?;
            writeln!(f, "Problem characters")?;
            for problem in &summary.problem_characters {
                writeln!(f, "  {:<12} {} errors", char_label(problem.char), problem.errors)?;
            }
        }

        let profile = &summary.personality;
        writeln!(f)?;
        writeln!(f, "Typing personality: {}", profile.archetype)?;
        for trait_ in &profile.traits {
            writeln!(f, "  + {trait_}")?;
        }
        for finding in &profile.key_findings {
            writeln!(f, "  - {finding}")?;
        }

        writeln!(f)?;
        writeln!(f, "Tips")?;
        for tip in &summary.tips {
            writeln!(f, "  [{}] {}: {}", tip.priority, tip.category, tip.title)?;
            writeln!(f, "      {}", tip.description)?;
            writeln!(f, "      {}", tip.evidence)?;
        }

        Ok(())
    }
}
