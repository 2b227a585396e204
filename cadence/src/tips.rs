//! Improvement tips
//!
//! Every rule is checked on its own and any number may fire. The tips are ordered by priority,
//! keeping rule order among equals, and padded with general drills when too few fired.

use serde::Serialize;
use strum::{Display, IntoStaticStr};

use crate::char_label;
use crate::config::Configuration;
use crate::evidence::Evidence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(into = "&'static str")]
pub enum TipCategory {
    Speed,
    Accuracy,
    Efficiency,
    Flow,
    Advanced,
    Ergonomics,
    General,
}

/// Ordered so that `High > Medium > Low`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, IntoStaticStr, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(into = "&'static str")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// What following a tip improves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize)]
#[serde(into = "&'static str")]
pub enum TipMetric {
    #[strum(serialize = "WPM")]
    Wpm,
    Accuracy,
    Keystrokes,
    Flow,
    Overall,
    Health,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tip {
    pub category: TipCategory,
    pub title: String,
    /// Advice, citing the session's own numbers
    pub description: String,
    pub priority: Priority,
    pub metric: TipMetric,
    /// Short numeric justification
    pub evidence: String,
}

pub(crate) struct TipRule {
    pub name: &'static str,
    pub applies: fn(&Evidence) -> bool,
    pub build: fn(&Evidence) -> Tip,
}

pub(crate) fn tip_rules() -> Vec<TipRule> {
    vec![
        TipRule {
            name: "slow keystrokes",
            applies: |e| e.rhythm.average_interval > 250,
            build: |e| Tip {
                category: TipCategory::Speed,
                title: "Increase keystroke velocity".to_string(),
                description: format!(
                    "Your average keystroke interval is {}ms. Practice 30-second speed bursts to bring it under 200ms.",
                    e.rhythm.average_interval
                ),
                priority: Priority::High,
                metric: TipMetric::Wpm,
                evidence: format!(
                    "Current interval: {}ms, Target: <200ms",
                    e.rhythm.average_interval
                ),
            },
        },
        TipRule {
            name: "uneven rhythm",
            applies: |e| e.rhythm.has_data() && e.rhythm.consistency < 70,
            build: |e| Tip {
                category: TipCategory::Speed,
                title: "Develop a consistent rhythm".to_string(),
                description: format!(
                    "Your rhythm consistency is {}%. Practice against a metronome at 120 BPM to build steady timing.",
                    e.rhythm.consistency
                ),
                priority: Priority::Medium,
                metric: TipMetric::Wpm,
                evidence: format!("Consistency: {}%, Target: >80%", e.rhythm.consistency),
            },
        },
        TipRule {
            name: "low accuracy",
            applies: |e| e.accuracy.adjusted < 95,
            build: |e| Tip {
                category: TipCategory::Accuracy,
                title: "Reduce your error rate with deliberate practice".to_string(),
                description: format!(
                    "Your accuracy is {}%. Slow down by 15-20% and focus on finger placement to reach 98%+.",
                    e.accuracy.adjusted
                ),
                priority: Priority::High,
                metric: TipMetric::Accuracy,
                evidence: format!(
                    "Current: {}%, Errors: {}/{}",
                    e.accuracy.adjusted, e.errors_committed, e.characters_typed
                ),
            },
        },
        TipRule {
            name: "problem characters",
            applies: |e| !e.problem_characters.is_empty(),
            build: |e| {
                let top = &e.problem_characters[..e.problem_characters.len().min(3)];
                let labels: Vec<String> = top.iter().map(|problem| char_label(problem.char)).collect();
                let errors: usize = top.iter().map(|problem| problem.errors).sum();
                let distribution: Vec<String> = top
                    .iter()
                    .map(|problem| format!("{}:{}", char_label(problem.char), problem.errors))
                    .collect();

                Tip {
                    category: TipCategory::Accuracy,
                    title: format!("Target problem characters: {}", labels.join(", ")),
                    description: format!(
                        "These characters caused {errors} errors. Drill them in isolation before returning to full passages."
                    ),
                    priority: Priority::High,
                    metric: TipMetric::Accuracy,
                    evidence: format!("Error distribution: {}", distribution.join(", ")),
                }
            },
        },
        TipRule {
            name: "correction overhead",
            applies: |e| e.correction_ratio > 0.15,
            build: |e| Tip {
                category: TipCategory::Efficiency,
                title: "Minimize correction overhead".to_string(),
                description: format!(
                    "You made {} corrections ({}% correction rate). Preview upcoming text to reduce backspacing.",
                    e.corrections_made,
                    e.correction_percent()
                ),
                priority: Priority::Medium,
                metric: TipMetric::Keystrokes,
                evidence: format!(
                    "Corrections: {}, Backspaces: {}",
                    e.corrections_made, e.backspaces
                ),
            },
        },
        TipRule {
            name: "error cascades",
            applies: |e| e.max_consecutive_errors > 3,
            build: |e| Tip {
                category: TipCategory::Efficiency,
                title: "Break error cascades".to_string(),
                description: format!(
                    "Your longest run of errors was {}. After two misses in a row, pause briefly to reset focus.",
                    e.max_consecutive_errors
                ),
                priority: Priority::Medium,
                metric: TipMetric::Keystrokes,
                evidence: format!("Max consecutive errors: {}", e.max_consecutive_errors),
            },
        },
        TipRule {
            name: "interruptions",
            applies: |e| e.flow_interruptions > 4,
            build: |e| Tip {
                category: TipCategory::Flow,
                title: "Reduce typing interruptions".to_string(),
                description: format!(
                    "You paused {} times for more than a second. Read 2-3 words ahead to keep a continuous flow.",
                    e.flow_interruptions
                ),
                priority: Priority::Low,
                metric: TipMetric::Flow,
                evidence: format!(
                    "Interruptions: {}, Avg pause: {}ms",
                    e.flow_interruptions, e.mean_pause
                ),
            },
        },
        TipRule {
            name: "read ahead",
            applies: |e| {
                e.rhythm.has_data() && e.rhythm.average_interval < 200 && e.accuracy.adjusted > 95
            },
            build: |e| Tip {
                category: TipCategory::Advanced,
                title: "Focus on text preview skills".to_string(),
                description: format!(
                    "Your fundamentals are solid. Practice reading 4-5 words ahead while holding your {} CPM pace.",
                    e.avg_speed
                ),
                priority: Priority::Low,
                metric: TipMetric::Overall,
                evidence: format!(
                    "Speed: {} CPM, Accuracy: {}%",
                    e.avg_speed, e.accuracy.adjusted
                ),
            },
        },
        TipRule {
            name: "harder material",
            applies: |e| e.rhythm.consistency > 85 && e.correction_ratio < 0.08,
            build: |e| Tip {
                category: TipCategory::Advanced,
                title: "Work on complex text patterns".to_string(),
                description: format!(
                    "Your consistency ({}%) and low correction rate ({}%) suggest you are ready for code and technical text.",
                    e.rhythm.consistency,
                    e.correction_percent()
                ),
                priority: Priority::Low,
                metric: TipMetric::Overall,
                evidence: format!(
                    "Consistency: {}%, Correction rate: {}%",
                    e.rhythm.consistency,
                    e.correction_percent()
                ),
            },
        },
        TipRule {
            name: "long session",
            applies: |e| e.key_events > 500,
            build: |e| Tip {
                category: TipCategory::Ergonomics,
                title: "Maintain proper posture during long sessions".to_string(),
                description: format!(
                    "You typed {} keystrokes. Take a break every 500-1000 keystrokes to prevent strain.",
                    e.key_events
                ),
                priority: Priority::Low,
                metric: TipMetric::Health,
                evidence: format!("Session keystrokes: {}", e.key_events),
            },
        },
    ]
}

/// General drills used to pad sparse results, in order of use
const GENERAL_DRILLS: [(&str, &str); 4] = [
    (
        "Establish a structured daily drill block",
        "Do one 5-minute precision warmup, three focused speed bursts and a cooldown passage to consolidate improvements.",
    ),
    (
        "Alternate accuracy and speed days",
        "Spend one session deliberately below your usual pace and the next pushing slightly above it.",
    ),
    (
        "Warm up before timed attempts",
        "Type a familiar passage for two minutes before each test so the first keystrokes are not your slowest.",
    ),
    (
        "Review every session",
        "Compare your accuracy and rhythm with earlier attempts and pick one weakness to drill next.",
    ),
];

/// Run every rule, then rank, pad and cut the result
pub(crate) fn generate(evidence: &Evidence, config: &Configuration) -> Vec<Tip> {
    let mut tips: Vec<Tip> = tip_rules()
        .into_iter()
        .filter(|rule| (rule.applies)(evidence))
        .inspect(|rule| log::trace!("tip rule '{}' fired", rule.name))
        .map(|rule| (rule.build)(evidence))
        .collect();

    if tips.len() < config.min_tips {
        let priority = if tips.len() <= 2 {
            Priority::High
        } else {
            Priority::Medium
        };
        let missing = config.min_tips - tips.len();
        tips.extend(
            GENERAL_DRILLS
                .iter()
                .take(missing)
                .map(|&(title, description)| Tip {
                    category: TipCategory::General,
                    title: title.to_string(),
                    description: description.to_string(),
                    priority,
                    metric: TipMetric::Overall,
                    evidence: "Balanced regimen".to_string(),
                }),
        );
    }

    // Stable, so rule order survives among equal priorities
    tips.sort_by(|a, b| b.priority.cmp(&a.priority));
    tips.truncate(config.max_tips);
    tips
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::tests::{empty, steady};
    use crate::metrics::{ProblemCharacter, TrueAccuracy};

    fn fired(evidence: &Evidence) -> Vec<&'static str> {
        tip_rules()
            .into_iter()
            .filter(|rule| (rule.applies)(evidence))
            .map(|rule| rule.name)
            .collect()
    }

    fn is_sorted(tips: &[Tip]) -> bool {
        tips.windows(2).all(|pair| pair[0].priority >= pair[1].priority)
    }

    #[test]
    fn test_priority_order() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        assert_eq!(Priority::High.to_string(), "high");
        assert_eq!(TipCategory::Ergonomics.to_string(), "ERGONOMICS");
        assert_eq!(TipMetric::Wpm.to_string(), "WPM");
    }

    #[test]
    fn test_empty_session_gets_general_drills() {
        let tips = generate(&empty(), &Configuration::default());
        assert_eq!(tips.len(), 4);
        assert!(tips.iter().all(|tip| tip.category == TipCategory::General));
        assert!(tips.iter().all(|tip| tip.priority == Priority::High));
        assert_eq!(tips[0].title, "Establish a structured daily drill block");
    }

    #[test]
    fn test_slow_and_uneven() {
        let mut evidence = steady(60);
        evidence.rhythm.average_interval = 300;
        evidence.avg_speed = 200;
        assert_eq!(fired(&evidence), vec!["slow keystrokes", "uneven rhythm"]);
    }

    #[test]
    fn test_accuracy_tips() {
        let mut evidence = steady(75);
        evidence.rhythm.average_interval = 220;
        evidence.accuracy = TrueAccuracy::calculate(100, 90, 10, 0);
        evidence.errors_committed = 10;
        evidence.characters_typed = 100;
        evidence.problem_characters = vec![
            ProblemCharacter { char: ' ', errors: 4 },
            ProblemCharacter { char: 'e', errors: 3 },
            ProblemCharacter { char: 'r', errors: 2 },
            ProblemCharacter { char: 'x', errors: 1 },
        ];

        let tips = generate(&evidence, &Configuration::default());
        let accuracy = &tips[0];
        assert_eq!(accuracy.category, TipCategory::Accuracy);
        assert_eq!(accuracy.evidence, "Current: 90%, Errors: 10/100");

        let problems = &tips[1];
        assert_eq!(problems.title, "Target problem characters: SPACE, e, r");
        assert!(problems.description.starts_with("These characters caused 9 errors"));
        assert_eq!(problems.evidence, "Error distribution: SPACE:4, e:3, r:2");
    }

    #[test]
    fn test_efficiency_and_flow_tips() {
        let mut evidence = steady(75);
        evidence.rhythm.average_interval = 220;
        evidence.correction_ratio = 0.2;
        evidence.corrections_made = 40;
        evidence.backspaces = 40;
        evidence.max_consecutive_errors = 4;
        evidence.flow_interruptions = 5;
        evidence.mean_pause = 1_300;

        assert_eq!(
            fired(&evidence),
            vec!["correction overhead", "error cascades", "interruptions"]
        );

        let tips = generate(&evidence, &Configuration::default());
        assert_eq!(tips.len(), 4);
        assert_eq!(tips[0].category, TipCategory::Efficiency);
        assert_eq!(tips[0].evidence, "Corrections: 40, Backspaces: 40");
        assert_eq!(tips[1].title, "Break error cascades");
        // Three fired, so the filler is medium and lands before the low flow tip
        assert_eq!(tips[2].category, TipCategory::General);
        assert_eq!(tips[2].priority, Priority::Medium);
        assert_eq!(tips[3].category, TipCategory::Flow);
        assert_eq!(tips[3].evidence, "Interruptions: 5, Avg pause: 1300ms");
    }

    #[test]
    fn test_advanced_tips() {
        let evidence = steady(90);
        assert_eq!(fired(&evidence), vec!["read ahead", "harder material"]);

        let tips = generate(&evidence, &Configuration::default());
        assert_eq!(tips.len(), 4);
        assert!(tips[..2].iter().all(|tip| tip.category == TipCategory::General));
        assert_eq!(tips[2].evidence, "Speed: 400 CPM, Accuracy: 100%");
    }

    #[test]
    fn test_read_ahead_needs_rhythm() {
        assert!(!fired(&empty()).contains(&"read ahead"));
    }

    #[test]
    fn test_long_session() {
        let mut evidence = steady(75);
        evidence.key_events = 501;
        assert!(fired(&evidence).contains(&"long session"));
        evidence.key_events = 500;
        assert!(!fired(&evidence).contains(&"long session"));
    }

    #[test]
    fn test_capped_and_sorted() {
        let mut evidence = steady(40);
        evidence.rhythm.average_interval = 400;
        evidence.accuracy = TrueAccuracy::calculate(100, 80, 20, 0);
        evidence.problem_characters = vec![ProblemCharacter { char: 'a', errors: 20 }];
        evidence.correction_ratio = 0.3;
        evidence.max_consecutive_errors = 9;
        evidence.flow_interruptions = 12;
        evidence.key_events = 900;

        assert_eq!(fired(&evidence).len(), 8);
        let tips = generate(&evidence, &Configuration::default());
        assert_eq!(tips.len(), 6);
        assert!(is_sorted(&tips));
        assert!(tips[..3].iter().all(|tip| tip.priority == Priority::High));
        // Among equal priorities rule order is kept
        assert_eq!(tips[0].category, TipCategory::Speed);
        assert_eq!(tips[1].title, "Reduce your error rate with deliberate practice");
        assert_eq!(tips[3].title, "Develop a consistent rhythm");
    }

    #[test]
    fn test_custom_limits() {
        let config = Configuration {
            min_tips: 2,
            max_tips: 3,
            ..Configuration::default()
        };
        assert_eq!(generate(&empty(), &config).len(), 2);

        let config = Configuration {
            min_tips: 10,
            max_tips: 10,
            ..Configuration::default()
        };
        // Padding stops when the general drills run out
        assert_eq!(generate(&empty(), &config).len(), GENERAL_DRILLS.len());
    }
}
