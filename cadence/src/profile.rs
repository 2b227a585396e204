//! # Profile Module - Typing Personality
//!
//! A deterministic, rule-based classifier over the session metrics. It yields an archetype,
//! up to four supporting traits and up to three key findings.
//!
//! Rules live in ordered groups. Groups are evaluated independently and in order; inside a
//! group only the first matching rule applies. Every applied rule contributes its traits and
//! findings, but only the first applied rule that names an archetype sets it. The
//! speed/accuracy group therefore outranks the rhythm group for the archetype, while the rhythm
//! group's traits and findings are still reported.

use serde::Serialize;
use strum::{Display, IntoStaticStr};

use crate::char_label;
use crate::evidence::Evidence;
use crate::round_tenths;

const MAX_TRAITS: usize = 4;
const MAX_FINDINGS: usize = 3;

/// Behavioural label for a session
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize,
)]
#[serde(into = "&'static str")]
pub enum Archetype {
    #[default]
    #[strum(serialize = "Adaptive Typist")]
    Adaptive,
    #[strum(serialize = "Precision Perfectionist")]
    PrecisionPerfectionist,
    #[strum(serialize = "Velocity Typist")]
    Velocity,
    #[strum(serialize = "Rhythmic Typist")]
    Rhythmic,
    #[strum(serialize = "Variable Pace Typist")]
    VariablePace,
}

/// The numbers a profile was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetrics {
    /// Backspaces per keystroke, as a percentage
    pub correction_rate: u64,
    pub rhythm_consistency: u32,
    /// Flow interruptions per 50 keystrokes, one decimal place
    pub pause_frequency: f64,
    pub max_consecutive_errors: usize,
    /// Characters per minute
    pub avg_speed: u64,
    /// Adjusted accuracy
    pub accuracy: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityProfile {
    #[serde(rename = "type")]
    pub archetype: Archetype,
    pub traits: Vec<String>,
    pub key_findings: Vec<String>,
    pub metrics: ProfileMetrics,
}

/// One classification rule
pub(crate) struct Rule {
    pub name: &'static str,
    pub applies: fn(&Evidence) -> bool,
    pub archetype: Option<Archetype>,
    pub traits: fn(&Evidence) -> Vec<String>,
    pub findings: fn(&Evidence) -> Vec<String>,
}

/// Mutually exclusive rules; the first match wins
pub(crate) struct RuleGroup {
    pub name: &'static str,
    pub rules: Vec<Rule>,
}

impl RuleGroup {
    fn matching(&self, evidence: &Evidence) -> Option<&Rule> {
        self.rules.iter().find(|rule| (rule.applies)(evidence))
    }
}

fn no_traits(_: &Evidence) -> Vec<String> {
    Vec::new()
}

pub(crate) fn rule_groups() -> Vec<RuleGroup> {
    vec![
        RuleGroup {
            name: "speed and accuracy",
            rules: vec![
                Rule {
                    name: "precision perfectionist",
                    applies: |e| e.accuracy.adjusted >= 98 && e.correction_ratio > 0.12,
                    archetype: Some(Archetype::PrecisionPerfectionist),
                    traits: |e| {
                        vec![
                            "Maintains 98%+ accuracy through active correction".to_string(),
                            format!("Self-corrects {}% of keystrokes", e.correction_percent()),
                            format!(
                                "Quality-focused approach with {} total corrections",
                                e.corrections_made
                            ),
                        ]
                    },
                    findings: |e| {
                        vec![format!(
                            "High correction rate ({}%) indicates strong self-monitoring",
                            e.correction_percent()
                        )]
                    },
                },
                Rule {
                    name: "velocity",
                    applies: |e| e.avg_speed > 300 && e.accuracy.adjusted >= 92,
                    archetype: Some(Archetype::Velocity),
                    traits: |e| {
                        vec![
                            format!("Achieves {} characters per minute", e.avg_speed),
                            format!("Maintains {}% accuracy at high speed", e.accuracy.adjusted),
                            format!(
                                "Low correction rate ({}%) shows confidence",
                                e.correction_percent()
                            ),
                        ]
                    },
                    findings: |_| {
                        vec!["Speed-accuracy balance favors velocity over perfection".to_string()]
                    },
                },
            ],
        },
        // Too few samples is not a pace, so both rules need rhythm data
        RuleGroup {
            name: "rhythm",
            rules: vec![
                Rule {
                    name: "rhythmic",
                    applies: |e| e.rhythm.has_data() && e.rhythm.consistency >= 85,
                    archetype: Some(Archetype::Rhythmic),
                    traits: |e| {
                        vec![
                            format!(
                                "Exceptional timing consistency ({}%)",
                                e.rhythm.consistency
                            ),
                            format!(
                                "Standard deviation of {}ms between keystrokes",
                                e.rhythm.standard_deviation
                            ),
                            format!(
                                "Reliable {}ms average keystroke interval",
                                e.rhythm.average_interval
                            ),
                        ]
                    },
                    findings: |_| {
                        vec!["High rhythm consistency suggests developed muscle memory".to_string()]
                    },
                },
                Rule {
                    name: "variable pace",
                    applies: |e| e.rhythm.has_data() && e.rhythm.consistency < 50,
                    archetype: Some(Archetype::VariablePace),
                    traits: |e| {
                        vec![
                            format!(
                                "Highly variable timing ({}% consistency)",
                                e.rhythm.consistency
                            ),
                            "Adapts speed to text complexity".to_string(),
                            format!(
                                "Wide keystroke interval range (σ={}ms)",
                                e.rhythm.standard_deviation
                            ),
                        ]
                    },
                    findings: |_| {
                        vec!["Variable pace may indicate strategic speed adjustment".to_string()]
                    },
                },
            ],
        },
        RuleGroup {
            name: "flow",
            rules: vec![
                Rule {
                    name: "contemplative",
                    applies: |e| e.pause_frequency > 8.0,
                    archetype: None,
                    traits: |e| {
                        vec![
                            format!(
                                "Contemplative approach with {} strategic pauses",
                                e.flow_interruptions
                            ),
                            format!("Average pause duration: {}ms", e.mean_pause),
                        ]
                    },
                    findings: |_| {
                        vec!["Frequent pauses suggest text preview or planning behavior".to_string()]
                    },
                },
                Rule {
                    name: "sustained flow",
                    applies: |e| e.pause_frequency < 2.0,
                    archetype: None,
                    traits: |e| {
                        vec![
                            "Sustained flow state with minimal interruptions".to_string(),
                            format!(
                                "Only {} pauses over 1 second in the entire session",
                                e.flow_interruptions
                            ),
                        ]
                    },
                    findings: |_| {
                        vec!["Low pause frequency indicates strong sight-reading ability".to_string()]
                    },
                },
            ],
        },
        RuleGroup {
            name: "error pattern",
            rules: vec![
                Rule {
                    name: "focus lapses",
                    applies: |e| e.max_consecutive_errors > 5,
                    archetype: None,
                    traits: no_traits,
                    findings: |e| {
                        vec![format!(
                            "Max consecutive errors ({}) suggests occasional focus lapses",
                            e.max_consecutive_errors
                        )]
                    },
                },
                Rule {
                    name: "quick recovery",
                    applies: |e| e.max_consecutive_errors <= 1,
                    archetype: None,
                    traits: no_traits,
                    findings: |e| {
                        vec![format!(
                            "Excellent error recovery - max {} consecutive mistakes",
                            e.max_consecutive_errors
                        )]
                    },
                },
            ],
        },
        RuleGroup {
            name: "problem character",
            rules: vec![Rule {
                name: "primary challenge",
                applies: |e| !e.problem_characters.is_empty(),
                archetype: None,
                traits: no_traits,
                findings: |e| {
                    e.problem_characters
                        .first()
                        .map(|worst| {
                            format!(
                                "Primary challenge: '{}' character ({} errors)",
                                char_label(worst.char),
                                worst.errors
                            )
                        })
                        .into_iter()
                        .collect()
                },
            }],
        },
    ]
}

/// Classify a session
pub(crate) fn classify(evidence: &Evidence) -> PersonalityProfile {
    let mut archetype = Archetype::default();
    let mut traits = Vec::new();
    let mut key_findings = Vec::new();

    for group in rule_groups() {
        let Some(rule) = group.matching(evidence) else {
            continue;
        };
        log::trace!("profile rule '{}' applied from group '{}'", rule.name, group.name);

        if let Some(candidate) = rule.archetype
            && archetype == Archetype::default()
        {
            archetype = candidate;
        }
        traits.extend((rule.traits)(evidence));
        key_findings.extend((rule.findings)(evidence));
    }

    traits.truncate(MAX_TRAITS);
    key_findings.truncate(MAX_FINDINGS);

    PersonalityProfile {
        archetype,
        traits,
        key_findings,
        metrics: ProfileMetrics {
            correction_rate: evidence.correction_percent(),
            rhythm_consistency: evidence.rhythm.consistency,
            pause_frequency: round_tenths(evidence.pause_frequency),
            max_consecutive_errors: evidence.max_consecutive_errors,
            avg_speed: evidence.avg_speed,
            accuracy: evidence.accuracy.adjusted,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::tests::{empty, steady};
    use crate::metrics::{ProblemCharacter, TrueAccuracy};

    fn rule(group: &str, name: &str) -> Rule {
        rule_groups()
            .into_iter()
            .find(|candidate| candidate.name == group)
            .and_then(|group| group.rules.into_iter().find(|rule| rule.name == name))
            .unwrap()
    }

    #[test]
    fn test_untouched_session_stays_adaptive() {
        let profile = classify(&empty());
        assert_eq!(profile.archetype, Archetype::Adaptive);
        assert_eq!(profile.metrics.avg_speed, 0);
        assert_eq!(profile.metrics.accuracy, 100);
        assert_eq!(profile.metrics.rhythm_consistency, 0);
    }

    #[test]
    fn test_archetype_display() {
        assert_eq!(Archetype::Adaptive.to_string(), "Adaptive Typist");
        assert_eq!(
            Archetype::PrecisionPerfectionist.to_string(),
            "Precision Perfectionist"
        );
        assert_eq!(Archetype::VariablePace.to_string(), "Variable Pace Typist");
    }

    #[test]
    fn test_precision_perfectionist_rule() {
        let perfectionist = rule("speed and accuracy", "precision perfectionist");
        let mut evidence = empty();
        evidence.correction_ratio = 0.13;
        assert!((perfectionist.applies)(&evidence));

        evidence.correction_ratio = 0.12;
        assert!(!(perfectionist.applies)(&evidence));

        evidence.correction_ratio = 0.2;
        evidence.accuracy = TrueAccuracy::calculate(100, 92, 8, 0);
        assert!(!(perfectionist.applies)(&evidence));
    }

    #[test]
    fn test_velocity_rule() {
        let velocity = rule("speed and accuracy", "velocity");
        let mut evidence = steady(70);
        assert!((velocity.applies)(&evidence));

        evidence.avg_speed = 300;
        assert!(!(velocity.applies)(&evidence));
    }

    #[test]
    fn test_rhythm_rules_need_data() {
        let variable = rule("rhythm", "variable pace");
        assert!(!(variable.applies)(&empty()));
        assert!((variable.applies)(&steady(49)));
        assert!(!(variable.applies)(&steady(50)));

        let rhythmic = rule("rhythm", "rhythmic");
        assert!((rhythmic.applies)(&steady(85)));
        assert!(!(rhythmic.applies)(&steady(84)));
    }

    #[test]
    fn test_perfectionist_outranks_rhythm_for_archetype() {
        let mut evidence = steady(95);
        evidence.avg_speed = 200;
        evidence.correction_ratio = 0.2;

        let profile = classify(&evidence);
        assert_eq!(profile.archetype, Archetype::PrecisionPerfectionist);
        // Rhythm traits are still added after the perfectionist ones
        assert_eq!(profile.traits.len(), 4);
        assert_eq!(profile.traits[3], "Exceptional timing consistency (95%)");
        assert_eq!(
            profile.key_findings[1],
            "High rhythm consistency suggests developed muscle memory"
        );
    }

    #[test]
    fn test_rhythm_sets_archetype_when_still_default() {
        let mut evidence = steady(90);
        evidence.avg_speed = 250;
        assert_eq!(classify(&evidence).archetype, Archetype::Rhythmic);

        let mut evidence = steady(30);
        evidence.avg_speed = 250;
        assert_eq!(classify(&evidence).archetype, Archetype::VariablePace);
    }

    #[test]
    fn test_velocity_outranks_variable_pace() {
        let profile = classify(&steady(30));
        assert_eq!(profile.archetype, Archetype::Velocity);
        assert_eq!(profile.traits[0], "Achieves 400 characters per minute");
    }

    #[test]
    fn test_flow_rules() {
        let mut evidence = steady(70);
        evidence.avg_speed = 250;
        evidence.pause_frequency = 9.0;
        evidence.flow_interruptions = 36;
        evidence.mean_pause = 1_800;

        let profile = classify(&evidence);
        assert_eq!(profile.archetype, Archetype::Adaptive);
        assert_eq!(
            profile.traits,
            vec![
                "Contemplative approach with 36 strategic pauses".to_string(),
                "Average pause duration: 1800ms".to_string(),
            ]
        );

        evidence.pause_frequency = 5.0;
        assert!(classify(&evidence).traits.is_empty());
    }

    #[test]
    fn test_error_pattern_findings() {
        let mut evidence = steady(70);
        evidence.avg_speed = 250;
        evidence.pause_frequency = 5.0;

        evidence.max_consecutive_errors = 6;
        assert_eq!(
            classify(&evidence).key_findings,
            vec!["Max consecutive errors (6) suggests occasional focus lapses".to_string()]
        );

        evidence.max_consecutive_errors = 3;
        assert!(classify(&evidence).key_findings.is_empty());

        evidence.max_consecutive_errors = 1;
        assert_eq!(
            classify(&evidence).key_findings,
            vec!["Excellent error recovery - max 1 consecutive mistakes".to_string()]
        );
    }

    #[test]
    fn test_primary_challenge_labels_space() {
        let mut evidence = steady(70);
        evidence.avg_speed = 250;
        evidence.pause_frequency = 5.0;
        evidence.max_consecutive_errors = 3;
        evidence.problem_characters = vec![
            ProblemCharacter { char: ' ', errors: 4 },
            ProblemCharacter { char: 'q', errors: 2 },
        ];

        assert_eq!(
            classify(&evidence).key_findings,
            vec!["Primary challenge: 'SPACE' character (4 errors)".to_string()]
        );
    }

    #[test]
    fn test_traits_and_findings_are_truncated() {
        let mut evidence = steady(20);
        evidence.correction_ratio = 0.3;
        evidence.pause_frequency = 10.0;
        evidence.max_consecutive_errors = 8;
        evidence.problem_characters = vec![ProblemCharacter { char: 'z', errors: 9 }];

        let profile = classify(&evidence);
        assert_eq!(profile.archetype, Archetype::PrecisionPerfectionist);
        assert_eq!(profile.traits.len(), MAX_TRAITS);
        assert_eq!(profile.key_findings.len(), MAX_FINDINGS);
        // Insertion order, not importance
        assert_eq!(
            profile.key_findings[2],
            "Frequent pauses suggest text preview or planning behavior"
        );
    }

    #[test]
    fn test_metrics_block() {
        let mut evidence = steady(70);
        evidence.correction_ratio = 0.456;
        evidence.pause_frequency = 2.345;
        evidence.max_consecutive_errors = 2;

        let metrics = classify(&evidence).metrics;
        assert_eq!(metrics.correction_rate, 46);
        assert_eq!(metrics.rhythm_consistency, 70);
        assert_eq!(metrics.pause_frequency, 2.3);
        assert_eq!(metrics.max_consecutive_errors, 2);
        assert_eq!(metrics.avg_speed, 400);
        assert_eq!(metrics.accuracy, 100);
    }
}
