use std::collections::BTreeMap;

use serde::Serialize;

use crate::metrics::{CharacterSpeed, ProblemCharacter, Rhythm, TrueAccuracy};
use crate::profile::PersonalityProfile;
use crate::tips::Tip;

/// Snapshot of an attempt's analytics
///
/// Built by [`TypingAnalytics::summary`](crate::TypingAnalytics::summary). This is what hosts
/// display, chart and merge into their own results; it serializes with camelCase keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Every logged event, deletions and named keys included
    pub key_events: usize,
    pub corrections: usize,
    pub backspaces: usize,
    pub pause_events: usize,
    pub flow_interruptions: usize,
    pub max_consecutive_errors: usize,
    pub accuracy: TrueAccuracy,
    pub rhythm: Rhythm,
    pub problem_characters: Vec<ProblemCharacter>,
    pub character_speeds: BTreeMap<char, CharacterSpeed>,
    pub personality: PersonalityProfile,
    pub tips: Vec<Tip>,
}
