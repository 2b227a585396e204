use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use strum::EnumString;

use crate::{TimeDelta, Timestamp};

/// Named keys a host may report besides plain characters
///
/// Only [`NamedKey::Backspace`] affects the analytics. The others are kept in the event log
/// so the log mirrors what the typist actually pressed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum NamedKey {
    /// Delete the previous character
    Backspace,
    Enter,
    Tab,
    Shift,
    #[strum(serialize = "Control", serialize = "Ctrl")]
    Control,
    Alt,
    #[strum(default)]
    Other(String),
}

impl NamedKey {
    pub fn name(&self) -> &str {
        match self {
            Self::Backspace => "Backspace",
            Self::Enter => "Enter",
            Self::Tab => "Tab",
            Self::Shift => "Shift",
            Self::Control => "Control",
            Self::Alt => "Alt",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for NamedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single key press as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A content keystroke
    Char(char),
    /// A control action
    Named(NamedKey),
}

impl Key {
    /// The deletion sentinel
    pub const BACKSPACE: Self = Self::Named(NamedKey::Backspace);

    pub const fn is_deletion(&self) -> bool {
        matches!(self, Self::Named(NamedKey::Backspace))
    }

    pub const fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(char) => Some(*char),
            Self::Named(_) => None,
        }
    }
}

impl From<char> for Key {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<NamedKey> for Key {
    fn from(value: NamedKey) -> Self {
        Self::Named(value)
    }
}

/// Single-character strings are content keys; anything else names a control key
impl From<&str> for Key {
    fn from(value: &str) -> Self {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(char), None) => Self::Char(char),
            _ => Self::Named(
                NamedKey::from_str(value).unwrap_or_else(|_| NamedKey::Other(value.to_string())),
            ),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(char) => write!(f, "{char}"),
            Self::Named(named) => write!(f, "{named}"),
        }
    }
}

impl Serialize for Key {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A recorded keystroke. Never modified once logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeystrokeEvent {
    pub key: Key,
    /// The character expected at `position`, if the host knew one
    pub target: Option<char>,
    /// Host-computed; only meaningful for [`Key::Char`]
    pub is_correct: bool,
    pub timestamp: Timestamp,
    /// The host's own stream index, stored as given
    pub position: usize,
    /// Milliseconds since the previous event, `0` for the first
    pub time_delta: TimeDelta,
    /// Whether this keystroke deleted a character
    pub correction: bool,
}

/// Logged for every deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CorrectionRecord {
    pub timestamp: Timestamp,
    pub position: usize,
    /// Number of corrections recorded before this one
    pub index: usize,
}

/// Logged for every non-deletion gap above the pause threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PauseRecord {
    pub timestamp: Timestamp,
    pub duration: TimeDelta,
    pub position: usize,
}
