use std::path::{Path, PathBuf};

use cadence::{Clock, Key, Timestamp, TypingAnalytics};
use derive_more::From;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, From, Error)]
pub enum RecordingError {
    #[error("Failed to read recording '{path}': {error}")]
    #[from(skip)]
    ReadFile {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("Failed to parse recording: {0}")]
    ParseFile(toml::de::Error),

    #[error("Recording has no target text")]
    EmptyTarget,
}

/// A captured attempt: the text that was shown and every key pressed while typing it
#[derive(Debug, Deserialize)]
pub struct Recording {
    pub target: String,
    #[serde(default, rename = "keystroke")]
    pub keystrokes: Vec<RecordedKey>,
}

#[derive(Debug, Deserialize)]
pub struct RecordedKey {
    /// One character, or a key name such as `Backspace`
    pub key: String,
    /// Milliseconds since the attempt started
    pub at: Timestamp,
}

/// What the typing screen would have shown once the attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    pub typed: String,
    pub elapsed_ms: Timestamp,
}

impl Recording {
    pub fn load(path: &Path) -> Result<Self, RecordingError> {
        let content = std::fs::read_to_string(path).map_err(|error| RecordingError::ReadFile {
            path: path.to_path_buf(),
            error,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, RecordingError> {
        let recording: Self = toml::from_str(content)?;
        if recording.target.is_empty() {
            return Err(RecordingError::EmptyTarget);
        }
        Ok(recording)
    }

    /// Feeds the keystrokes to `analytics` the way the typing screen does
    ///
    /// The screen keeps a buffer of typed characters. Each character is judged against the
    /// target character at the buffer's length, Backspace pops the buffer and other named
    /// keys are logged without a target. The attempt ends once the buffer is as long as the
    /// target; later keystrokes are dropped.
    pub fn replay<C: Clock>(&self, analytics: &mut TypingAnalytics<C>) -> Replay {
        let target: Vec<char> = self.target.chars().collect();
        let mut typed: Vec<char> = Vec::with_capacity(target.len());
        let mut elapsed_ms = 0;

        for (index, recorded) in self.keystrokes.iter().enumerate() {
            if typed.len() >= target.len() {
                log::debug!(
                    "Attempt finished, dropping {} trailing keystrokes",
                    self.keystrokes.len() - index
                );
                break;
            }

            let key = Key::from(recorded.key.as_str());
            let position = typed.len();

            match key.as_char() {
                Some(char) => {
                    let expected = target.get(position).copied();
                    let is_correct = expected == Some(char);
                    analytics.record_keystroke(char, expected, is_correct, Some(recorded.at), position);
                    typed.push(char);
                }
                None => {
                    let deletes = key.is_deletion();
                    analytics.record_keystroke(key, None, true, Some(recorded.at), position);
                    if deletes {
                        typed.pop();
                    }
                }
            }

            elapsed_ms = recorded.at;
        }

        Replay {
            typed: typed.into_iter().collect(),
            elapsed_ms,
        }
    }
}
