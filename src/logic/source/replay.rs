//! Replay Source - recorded landmark traces
//!
//! A trace is JSON lines, one frame per line:
//!
//! ```json
//! {"timestampMs": 0, "hands": [{"handedness": "right", "score": 0.93, "landmarks": [[0.51, 0.62, 0.0], ...]}]}
//! {"timestampMs": 16, "hands": [], "command": "start"}
//! {"timestampMs": 32, "hands": [], "command": {"capture": {"label": "hello"}}}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use serde::{Deserialize, Serialize};

use super::{DetectorConfig, LandmarkSource};
use crate::error::SourceError;
use crate::logic::features::{HandObservation, LANDMARKS_PER_HAND};

/// Scripted user action attached to a frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TraceCommand {
    Start,
    Stop,
    Cancel,
    Capture { label: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceFrame {
    pub timestamp_ms: u64,

    #[serde(default)]
    pub hands: Vec<HandObservation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<TraceCommand>,
}

impl TraceFrame {
    pub fn empty(timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms,
            hands: Vec::new(),
            command: None,
        }
    }
}

/// Parse a JSON-lines trace
pub fn parse_trace(text: &str) -> Result<Vec<TraceFrame>, SourceError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| SourceError::Trace {
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// `LandmarkSource` over trace frames
#[derive(Debug, Default)]
pub struct ReplaySource {
    config: Option<DetectorConfig>,
    frames_seen: u64,
}

impl ReplaySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }
}

impl LandmarkSource for ReplaySource {
    type Frame = TraceFrame;

    fn initialize(&mut self, config: &DetectorConfig) -> Result<(), SourceError> {
        if config.max_hands == 0 {
            return Err(SourceError::InvalidConfig("maxHands must be at least 1".into()));
        }
        self.config = Some(*config);
        self.frames_seen = 0;
        log::debug!(
            "[ReplaySource] Initialized: maxHands={}, minDetectionConfidence={}",
            config.max_hands,
            config.min_detection_confidence
        );
        Ok(())
    }

    fn detect(&mut self, frame: &TraceFrame, _timestamp_ms: u64) -> Result<Vec<HandObservation>, SourceError> {
        let config = self.config.ok_or(SourceError::NotInitialized)?;
        self.frames_seen += 1;

        if let Some((index, hand)) = frame.hands.iter().enumerate().find(|(_, h)| !h.is_complete()) {
            return Err(SourceError::MalformedObservation {
                index,
                found: hand.landmarks.len(),
                expected: LANDMARKS_PER_HAND,
            });
        }

        Ok(frame
            .hands
            .iter()
            .filter(|h| h.score >= config.min_detection_confidence)
            .take(config.max_hands)
            .cloned()
            .collect())
    }

    fn close(&mut self) {
        self.config = None;
    }
}
