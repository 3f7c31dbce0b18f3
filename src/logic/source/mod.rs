//! Source Module - landmark detector contract
//!
//! The detector itself is external. Implementations must keep a stable
//! per-hand landmark order and count across calls.

pub mod replay;

pub use replay::{parse_trace, ReplaySource, TraceCommand, TraceFrame};

use serde::{Deserialize, Serialize};

use crate::config::RecognizerConfig;
use crate::error::SourceError;
use crate::logic::features::HandObservation;

/// Detector settings passed to `initialize`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectorConfig {
    pub max_hands: usize,
    pub min_detection_confidence: f32,
}

impl From<&RecognizerConfig> for DetectorConfig {
    fn from(config: &RecognizerConfig) -> Self {
        Self {
            max_hands: config.max_hands,
            min_detection_confidence: config.min_detection_confidence,
        }
    }
}

/// Per-frame hand landmark provider
pub trait LandmarkSource {
    /// Whatever the detector reads a frame from (video frame, trace line, ...)
    type Frame;

    fn initialize(&mut self, config: &DetectorConfig) -> Result<(), SourceError>;

    /// Hands visible in `frame`. Called once per tick.
    fn detect(&mut self, frame: &Self::Frame, timestamp_ms: u64) -> Result<Vec<HandObservation>, SourceError>;

    /// Release detector resources
    fn close(&mut self);
}
