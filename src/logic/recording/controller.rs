//! Recording Controller - Idle/Recording state machine
//!
//! Buffers feature vectors between a start and a stop. Stops are manual,
//! by timeout (`recording_duration_ms`), or by cancel. The controller never
//! classifies; it hands completed sequences back to its owner.

use serde::{Deserialize, Serialize};

use super::buffer::{BufferStatus, SequenceBuffer};
use crate::config::RecognizerConfig;
use crate::constants::MAX_RECORDING_FRAMES;
use crate::logic::features::{FeatureVector, Sequence};

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordingState {
    Idle,
    Recording,
}

/// What the finished sequence is for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordingPurpose {
    /// Classify against the loaded model
    Recognize,
    /// Store as a template under this label
    Capture { label: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Manual,
    Timeout,
}

/// A recording that ended with at least one frame
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedRecording {
    pub sequence: Sequence,
    pub purpose: RecordingPurpose,
    pub reason: StopReason,
    pub started_at_ms: u64,
    pub ended_at_ms: u64,
}

/// Result of leaving the Recording state
#[derive(Debug, Clone, PartialEq)]
pub enum RecordingOutcome {
    Completed(CompletedRecording),
    /// No frame with hands was buffered; nothing to classify
    Empty {
        purpose: RecordingPurpose,
        reason: StopReason,
    },
}

// ============================================================================
// CONTROLLER
// ============================================================================

#[derive(Debug, Clone)]
pub struct RecordingController {
    state: RecordingState,
    buffer: SequenceBuffer,
    purpose: RecordingPurpose,
    started_at_ms: u64,
    recording_duration_ms: u64,
    auto_record_interval_ms: u64,
    last_auto_start_ms: Option<u64>,
}

impl RecordingController {
    pub fn new(dimension: usize, recording_duration_ms: u64, auto_record_interval_ms: u64) -> Self {
        Self {
            state: RecordingState::Idle,
            buffer: SequenceBuffer::new(dimension, MAX_RECORDING_FRAMES),
            purpose: RecordingPurpose::Recognize,
            started_at_ms: 0,
            recording_duration_ms,
            auto_record_interval_ms,
            last_auto_start_ms: None,
        }
    }

    pub fn from_config(config: &RecognizerConfig) -> Self {
        Self::new(
            config.feature_dimension(),
            config.recording_duration_ms,
            config.auto_record_interval_ms,
        )
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecordingState::Recording
    }

    pub fn recorded_frames(&self) -> usize {
        self.buffer.len()
    }

    pub fn purpose(&self) -> Option<&RecordingPurpose> {
        self.is_recording().then_some(&self.purpose)
    }

    pub fn buffer_status(&self) -> BufferStatus {
        self.buffer.status()
    }

    /// Milliseconds since start, 0 when idle
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        if self.is_recording() {
            now_ms.saturating_sub(self.started_at_ms)
        } else {
            0
        }
    }

    /// Begin a recording. A start while already recording is ignored.
    pub fn start(&mut self, now_ms: u64, purpose: RecordingPurpose) -> bool {
        if self.is_recording() {
            log::debug!("[Recorder] Start ignored: already recording");
            return false;
        }

        self.buffer.clear();
        self.started_at_ms = now_ms;
        self.purpose = purpose;
        self.state = RecordingState::Recording;
        log::debug!("[Recorder] Recording started at {}ms ({:?})", now_ms, self.purpose);
        true
    }

    /// Feed one frame tick. `features` is `None` when no hands were found.
    ///
    /// Returns an outcome when this tick hit the recording window.
    pub fn on_frame(&mut self, now_ms: u64, features: Option<FeatureVector>) -> Option<RecordingOutcome> {
        if !self.is_recording() {
            return None;
        }

        if let Some(features) = features {
            let had_drops = self.buffer.dropped() > 0;
            if !self.buffer.push(features) && !had_drops {
                log::warn!(
                    "[Recorder] Dropping frames: buffer full ({}) or dimension mismatch",
                    self.buffer.len()
                );
            }
        }

        if self.elapsed_ms(now_ms) >= self.recording_duration_ms {
            return Some(self.finish(now_ms, StopReason::Timeout));
        }
        None
    }

    /// Manual stop. `None` when not recording.
    pub fn stop(&mut self, now_ms: u64) -> Option<RecordingOutcome> {
        if !self.is_recording() {
            return None;
        }
        Some(self.finish(now_ms, StopReason::Manual))
    }

    /// Abort the recording and discard its frames. Returns discarded count.
    pub fn cancel(&mut self) -> usize {
        if !self.is_recording() {
            return 0;
        }
        let discarded = self.buffer.take().len();
        self.state = RecordingState::Idle;
        self.purpose = RecordingPurpose::Recognize;
        log::debug!("[Recorder] Recording cancelled, {} frames discarded", discarded);
        discarded
    }

    /// Auto-trigger policy: idle, enabled, interval elapsed, hands visible
    pub fn should_auto_start(&self, now_ms: u64, hands_detected: bool) -> bool {
        if self.is_recording() || self.auto_record_interval_ms == 0 || !hands_detected {
            return false;
        }
        match self.last_auto_start_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.auto_record_interval_ms,
        }
    }

    /// Start via the auto-trigger policy if it allows
    pub fn try_auto_start(&mut self, now_ms: u64, hands_detected: bool) -> bool {
        if !self.should_auto_start(now_ms, hands_detected) {
            return false;
        }
        self.last_auto_start_ms = Some(now_ms);
        log::debug!("[Recorder] Auto-trigger fired at {}ms", now_ms);
        self.start(now_ms, RecordingPurpose::Recognize)
    }

    fn finish(&mut self, now_ms: u64, reason: StopReason) -> RecordingOutcome {
        self.state = RecordingState::Idle;
        let sequence = self.buffer.take();
        let purpose = std::mem::replace(&mut self.purpose, RecordingPurpose::Recognize);

        if sequence.is_empty() {
            log::warn!(
                "[Recorder] Recording stopped ({:?}) with no hand frames, nothing to classify",
                reason
            );
            return RecordingOutcome::Empty { purpose, reason };
        }

        log::debug!(
            "[Recorder] Recording stopped ({:?}) after {}ms with {} frames",
            reason,
            now_ms.saturating_sub(self.started_at_ms),
            sequence.len()
        );

        RecordingOutcome::Completed(CompletedRecording {
            sequence,
            purpose,
            reason,
            started_at_ms: self.started_at_ms,
            ended_at_ms: now_ms,
        })
    }
}
