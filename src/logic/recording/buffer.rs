//! Sequence Buffer - frames of the active recording
//!
//! Lives for one recording only: filled while recording, taken on stop.

use serde::{Deserialize, Serialize};

use crate::logic::features::FeatureVector;

/// Frames captured during one recording window
#[derive(Debug, Clone)]
pub struct SequenceBuffer {
    frames: Vec<FeatureVector>,
    dimension: usize,
    capacity: usize,
    dropped: usize,
}

impl SequenceBuffer {
    pub fn new(dimension: usize, capacity: usize) -> Self {
        Self {
            frames: Vec::new(),
            dimension,
            capacity,
            dropped: 0,
        }
    }

    /// Append a frame. Frames of the wrong dimension, or past capacity,
    /// are dropped and counted.
    pub fn push(&mut self, features: FeatureVector) -> bool {
        if features.len() != self.dimension || self.frames.len() >= self.capacity {
            self.dropped += 1;
            return false;
        }
        self.frames.push(features);
        true
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Move the frames out, leaving the buffer empty
    pub fn take(&mut self) -> Vec<FeatureVector> {
        self.dropped = 0;
        std::mem::take(&mut self.frames)
    }

    pub fn clear(&mut self) {
        self.frames.clear();
        self.dropped = 0;
    }

    pub fn status(&self) -> BufferStatus {
        BufferStatus {
            current_size: self.frames.len(),
            capacity: self.capacity,
            dropped: self.dropped,
            fill_percent: if self.capacity > 0 {
                (self.frames.len() as f32 / self.capacity as f32 * 100.0).min(100.0)
            } else {
                0.0
            },
        }
    }
}

/// Buffer status information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferStatus {
    pub current_size: usize,
    pub capacity: usize,
    pub dropped: usize,
    pub fill_percent: f32,
}
