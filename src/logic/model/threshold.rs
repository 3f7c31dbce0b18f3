//! Confidence mapping and acceptance threshold
//!
//! The classifier reports `confidence = 1 / (1 + distance)`. Whether a
//! result counts as a detection is the caller's policy, kept here.

use serde::{Deserialize, Serialize};

use super::types::ClassificationResult;
use crate::constants::DEFAULT_MIN_CONFIDENCE;

/// Map a DTW distance into [0, 1]. Monotone non-increasing, 0 → 1.
pub fn confidence_from_distance(distance: f32) -> f32 {
    if distance.is_nan() {
        return 0.0;
    }
    let d = distance.max(0.0);
    if d.is_infinite() {
        return 0.0;
    }
    1.0 / (1.0 + d)
}

/// Minimum-confidence acceptance policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptancePolicy {
    /// Results below this are "no match"
    pub min_confidence: f32,
}

impl Default for AcceptancePolicy {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

impl AcceptancePolicy {
    pub fn new(min_confidence: f32) -> Self {
        Self {
            min_confidence: min_confidence.clamp(0.0, 1.0),
        }
    }

    pub fn accepts(&self, result: &ClassificationResult) -> bool {
        result.confidence >= self.min_confidence
    }
}
