//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the feature schema**
//!
//! ## Rules:
//! 1. Change slot order, normalization anchors or per-hand layout → increment FEATURE_VERSION
//! 2. Stored models carry the layout hash; a mismatch is rejected at load time
//!
//! Layout per slot: `LANDMARKS_PER_HAND` points, each `[x, y, z]`, relative
//! to the wrist and divided by the wrist→middle-MCP distance.
//! Slots: left hand first, then right hand.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use super::landmark::{COORDS_PER_LANDMARK, LANDMARKS_PER_HAND, MIDDLE_MCP, WRIST};
use crate::error::ModelError;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

/// Values contributed by one hand slot
pub const VALUES_PER_HAND: usize = LANDMARKS_PER_HAND * COORDS_PER_LANDMARK;

/// Translation anchor
pub const ORIGIN_LANDMARK: usize = WRIST;

/// Hand-size anchor (distance ORIGIN → SCALE)
pub const SCALE_LANDMARK: usize = MIDDLE_MCP;

/// Floor for the hand-size estimate
pub const MIN_HAND_SCALE: f32 = 1e-6;

/// Feature vector length for a hand-count cap
pub const fn feature_dimension(max_hands: usize) -> usize {
    max_hands * VALUES_PER_HAND
}

/// Hand-count cap implied by a dimension, if it is a whole number of slots
pub fn max_hands_for_dimension(dimension: usize) -> Option<usize> {
    if dimension > 0 && dimension % VALUES_PER_HAND == 0 {
        Some(dimension / VALUES_PER_HAND)
    } else {
        None
    }
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over everything that shapes a feature vector
pub fn layout_hash(max_hands: usize) -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);
    hasher.update(&(max_hands as u32).to_le_bytes());
    hasher.update(&(LANDMARKS_PER_HAND as u32).to_le_bytes());
    hasher.update(&(COORDS_PER_LANDMARK as u32).to_le_bytes());
    hasher.update(&(ORIGIN_LANDMARK as u32).to_le_bytes());
    hasher.update(&(SCALE_LANDMARK as u32).to_le_bytes());
    hasher.update(b"slots:left,right");

    hasher.finalize()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureLayout {
    pub version: u8,
    pub max_hands: usize,
    pub dimension: usize,
    pub hash: u32,
}

impl FeatureLayout {
    pub fn new(max_hands: usize) -> Self {
        Self {
            version: FEATURE_VERSION,
            max_hands,
            dimension: feature_dimension(max_hands),
            hash: layout_hash(max_hands),
        }
    }

    /// Validate stored layout metadata against this layout
    pub fn validate(&self, version: u8, hash: u32) -> Result<(), ModelError> {
        if version != self.version || hash != self.hash {
            return Err(ModelError::LayoutMismatch {
                expected_version: self.version,
                expected_hash: self.hash,
                actual_version: version,
                actual_hash: hash,
            });
        }
        Ok(())
    }
}
