//! Hand Landmarks - detector output types
//!
//! 21 keypoints per hand in the detector's fixed anatomical order.

use serde::{Deserialize, Serialize};

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Keypoints per hand
pub const LANDMARKS_PER_HAND: usize = 21;

/// x, y, z
pub const COORDS_PER_LANDMARK: usize = 3;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// 3D point in normalized image coordinates.
///
/// Serialized as a compact `[x, y, z]` array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Landmark {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Landmark> for [f32; 3] {
    fn from(l: Landmark) -> Self {
        [l.x, l.y, l.z]
    }
}

/// Handedness tag reported by the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    Right,
    #[serde(other)]
    Unknown,
}

impl Handedness {
    /// Slot this hand claims first. Left precedes right.
    pub fn preferred_slot(&self) -> usize {
        match self {
            Handedness::Left => 0,
            Handedness::Right => 1,
            Handedness::Unknown => 0,
        }
    }

    /// Placement priority: tagged hands claim their slots before untagged ones
    pub(crate) fn placement_rank(&self) -> u8 {
        match self {
            Handedness::Left => 0,
            Handedness::Right => 1,
            Handedness::Unknown => 2,
        }
    }
}

fn default_score() -> f32 {
    1.0
}

/// One detected hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandObservation {
    pub handedness: Handedness,

    /// Detector confidence for this hand
    #[serde(default = "default_score")]
    pub score: f32,

    pub landmarks: Vec<Landmark>,
}

impl HandObservation {
    pub fn new(handedness: Handedness, landmarks: Vec<Landmark>) -> Self {
        Self {
            handedness,
            score: default_score(),
            landmarks,
        }
    }

    /// Full 21-point hand with finite coordinates
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() == LANDMARKS_PER_HAND && self.landmarks.iter().all(Landmark::is_finite)
    }

    pub fn wrist(&self) -> Option<&Landmark> {
        self.landmarks.get(WRIST)
    }
}
