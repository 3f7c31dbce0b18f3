//! Synthetic hands and gestures shared by unit tests.

use std::f32::consts::PI;

use crate::logic::features::extract::extract;
use crate::logic::features::landmark::{Handedness, HandObservation, Landmark, LANDMARKS_PER_HAND};
use crate::logic::features::vector::{FeatureVector, Sequence};

/// Open hand in a local frame: wrist at origin, fingers fanned upward
/// (negative y). Wrist→middle-MCP distance is 1.0.
pub fn base_hand() -> Vec<Landmark> {
    let mut points = Vec::with_capacity(LANDMARKS_PER_HAND);
    points.push(Landmark::new(0.0, 0.0, 0.0));
    for i in 1..LANDMARKS_PER_HAND {
        let finger = ((i - 1) / 4) as f32;
        let joint = ((i - 1) % 4) as f32;
        let phi = -0.6 + 0.3 * finger;
        let r = 1.0 + 0.3 * joint;
        points.push(Landmark::new(r * phi.sin(), -r * phi.cos(), 0.02 * joint));
    }
    points
}

/// Where and how a synthetic hand is placed in the image
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub offset: (f32, f32),
    pub scale: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self { offset: (0.5, 0.5), scale: 0.1 }
    }
}

/// Base hand rotated by `roll` (image plane) then `pitch` (about x)
pub fn posed_hand(handedness: Handedness, roll: f32, pitch: f32, at: Placement) -> HandObservation {
    let landmarks = base_hand()
        .into_iter()
        .map(|p| {
            let x1 = p.x * roll.cos() - p.y * roll.sin();
            let y1 = p.x * roll.sin() + p.y * roll.cos();
            let z1 = p.z;
            let y2 = y1 * pitch.cos() - z1 * pitch.sin();
            let z2 = y1 * pitch.sin() + z1 * pitch.cos();
            Landmark::new(at.offset.0 + x1 * at.scale, at.offset.1 + y2 * at.scale, z2 * at.scale)
        })
        .collect();
    HandObservation::new(handedness, landmarks)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Side-to-side rotation in the image plane
    Roll,
    /// Forward/back tilt
    Pitch,
}

/// One sinusoidal cycle of `motion`, sampled at `frames` evenly spaced
/// instants, as raw observations (one right hand per frame).
pub fn wave_observations(frames: usize, amplitude: f32, motion: Motion, at: Placement) -> Vec<HandObservation> {
    (0..frames)
        .map(|k| {
            let t = if frames > 1 { k as f32 / (frames - 1) as f32 } else { 0.0 };
            let angle = amplitude * (2.0 * PI * t).sin();
            match motion {
                Motion::Roll => posed_hand(Handedness::Right, angle, 0.0, at),
                Motion::Pitch => posed_hand(Handedness::Right, 0.0, angle, at),
            }
        })
        .collect()
}

/// Same as `wave_observations`, extracted with one hand slot
pub fn wave_sequence(frames: usize, amplitude: f32, motion: Motion, at: Placement) -> Sequence {
    wave_observations(frames, amplitude, motion, at)
        .into_iter()
        .map(|hand| extract(&[hand], 1))
        .collect()
}

/// Short sequence of constant vectors
pub fn flat_sequence(frames: usize, value: f32, dimension: usize) -> Sequence {
    (0..frames)
        .map(|_| FeatureVector::from_values(vec![value; dimension]))
        .collect()
}
