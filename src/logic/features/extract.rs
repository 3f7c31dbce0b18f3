//! Hand Feature Extraction
//!
//! Frame of hand observations → fixed-length, translation- and
//! scale-invariant vector. Pure: no state, no I/O.

use super::landmark::{HandObservation, Landmark};
use super::layout::{
    feature_dimension, MIN_HAND_SCALE, ORIGIN_LANDMARK, SCALE_LANDMARK, VALUES_PER_HAND,
};
use super::vector::{FeatureExtractor, FeatureVector};

/// Extract one frame.
///
/// Only the first `max_hands` complete observations (detection order) are
/// used. Left hands take slot 0, right hands slot 1, untagged hands the first
/// free slot. Empty slots stay zero.
pub fn extract(observations: &[HandObservation], max_hands: usize) -> FeatureVector {
    let mut vector = FeatureVector::zeros(feature_dimension(max_hands));

    for (slot, hand) in assign_slots(observations, max_hands).into_iter().enumerate() {
        if let Some(hand) = hand {
            let start = slot * VALUES_PER_HAND;
            write_hand(hand, &mut vector.as_mut_slice()[start..start + VALUES_PER_HAND]);
        }
    }

    vector
}

fn assign_slots(observations: &[HandObservation], max_hands: usize) -> Vec<Option<&HandObservation>> {
    let mut slots: Vec<Option<&HandObservation>> = vec![None; max_hands];
    if max_hands == 0 {
        return slots;
    }

    let mut hands: Vec<&HandObservation> = observations
        .iter()
        .filter(|h| h.is_complete())
        .take(max_hands)
        .collect();
    // Stable: equal handedness keeps detection order
    hands.sort_by_key(|h| h.handedness.placement_rank());

    for hand in hands {
        let preferred = hand.handedness.preferred_slot().min(max_hands - 1);
        let free = (0..max_hands)
            .map(|offset| (preferred + offset) % max_hands)
            .find(|&slot| slots[slot].is_none());
        if let Some(slot) = free {
            slots[slot] = Some(hand);
        }
    }

    slots
}

fn write_hand(hand: &HandObservation, out: &mut [f32]) {
    let origin = hand.landmarks[ORIGIN_LANDMARK];
    let scale = origin.distance(&hand.landmarks[SCALE_LANDMARK]).max(MIN_HAND_SCALE);

    for (point, chunk) in hand.landmarks.iter().zip(out.chunks_exact_mut(3)) {
        let Landmark { x, y, z } = *point;
        chunk[0] = (x - origin.x) / scale;
        chunk[1] = (y - origin.y) / scale;
        chunk[2] = (z - origin.z) / scale;
    }
}

/// Extractor bound to a hand-count cap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandFeatureExtractor {
    max_hands: usize,
}

impl HandFeatureExtractor {
    pub fn new(max_hands: usize) -> Self {
        Self { max_hands }
    }

    pub fn max_hands(&self) -> usize {
        self.max_hands
    }
}

impl FeatureExtractor for HandFeatureExtractor {
    fn dimension(&self) -> usize {
        feature_dimension(self.max_hands)
    }

    fn extract(&self, observations: &[HandObservation]) -> FeatureVector {
        extract(observations, self.max_hands)
    }
}
