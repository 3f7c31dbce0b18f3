//! Feature Vector - Core data structure for DTW input
//!
//! One frame's normalized hand features. Length is fixed by the layout
//! (`feature_dimension(max_hands)`); the vector itself is a plain list so
//! stored models serialize as nested number arrays.

use serde::{Deserialize, Serialize};

use super::landmark::HandObservation;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f32>);

/// Ordered frames of one recording or template
pub type Sequence = Vec<FeatureVector>;

impl FeatureVector {
    /// Zero-filled vector (every slot empty)
    pub fn zeros(dimension: usize) -> Self {
        Self(vec![0.0; dimension])
    }

    pub fn from_values(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.0
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.0.get(index).copied()
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Euclidean (L2) distance. Callers guarantee equal lengths.
    pub fn distance(&self, other: &FeatureVector) -> f32 {
        debug_assert_eq!(self.len(), other.len());
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f32>()
            .sqrt()
    }

    pub fn into_values(self) -> Vec<f32> {
        self.0
    }
}

impl From<Vec<f32>> for FeatureVector {
    fn from(values: Vec<f32>) -> Self {
        Self::from_values(values)
    }
}

impl AsRef<[f32]> for FeatureVector {
    fn as_ref(&self) -> &[f32] {
        self.as_slice()
    }
}

// ============================================================================
// FEATURE EXTRACTOR TRAIT
// ============================================================================

/// Trait for per-frame feature extractors
pub trait FeatureExtractor {
    /// Length of every vector this extractor produces
    fn dimension(&self) -> usize;

    /// Turn one frame's hands into a vector of `dimension()` values
    fn extract(&self, observations: &[HandObservation]) -> FeatureVector;
}
