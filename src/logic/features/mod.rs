//! Features Module - Feature Extraction Engine
//!
//! Hand landmarks → normalized per-frame feature vectors.

pub mod extract;
pub mod landmark;
pub mod layout;
pub mod vector;


// Re-export common types
pub use extract::{extract, HandFeatureExtractor};
pub use landmark::{Handedness, HandObservation, Landmark, LANDMARKS_PER_HAND};
pub use layout::{feature_dimension, FeatureLayout, FEATURE_VERSION};
pub use vector::{FeatureExtractor, FeatureVector, Sequence};
