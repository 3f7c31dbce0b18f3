//! Logic Module - Recognition engines
//!
//! ## Pipeline
//! - `source/` - Landmark source contract + trace replay
//! - `features/` - Landmark → feature vector extraction
//! - `recording/` - Recording state machine and buffer
//! - `model/` - DTW classifier, templates, threshold
//! - `store/` - Model artifact format and persistence
//! - `capture` - Template capture for retraining
//! - `session` - Per-frame orchestration

pub mod capture;
pub mod features;
pub mod model;
pub mod recording;
pub mod session;
pub mod source;
pub mod store;

#[cfg(test)]
mod testing;
