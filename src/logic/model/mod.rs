//! Model Module - Sequence classification engine
//!
//! Templates, DTW distance, classifier variants and the acceptance threshold.

pub mod classifier;
pub mod dtw;
pub mod threshold;
pub mod types;


// Re-export common types
pub use classifier::{ClassifierStatus, DtwClassifier, InferenceStats, SequenceClassifier};
pub use dtw::{align, dtw_distance, DtwAlignment, DtwConfig};
pub use threshold::{confidence_from_distance, AcceptancePolicy};
pub use types::{ClassificationResult, ClassifierKind, GestureModel, GestureTemplate, LabelDistance};
