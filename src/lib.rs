//! Gesture Core - dynamic hand-gesture recognition
//!
//! Hand landmarks → normalized feature vectors → recorded sequences →
//! nearest-template DTW classification.

pub mod config;
pub mod constants;
pub mod error;
pub mod logic;

pub use config::{AppConfig, RecognizerConfig};
pub use error::{AppError, AppResult, ConfigError, ModelError, SessionError, SourceError, StoreError};
pub use logic::capture::TemplateCapture;
pub use logic::features::{extract, FeatureVector, HandObservation, Handedness, Landmark, Sequence};
pub use logic::model::{ClassificationResult, GestureModel, GestureTemplate, SequenceClassifier};
pub use logic::session::{GestureSink, RecognitionSession, SessionCommand, TickReport};
pub use logic::source::{LandmarkSource, ReplaySource};
pub use logic::store::{FileModelStore, ModelArtifact, ModelStore};
