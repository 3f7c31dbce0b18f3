//! Error types
//!
//! One enum per concern. Classification itself never fails: a sequence that
//! cannot be matched yields `None` from the classifier, not an error.

use thiserror::Error;

/// Model construction / import errors.
///
/// Raised at load time so a dimension mismatch between a stored model and
/// the live extractor is an initialization failure, never a per-frame one.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unsupported model format version {found} (supported: {supported})")]
    UnsupportedFormat { found: u32, supported: u32 },

    #[error("feature dimension mismatch: model declares {model}, extractor produces {extractor}")]
    DimensionMismatch { model: usize, extractor: usize },

    #[error("template '{label}' sequence {sequence} frame {frame} has {found} values, expected {expected}")]
    FrameDimension {
        label: String,
        sequence: usize,
        frame: usize,
        found: usize,
        expected: usize,
    },

    #[error("template label must not be empty")]
    EmptyLabel,

    #[error("template '{label}' has no sequences")]
    EmptyTemplate { label: String },

    #[error("template '{label}' sequence {sequence} is empty")]
    EmptySequence { label: String, sequence: usize },

    #[error("template '{label}' sequence {sequence} contains non-finite values")]
    NonFinite { label: String, sequence: usize },

    #[error("feature layout mismatch: expected v{expected_version} ({expected_hash:08x}), got v{actual_version} ({actual_hash:08x})")]
    LayoutMismatch {
        expected_version: u8,
        expected_hash: u32,
        actual_version: u8,
        actual_hash: u32,
    },

    #[error("model checksum mismatch: expected {expected}, computed {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("no captured templates to commit")]
    NothingCaptured,
}

/// Model store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("model store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("model artifact is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("model artifact rejected: {0}")]
    Model(#[from] ModelError),
}

/// Landmark source errors
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("landmark source used before initialize()")]
    NotInitialized,

    #[error("invalid landmark source configuration: {0}")]
    InvalidConfig(String),

    #[error("hand {index} has {found} landmarks (expected {expected}) or non-finite coordinates")]
    MalformedObservation {
        index: usize,
        found: usize,
        expected: usize,
    },

    #[error("detection failed: {0}")]
    Detection(String),

    #[error("trace line {line}: {source}")]
    Trace {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("trace I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("cannot read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Session initialization / model swap errors.
///
/// An initialization error disables recognition; the session keeps running.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("landmark source failed to initialize: {0}")]
    Source(#[from] SourceError),

    #[error("model could not be loaded: {0}")]
    Store(#[from] StoreError),

    #[error("model rejected: {0}")]
    Model(#[from] ModelError),
}

/// Top-level error for the replay binary
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

pub type AppResult<T> = Result<T, AppError>;
