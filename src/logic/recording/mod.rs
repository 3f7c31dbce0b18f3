//! Recording Module - gesture window buffering

pub mod buffer;
pub mod controller;

pub use buffer::{BufferStatus, SequenceBuffer};
pub use controller::{
    CompletedRecording, RecordingController, RecordingOutcome, RecordingPurpose, RecordingState,
    StopReason,
};
