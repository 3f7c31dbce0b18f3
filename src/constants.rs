//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.

/// Default number of hand slots in a feature vector
pub const DEFAULT_MAX_HANDS: usize = 2;

/// Default landmark detector acceptance score
pub const DEFAULT_MIN_DETECTION_CONFIDENCE: f32 = 0.5;

/// Default classifier acceptance threshold (caller-side policy)
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.6;

/// Default recording window before auto-stop (ms)
pub const DEFAULT_RECORDING_DURATION_MS: u64 = 2_000;

/// Auto-trigger interval (ms). 0 disables auto-trigger.
pub const DEFAULT_AUTO_RECORD_INTERVAL_MS: u64 = 0;

/// Upper bound on buffered frames per recording.
///
/// Keeps classification inside the frame budget even when a caller
/// configures a very long recording window.
pub const MAX_RECORDING_FRAMES: usize = 600;

/// Default display refresh rate for the replay driver (Hz)
pub const DEFAULT_TICK_HZ: u32 = 60;

/// Model file name under the data directory
pub const DEFAULT_MODEL_FILE: &str = "gesture_model_v1.json";

/// App name (data directory)
pub const APP_NAME: &str = "gesture-core";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Per-frame budget at 60 Hz (µs). Classification slower than this is logged.
pub const FRAME_BUDGET_US: u64 = 16_667;
