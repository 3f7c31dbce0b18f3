//! Configuration module
//!
//! `RecognizerConfig` is the recognized option surface of the core.
//! Values come from defaults, an optional JSON file, then environment
//! overrides (`GESTURE_*`). `AppConfig` is only used by the replay driver.

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::logic::features::layout::feature_dimension;
use crate::logic::model::{AcceptancePolicy, DtwConfig};

// ============================================================================
// RECOGNIZER CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecognizerConfig {
    /// Hand-count cap. Fixes the feature dimension.
    pub max_hands: usize,

    /// Landmark source acceptance score
    pub min_detection_confidence: f32,

    /// Classifier acceptance threshold
    pub min_confidence: f32,

    /// Auto-stop window
    pub recording_duration_ms: u64,

    /// Auto-trigger interval, 0 disables
    pub auto_record_interval_ms: u64,

    /// Sakoe-Chiba band half-width. `None` runs unbounded DTW.
    pub dtw_window: Option<usize>,

    /// Divide the DTW cost by the warping path length
    pub normalize_distance: bool,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            max_hands: DEFAULT_MAX_HANDS,
            min_detection_confidence: DEFAULT_MIN_DETECTION_CONFIDENCE,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            recording_duration_ms: DEFAULT_RECORDING_DURATION_MS,
            auto_record_interval_ms: DEFAULT_AUTO_RECORD_INTERVAL_MS,
            dtw_window: None,
            normalize_distance: true,
        }
    }
}

impl RecognizerConfig {
    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read(path)?;
        let config: RecognizerConfig = serde_json::from_slice(&data)?;
        Ok(config)
    }

    /// Defaults + process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Apply `GESTURE_*` overrides from an arbitrary lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_var(&lookup, "GESTURE_MAX_HANDS", "maxHands")? {
            self.max_hands = v;
        }
        if let Some(v) = parse_var(&lookup, "GESTURE_MIN_DETECTION_CONFIDENCE", "minDetectionConfidence")? {
            self.min_detection_confidence = v;
        }
        if let Some(v) = parse_var(&lookup, "GESTURE_MIN_CONFIDENCE", "minConfidence")? {
            self.min_confidence = v;
        }
        if let Some(v) = parse_var(&lookup, "GESTURE_RECORDING_DURATION_MS", "recordingDurationMs")? {
            self.recording_duration_ms = v;
        }
        if let Some(v) = parse_var(&lookup, "GESTURE_AUTO_RECORD_INTERVAL_MS", "autoRecordIntervalMs")? {
            self.auto_record_interval_ms = v;
        }
        if let Some(v) = parse_var::<usize, _>(&lookup, "GESTURE_DTW_WINDOW", "dtwWindow")? {
            self.dtw_window = Some(v);
        }
        if let Some(v) = parse_var(&lookup, "GESTURE_NORMALIZE_DISTANCE", "normalizeDistance")? {
            self.normalize_distance = v;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_hands == 0 {
            return Err(invalid("maxHands", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.min_detection_confidence) {
            return Err(invalid("minDetectionConfidence", "must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(invalid("minConfidence", "must be within [0, 1]"));
        }
        if self.recording_duration_ms == 0 {
            return Err(invalid("recordingDurationMs", "must be greater than 0"));
        }
        if self.dtw_window.is_some_and(|w| w > MAX_RECORDING_FRAMES) {
            return Err(invalid(
                "dtwWindow",
                &format!("must not exceed {} frames", MAX_RECORDING_FRAMES),
            ));
        }
        Ok(())
    }

    /// Feature vector length produced under this config
    pub fn feature_dimension(&self) -> usize {
        feature_dimension(self.max_hands)
    }

    pub fn dtw_config(&self) -> DtwConfig {
        DtwConfig {
            window: self.dtw_window,
            normalize: self.normalize_distance,
        }
    }

    pub fn acceptance_policy(&self) -> AcceptancePolicy {
        AcceptancePolicy::new(self.min_confidence)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str, field: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid(field, &format!("cannot parse {}={:?}", key, raw))),
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

// ============================================================================
// REPLAY DRIVER CONFIG
// ============================================================================

/// Replay driver configuration (binary only)
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Optional JSON file with a `RecognizerConfig`
    pub config_path: Option<PathBuf>,

    /// Model artifact location
    pub model_path: PathBuf,

    /// JSON-lines landmark trace to replay
    pub trace_path: Option<PathBuf>,

    /// Pace ticks at the display refresh rate instead of as fast as possible
    pub realtime: bool,

    /// Display refresh rate
    pub tick_hz: u32,

    /// When set, recordings are captured as templates for this label
    pub capture_label: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            config_path: env::var("GESTURE_CONFIG_PATH").ok().map(PathBuf::from),

            model_path: env::var("GESTURE_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_model_path()),

            trace_path: env::var("GESTURE_TRACE_PATH").ok().map(PathBuf::from),

            realtime: env::var("GESTURE_REPLAY_REALTIME")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),

            tick_hz: env::var("GESTURE_TICK_HZ")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|hz: &u32| *hz > 0)
                .unwrap_or(DEFAULT_TICK_HZ),

            capture_label: env::var("GESTURE_CAPTURE_LABEL")
                .ok()
                .filter(|l| !l.trim().is_empty()),
        }
    }

    /// Realtime pacing period, never below 1µs
    pub fn tick_period(&self) -> Duration {
        Duration::from_micros((1_000_000 / u64::from(self.tick_hz.max(1))).max(1))
    }

    /// Recognizer config: file (if any), then env overrides, validated
    pub fn recognizer(&self) -> Result<RecognizerConfig, ConfigError> {
        let base = match &self.config_path {
            Some(path) => RecognizerConfig::from_file(path)?,
            None => RecognizerConfig::default(),
        };
        let config = base.with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }
}

/// Default model path under the platform data dir
pub fn default_model_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(DEFAULT_MODEL_FILE)
}
