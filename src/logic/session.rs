//! Recognition Session - one step per frame tick
//!
//! Owns everything that lives across ticks: landmark source, recording
//! controller, classifier, captured templates and pending commands.
//! Single-threaded; the owner drives `tick` from its frame loop.

use std::collections::VecDeque;

use serde::Serialize;

use crate::config::RecognizerConfig;
use crate::error::{ModelError, SessionError, StoreError};
use crate::logic::capture::TemplateCapture;
use crate::logic::features::{FeatureExtractor, FeatureLayout, HandFeatureExtractor, HandObservation, Sequence};
use crate::logic::model::{
    AcceptancePolicy, ClassificationResult, ClassifierStatus, GestureModel, InferenceStats, SequenceClassifier,
};
use crate::logic::recording::{RecordingController, RecordingOutcome, RecordingPurpose, RecordingState};
use crate::logic::source::{DetectorConfig, LandmarkSource};
use crate::logic::store::ModelArtifact;

// ============================================================================
// CALLBACKS & COMMANDS
// ============================================================================

/// Caller-side callbacks, passed into every tick
pub trait GestureSink {
    /// Accepted detection (confidence at or above `minConfidence`)
    fn on_gesture_detected(&mut self, label: &str, confidence: f32);

    /// Initialization failure; reported once
    fn on_error(&mut self, message: &str);
}

/// User action, applied at the start of the next tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    StartRecording,
    StopRecording,
    CancelRecording,
    /// Record a template for `label` instead of classifying
    StartCapture { label: String },
}

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub hands_detected: bool,
    pub state: RecordingState,
    pub recorded_frames: usize,
    /// Raw classifier output, accepted or not
    pub result: Option<ClassificationResult>,
    /// `result` passed the threshold and reached the sink
    pub accepted: bool,
    /// Label a template was captured for
    pub captured: Option<String>,
    pub detection_failed: bool,
}

impl TickReport {
    fn new(state: RecordingState) -> Self {
        Self {
            hands_detected: false,
            state,
            recorded_frames: 0,
            result: None,
            accepted: false,
            captured: None,
            detection_failed: false,
        }
    }
}

/// Session snapshot for callers / UI
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub enabled: bool,
    pub disabled_reason: Option<String>,
    pub recording: bool,
    pub recorded_frames: usize,
    pub pending_captures: usize,
    pub classifier: ClassifierStatus,
}

// ============================================================================
// SESSION
// ============================================================================

pub struct RecognitionSession<S: LandmarkSource> {
    config: RecognizerConfig,
    layout: FeatureLayout,
    extractor: HandFeatureExtractor,
    policy: AcceptancePolicy,
    source: S,
    source_ready: bool,
    controller: RecordingController,
    classifier: Option<SequenceClassifier>,
    capture: TemplateCapture,
    pending: VecDeque<SessionCommand>,
    stats: InferenceStats,
    disabled: Option<String>,
}

impl<S: LandmarkSource> RecognitionSession<S> {
    /// Bring up the session.
    ///
    /// `model` is the result of the Model Store load. Any failure (config,
    /// source, model) is reported once through `sink.on_error` and leaves
    /// the session disabled; it never panics or returns an error.
    pub fn initialize<K: GestureSink + ?Sized>(
        config: RecognizerConfig,
        source: S,
        model: Result<Option<ModelArtifact>, StoreError>,
        sink: &mut K,
    ) -> Self {
        let (config, config_error) = match config.validate() {
            Ok(()) => (config, None),
            Err(e) => (RecognizerConfig::default(), Some(e)),
        };

        let mut session = Self::assemble(config, source);
        let result = match config_error {
            Some(e) => Err(SessionError::from(e)),
            None => session.bring_up(model),
        };

        match result {
            Ok(()) => log::info!(
                "[Session] Ready: maxHands={}, dimension={}, model={}",
                session.config.max_hands,
                session.layout.dimension,
                session
                    .model()
                    .map_or_else(|| "none".to_string(), |m| m.id().to_string())
            ),
            Err(e) => {
                let message = e.to_string();
                log::error!("[Session] Initialization failed, recognition disabled: {}", message);
                sink.on_error(&message);
                session.disabled = Some(message);
            }
        }

        session
    }

    fn assemble(config: RecognizerConfig, source: S) -> Self {
        let layout = FeatureLayout::new(config.max_hands);
        Self {
            extractor: HandFeatureExtractor::new(config.max_hands),
            policy: config.acceptance_policy(),
            controller: RecordingController::from_config(&config),
            capture: TemplateCapture::new(layout.dimension),
            layout,
            source,
            source_ready: false,
            classifier: None,
            pending: VecDeque::new(),
            stats: InferenceStats::default(),
            disabled: None,
            config,
        }
    }

    fn bring_up(&mut self, model: Result<Option<ModelArtifact>, StoreError>) -> Result<(), SessionError> {
        self.source.initialize(&DetectorConfig::from(&self.config))?;
        self.source_ready = true;

        match model? {
            Some(artifact) => {
                let classifier = SequenceClassifier::import(artifact, &self.layout, self.config.dtw_config())?;
                self.classifier = Some(classifier);
            }
            None => log::info!("[Session] No model loaded, recognition waits for templates"),
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    pub fn submit(&mut self, command: SessionCommand) {
        self.pending.push_back(command);
    }

    pub fn start_recording(&mut self) {
        self.submit(SessionCommand::StartRecording);
    }

    pub fn stop_recording(&mut self) {
        self.submit(SessionCommand::StopRecording);
    }

    pub fn cancel_recording(&mut self) {
        self.submit(SessionCommand::CancelRecording);
    }

    pub fn start_capture(&mut self, label: impl Into<String>) {
        self.submit(SessionCommand::StartCapture { label: label.into() });
    }

    /// Commands waiting for the next tick
    pub fn pending_commands(&self) -> usize {
        self.pending.len()
    }

    // ------------------------------------------------------------------------
    // Frame loop
    // ------------------------------------------------------------------------

    /// Process one frame
    pub fn tick<K: GestureSink + ?Sized>(&mut self, frame: &S::Frame, now_ms: u64, sink: &mut K) -> TickReport {
        let mut report = TickReport::new(self.controller.state());

        if self.disabled.is_some() {
            if !self.pending.is_empty() {
                log::debug!("[Session] Recognition disabled, dropping {} commands", self.pending.len());
                self.pending.clear();
            }
            return report;
        }

        let commanded = self.apply_commands(now_ms, sink, &mut report);

        let features = match self.source.detect(frame, now_ms) {
            Ok(hands) => {
                report.hands_detected = hands.iter().any(HandObservation::is_complete);
                if !hands.is_empty() && !report.hands_detected {
                    log::warn!(
                        "[Session] Detection at {}ms returned {} incomplete hands, frame skipped",
                        now_ms,
                        hands.len()
                    );
                    report.detection_failed = true;
                }
                report.hands_detected.then(|| self.extractor.extract(&hands))
            }
            Err(e) => {
                log::warn!("[Session] Detection failed at {}ms, frame skipped: {}", now_ms, e);
                report.detection_failed = true;
                None
            }
        };

        // Manual commands win over the auto-trigger
        if !commanded && self.classifier.is_some() {
            self.controller.try_auto_start(now_ms, report.hands_detected);
        }

        if let Some(outcome) = self.controller.on_frame(now_ms, features) {
            self.handle_outcome(outcome, sink, &mut report);
        }

        report.state = self.controller.state();
        report.recorded_frames = self.controller.recorded_frames();
        report
    }

    /// Returns true if any command was applied
    fn apply_commands<K: GestureSink + ?Sized>(&mut self, now_ms: u64, sink: &mut K, report: &mut TickReport) -> bool {
        let mut applied = false;

        while let Some(command) = self.pending.pop_front() {
            applied = true;
            match command {
                SessionCommand::StartRecording => {
                    if self.classifier.is_none() {
                        log::warn!("[Session] Start ignored: no model loaded");
                        continue;
                    }
                    self.controller.start(now_ms, RecordingPurpose::Recognize);
                }
                SessionCommand::StartCapture { label } => {
                    let label = label.trim().to_string();
                    if label.is_empty() {
                        log::warn!("[Session] Capture ignored: empty label");
                        continue;
                    }
                    self.controller.start(now_ms, RecordingPurpose::Capture { label });
                }
                SessionCommand::StopRecording => {
                    if let Some(outcome) = self.controller.stop(now_ms) {
                        self.handle_outcome(outcome, sink, report);
                    }
                }
                SessionCommand::CancelRecording => {
                    self.controller.cancel();
                }
            }
        }

        applied
    }

    fn handle_outcome<K: GestureSink + ?Sized>(&mut self, outcome: RecordingOutcome, sink: &mut K, report: &mut TickReport) {
        let recording = match outcome {
            RecordingOutcome::Completed(recording) => recording,
            RecordingOutcome::Empty { .. } => return,
        };

        match recording.purpose {
            RecordingPurpose::Recognize => self.classify(&recording.sequence, sink, report),
            RecordingPurpose::Capture { label } => match self.capture.add(&label, recording.sequence) {
                Ok(_) => report.captured = Some(label),
                Err(e) => log::warn!("[Session] Capture for '{}' rejected: {}", label, e),
            },
        }
    }

    fn classify<K: GestureSink + ?Sized>(&mut self, sequence: &Sequence, sink: &mut K, report: &mut TickReport) {
        let Some(classifier) = self.classifier.as_ref() else {
            log::warn!("[Session] Recording finished but no model is loaded");
            return;
        };

        let Some(result) = classifier.predict(sequence) else {
            log::debug!("[Session] No classification result for {} frames", sequence.len());
            return;
        };
        self.stats.record(result.inference_time_us);

        if self.policy.accepts(&result) {
            log::info!(
                "[Session] Detected '{}' (confidence {:.2}, distance {:.3})",
                result.label,
                result.confidence,
                result.distance
            );
            sink.on_gesture_detected(&result.label, result.confidence);
            report.accepted = true;
        } else {
            log::debug!(
                "[Session] Best match '{}' below threshold ({:.2} < {:.2})",
                result.label,
                result.confidence,
                self.policy.min_confidence
            );
        }
        report.result = Some(result);
    }

    // ------------------------------------------------------------------------
    // Model lifecycle
    // ------------------------------------------------------------------------

    /// Swap in a new model wholesale
    pub fn replace_model(&mut self, model: GestureModel) -> Result<(), SessionError> {
        if model.feature_dimension() != self.layout.dimension {
            return Err(ModelError::DimensionMismatch {
                model: model.feature_dimension(),
                extractor: self.layout.dimension,
            }
            .into());
        }

        log::info!(
            "[Session] Model replaced: {} ({} labels, {} sequences)",
            model.id(),
            model.label_count(),
            model.sequence_count()
        );
        self.classifier = Some(SequenceClassifier::from_model(model, self.config.dtw_config()));
        Ok(())
    }

    /// Build a model from the current one plus all captures, install it, and
    /// return its artifact for saving. Captures are cleared on success.
    pub fn commit_captures(&mut self) -> Result<ModelArtifact, SessionError> {
        let model = self.capture.build_model(self.model())?;
        let artifact = ModelArtifact::from_model(&model);
        self.replace_model(model)?;
        self.capture.clear();
        Ok(artifact)
    }

    /// Cancel any recording and release the source
    pub fn shutdown(&mut self) {
        self.pending.clear();
        self.controller.cancel();
        if self.source_ready {
            self.source.close();
            self.source_ready = false;
        }
        log::info!("[Session] Shut down after {} classifications", self.stats.count());
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    pub fn is_enabled(&self) -> bool {
        self.disabled.is_none()
    }

    pub fn disabled_reason(&self) -> Option<&str> {
        self.disabled.as_deref()
    }

    pub fn state(&self) -> RecordingState {
        self.controller.state()
    }

    pub fn classifier(&self) -> Option<&SequenceClassifier> {
        self.classifier.as_ref()
    }

    pub fn model(&self) -> Option<&GestureModel> {
        self.classifier.as_ref().map(SequenceClassifier::model)
    }

    pub fn capture(&self) -> &TemplateCapture {
        &self.capture
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn classifier_status(&self) -> ClassifierStatus {
        ClassifierStatus::collect(self.classifier.as_ref(), &self.stats)
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            enabled: self.is_enabled(),
            disabled_reason: self.disabled.clone(),
            recording: self.controller.is_recording(),
            recorded_frames: self.controller.recorded_frames(),
            pending_captures: self.capture.len(),
            classifier: self.classifier_status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::logic::features::{Handedness, Landmark};
    use crate::logic::model::{ClassifierKind, GestureTemplate};
    use crate::logic::source::{ReplaySource, TraceFrame};
    use crate::logic::testing::{posed_hand, wave_observations, wave_sequence, Motion, Placement};

    const TICK_MS: u64 = 16;

    #[derive(Default)]
    struct CollectingSink {
        detections: Vec<(String, f32)>,
        errors: Vec<String>,
    }

    impl GestureSink for CollectingSink {
        fn on_gesture_detected(&mut self, label: &str, confidence: f32) {
            self.detections.push((label.to_string(), confidence));
        }

        fn on_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
    }

    /// Source whose detector cannot start
    struct BrokenSource;

    impl LandmarkSource for BrokenSource {
        type Frame = ();

        fn initialize(&mut self, _config: &DetectorConfig) -> Result<(), SourceError> {
            Err(SourceError::Detection("camera unavailable".into()))
        }

        fn detect(&mut self, _frame: &(), _timestamp_ms: u64) -> Result<Vec<HandObservation>, SourceError> {
            Ok(Vec::new())
        }

        fn close(&mut self) {}
    }

    /// Detector that reports a truncated hand on every frame
    struct PartialHandSource;

    impl LandmarkSource for PartialHandSource {
        type Frame = ();

        fn initialize(&mut self, _config: &DetectorConfig) -> Result<(), SourceError> {
            Ok(())
        }

        fn detect(&mut self, _frame: &(), _timestamp_ms: u64) -> Result<Vec<HandObservation>, SourceError> {
            Ok(vec![HandObservation::new(Handedness::Right, vec![Landmark::new(0.5, 0.5, 0.0); 5])])
        }

        fn close(&mut self) {}
    }

    fn one_hand_config() -> RecognizerConfig {
        RecognizerConfig {
            max_hands: 1,
            recording_duration_ms: 2000,
            ..RecognizerConfig::default()
        }
    }

    fn hello_yes_model() -> GestureModel {
        GestureModel::new(
            63,
            ClassifierKind::Dtw,
            vec![
                GestureTemplate::new("hello", vec![wave_sequence(10, 0.25, Motion::Roll, Placement::default())]),
                GestureTemplate::new("yes", vec![wave_sequence(12, 0.8, Motion::Pitch, Placement::default())]),
            ],
        )
        .unwrap()
    }

    fn session_with_model(config: RecognizerConfig, sink: &mut CollectingSink) -> RecognitionSession<ReplaySource> {
        let artifact = ModelArtifact::from_model(&hello_yes_model());
        RecognitionSession::initialize(config, ReplaySource::new(), Ok(Some(artifact)), sink)
    }

    fn frame(hands: Vec<HandObservation>) -> TraceFrame {
        TraceFrame {
            timestamp_ms: 0,
            hands,
            command: None,
        }
    }

    fn empty() -> TraceFrame {
        frame(Vec::new())
    }

    #[test]
    fn test_half_speed_hello_reaches_sink() {
        let mut sink = CollectingSink::default();
        let mut session = session_with_model(one_hand_config(), &mut sink);
        assert!(session.is_enabled());

        session.start_recording();
        let wave = wave_observations(20, 0.25, Motion::Roll, Placement { offset: (0.3, 0.6), scale: 0.2 });
        for (i, hand) in wave.into_iter().enumerate() {
            let report = session.tick(&frame(vec![hand]), i as u64 * TICK_MS, &mut sink);
            assert!(report.hands_detected);
            assert_eq!(report.recorded_frames, i + 1);
        }

        session.stop_recording();
        let report = session.tick(&empty(), 20 * TICK_MS, &mut sink);

        let result = report.result.expect("expected a classification");
        assert_eq!(result.label, "hello");
        assert!(report.accepted);
        assert_eq!(report.state, RecordingState::Idle);
        assert_eq!(sink.detections.len(), 1);
        assert_eq!(sink.detections[0].0, "hello");
        assert!(sink.detections[0].1 > 0.8);
        assert_eq!(session.classifier_status().inference_count, 1);
    }

    #[test]
    fn test_stop_with_empty_buffer_skips_classifier() {
        let mut sink = CollectingSink::default();
        let mut session = session_with_model(one_hand_config(), &mut sink);

        session.start_recording();
        session.tick(&empty(), 0, &mut sink);
        assert_eq!(session.state(), RecordingState::Recording);

        session.stop_recording();
        let report = session.tick(&empty(), TICK_MS, &mut sink);

        assert_eq!(report.state, RecordingState::Idle);
        assert!(report.result.is_none());
        assert!(sink.detections.is_empty());
        assert_eq!(session.classifier_status().inference_count, 0);
    }

    #[test]
    fn test_no_hands_for_whole_window() {
        let mut sink = CollectingSink::default();
        let config = RecognizerConfig {
            recording_duration_ms: 100,
            ..one_hand_config()
        };
        let mut session = session_with_model(config, &mut sink);

        session.start_recording();
        let mut now = 0;
        while now <= 112 {
            let report = session.tick(&empty(), now, &mut sink);
            assert_eq!(report.recorded_frames, 0);
            assert!(report.result.is_none());
            now += TICK_MS;
        }

        assert_eq!(session.state(), RecordingState::Idle);
        assert_eq!(session.classifier_status().inference_count, 0);
        assert!(sink.detections.is_empty());
    }

    #[test]
    fn test_start_requires_model_but_capture_does_not() {
        let mut sink = CollectingSink::default();
        let mut session =
            RecognitionSession::initialize(one_hand_config(), ReplaySource::new(), Ok(None), &mut sink);
        assert!(session.is_enabled());
        assert!(sink.errors.is_empty());

        session.start_recording();
        session.tick(&empty(), 0, &mut sink);
        assert_eq!(session.state(), RecordingState::Idle);

        session.start_capture("hello");
        for (i, hand) in wave_observations(10, 0.25, Motion::Roll, Placement::default()).into_iter().enumerate() {
            session.tick(&frame(vec![hand]), (i as u64 + 1) * TICK_MS, &mut sink);
        }
        session.stop_recording();
        let report = session.tick(&empty(), 20 * TICK_MS, &mut sink);

        assert_eq!(report.captured.as_deref(), Some("hello"));
        assert!(report.result.is_none());
        assert_eq!(session.capture().len(), 1);

        let artifact = session.commit_captures().unwrap();
        assert_eq!(artifact.templates.len(), 1);
        assert_eq!(artifact.templates[0].sequences[0].len(), 10);
        assert!(session.capture().is_empty());
        assert_eq!(session.model().unwrap().label_count(), 1);
    }

    #[test]
    fn test_commit_without_captures_fails() {
        let mut sink = CollectingSink::default();
        let mut session = session_with_model(one_hand_config(), &mut sink);
        assert!(matches!(
            session.commit_captures(),
            Err(SessionError::Model(ModelError::NothingCaptured))
        ));
    }

    #[test]
    fn test_auto_trigger_needs_hands_and_yields_to_commands() {
        let mut sink = CollectingSink::default();
        let config = RecognizerConfig {
            auto_record_interval_ms: 1000,
            recording_duration_ms: 500,
            ..one_hand_config()
        };
        let mut session = session_with_model(config, &mut sink);
        let hand = || frame(vec![posed_hand(Handedness::Right, 0.0, 0.0, Placement::default())]);

        // No hands, no trigger
        session.tick(&empty(), 0, &mut sink);
        assert_eq!(session.state(), RecordingState::Idle);

        // A cancel this tick suppresses the trigger
        session.cancel_recording();
        session.tick(&hand(), TICK_MS, &mut sink);
        assert_eq!(session.state(), RecordingState::Idle);

        let report = session.tick(&hand(), 2 * TICK_MS, &mut sink);
        assert_eq!(report.state, RecordingState::Recording);
        assert_eq!(report.recorded_frames, 1);
    }

    #[test]
    fn test_detection_failure_skips_frame() {
        let mut sink = CollectingSink::default();
        let mut session = session_with_model(one_hand_config(), &mut sink);

        let mut broken = posed_hand(Handedness::Right, 0.0, 0.0, Placement::default());
        broken.landmarks.pop();

        session.start_recording();
        let report = session.tick(&frame(vec![broken]), 0, &mut sink);
        assert!(report.detection_failed);
        assert!(!report.hands_detected);
        assert_eq!(report.recorded_frames, 0);
        assert_eq!(report.state, RecordingState::Recording);
        assert!(sink.errors.is_empty());

        let ok = posed_hand(Handedness::Right, 0.1, 0.0, Placement::default());
        let report = session.tick(&frame(vec![ok]), TICK_MS, &mut sink);
        assert!(!report.detection_failed);
        assert_eq!(report.recorded_frames, 1);
    }

    #[test]
    fn test_incomplete_hands_are_not_recorded() {
        let mut sink = CollectingSink::default();
        let config = RecognizerConfig {
            auto_record_interval_ms: 100,
            ..one_hand_config()
        };
        let artifact = ModelArtifact::from_model(&hello_yes_model());
        let mut session = RecognitionSession::initialize(config, PartialHandSource, Ok(Some(artifact)), &mut sink);

        // Never counts as hands, so the auto-trigger stays idle
        let report = session.tick(&(), 0, &mut sink);
        assert!(!report.hands_detected);
        assert!(report.detection_failed);
        assert_eq!(report.state, RecordingState::Idle);

        session.start_recording();
        let report = session.tick(&(), TICK_MS, &mut sink);
        assert!(!report.hands_detected);
        assert_eq!(report.state, RecordingState::Recording);
        assert_eq!(report.recorded_frames, 0);
    }

    #[test]
    fn test_timeout_recording_reaches_sink() {
        let mut sink = CollectingSink::default();
        let config = RecognizerConfig {
            recording_duration_ms: 19 * TICK_MS,
            ..one_hand_config()
        };
        let mut session = session_with_model(config, &mut sink);

        session.start_recording();
        let wave = wave_observations(20, 0.25, Motion::Roll, Placement { offset: (0.3, 0.6), scale: 0.2 });
        let mut last = None;
        for (i, hand) in wave.into_iter().enumerate() {
            last = Some(session.tick(&frame(vec![hand]), i as u64 * TICK_MS, &mut sink));
        }

        let report = last.expect("ticked at least once");
        assert_eq!(report.state, RecordingState::Idle);
        assert!(report.accepted);
        assert_eq!(report.result.map(|r| r.label).as_deref(), Some("hello"));
        assert_eq!(sink.detections.len(), 1);
        assert_eq!(sink.detections[0].0, "hello");
    }

    #[test]
    fn test_model_dimension_mismatch_disables_recognition() {
        let mut sink = CollectingSink::default();
        // Model built for one hand, session configured for two
        let mut session = session_with_model(RecognizerConfig::default(), &mut sink);

        assert!(!session.is_enabled());
        assert_eq!(sink.errors.len(), 1);
        assert!(session.model().is_none());

        session.start_recording();
        let report = session.tick(&empty(), 0, &mut sink);
        assert_eq!(report.state, RecordingState::Idle);
        assert_eq!(session.pending_commands(), 0);
        assert!(!session.status().enabled);
    }

    #[test]
    fn test_source_failure_reported_once() {
        let mut sink = CollectingSink::default();
        let mut session = RecognitionSession::initialize(one_hand_config(), BrokenSource, Ok(None), &mut sink);

        assert!(!session.is_enabled());
        assert_eq!(sink.errors.len(), 1);
        assert!(sink.errors[0].contains("camera unavailable"));

        session.tick(&(), 0, &mut sink);
        session.tick(&(), TICK_MS, &mut sink);
        assert_eq!(sink.errors.len(), 1);
    }

    #[test]
    fn test_invalid_config_and_store_error_disable() {
        let mut sink = CollectingSink::default();
        let bad = RecognizerConfig {
            max_hands: 0,
            ..RecognizerConfig::default()
        };
        let session = RecognitionSession::initialize(bad, ReplaySource::new(), Ok(None), &mut sink);
        assert!(!session.is_enabled());

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let session =
            RecognitionSession::initialize(one_hand_config(), ReplaySource::new(), Err(StoreError::Io(io)), &mut sink);
        assert!(!session.is_enabled());
        assert_eq!(sink.errors.len(), 2);
    }

    #[test]
    fn test_replace_model_checks_dimension() {
        let mut sink = CollectingSink::default();
        let mut session = session_with_model(one_hand_config(), &mut sink);

        let wide = GestureModel::new(126, ClassifierKind::Dtw, Vec::new()).unwrap();
        assert!(session.replace_model(wide).is_err());

        let before = session.model().unwrap().id();
        let fresh = hello_yes_model();
        let fresh_id = fresh.id();
        session.replace_model(fresh).unwrap();
        assert_ne!(before, fresh_id);
        assert_eq!(session.model().unwrap().id(), fresh_id);
    }

    #[test]
    fn test_shutdown_closes_source() {
        let mut sink = CollectingSink::default();
        let mut session = session_with_model(one_hand_config(), &mut sink);
        session.start_recording();
        session.tick(&empty(), 0, &mut sink);

        session.shutdown();
        assert_eq!(session.state(), RecordingState::Idle);

        // Closed replay source reports every frame as a detection failure
        let report = session.tick(&empty(), TICK_MS, &mut sink);
        assert!(report.detection_failed);
    }
}
