//! Gesture Replay - drives a recognition session from a landmark trace
//!
//! Reads a JSON-lines trace (see `logic::source::replay`), ticks the session
//! once per frame and prints accepted detections. With
//! `GESTURE_CAPTURE_LABEL` set, recordings become templates for that label
//! and the extended model is saved to the model store.

use gesture_core::config::AppConfig;
use gesture_core::constants::{APP_NAME, APP_VERSION};
use gesture_core::error::{AppResult, ConfigError, SourceError};
use gesture_core::logic::session::{GestureSink, RecognitionSession, SessionCommand};
use gesture_core::logic::source::{parse_trace, ReplaySource, TraceCommand, TraceFrame};
use gesture_core::logic::store::{FileModelStore, ModelStore};

/// Prints detections to stdout
#[derive(Debug, Default)]
struct ConsoleSink {
    detections: usize,
}

impl GestureSink for ConsoleSink {
    fn on_gesture_detected(&mut self, label: &str, confidence: f32) {
        self.detections += 1;
        println!("{}\t{:.2}", label, confidence);
    }

    fn on_error(&mut self, message: &str) {
        eprintln!("gesture recognition unavailable: {}", message);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{} (replay)", APP_NAME, APP_VERSION);

    if let Err(e) = run(AppConfig::from_env()).await {
        log::error!("Replay failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(app: AppConfig) -> AppResult<()> {
    let config = app.recognizer()?;

    let trace_path = app.trace_path.as_ref().ok_or_else(|| ConfigError::Invalid {
        field: "GESTURE_TRACE_PATH",
        reason: "no trace file given".into(),
    })?;
    let text = tokio::fs::read_to_string(trace_path).await.map_err(SourceError::from)?;
    let frames = parse_trace(&text)?;
    log::info!("Loaded {} frames from {}", frames.len(), trace_path.display());

    let store = FileModelStore::new(&app.model_path);
    let model = store.load().await;

    let mut sink = ConsoleSink::default();
    let mut session = RecognitionSession::initialize(config, ReplaySource::new(), model, &mut sink);

    let mut pacing = app.realtime.then(|| tokio::time::interval(app.tick_period()));

    for frame in &frames {
        if let Some(interval) = pacing.as_mut() {
            interval.tick().await;
        }
        if let Some(command) = &frame.command {
            session.submit(session_command(command, app.capture_label.as_deref()));
        }
        session.tick(frame, frame.timestamp_ms, &mut sink);
    }

    // Close a recording still open at the end of the trace
    if let Some(last) = frames.last() {
        session.stop_recording();
        session.tick(&TraceFrame::empty(last.timestamp_ms), last.timestamp_ms, &mut sink);
    }

    if !session.capture().is_empty() {
        let artifact = session.commit_captures()?;
        store.save(&artifact).await?;
        log::info!(
            "Saved {} labels to {}",
            artifact.templates.len(),
            store.path().display()
        );
    }

    let status = session.status();
    session.shutdown();
    log::info!(
        "Replay finished: {} detections, {} classifications, avg {:.2}ms",
        sink.detections,
        status.classifier.inference_count,
        status.classifier.avg_latency_ms
    );
    Ok(())
}

/// In capture mode a plain start records a template for the capture label
fn session_command(command: &TraceCommand, capture_label: Option<&str>) -> SessionCommand {
    match (command, capture_label) {
        (TraceCommand::Start, Some(label)) => SessionCommand::StartCapture { label: label.to_string() },
        (TraceCommand::Start, None) => SessionCommand::StartRecording,
        (TraceCommand::Stop, _) => SessionCommand::StopRecording,
        (TraceCommand::Cancel, _) => SessionCommand::CancelRecording,
        (TraceCommand::Capture { label }, _) => SessionCommand::StartCapture { label: label.clone() },
    }
}
