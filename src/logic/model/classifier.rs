//! Sequence Classifier
//!
//! Nearest-template DTW matching over an immutable `GestureModel`.
//! `SequenceClassifier` is tagged by classifier kind so other algorithms can
//! be added without changing the model artifact contract.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::dtw::{dtw_distance, DtwConfig};
use super::threshold::confidence_from_distance;
use super::types::{ClassificationResult, ClassifierKind, GestureModel, LabelDistance};
use crate::constants::FRAME_BUDGET_US;
use crate::error::ModelError;
use crate::logic::features::{FeatureLayout, FeatureVector};
use crate::logic::store::ModelArtifact;

// ============================================================================
// DTW CLASSIFIER
// ============================================================================

#[derive(Debug, Clone)]
pub struct DtwClassifier {
    model: GestureModel,
    config: DtwConfig,
}

impl DtwClassifier {
    pub fn new(model: GestureModel, config: DtwConfig) -> Self {
        Self { model, config }
    }

    pub fn model(&self) -> &GestureModel {
        &self.model
    }

    pub fn config(&self) -> DtwConfig {
        self.config
    }

    /// Per label: minimum distance over that label's sequences.
    /// Labels keep model order.
    pub fn label_distances(&self, sequence: &[FeatureVector]) -> Vec<LabelDistance> {
        self.model
            .templates()
            .iter()
            .filter_map(|template| {
                template
                    .sequences
                    .iter()
                    .filter_map(|reference| dtw_distance(sequence, reference, &self.config))
                    .min_by(|a, b| a.total_cmp(b))
                    .map(|distance| LabelDistance {
                        label: template.label.clone(),
                        distance,
                    })
            })
            .collect()
    }

    /// Best label for `sequence`, or `None` when nothing can be matched
    pub fn predict(&self, sequence: &[FeatureVector]) -> Option<ClassificationResult> {
        let started = Instant::now();

        if sequence.is_empty() {
            log::debug!("[Classifier] Empty sequence, no result");
            return None;
        }
        if self.model.is_empty() {
            log::debug!("[Classifier] Model has no templates, no result");
            return None;
        }
        let dimension = self.model.feature_dimension();
        if let Some(frame) = sequence.iter().position(|f| f.len() != dimension) {
            log::warn!(
                "[Classifier] Frame {} has {} values, model expects {}; no result",
                frame,
                sequence[frame].len(),
                dimension
            );
            return None;
        }

        let mut ranked = self.label_distances(sequence);
        // Stable: equal distances keep model order
        ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        let mut ranked = ranked.into_iter();
        let best = ranked.next()?;
        let runner_up = ranked.next();

        let inference_time_us = started.elapsed().as_micros() as u64;
        if inference_time_us > FRAME_BUDGET_US {
            log::warn!(
                "[Classifier] Classification took {:.1}ms ({} sequences x {} frames), over the frame budget",
                inference_time_us as f32 / 1000.0,
                self.model.sequence_count(),
                sequence.len()
            );
        }

        Some(ClassificationResult {
            confidence: confidence_from_distance(best.distance),
            distance: best.distance,
            label: best.label,
            runner_up,
            inference_time_us,
        })
    }
}

// ============================================================================
// CLASSIFIER VARIANTS
// ============================================================================

/// Classifier tagged by kind
#[derive(Debug, Clone)]
pub enum SequenceClassifier {
    Dtw(DtwClassifier),
}

impl SequenceClassifier {
    pub fn from_model(model: GestureModel, dtw: DtwConfig) -> Self {
        match model.kind() {
            ClassifierKind::Dtw => SequenceClassifier::Dtw(DtwClassifier::new(model, dtw)),
        }
    }

    /// Validate and load an artifact for the live feature layout
    pub fn import(artifact: ModelArtifact, layout: &FeatureLayout, dtw: DtwConfig) -> Result<Self, ModelError> {
        let model = artifact.into_model(layout)?;
        log::info!(
            "[Classifier] Model {} imported: {} labels, {} sequences, dimension {}",
            model.id(),
            model.label_count(),
            model.sequence_count(),
            model.feature_dimension()
        );
        Ok(Self::from_model(model, dtw))
    }

    pub fn export(&self) -> ModelArtifact {
        ModelArtifact::from_model(self.model())
    }

    pub fn kind(&self) -> ClassifierKind {
        match self {
            SequenceClassifier::Dtw(_) => ClassifierKind::Dtw,
        }
    }

    pub fn model(&self) -> &GestureModel {
        match self {
            SequenceClassifier::Dtw(c) => c.model(),
        }
    }

    pub fn predict(&self, sequence: &[FeatureVector]) -> Option<ClassificationResult> {
        match self {
            SequenceClassifier::Dtw(c) => c.predict(sequence),
        }
    }
}

// ============================================================================
// STATUS
// ============================================================================

/// Latency stats, owned by the session
#[derive(Debug, Clone, Default)]
pub struct InferenceStats {
    count: u64,
    total_us: u64,
}

impl InferenceStats {
    pub fn record(&mut self, inference_time_us: u64) {
        self.count += 1;
        self.total_us += inference_time_us;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn avg_latency_ms(&self) -> f32 {
        if self.count > 0 {
            (self.total_us as f32 / self.count as f32) / 1000.0
        } else {
            0.0
        }
    }
}

/// Classifier status for callers / UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierStatus {
    pub model_loaded: bool,
    pub model_id: Option<String>,
    pub classifier_kind: Option<String>,
    pub label_count: usize,
    pub sequence_count: usize,
    pub feature_dimension: usize,
    pub avg_latency_ms: f32,
    pub inference_count: u64,
}

impl ClassifierStatus {
    pub fn collect(classifier: Option<&SequenceClassifier>, stats: &InferenceStats) -> Self {
        let model = classifier.map(SequenceClassifier::model);
        Self {
            model_loaded: model.is_some(),
            model_id: model.map(|m| m.id().to_string()),
            classifier_kind: classifier.map(|c| c.kind().as_str().to_string()),
            label_count: model.map_or(0, GestureModel::label_count),
            sequence_count: model.map_or(0, GestureModel::sequence_count),
            feature_dimension: model.map_or(0, GestureModel::feature_dimension),
            avg_latency_ms: stats.avg_latency_ms(),
            inference_count: stats.count(),
        }
    }
}
