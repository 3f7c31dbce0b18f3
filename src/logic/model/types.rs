//! Model types: templates, the immutable gesture model, results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ModelError;
use crate::logic::features::Sequence;

/// Classifier algorithm a model was built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    Dtw,
}

impl ClassifierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierKind::Dtw => "dtw",
        }
    }
}

/// Label plus its reference recordings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureTemplate {
    pub label: String,
    pub sequences: Vec<Sequence>,
}

impl GestureTemplate {
    pub fn new(label: impl Into<String>, sequences: Vec<Sequence>) -> Self {
        Self {
            label: label.into(),
            sequences,
        }
    }

    pub(crate) fn validate(&self, dimension: usize) -> Result<(), ModelError> {
        if self.label.trim().is_empty() {
            return Err(ModelError::EmptyLabel);
        }
        if self.sequences.is_empty() {
            return Err(ModelError::EmptyTemplate {
                label: self.label.clone(),
            });
        }

        for (s, sequence) in self.sequences.iter().enumerate() {
            if sequence.is_empty() {
                return Err(ModelError::EmptySequence {
                    label: self.label.clone(),
                    sequence: s,
                });
            }
            for (f, frame) in sequence.iter().enumerate() {
                if frame.len() != dimension {
                    return Err(ModelError::FrameDimension {
                        label: self.label.clone(),
                        sequence: s,
                        frame: f,
                        found: frame.len(),
                        expected: dimension,
                    });
                }
                if !frame.is_finite() {
                    return Err(ModelError::NonFinite {
                        label: self.label.clone(),
                        sequence: s,
                    });
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// GESTURE MODEL
// ============================================================================

/// Validated, immutable template set.
///
/// Replaced wholesale on retraining; there is no in-place mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureModel {
    id: Uuid,
    created_at: DateTime<Utc>,
    feature_dimension: usize,
    kind: ClassifierKind,
    templates: Vec<GestureTemplate>,
}

impl GestureModel {
    /// Build a fresh model. Duplicate labels are merged in first-seen order.
    pub fn new(
        feature_dimension: usize,
        kind: ClassifierKind,
        templates: Vec<GestureTemplate>,
    ) -> Result<Self, ModelError> {
        Self::from_parts(Uuid::new_v4(), Utc::now(), feature_dimension, kind, templates)
    }

    pub fn from_parts(
        id: Uuid,
        created_at: DateTime<Utc>,
        feature_dimension: usize,
        kind: ClassifierKind,
        templates: Vec<GestureTemplate>,
    ) -> Result<Self, ModelError> {
        let templates = merge_labels(templates);
        for template in &templates {
            template.validate(feature_dimension)?;
        }

        Ok(Self {
            id,
            created_at,
            feature_dimension,
            kind,
            templates,
        })
    }

    /// New model with `extra` templates added on top of this one
    pub fn extended_with(&self, extra: Vec<GestureTemplate>) -> Result<Self, ModelError> {
        let mut templates = self.templates.clone();
        templates.extend(extra);
        Self::new(self.feature_dimension, self.kind, templates)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn feature_dimension(&self) -> usize {
        self.feature_dimension
    }

    pub fn kind(&self) -> ClassifierKind {
        self.kind
    }

    pub fn templates(&self) -> &[GestureTemplate] {
        &self.templates
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.label.as_str())
    }

    pub fn label_count(&self) -> usize {
        self.templates.len()
    }

    /// Total reference sequences across all labels
    pub fn sequence_count(&self) -> usize {
        self.templates.iter().map(|t| t.sequences.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence_count() == 0
    }

    pub fn template(&self, label: &str) -> Option<&GestureTemplate> {
        self.templates.iter().find(|t| t.label == label)
    }
}

fn merge_labels(templates: Vec<GestureTemplate>) -> Vec<GestureTemplate> {
    let mut merged: Vec<GestureTemplate> = Vec::with_capacity(templates.len());
    for template in templates {
        match merged.iter_mut().find(|t| t.label == template.label) {
            Some(existing) => existing.sequences.extend(template.sequences),
            None => merged.push(template),
        }
    }
    merged
}

// ============================================================================
// RESULTS
// ============================================================================

/// Best distance for one label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelDistance {
    pub label: String,
    pub distance: f32,
}

/// Prediction output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: String,
    /// 0.0 - 1.0, 1.0 at distance 0
    pub confidence: f32,
    /// Winning (per-label minimum) DTW distance
    pub distance: f32,
    /// Second-best label, when the model has more than one
    pub runner_up: Option<LabelDistance>,
    pub inference_time_us: u64,
}
