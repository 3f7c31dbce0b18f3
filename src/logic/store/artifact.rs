//! Model Artifact - versioned serialized form of a `GestureModel`
//!
//! ```json
//! { "formatVersion": 1, "featureDimension": 126, "classifierKind": "dtw",
//!   "templates": [{ "label": "hello", "sequences": [[[0.0, ...], ...]] }] }
//! ```
//!
//! `modelId`, `createdAt`, `layoutVersion`, `layoutHash` and `checksum` are
//! optional on input and always written on export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::validate::validate_artifact;
use crate::error::ModelError;
use crate::logic::features::layout::{layout_hash, max_hands_for_dimension, FEATURE_VERSION};
use crate::logic::features::FeatureLayout;
use crate::logic::model::{ClassifierKind, GestureModel, GestureTemplate};

/// Current artifact format version
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelArtifact {
    pub format_version: u32,
    pub feature_dimension: usize,
    pub classifier_kind: ClassifierKind,
    pub templates: Vec<GestureTemplate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_version: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_hash: Option<u32>,

    /// Hex SHA-256 over the template data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

impl ModelArtifact {
    pub fn from_model(model: &GestureModel) -> Self {
        let templates = model.templates().to_vec();
        let max_hands = max_hands_for_dimension(model.feature_dimension());

        Self {
            format_version: FORMAT_VERSION,
            feature_dimension: model.feature_dimension(),
            classifier_kind: model.kind(),
            checksum: Some(templates_checksum(&templates)),
            templates,
            model_id: Some(model.id()),
            created_at: Some(model.created_at()),
            layout_version: max_hands.map(|_| FEATURE_VERSION),
            layout_hash: max_hands.map(layout_hash),
        }
    }

    /// Validate against the live layout and build the model
    pub fn into_model(self, layout: &FeatureLayout) -> Result<GestureModel, ModelError> {
        validate_artifact(&self, layout)?;

        GestureModel::from_parts(
            self.model_id.unwrap_or_else(Uuid::new_v4),
            self.created_at.unwrap_or_else(Utc::now),
            self.feature_dimension,
            self.classifier_kind,
            self.templates,
        )
    }

    pub fn sequence_count(&self) -> usize {
        self.templates.iter().map(|t| t.sequences.len()).sum()
    }
}

/// SHA-256 over labels, shapes and little-endian values, hex encoded
pub fn templates_checksum(templates: &[GestureTemplate]) -> String {
    let mut hasher = Sha256::new();

    for template in templates {
        hasher.update(template.label.as_bytes());
        hasher.update([0u8]);
        hasher.update((template.sequences.len() as u64).to_le_bytes());
        for sequence in &template.sequences {
            hasher.update((sequence.len() as u64).to_le_bytes());
            for frame in sequence {
                hasher.update((frame.len() as u64).to_le_bytes());
                for value in frame.as_slice() {
                    hasher.update(value.to_le_bytes());
                }
            }
        }
    }

    hex::encode(hasher.finalize())
}
