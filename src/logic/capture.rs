//! Template Capture - recorded sequences → new gesture templates
//!
//! Captures accumulate in memory until committed. Committing never mutates
//! the current model; it builds a replacement.

use crate::error::ModelError;
use crate::logic::features::Sequence;
use crate::logic::model::{ClassifierKind, GestureModel, GestureTemplate};

#[derive(Debug, Clone)]
pub struct TemplateCapture {
    dimension: usize,
    templates: Vec<GestureTemplate>,
}

impl TemplateCapture {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            templates: Vec::new(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Store `sequence` under `label`. Returns the label's sequence count.
    pub fn add(&mut self, label: &str, sequence: Sequence) -> Result<usize, ModelError> {
        let label = label.trim();
        let candidate = GestureTemplate::new(label, vec![sequence]);
        candidate.validate(self.dimension)?;

        let count = match self.templates.iter_mut().find(|t| t.label == label) {
            Some(existing) => {
                existing.sequences.extend(candidate.sequences);
                existing.sequences.len()
            }
            None => {
                self.templates.push(candidate);
                1
            }
        };

        log::info!("[Capture] Captured '{}' ({} sequences)", label, count);
        Ok(count)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.label.as_str())
    }

    /// Captured sequences across all labels
    pub fn len(&self) -> usize {
        self.templates.iter().map(|t| t.sequences.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn clear(&mut self) {
        self.templates.clear();
    }

    /// New model: `base` templates (if any) plus everything captured
    pub fn build_model(&self, base: Option<&GestureModel>) -> Result<GestureModel, ModelError> {
        if self.is_empty() {
            return Err(ModelError::NothingCaptured);
        }

        match base {
            Some(model) if model.feature_dimension() != self.dimension => Err(ModelError::DimensionMismatch {
                model: model.feature_dimension(),
                extractor: self.dimension,
            }),
            Some(model) => model.extended_with(self.templates.clone()),
            None => GestureModel::new(self.dimension, ClassifierKind::Dtw, self.templates.clone()),
        }
    }
}
