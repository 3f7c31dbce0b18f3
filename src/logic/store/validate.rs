use super::artifact::{templates_checksum, ModelArtifact, FORMAT_VERSION};
use crate::error::ModelError;
use crate::logic::features::FeatureLayout;

/// Validate artifact compatibility with the live extractor.
///
/// Per-frame checks (dimension, empty sequences, finite values) run when
/// the model itself is built.
pub fn validate_artifact(artifact: &ModelArtifact, layout: &FeatureLayout) -> Result<(), ModelError> {
    if artifact.format_version != FORMAT_VERSION {
        return Err(ModelError::UnsupportedFormat {
            found: artifact.format_version,
            supported: FORMAT_VERSION,
        });
    }

    if artifact.feature_dimension != layout.dimension {
        return Err(ModelError::DimensionMismatch {
            model: artifact.feature_dimension,
            extractor: layout.dimension,
        });
    }

    if artifact.layout_version.is_some() || artifact.layout_hash.is_some() {
        layout.validate(
            artifact.layout_version.unwrap_or(layout.version),
            artifact.layout_hash.unwrap_or(layout.hash),
        )?;
    }

    if let Some(expected) = &artifact.checksum {
        let actual = templates_checksum(&artifact.templates);
        if !expected.eq_ignore_ascii_case(&actual) {
            return Err(ModelError::ChecksumMismatch {
                expected: expected.clone(),
                actual,
            });
        }
    }

    Ok(())
}
