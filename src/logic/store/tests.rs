use super::artifact::{templates_checksum, ModelArtifact, FORMAT_VERSION};
use super::storage::{FileModelStore, ModelStore};
use super::validate::validate_artifact;
use crate::error::{ModelError, StoreError};
use crate::logic::features::layout::{layout_hash, FEATURE_VERSION};
use crate::logic::features::FeatureLayout;
use crate::logic::model::{ClassifierKind, GestureModel, GestureTemplate};
use crate::logic::testing::{wave_sequence, Motion, Placement};

fn sample_model() -> GestureModel {
    GestureModel::new(
        63,
        ClassifierKind::Dtw,
        vec![
            GestureTemplate::new("hello", vec![wave_sequence(10, 0.25, Motion::Roll, Placement::default())]),
            GestureTemplate::new(
                "yes",
                vec![
                    wave_sequence(8, 0.6, Motion::Pitch, Placement::default()),
                    wave_sequence(11, 0.7, Motion::Pitch, Placement::default()),
                ],
            ),
        ],
    )
    .unwrap()
}

fn one_hand() -> FeatureLayout {
    FeatureLayout::new(1)
}

#[test]
fn test_export_carries_metadata() {
    let model = sample_model();
    let artifact = ModelArtifact::from_model(&model);

    assert_eq!(artifact.format_version, FORMAT_VERSION);
    assert_eq!(artifact.feature_dimension, 63);
    assert_eq!(artifact.classifier_kind, ClassifierKind::Dtw);
    assert_eq!(artifact.model_id, Some(model.id()));
    assert_eq!(artifact.layout_version, Some(FEATURE_VERSION));
    assert_eq!(artifact.layout_hash, Some(layout_hash(1)));
    assert_eq!(artifact.sequence_count(), 3);
    assert!(validate_artifact(&artifact, &one_hand()).is_ok());
}

#[test]
fn test_wire_format_field_names() {
    let artifact = ModelArtifact::from_model(&sample_model());
    let value = serde_json::to_value(&artifact).unwrap();

    assert_eq!(value["formatVersion"], 1);
    assert_eq!(value["featureDimension"], 63);
    assert_eq!(value["classifierKind"], "dtw");
    assert_eq!(value["templates"][0]["label"], "hello");
    assert_eq!(value["templates"][0]["sequences"][0].as_array().unwrap().len(), 10);
    assert_eq!(value["templates"][0]["sequences"][0][0].as_array().unwrap().len(), 63);
}

#[test]
fn test_minimal_artifact_loads() {
    let frame = vec![0.0f32; 63];
    let json = serde_json::json!({
        "formatVersion": 1,
        "featureDimension": 63,
        "classifierKind": "dtw",
        "templates": [{ "label": "hi", "sequences": [[frame.clone(), frame]] }]
    });

    let artifact: ModelArtifact = serde_json::from_value(json).unwrap();
    assert!(artifact.model_id.is_none());
    assert!(artifact.checksum.is_none());

    let model = artifact.into_model(&one_hand()).unwrap();
    assert_eq!(model.label_count(), 1);
    assert_eq!(model.template("hi").unwrap().sequences[0].len(), 2);
}

#[test]
fn test_unknown_classifier_kind_is_rejected() {
    let json = r#"{"formatVersion":1,"featureDimension":63,"classifierKind":"hmm","templates":[]}"#;
    assert!(serde_json::from_str::<ModelArtifact>(json).is_err());
}

#[test]
fn test_reject_format_version() {
    let mut artifact = ModelArtifact::from_model(&sample_model());
    artifact.format_version = FORMAT_VERSION + 1;

    match validate_artifact(&artifact, &one_hand()) {
        Err(ModelError::UnsupportedFormat { found, supported }) => {
            assert_eq!(found, FORMAT_VERSION + 1);
            assert_eq!(supported, FORMAT_VERSION);
        }
        other => panic!("Expected UnsupportedFormat, got {:?}", other),
    }
}

#[test]
fn test_reject_dimension_mismatch_with_extractor() {
    let artifact = ModelArtifact::from_model(&sample_model());

    // Model was built for one hand, extractor runs with two
    match artifact.into_model(&FeatureLayout::new(2)) {
        Err(ModelError::DimensionMismatch { model, extractor }) => {
            assert_eq!(model, 63);
            assert_eq!(extractor, 126);
        }
        other => panic!("Expected DimensionMismatch, got {:?}", other),
    }
}

#[test]
fn test_reject_frame_dimension_inside_templates() {
    let mut artifact = ModelArtifact::from_model(&sample_model());
    artifact.checksum = None;
    artifact.templates[1].sequences[1][4] = crate::logic::features::FeatureVector::zeros(62);

    assert!(matches!(
        artifact.into_model(&one_hand()),
        Err(ModelError::FrameDimension { sequence: 1, frame: 4, .. })
    ));
}

#[test]
fn test_reject_layout_hash_mismatch() {
    let mut artifact = ModelArtifact::from_model(&sample_model());
    artifact.layout_hash = Some(!layout_hash(1));

    assert!(matches!(
        validate_artifact(&artifact, &one_hand()),
        Err(ModelError::LayoutMismatch { .. })
    ));
}

#[test]
fn test_reject_tampered_templates() {
    let mut artifact = ModelArtifact::from_model(&sample_model());
    artifact.templates[0].label = "goodbye".into();

    match validate_artifact(&artifact, &one_hand()) {
        Err(ModelError::ChecksumMismatch { actual, .. }) => {
            assert_eq!(actual, templates_checksum(&artifact.templates));
        }
        other => panic!("Expected ChecksumMismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_save_load_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileModelStore::new(dir.path().join("models").join("gestures.json"));

    let model = sample_model();
    let saved = ModelArtifact::from_model(&model);
    store.save(&saved).await.unwrap();

    let loaded = store.load().await.unwrap().expect("model should exist");
    assert_eq!(loaded, saved);

    let restored = loaded.into_model(&one_hand()).unwrap();
    assert_eq!(restored.id(), model.id());
    assert_eq!(restored.templates(), model.templates());
    assert!(!dir.path().join("models").join("gestures.json.tmp").exists());
}

#[tokio::test]
async fn test_load_missing_file_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileModelStore::new(dir.path().join("absent.json"));
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_load_corrupt_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let store = FileModelStore::new(&path);
    assert!(matches!(store.load().await, Err(StoreError::Serialization(_))));
}
