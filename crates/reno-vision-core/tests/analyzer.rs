//! End-to-end orchestrator tests against mock collaborators.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use reno_vision_core::domain::{AnalysisOutcome, Label, RoomType, SkipReason};
use reno_vision_core::error::AnalysisError;
use reno_vision_core::Analyzer;
use reno_vision_test_support::{
    FailingDetector, FailingShapeAnalyzer, MockDetector, MockShapeAnalyzer, SceneBuilder,
    ShapeStatsBuilder, SyntheticImageBuilder,
};

fn temp_image(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    SyntheticImageBuilder::save_uniform_gray(&path, 16, 16, 128).unwrap();
    path
}

#[test]
fn test_bathroom_scene_produces_full_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_image(&dir, "bath.png");

    let analyzer = Analyzer::new(
        Box::new(MockDetector::new(SceneBuilder::bathroom())),
        Box::new(MockShapeAnalyzer::new(
            ShapeStatsBuilder::new()
                .shapes(75)
                .resonance(5)
                .time_ms(2.0)
                .build(),
        )),
    );

    let outcome = analyzer.analyze(&path).unwrap();
    let record = outcome.record().unwrap();

    assert_eq!(record.room_type, RoomType::Bathroom);
    assert_eq!(record.room_confidence, 0.75);
    assert_eq!(record.filename, "bath.png");
    assert_eq!(record.sha256.len(), 64);
    assert_eq!(record.shapes_detected, 75);
    assert_eq!(record.resonance_points, 5);
    // resonance 5 saturates the base score; two labels add the boost,
    // then the cap applies
    assert_eq!(record.quality_score, 1.0);
    assert_eq!(record.complexity_score, 0.5);
    assert_eq!(record.features.len(), 2);
    assert!(record.exif.is_empty());
    assert!(record.analyzed_at.contains('T'));
}

#[test]
fn test_person_scene_is_skipped_before_classification() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_image(&dir, "people.png");

    let analyzer = Analyzer::new(
        Box::new(MockDetector::new(SceneBuilder::with_person())),
        Box::new(MockShapeAnalyzer::new(ShapeStatsBuilder::new().build())),
    );

    let outcome = analyzer.analyze(&path).unwrap();
    assert!(outcome.is_skipped());
    assert!(matches!(
        outcome,
        AnalysisOutcome::Skipped {
            reason: SkipReason::ContainsPeople
        }
    ));
}

#[test]
fn test_empty_scene_classifies_as_general_renovation() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_image(&dir, "empty.png");

    let analyzer = Analyzer::new(
        Box::new(MockDetector::empty()),
        Box::new(MockShapeAnalyzer::new(ShapeStatsBuilder::new().build())),
    );

    let outcome = analyzer.analyze(&path).unwrap();
    let record = outcome.record().unwrap();

    assert_eq!(record.room_type, RoomType::GeneralRenovation);
    assert_eq!(record.room_confidence, 0.5);
    assert_eq!(record.classification_reasoning, "No objects detected");
    assert!(record.features.is_empty());
    assert_eq!(record.quality_score, 0.0);
}

#[test]
fn test_detector_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_image(&dir, "broken.png");

    let analyzer = Analyzer::new(
        Box::new(FailingDetector::new("weights not loadable")),
        Box::new(MockShapeAnalyzer::new(ShapeStatsBuilder::new().build())),
    );

    let err = analyzer.analyze(&path).unwrap_err();
    assert!(matches!(err, AnalysisError::Detection { .. }));
}

#[test]
fn test_shape_analysis_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_image(&dir, "broken.png");

    let analyzer = Analyzer::new(
        Box::new(MockDetector::new(SceneBuilder::kitchen())),
        Box::new(FailingShapeAnalyzer::new("decode error")),
    );

    let err = analyzer.analyze(&path).unwrap_err();
    assert!(matches!(err, AnalysisError::ShapeAnalysis { .. }));
}

#[test]
fn test_unreadable_file_fails_at_hashing() {
    // Detector and shape analyzer are mocks that ignore the path, so the
    // first step that touches the file is the content hash.
    let analyzer = Analyzer::new(
        Box::new(MockDetector::new(SceneBuilder::living_room())),
        Box::new(MockShapeAnalyzer::new(ShapeStatsBuilder::new().build())),
    );

    let err = analyzer
        .analyze(std::path::Path::new("/nonexistent/photo.jpg"))
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Io { .. }));
}

#[test]
fn test_record_serializes_with_expected_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_image(&dir, "kitchen.png");

    let analyzer = Analyzer::new(
        Box::new(MockDetector::new(SceneBuilder::kitchen())),
        Box::new(MockShapeAnalyzer::new(
            ShapeStatsBuilder::new().shapes(30).resonance(2).build(),
        )),
    );

    let outcome = analyzer.analyze(&path).unwrap();
    let record = outcome.record().unwrap();
    let json = serde_json::to_value(record).unwrap();

    assert_eq!(json["room_type"], "kitchen");
    assert_eq!(json["detected_objects"]["refrigerator"], 0.5);
    assert_eq!(json["features"][0]["detection_method"], "yolo");
    assert_eq!(json["shapes_detected"], 30);
    assert!(json["sha256"].as_str().unwrap().len() == 64);
    // Empty EXIF serializes as an empty object, not null
    assert!(json["exif"].is_object());
    assert!(json.get("filename").is_some());
    assert!(json.get("analyzed_at").is_some());
}
