//! Mock implementations of core port traits.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use reno_vision_core::domain::{AnalysisRecord, Detection, ShapeStats};
use reno_vision_core::ports::{ObjectDetector, RecordOutput, ShapeAnalyzer};

/// Mock implementation of `ObjectDetector` for testing.
///
/// Returns pre-built detections for any path and tracks the paths it was
/// asked about.
pub struct MockDetector {
    detections: Vec<Detection>,
    calls: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockDetector {
    /// Creates a new mock detector with the given detections.
    #[must_use]
    pub fn new(detections: Vec<Detection>) -> Self {
        Self {
            detections,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a detector that sees nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns the paths the detector was called with.
    #[must_use]
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ObjectDetector for MockDetector {
    fn detect(&self, path: &Path) -> anyhow::Result<Vec<Detection>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_path_buf());
        Ok(self.detections.clone())
    }
}

/// An `ObjectDetector` that always fails.
pub struct FailingDetector {
    message: String,
}

impl FailingDetector {
    /// Creates a detector that fails with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ObjectDetector for FailingDetector {
    fn detect(&self, _path: &Path) -> anyhow::Result<Vec<Detection>> {
        Err(anyhow::anyhow!("{}", self.message))
    }
}

/// Mock implementation of `ShapeAnalyzer` for testing.
pub struct MockShapeAnalyzer {
    stats: ShapeStats,
}

impl MockShapeAnalyzer {
    /// Creates a new mock analyzer returning the given stats.
    #[must_use]
    pub fn new(stats: ShapeStats) -> Self {
        Self { stats }
    }
}

impl ShapeAnalyzer for MockShapeAnalyzer {
    fn analyze(&self, _path: &Path) -> anyhow::Result<ShapeStats> {
        Ok(self.stats.clone())
    }
}

/// A `ShapeAnalyzer` that always fails.
pub struct FailingShapeAnalyzer {
    message: String,
}

impl FailingShapeAnalyzer {
    /// Creates an analyzer that fails with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ShapeAnalyzer for FailingShapeAnalyzer {
    fn analyze(&self, _path: &Path) -> anyhow::Result<ShapeStats> {
        Err(anyhow::anyhow!("{}", self.message))
    }
}

/// Mock implementation of `RecordOutput` for testing.
///
/// Captures records for later assertions.
pub struct MockRecordOutput {
    records: Arc<Mutex<Vec<AnalysisRecord>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockRecordOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured records.
    #[must_use]
    pub fn records(&self) -> Vec<AnalysisRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockRecordOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordOutput for MockRecordOutput {
    fn write(&self, record: &AnalysisRecord) -> anyhow::Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use reno_vision_core::domain::Label;

    #[test]
    fn test_mock_detector_records_calls() {
        let detector = MockDetector::new(vec![Detection::new(Label::Toilet, 0.9)]);

        let detections = detector.detect(Path::new("a.jpg")).unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detector.calls(), vec![PathBuf::from("a.jpg")]);
    }

    #[test]
    fn test_failing_detector() {
        let detector = FailingDetector::new("model missing");
        let err = detector.detect(Path::new("a.jpg")).unwrap_err();
        assert!(err.to_string().contains("model missing"));
    }

    #[test]
    fn test_mock_record_output_captures_writes() {
        use reno_vision_core::domain::{DetectionSet, ExifSummary, RoomType};

        let output = MockRecordOutput::new();
        let record = AnalysisRecord {
            filename: "a.jpg".into(),
            file_path: "/photos/a.jpg".into(),
            sha256: "00".repeat(32),
            detected_objects: DetectionSet::new(),
            room_type: RoomType::GeneralRenovation,
            room_confidence: 0.5,
            classification_reasoning: "No objects detected".into(),
            features: vec![],
            shapes_detected: 0,
            resonance_points: 0,
            processing_time_ms: 0.0,
            exif: ExifSummary::default(),
            quality_score: 0.0,
            complexity_score: 0.0,
            analyzed_at: "2026-01-01T00:00:00Z".into(),
        };

        output.write(&record).unwrap();
        output.flush().unwrap();

        assert_eq!(output.records().len(), 1);
        assert_eq!(output.records()[0].filename, "a.jpg");
        assert_eq!(output.flush_count(), 1);
    }

    #[test]
    fn test_mock_shape_analyzer() {
        let analyzer = MockShapeAnalyzer::new(ShapeStats {
            shapes_detected: 3,
            resonance_points: 2,
            processing_time_ms: 1.5,
        });

        let stats = analyzer.analyze(Path::new("a.jpg")).unwrap();
        assert_eq!(stats.shapes_detected, 3);
        assert_eq!(stats.resonance_points, 2);
    }
}
