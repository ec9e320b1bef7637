//! The analysis orchestrator.
//!
//! Sequences detection, the skip check, classification, feature
//! extraction, shape analysis, metadata extraction, and scoring for a
//! single image, then assembles the record. Strictly linear; no step
//! retries.

use std::path::Path;

use tracing::{debug, info};

use crate::domain::{AnalysisOutcome, AnalysisRecord, DetectionSet, Label, SkipReason};
use crate::error::AnalysisError;
use crate::metadata::{read_exif, sha256_file};
use crate::policy::{classify_room, complexity_score, extract_features, quality_score};
use crate::ports::{ObjectDetector, ShapeAnalyzer};

/// Orchestrates the analysis of one image at a time.
///
/// The detector and shape analyzer are injected once per process; the
/// analyzer itself holds no other state and every call is independent.
pub struct Analyzer {
    detector: Box<dyn ObjectDetector>,
    shapes: Box<dyn ShapeAnalyzer>,
}

impl Analyzer {
    /// Creates an analyzer over the given collaborators.
    #[must_use]
    pub fn new(detector: Box<dyn ObjectDetector>, shapes: Box<dyn ShapeAnalyzer>) -> Self {
        Self { detector, shapes }
    }

    /// Analyzes a single image.
    ///
    /// Returns [`AnalysisOutcome::Skipped`] when the image contains
    /// people; this is a defined terminal outcome, not an error.
    ///
    /// # Errors
    ///
    /// Fails on detection or shape-analysis errors, or when the file
    /// cannot be read for hashing. Metadata problems never fail the
    /// analysis; they yield an empty EXIF summary.
    pub fn analyze(&self, path: &Path) -> Result<AnalysisOutcome, AnalysisError> {
        let path_str = path.to_string_lossy().into_owned();
        info!("Analyzing {path_str}");

        let detections = self
            .detector
            .detect(path)
            .map_err(|source| AnalysisError::Detection {
                path: path_str.clone(),
                source,
            })?;
        let detected = DetectionSet::from_detections(&detections);
        debug!("{} distinct labels detected", detected.len());

        // Restricted content check runs before any classification.
        if detected.contains(Label::Person) {
            info!("Skipping {path_str}: contains people");
            return Ok(AnalysisOutcome::Skipped {
                reason: SkipReason::ContainsPeople,
            });
        }

        let classification = classify_room(&detected);
        debug!(
            "Room: {:?} ({:.2}) - {}",
            classification.room_type, classification.confidence, classification.reasoning
        );

        let features = extract_features(&detected);
        debug!("{} renovation features", features.len());

        let shape_stats =
            self.shapes
                .analyze(path)
                .map_err(|source| AnalysisError::ShapeAnalysis {
                    path: path_str.clone(),
                    source,
                })?;
        debug!(
            "Shapes: {} detected, {} resonance points in {:.2}ms",
            shape_stats.shapes_detected,
            shape_stats.resonance_points,
            shape_stats.processing_time_ms
        );

        // Metadata degrades gracefully; hashing does not.
        let exif = read_exif(path);
        let sha256 = sha256_file(path).map_err(|source| AnalysisError::Io {
            path: path_str.clone(),
            source,
        })?;

        let quality = quality_score(&shape_stats, &detected);
        let complexity = complexity_score(&shape_stats);

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path_str.clone());

        let mut record = AnalysisRecord {
            filename,
            file_path: path_str,
            sha256,
            detected_objects: detected,
            room_type: classification.room_type,
            room_confidence: classification.confidence,
            classification_reasoning: String::new(),
            features,
            shapes_detected: shape_stats.shapes_detected,
            resonance_points: shape_stats.resonance_points,
            processing_time_ms: shape_stats.processing_time_ms,
            exif,
            quality_score: quality,
            complexity_score: complexity,
            analyzed_at: rfc3339_now(),
        };
        record.apply_classification(classification);

        Ok(AnalysisOutcome::Analyzed(Box::new(record)))
    }
}

/// Current UTC time as RFC 3339.
fn rfc3339_now() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|e| {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        })
}
