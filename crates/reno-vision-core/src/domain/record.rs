//! The assembled analysis record and its supporting types.

use serde::Serialize;

use super::{Classification, DetectionSet, Feature};

/// Output of the supplementary shape-analysis collaborator.
///
/// The counts are opaque signals consumed by the scoring policy; their
/// internal meaning belongs to the shape analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShapeStats {
    /// Number of shapes found in the image.
    pub shapes_detected: u32,
    /// Resonance point count, input to the quality heuristic.
    pub resonance_points: u32,
    /// Wall-clock time the shape analysis took.
    pub processing_time_ms: f64,
}

/// GPS position in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GpsCoordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Capture metadata read from the image's EXIF container.
///
/// Every field is optional; a missing or corrupt container yields the
/// default (empty) summary rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExifSummary {
    /// GPS position, if the container carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps: Option<GpsCoordinates>,
    /// Original capture timestamp, as recorded by the camera.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_taken: Option<String>,
    /// Camera model string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_model: Option<String>,
}

impl ExifSummary {
    /// True if no metadata field was read.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gps.is_none() && self.date_taken.is_none() && self.camera_model.is_none()
    }
}

/// Complete analysis record for a single photograph.
///
/// Immutable once produced; written once to the output sink.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRecord {
    /// Image file name.
    pub filename: String,
    /// Full path to the image file.
    pub file_path: String,
    /// SHA-256 digest of the file contents, lowercase hex.
    pub sha256: String,

    /// Best confidence per detected label.
    pub detected_objects: DetectionSet,
    /// Classified room category.
    pub room_type: super::RoomType,
    /// Classification confidence in [0, 1].
    pub room_confidence: f32,
    /// Human-readable classification reasoning.
    pub classification_reasoning: String,

    /// Renovation features extracted from the detections.
    pub features: Vec<Feature>,

    /// Shape-analysis passthrough: shapes found.
    pub shapes_detected: u32,
    /// Shape-analysis passthrough: resonance points.
    pub resonance_points: u32,
    /// Shape-analysis passthrough: processing time.
    pub processing_time_ms: f64,

    /// Capture metadata; empty object when unavailable.
    pub exif: ExifSummary,

    /// Quality score in [0, 1], rounded to 2 decimal places.
    pub quality_score: f32,
    /// Complexity score in [0, 1].
    pub complexity_score: f32,

    /// When the analysis ran (RFC 3339, UTC).
    pub analyzed_at: String,
}

impl AnalysisRecord {
    /// Splits a classification into the record's flattened fields.
    pub(crate) fn apply_classification(&mut self, classification: Classification) {
        self.room_type = classification.room_type;
        self.room_confidence = classification.confidence;
        self.classification_reasoning = classification.reasoning;
    }
}

/// Reason an image was excluded from analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// People were detected; restricted content is never analyzed.
    ContainsPeople,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContainsPeople => f.write_str("contains people"),
        }
    }
}

/// Terminal outcome of analyzing one image.
///
/// A tagged result rather than an optional record, so callers must handle
/// the skipped case explicitly.
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    /// Analysis completed; the assembled record.
    Analyzed(Box<AnalysisRecord>),
    /// The image was excluded before classification.
    Skipped {
        /// Why the image was excluded.
        reason: SkipReason,
    },
}

impl AnalysisOutcome {
    /// The record, if the image was analyzed.
    #[must_use]
    pub fn record(&self) -> Option<&AnalysisRecord> {
        match self {
            Self::Analyzed(record) => Some(record),
            Self::Skipped { .. } => None,
        }
    }

    /// True if the image was skipped.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_exif_summary_serializes_to_empty_object() {
        let summary = ExifSummary::default();
        assert!(summary.is_empty());
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_exif_summary_with_gps() {
        let summary = ExifSummary {
            gps: Some(GpsCoordinates { lat: 40.5, lng: -73.25 }),
            date_taken: None,
            camera_model: Some("TestCam".into()),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["gps"]["lat"], 40.5);
        assert_eq!(json["gps"]["lng"], -73.25);
        assert_eq!(json["camera_model"], "TestCam");
        assert!(json.get("date_taken").is_none());
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::ContainsPeople.to_string(), "contains people");
    }
}
