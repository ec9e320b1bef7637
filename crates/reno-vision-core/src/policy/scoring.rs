//! Quality and complexity scoring.
//!
//! Pure functions of the shape-analysis output and the detection set.

use crate::domain::{DetectionSet, ShapeStats};

/// Resonance points that map to a base quality of 1.0.
const RESONANCE_FULL_SCALE: f32 = 5.0;

/// Quality boost when the detector found multiple distinct objects.
const MULTI_OBJECT_BOOST: f32 = 0.3;

/// Distinct labels required for the boost.
const MULTI_OBJECT_MIN_LABELS: usize = 2;

/// Shape count that maps to a complexity of 1.0.
const COMPLEXITY_FULL_SCALE: f32 = 150.0;

/// Quality score in [0, 1], rounded to 2 decimal places.
///
/// Base quality comes from the shape analyzer's resonance points; a
/// fixed boost applies when at least two distinct labels were detected.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn quality_score(shapes: &ShapeStats, detections: &DetectionSet) -> f32 {
    let mut quality = (shapes.resonance_points as f32 / RESONANCE_FULL_SCALE).min(1.0);

    if detections.len() >= MULTI_OBJECT_MIN_LABELS {
        quality = (quality + MULTI_OBJECT_BOOST).min(1.0);
    }

    (quality * 100.0).round() / 100.0
}

/// Complexity score in [0, 1], proportional to the shape count.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn complexity_score(shapes: &ShapeStats) -> f32 {
    (shapes.shapes_detected as f32 / COMPLEXITY_FULL_SCALE).clamp(0.0, 1.0)
}
