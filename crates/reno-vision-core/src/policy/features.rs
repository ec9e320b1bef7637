//! Renovation feature extraction.
//!
//! Two independent, non-exclusive checks over the detection set. Feature
//! extraction does not depend on the room classification.

use crate::domain::{DetectionSet, Feature, FeatureKind, Label};

/// Labels that count as bathroom fixtures.
const FIXTURE_LABELS: [Label; 2] = [Label::Toilet, Label::Sink];

/// Labels that count as kitchen appliances.
const APPLIANCE_LABELS: [Label; 3] = [Label::Refrigerator, Label::Oven, Label::Microwave];

/// Extracts renovation features from the detections.
///
/// Each feature's confidence is the maximum over its present members.
#[must_use]
pub fn extract_features(detections: &DetectionSet) -> Vec<Feature> {
    let mut features = Vec::new();

    if let Some(confidence) = detections.max_of(&FIXTURE_LABELS) {
        features.push(Feature::new(FeatureKind::Fixtures, confidence));
    }

    if let Some(confidence) = detections.max_of(&APPLIANCE_LABELS) {
        features.push(Feature::new(FeatureKind::Appliances, confidence));
    }

    features
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::domain::Detection;

    fn set(entries: &[(Label, f32)]) -> DetectionSet {
        let detections: Vec<Detection> = entries
            .iter()
            .map(|&(label, confidence)| Detection::new(label, confidence))
            .collect();
        DetectionSet::from_detections(&detections)
    }

    #[test]
    fn test_no_features_from_furniture() {
        let features = extract_features(&set(&[(Label::Couch, 0.9), (Label::Tv, 0.8)]));
        assert!(features.is_empty());
    }

    #[test]
    fn test_fixtures_take_max_confidence() {
        let features = extract_features(&set(&[(Label::Toilet, 0.6), (Label::Sink, 0.9)]));
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].kind, FeatureKind::Fixtures);
        assert_eq!(features[0].confidence, 0.9);
        assert_eq!(features[0].detection_method, "yolo");
    }

    #[test]
    fn test_appliances_independent_of_room_type() {
        // A lone refrigerator classifies as kitchen or general, but the
        // appliances feature fires regardless.
        let features = extract_features(&set(&[(Label::Refrigerator, 0.8)]));
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].kind, FeatureKind::Appliances);
        assert_eq!(features[0].confidence, 0.8);
    }

    #[test]
    fn test_both_features_together() {
        let features = extract_features(&set(&[
            (Label::Sink, 0.7),
            (Label::Oven, 0.5),
            (Label::Microwave, 0.6),
        ]));
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].kind, FeatureKind::Fixtures);
        assert_eq!(features[0].confidence, 0.7);
        assert_eq!(features[1].kind, FeatureKind::Appliances);
        assert_eq!(features[1].confidence, 0.6);
    }
}
