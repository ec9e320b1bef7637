//! Room classification and renovation feature types.

use serde::Serialize;

/// Inferred location of a photograph within a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Bathroom,
    Kitchen,
    LivingRoom,
    Bedroom,
    DiningRoom,
    /// Fallback bucket when no room-specific objects dominate.
    GeneralRenovation,
}

/// Result of the room classification policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Classified room category.
    pub room_type: RoomType,
    /// Classification confidence in [0, 1].
    pub confidence: f32,
    /// Human-readable summary of the contributing labels.
    pub reasoning: String,
}

/// Renovation-relevant feature categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Bathroom fixtures (toilet, sink).
    Fixtures,
    /// Kitchen appliances (refrigerator, oven, microwave).
    Appliances,
}

/// A renovation feature extracted from the detections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    /// Feature category.
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    /// Best confidence among the contributing labels.
    pub confidence: f32,
    /// Detection method tag carried through to the output record.
    pub detection_method: &'static str,
}

impl Feature {
    /// Creates a feature tagged with the object-detection method.
    #[must_use]
    pub const fn new(kind: FeatureKind, confidence: f32) -> Self {
        Self {
            kind,
            confidence,
            detection_method: "yolo",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_room_type_serialization() {
        let json = serde_json::to_string(&RoomType::LivingRoom).unwrap();
        assert_eq!(json, "\"living_room\"");
        let json = serde_json::to_string(&RoomType::GeneralRenovation).unwrap();
        assert_eq!(json, "\"general_renovation\"");
    }

    #[test]
    fn test_feature_serialization() {
        let feature = Feature::new(FeatureKind::Appliances, 0.8);
        let json = serde_json::to_value(&feature).unwrap();
        assert_eq!(json["type"], "appliances");
        assert_eq!(json["detection_method"], "yolo");
    }
}
