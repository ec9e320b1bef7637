//! Room classification policy.
//!
//! A deterministic, order-sensitive rule chain over the detection set.
//! First match wins; the priority order below is part of the contract.

use crate::domain::{Classification, DetectionSet, Label, RoomType};

/// Labels whose summed confidence indicates a bathroom.
const BATHROOM_LABELS: [Label; 2] = [Label::Toilet, Label::Sink];

/// Labels whose summed confidence indicates a kitchen. `sink` appears in
/// both the bathroom and kitchen sets; bathroom is evaluated first and
/// wins ties. This double-counting is a deliberate, documented priority,
/// not a bug.
const KITCHEN_LABELS: [Label; 4] = [
    Label::Refrigerator,
    Label::Oven,
    Label::Microwave,
    Label::Sink,
];

/// Labels whose summed confidence indicates a living room.
const LIVING_ROOM_LABELS: [Label; 3] = [Label::Couch, Label::Tv, Label::Chair];

/// Minimum summed confidence for a score-based room match.
const ROOM_SCORE_THRESHOLD: f32 = 0.5;

/// Cap on summed-confidence room scores for specific rooms.
const SUMMED_CONFIDENCE_CAP: f32 = 0.95;

/// Cap for living-room matches; furniture is weaker evidence.
const LIVING_ROOM_CAP: f32 = 0.85;

/// Classifies the room type from the detection set.
///
/// Pure, stateless, and total: every detection set maps to exactly one
/// classification. The `person` label is ignored here; the skip policy
/// runs earlier in the pipeline, but a person-only set still classifies
/// to a defined fallback so the function stays total.
#[must_use]
pub fn classify_room(detections: &DetectionSet) -> Classification {
    if detections.is_empty() {
        return Classification {
            room_type: RoomType::GeneralRenovation,
            confidence: 0.50,
            reasoning: "No objects detected".into(),
        };
    }

    // Remove people from consideration.
    let non_person: Vec<(Label, f32)> = detections
        .iter()
        .filter(|(label, _)| *label != Label::Person)
        .collect();

    if non_person.is_empty() {
        return Classification {
            room_type: RoomType::GeneralRenovation,
            confidence: 0.50,
            reasoning: "Only people detected".into(),
        };
    }

    // Bathroom first: toilet and sink are very specific evidence.
    let bathroom_score = detections.sum_of(&BATHROOM_LABELS);
    if bathroom_score > ROOM_SCORE_THRESHOLD {
        return Classification {
            room_type: RoomType::Bathroom,
            confidence: bathroom_score.min(SUMMED_CONFIDENCE_CAP),
            reasoning: detected_reasoning(detections, &BATHROOM_LABELS),
        };
    }

    let kitchen_score = detections.sum_of(&KITCHEN_LABELS);
    if kitchen_score > ROOM_SCORE_THRESHOLD {
        return Classification {
            room_type: RoomType::Kitchen,
            confidence: kitchen_score.min(SUMMED_CONFIDENCE_CAP),
            reasoning: detected_reasoning(detections, &KITCHEN_LABELS),
        };
    }

    let living_score = detections.sum_of(&LIVING_ROOM_LABELS);
    if living_score > ROOM_SCORE_THRESHOLD {
        return Classification {
            room_type: RoomType::LivingRoom,
            confidence: living_score.min(LIVING_ROOM_CAP),
            reasoning: detected_reasoning(detections, &LIVING_ROOM_LABELS),
        };
    }

    // Single-label rooms use the label's own confidence, not a sum.
    if let Some(confidence) = detections.get(Label::Bed) {
        return Classification {
            room_type: RoomType::Bedroom,
            confidence,
            reasoning: "Detected: bed".into(),
        };
    }

    if let Some(confidence) = detections.get(Label::DiningTable) {
        return Classification {
            room_type: RoomType::DiningRoom,
            confidence,
            reasoning: "Detected: dining table".into(),
        };
    }

    let remaining: Vec<&str> = non_person.iter().map(|(l, _)| l.as_str()).collect();
    Classification {
        room_type: RoomType::GeneralRenovation,
        confidence: 0.60,
        reasoning: format!("Detected: {}", remaining.join(", ")),
    }
}

/// "Detected: a, b" over the candidate labels that are present.
fn detected_reasoning(detections: &DetectionSet, candidates: &[Label]) -> String {
    let present: Vec<&str> = detections
        .iter()
        .filter(|(label, _)| candidates.contains(label))
        .map(|(label, _)| label.as_str())
        .collect();
    format!("Detected: {}", present.join(", "))
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
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
    fn test_empty_set_is_general_renovation() {
        let result = classify_room(&DetectionSet::new());
        assert_eq!(result.room_type, RoomType::GeneralRenovation);
        assert_eq!(result.confidence, 0.50);
        assert_eq!(result.reasoning, "No objects detected");
    }

    #[test]
    fn test_person_only_is_general_renovation() {
        let result = classify_room(&set(&[(Label::Person, 0.99)]));
        assert_eq!(result.room_type, RoomType::GeneralRenovation);
        assert_eq!(result.confidence, 0.50);
        assert_eq!(result.reasoning, "Only people detected");
    }

    #[test]
    fn test_bathroom_from_toilet_and_sink() {
        let result = classify_room(&set(&[(Label::Toilet, 0.5), (Label::Sink, 0.25)]));
        assert_eq!(result.room_type, RoomType::Bathroom);
        assert_eq!(result.confidence, 0.75);
        assert_eq!(result.reasoning, "Detected: toilet, sink");
    }

    #[test]
    fn test_bathroom_confidence_capped_at_095() {
        let result = classify_room(&set(&[(Label::Toilet, 0.9), (Label::Sink, 0.9)]));
        assert_eq!(result.room_type, RoomType::Bathroom);
        // Raw sum is 1.8; the cap holds.
        assert_eq!(result.confidence, 0.95);
    }

    #[test]
    fn test_bathroom_beats_kitchen_on_shared_sink() {
        // sink 0.9 alone pushes the bathroom score over 0.5, so bathroom
        // wins even though oven 0.9 makes the kitchen score larger.
        let result = classify_room(&set(&[(Label::Sink, 0.9), (Label::Oven, 0.9)]));
        assert_eq!(result.room_type, RoomType::Bathroom);
    }

    #[test]
    fn test_kitchen_from_appliances() {
        let result = classify_room(&set(&[
            (Label::Refrigerator, 0.5),
            (Label::Microwave, 0.25),
        ]));
        assert_eq!(result.room_type, RoomType::Kitchen);
        assert_eq!(result.confidence, 0.75);
        assert_eq!(result.reasoning, "Detected: refrigerator, microwave");
    }

    #[test]
    fn test_kitchen_confidence_capped_at_095() {
        let result = classify_room(&set(&[
            (Label::Refrigerator, 0.9),
            (Label::Oven, 0.9),
            (Label::Microwave, 0.9),
        ]));
        assert_eq!(result.room_type, RoomType::Kitchen);
        assert_eq!(result.confidence, 0.95);
    }

    #[test]
    fn test_living_room_capped_at_085() {
        let result = classify_room(&set(&[(Label::Couch, 0.9), (Label::Tv, 0.9)]));
        assert_eq!(result.room_type, RoomType::LivingRoom);
        assert_eq!(result.confidence, 0.85);
    }

    #[test]
    fn test_weak_living_room_falls_through() {
        // 0.5 is not strictly greater than the threshold.
        let result = classify_room(&set(&[(Label::Chair, 0.5)]));
        assert_eq!(result.room_type, RoomType::GeneralRenovation);
        assert_eq!(result.confidence, 0.60);
        assert_eq!(result.reasoning, "Detected: chair");
    }

    #[test]
    fn test_bedroom_uses_bed_confidence_unsummed() {
        let result = classify_room(&set(&[(Label::Bed, 0.45)]));
        assert_eq!(result.room_type, RoomType::Bedroom);
        assert_eq!(result.confidence, 0.45);
        assert_eq!(result.reasoning, "Detected: bed");
    }

    #[test]
    fn test_bed_wins_over_dining_table() {
        let result = classify_room(&set(&[
            (Label::DiningTable, 0.4),
            (Label::Bed, 0.3),
        ]));
        assert_eq!(result.room_type, RoomType::Bedroom);
        assert_eq!(result.confidence, 0.3);
    }

    #[test]
    fn test_dining_room() {
        let result = classify_room(&set(&[(Label::DiningTable, 0.35)]));
        assert_eq!(result.room_type, RoomType::DiningRoom);
        assert_eq!(result.confidence, 0.35);
        assert_eq!(result.reasoning, "Detected: dining table");
    }

    #[test]
    fn test_fallback_lists_remaining_labels_without_person() {
        let result = classify_room(&set(&[(Label::Person, 0.9), (Label::Laptop, 0.4)]));
        assert_eq!(result.room_type, RoomType::GeneralRenovation);
        assert_eq!(result.confidence, 0.60);
        assert_eq!(result.reasoning, "Detected: laptop");
    }

    #[test]
    fn test_person_does_not_contribute_to_room_scores() {
        // Without person filtering this would still be bathroom; verify
        // the person confidence is never summed into a score.
        let result = classify_room(&set(&[(Label::Person, 0.9), (Label::Toilet, 0.6)]));
        assert_eq!(result.room_type, RoomType::Bathroom);
        assert_eq!(result.confidence, 0.6);
    }
}
