//! Object labels relevant to renovation context.

/// A recognized object class from the detector's fixed vocabulary.
///
/// The variants cover the subset of COCO-80 classes that carry signal for
/// room classification. The vocabulary is fixed at compile time; there is
/// no runtime need to add labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// People — triggers the skip policy.
    Person,
    Toilet,
    Sink,
    Refrigerator,
    Oven,
    Microwave,
    Chair,
    Couch,
    Bed,
    DiningTable,
    Tv,
    Laptop,
}

impl Label {
    /// All labels in declaration order. Iteration over a `DetectionSet`
    /// follows this order, which keeps reasoning strings deterministic.
    pub const ALL: [Self; 12] = [
        Self::Person,
        Self::Toilet,
        Self::Sink,
        Self::Refrigerator,
        Self::Oven,
        Self::Microwave,
        Self::Chair,
        Self::Couch,
        Self::Bed,
        Self::DiningTable,
        Self::Tv,
        Self::Laptop,
    ];

    /// Number of labels in the vocabulary.
    pub const COUNT: usize = Self::ALL.len();

    /// The label name as reported by the detector's vocabulary.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Toilet => "toilet",
            Self::Sink => "sink",
            Self::Refrigerator => "refrigerator",
            Self::Oven => "oven",
            Self::Microwave => "microwave",
            Self::Chair => "chair",
            Self::Couch => "couch",
            Self::Bed => "bed",
            Self::DiningTable => "dining table",
            Self::Tv => "tv",
            Self::Laptop => "laptop",
        }
    }

    /// The label's class index in the COCO-80 vocabulary.
    #[must_use]
    pub const fn coco_index(self) -> usize {
        match self {
            Self::Person => 0,
            Self::Chair => 56,
            Self::Couch => 57,
            Self::Bed => 59,
            Self::DiningTable => 60,
            Self::Toilet => 61,
            Self::Tv => 62,
            Self::Laptop => 63,
            Self::Microwave => 68,
            Self::Oven => 69,
            Self::Sink => 71,
            Self::Refrigerator => 72,
        }
    }

    /// Maps a COCO-80 class index back to a label, if it is in the
    /// renovation vocabulary.
    #[must_use]
    pub fn from_coco_index(index: usize) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.coco_index() == index)
    }

    /// Position of this label within [`Label::ALL`]. Declaration order
    /// and discriminant order coincide.
    pub(crate) const fn ordinal(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_covers_every_variant_once() {
        for (i, label) in Label::ALL.iter().enumerate() {
            assert_eq!(label.ordinal(), i);
        }
    }

    #[test]
    fn test_coco_round_trip() {
        for label in Label::ALL {
            assert_eq!(Label::from_coco_index(label.coco_index()), Some(label));
        }
    }

    #[test]
    fn test_unknown_coco_index() {
        // 58 is "potted plant" - not in the renovation vocabulary
        assert_eq!(Label::from_coco_index(58), None);
        assert_eq!(Label::from_coco_index(400), None);
    }

    #[test]
    fn test_display_matches_vocabulary() {
        assert_eq!(Label::DiningTable.to_string(), "dining table");
        assert_eq!(Label::Person.to_string(), "person");
    }
}
