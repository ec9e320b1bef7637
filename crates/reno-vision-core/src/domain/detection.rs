//! Detections and the per-label confidence set.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::Label;

/// A single detection as reported by the object detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Recognized object class.
    pub label: Label,
    /// Detector-reported probability in [0, 1].
    pub confidence: f32,
    /// Class index in the detector's native vocabulary.
    pub class_index: usize,
}

impl Detection {
    /// Creates a detection with the label's own class index.
    #[must_use]
    pub const fn new(label: Label, confidence: f32) -> Self {
        Self {
            label,
            confidence,
            class_index: label.coco_index(),
        }
    }
}

/// Best confidence per recognized label.
///
/// At most one entry per label; duplicate detections keep the maximum
/// confidence observed. Backed by a fixed array indexed by label, so
/// iteration order is the declaration order of [`Label::ALL`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionSet {
    confidences: [Option<f32>; Label::COUNT],
}

impl DetectionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from raw detections, keeping the best confidence for
    /// each label.
    #[must_use]
    pub fn from_detections(detections: &[Detection]) -> Self {
        let mut set = Self::new();
        for d in detections {
            set.insert(d.label, d.confidence);
        }
        set
    }

    /// Records a detection, keeping the maximum confidence per label.
    pub fn insert(&mut self, label: Label, confidence: f32) {
        let slot = &mut self.confidences[label.ordinal()];
        match slot {
            Some(existing) if *existing >= confidence => {}
            _ => *slot = Some(confidence),
        }
    }

    /// Best confidence for a label, if it was detected.
    #[must_use]
    pub fn get(&self, label: Label) -> Option<f32> {
        self.confidences[label.ordinal()]
    }

    /// Whether the label was detected at any confidence.
    #[must_use]
    pub fn contains(&self, label: Label) -> bool {
        self.get(label).is_some()
    }

    /// Number of distinct labels detected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.confidences.iter().filter(|c| c.is_some()).count()
    }

    /// True if nothing was detected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.confidences.iter().all(Option::is_none)
    }

    /// Detected labels with confidences, in [`Label::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Label, f32)> + '_ {
        Label::ALL
            .iter()
            .filter_map(|&label| self.get(label).map(|c| (label, c)))
    }

    /// Sum of confidences for the labels in `labels` that are present.
    #[must_use]
    pub fn sum_of(&self, labels: &[Label]) -> f32 {
        labels.iter().filter_map(|&l| self.get(l)).sum()
    }

    /// Maximum confidence among the labels in `labels` that are present.
    #[must_use]
    pub fn max_of(&self, labels: &[Label]) -> Option<f32> {
        labels
            .iter()
            .filter_map(|&l| self.get(l))
            .fold(None, |best, c| match best {
                Some(b) if b >= c => Some(b),
                _ => Some(c),
            })
    }
}

impl Serialize for DetectionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (label, confidence) in self.iter() {
            map.serialize_entry(label.as_str(), &confidence)?;
        }
        map.end()
    }
}
