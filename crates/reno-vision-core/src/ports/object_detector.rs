//! Object detector port.

use std::path::Path;

use crate::domain::Detection;

/// Port for the pre-trained object detector.
///
/// The detector is an opaque collaborator: image path in, labeled
/// detections out. Implementations restrict results to the renovation
/// vocabulary ([`crate::domain::Label`]).
pub trait ObjectDetector: Send + Sync {
    /// Detects objects in the image at `path`.
    ///
    /// Duplicate detections of the same label may be returned; the caller
    /// keeps the best confidence per label.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be decoded or inference fails.
    /// An empty result means "nothing detected", never "detector crashed".
    fn detect(&self, path: &Path) -> anyhow::Result<Vec<Detection>>;
}
