//! Error types for the analysis pipeline.

use thiserror::Error;

/// Fatal failures while producing an analysis record.
///
/// Each variant is a distinct, single-attempt failure; there are no
/// retries. Metadata read problems are not represented here because they
/// degrade to an empty summary inside the metadata module. A skipped
/// image is not an error either; see
/// [`crate::domain::AnalysisOutcome::Skipped`].
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The object detector could not process the image.
    #[error("object detection failed for {path}")]
    Detection {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// The shape-analysis collaborator failed.
    #[error("shape analysis failed for {path}")]
    ShapeAnalysis {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// The image file could not be read for hashing.
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
