//! Shape analyzer port.

use std::path::Path;

use crate::domain::ShapeStats;

/// Port for the supplementary shape-analysis collaborator.
pub trait ShapeAnalyzer: Send + Sync {
    /// Runs shape analysis on the image at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be processed. Failures here
    /// abort the whole record.
    fn analyze(&self, path: &Path) -> anyhow::Result<ShapeStats>;
}
