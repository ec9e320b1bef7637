//! Port definitions for the analysis collaborators.
//!
//! These traits define the boundaries between the domain core and the
//! external detector, shape analyzer, and output adapters.

mod object_detector;
mod record_output;
mod shape_analyzer;

pub use object_detector::ObjectDetector;
pub use record_output::RecordOutput;
pub use shape_analyzer::ShapeAnalyzer;
