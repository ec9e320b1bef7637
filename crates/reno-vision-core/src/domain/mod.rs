//! Core domain types for renovation photo analysis.

mod classification;
mod detection;
mod label;
mod record;

pub use classification::{Classification, Feature, FeatureKind, RoomType};
pub use detection::{Detection, DetectionSet};
pub use label::Label;
pub use record::{
    AnalysisOutcome, AnalysisRecord, ExifSummary, GpsCoordinates, ShapeStats, SkipReason,
};
