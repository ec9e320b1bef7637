//! Reno Vision Core - Domain logic and classification policy
//!
//! This crate contains the domain types, the detector and shape-analyzer
//! ports, the room-classification and scoring policies, capture-metadata
//! extraction, and the single-image analysis orchestrator.

pub mod analyzer;
pub mod domain;
pub mod error;
pub mod metadata;
pub mod policy;
pub mod ports;

pub use analyzer::Analyzer;
pub use domain::{
    AnalysisOutcome, AnalysisRecord, Classification, Detection, DetectionSet, ExifSummary, Feature,
    FeatureKind, GpsCoordinates, Label, RoomType, ShapeStats, SkipReason,
};
pub use error::AnalysisError;
pub use ports::{ObjectDetector, RecordOutput, ShapeAnalyzer};
