//! Test support utilities for reno-vision.
//!
//! Provides mocks for the detector and shape-analyzer ports, plus
//! builders for detection scenes and synthetic on-disk test images.

mod builders;
mod mocks;

pub use builders::{SceneBuilder, ShapeStatsBuilder, SyntheticImageBuilder};
pub use mocks::{
    FailingDetector, FailingShapeAnalyzer, MockDetector, MockRecordOutput, MockShapeAnalyzer,
};
