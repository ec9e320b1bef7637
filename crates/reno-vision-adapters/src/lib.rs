//! Reno Vision Adapters - External adapters for reno-vision.
//!
//! This crate provides adapters for:
//! - YOLOv8 object detection
//! - Edge-based shape analysis
//! - Model downloading and caching

pub mod loader;
pub mod models;
pub mod shapes;
pub mod yolo;
mod yolo_v8;

pub use models::{default_models_dir, ensure_models, model_path, ProgressCallback};
pub use shapes::ContourShapeAnalyzer;
pub use yolo::YoloDetector;
