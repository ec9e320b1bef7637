//! Deterministic policy layer over the detector outputs.
//!
//! Classification, feature extraction, and scoring are pure functions;
//! all thresholds live in their modules as named constants.

mod classify;
mod features;
mod scoring;

pub use classify::classify_room;
pub use features::extract_features;
pub use scoring::{complexity_score, quality_score};
