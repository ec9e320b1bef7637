//! Builders for detections, shape stats, and synthetic test images.

use std::path::Path;

use image::{DynamicImage, GrayImage, Luma};
use reno_vision_core::domain::{Detection, Label, ShapeStats};

/// Builders for common detection scenes.
pub struct SceneBuilder;

impl SceneBuilder {
    /// A bathroom scene: toilet and sink.
    #[must_use]
    pub fn bathroom() -> Vec<Detection> {
        vec![
            Detection::new(Label::Toilet, 0.5),
            Detection::new(Label::Sink, 0.25),
        ]
    }

    /// A kitchen scene: refrigerator, oven, and sink.
    #[must_use]
    pub fn kitchen() -> Vec<Detection> {
        vec![
            Detection::new(Label::Refrigerator, 0.5),
            Detection::new(Label::Oven, 0.25),
            Detection::new(Label::Sink, 0.25),
        ]
    }

    /// A living-room scene: couch and tv.
    #[must_use]
    pub fn living_room() -> Vec<Detection> {
        vec![
            Detection::new(Label::Couch, 0.5),
            Detection::new(Label::Tv, 0.25),
        ]
    }

    /// A scene containing a person among furniture.
    #[must_use]
    pub fn with_person() -> Vec<Detection> {
        vec![
            Detection::new(Label::Person, 0.75),
            Detection::new(Label::Couch, 0.5),
        ]
    }
}

/// Builder for shape-analysis statistics.
pub struct ShapeStatsBuilder {
    stats: ShapeStats,
}

impl ShapeStatsBuilder {
    /// Starts from zeroed stats.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stats: ShapeStats {
                shapes_detected: 0,
                resonance_points: 0,
                processing_time_ms: 0.0,
            },
        }
    }

    /// Sets the number of detected shapes.
    #[must_use]
    pub fn shapes(mut self, n: u32) -> Self {
        self.stats.shapes_detected = n;
        self
    }

    /// Sets the number of resonance points.
    #[must_use]
    pub fn resonance(mut self, n: u32) -> Self {
        self.stats.resonance_points = n;
        self
    }

    /// Sets the processing time in milliseconds.
    #[must_use]
    pub fn time_ms(mut self, ms: f64) -> Self {
        self.stats.processing_time_ms = ms;
        self
    }

    /// Finishes the build.
    #[must_use]
    pub fn build(self) -> ShapeStats {
        self.stats
    }
}

impl Default for ShapeStatsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for synthetic images written to disk.
///
/// Analyses hash and read the file on disk, so tests need real image
/// files rather than in-memory buffers.
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    /// Writes a high-contrast checkerboard (many edges) to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be encoded or written.
    pub fn save_checkerboard(path: &Path, width: u32, height: u32) -> anyhow::Result<()> {
        let img = GrayImage::from_fn(width, height, |x, y| {
            if (x / 8 + y / 8) % 2 == 0 {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        DynamicImage::ImageLuma8(img).save(path)?;
        Ok(())
    }

    /// Writes a uniform gray image (no edges) to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be encoded or written.
    pub fn save_uniform_gray(path: &Path, width: u32, height: u32, value: u8) -> anyhow::Result<()> {
        let img = GrayImage::from_fn(width, height, |_, _| Luma([value]));
        DynamicImage::ImageLuma8(img).save(path)?;
        Ok(())
    }

    /// Writes an image with `count` isolated bright squares on a dark
    /// background to `path`. Each square is a separate connected region.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be encoded or written.
    pub fn save_squares(path: &Path, count: u32) -> anyhow::Result<()> {
        let side = 32;
        let width = count.max(1) * side;
        let img = GrayImage::from_fn(width, side, |x, _| {
            // A 16px square centered in each 32px cell, with dark gutters.
            let offset = x % side;
            if (8..24).contains(&offset) {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        DynamicImage::ImageLuma8(img).save(path)?;
        Ok(())
    }
}
