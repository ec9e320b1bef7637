//! Edge-and-region shape analysis.
//!
//! Supplementary geometric statistics for the scoring policy: the image
//! is edge-filtered, edges are grouped into connected regions, and the
//! region census is reported together with the wall-clock cost.

use std::collections::VecDeque;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use image::GrayImage;
use tracing::debug;

use reno_vision_core::domain::ShapeStats;
use reno_vision_core::ports::ShapeAnalyzer;

/// Gradient magnitude above which a pixel counts as an edge.
const DEFAULT_EDGE_THRESHOLD: u32 = 128;

/// Regions smaller than this are treated as noise.
const DEFAULT_MIN_REGION_SIZE: usize = 20;

/// Bounding-box aspect ratio band for resonance regions.
const RESONANCE_ASPECT_MIN: f64 = 0.5;
const RESONANCE_ASPECT_MAX: f64 = 2.0;

/// Shape analyzer based on Sobel edges and connected components.
pub struct ContourShapeAnalyzer {
    edge_threshold: u32,
    min_region_size: usize,
}

impl ContourShapeAnalyzer {
    /// Creates an analyzer with the given tuning.
    #[must_use]
    pub fn new(edge_threshold: u32, min_region_size: usize) -> Self {
        Self {
            edge_threshold,
            min_region_size,
        }
    }
}

impl Default for ContourShapeAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_EDGE_THRESHOLD, DEFAULT_MIN_REGION_SIZE)
    }
}

impl ShapeAnalyzer for ContourShapeAnalyzer {
    fn analyze(&self, path: &Path) -> Result<ShapeStats> {
        let start = Instant::now();

        let img = image::open(path)
            .with_context(|| format!("Failed to open image: {}", path.display()))?
            .to_luma8();

        let edges = edge_mask(&img, self.edge_threshold);
        let regions = connected_regions(&edges, img.width() as usize, img.height() as usize);

        let mut shapes = 0u32;
        let mut resonance = 0u32;
        for region in &regions {
            if region.size < self.min_region_size {
                continue;
            }
            shapes += 1;
            if region.is_near_square() {
                resonance += 1;
            }
        }

        let elapsed = start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "{} regions, {} shapes, {} resonance points in {elapsed:.2}ms",
            regions.len(),
            shapes,
            resonance
        );

        Ok(ShapeStats {
            shapes_detected: shapes,
            resonance_points: resonance,
            processing_time_ms: elapsed,
        })
    }
}

struct Region {
    size: usize,
    min_x: usize,
    max_x: usize,
    min_y: usize,
    max_y: usize,
}

impl Region {
    /// True when the bounding box is compact enough to count as a
    /// resonance point.
    #[allow(clippy::cast_precision_loss)]
    fn is_near_square(&self) -> bool {
        let w = (self.max_x - self.min_x + 1) as f64;
        let h = (self.max_y - self.min_y + 1) as f64;
        let aspect = w / h;
        (RESONANCE_ASPECT_MIN..=RESONANCE_ASPECT_MAX).contains(&aspect)
    }
}

/// Sobel gradient magnitude thresholded to a boolean mask.
fn edge_mask(img: &GrayImage, threshold: u32) -> Vec<bool> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let mut mask = vec![false; width * height];
    if width < 3 || height < 3 {
        return mask;
    }

    #[allow(clippy::cast_possible_truncation)]
    let px = |x: usize, y: usize| -> i32 { i32::from(img.get_pixel(x as u32, y as u32).0[0]) };

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let gx = px(x + 1, y - 1) + 2 * px(x + 1, y) + px(x + 1, y + 1)
                - px(x - 1, y - 1)
                - 2 * px(x - 1, y)
                - px(x - 1, y + 1);
            let gy = px(x - 1, y + 1) + 2 * px(x, y + 1) + px(x + 1, y + 1)
                - px(x - 1, y - 1)
                - 2 * px(x, y - 1)
                - px(x + 1, y - 1);
            let magnitude = gx.unsigned_abs() + gy.unsigned_abs();
            mask[y * width + x] = magnitude >= threshold;
        }
    }
    mask
}

/// Groups edge pixels into 4-connected regions via breadth-first fill.
fn connected_regions(mask: &[bool], width: usize, height: usize) -> Vec<Region> {
    let mut visited = vec![false; mask.len()];
    let mut regions = Vec::new();

    for start in 0..mask.len() {
        if !mask[start] || visited[start] {
            continue;
        }

        let mut region = Region {
            size: 0,
            min_x: usize::MAX,
            max_x: 0,
            min_y: usize::MAX,
            max_y: 0,
        };
        let mut queue = VecDeque::from([start]);
        visited[start] = true;

        while let Some(index) = queue.pop_front() {
            let (x, y) = (index % width, index / width);
            region.size += 1;
            region.min_x = region.min_x.min(x);
            region.max_x = region.max_x.max(x);
            region.min_y = region.min_y.min(y);
            region.max_y = region.max_y.max(y);

            let mut push = |nx: usize, ny: usize| {
                let ni = ny * width + nx;
                if mask[ni] && !visited[ni] {
                    visited[ni] = true;
                    queue.push_back(ni);
                }
            };
            if x > 0 {
                push(x - 1, y);
            }
            if x + 1 < width {
                push(x + 1, y);
            }
            if y > 0 {
                push(x, y - 1);
            }
            if y + 1 < height {
                push(x, y + 1);
            }
        }

        regions.push(region);
    }

    regions
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use reno_vision_test_support::SyntheticImageBuilder;

    #[test]
    fn test_uniform_image_has_no_shapes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.png");
        SyntheticImageBuilder::save_uniform_gray(&path, 64, 64, 128).unwrap();

        let stats = ContourShapeAnalyzer::default().analyze(&path).unwrap();
        assert_eq!(stats.shapes_detected, 0);
        assert_eq!(stats.resonance_points, 0);
        assert!(stats.processing_time_ms >= 0.0);
    }

    #[test]
    fn test_checkerboard_has_shapes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edges.png");
        SyntheticImageBuilder::save_checkerboard(&path, 64, 64).unwrap();

        let stats = ContourShapeAnalyzer::default().analyze(&path).unwrap();
        assert!(stats.shapes_detected > 0);
    }

    #[test]
    fn test_isolated_bands_count_separately() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bands.png");
        SyntheticImageBuilder::save_squares(&path, 3).unwrap();

        // Each bright band contributes two vertical edge lines, and the
        // thin lines are far from square.
        let stats = ContourShapeAnalyzer::default().analyze(&path).unwrap();
        assert_eq!(stats.shapes_detected, 6);
        assert_eq!(stats.resonance_points, 0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = ContourShapeAnalyzer::default().analyze(Path::new("/nonexistent/a.png"));
        assert!(result.is_err());
    }

    #[test]
    fn test_tiny_image_yields_empty_stats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        SyntheticImageBuilder::save_uniform_gray(&path, 2, 2, 0).unwrap();

        let stats = ContourShapeAnalyzer::default().analyze(&path).unwrap();
        assert_eq!(stats.shapes_detected, 0);
    }
}
