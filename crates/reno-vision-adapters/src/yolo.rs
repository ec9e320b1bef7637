//! YOLOv8 object-detection adapter.
//!
//! Runs a YOLOv8 classification head over the image and reports every
//! anchor whose best class is one of the recognized labels. Boxes are
//! not kept and no non-maximum suppression runs; downstream keeps only
//! the best confidence per label.

use std::path::Path;

use anyhow::{Context, Result};
use candle_core::{DType, Device, Module, Tensor};
use candle_nn::VarBuilder;
use crate::yolo_v8::{Multiples, YoloV8};
use tracing::debug;

use reno_vision_core::domain::{Detection, Label};
use reno_vision_core::ports::ObjectDetector;

use crate::loader::LazyModel;

/// COCO vocabulary size of the pretrained weights.
const NUM_CLASSES: usize = 80;

/// Network input is padded to multiples of this stride.
const STRIDE: usize = 32;

/// Longest image side after resizing.
const MAX_SIDE: usize = 640;

/// Object detector backed by YOLOv8-nano weights.
pub struct YoloDetector {
    model: LazyModel<YoloV8>,
    confidence_threshold: f32,
}

fn build_model(vb: VarBuilder) -> Result<YoloV8> {
    Ok(YoloV8::load(vb, Multiples::n(), NUM_CLASSES)?)
}

impl YoloDetector {
    /// Creates a detector over the given weight file.
    ///
    /// Weights load lazily on the first [`ObjectDetector::detect`] call.
    #[must_use]
    pub fn new(weights: impl AsRef<Path>, confidence_threshold: f32) -> Self {
        Self {
            model: LazyModel::new(weights, Device::Cpu, build_model),
            confidence_threshold,
        }
    }

    fn preprocess(path: &Path, device: &Device) -> Result<Tensor> {
        let img = image::ImageReader::open(path)
            .with_context(|| format!("Failed to open image: {}", path.display()))?
            .decode()
            .with_context(|| format!("Failed to decode image: {}", path.display()))?;

        // Scale the longest side to 640, snapping both sides down to the
        // model stride.
        let (w, h) = (img.width() as usize, img.height() as usize);
        let (width, height) = if w < h {
            let w = (w * MAX_SIDE / h.max(1)).max(STRIDE);
            ((w / STRIDE) * STRIDE, MAX_SIDE)
        } else {
            let h = (h * MAX_SIDE / w.max(1)).max(STRIDE);
            (MAX_SIDE, (h / STRIDE) * STRIDE)
        };

        #[allow(clippy::cast_possible_truncation)]
        let resized = img.resize_exact(
            width as u32,
            height as u32,
            image::imageops::FilterType::CatmullRom,
        );
        let data = resized.to_rgb8().into_raw();

        let tensor = Tensor::from_vec(data, (height, width, 3), device)?
            .permute((2, 0, 1))?
            .unsqueeze(0)?
            .to_dtype(DType::F32)?;
        Ok((tensor * (1.0 / 255.0))?)
    }
}

impl ObjectDetector for YoloDetector {
    fn detect(&self, path: &Path) -> Result<Vec<Detection>> {
        let model = self.model.get()?;
        let input = Self::preprocess(path, &Device::Cpu)?;

        // (4 + classes, anchors) after dropping the batch dimension
        let predictions = model.forward(&input)?.squeeze(0)?;
        let (rows, anchors) = predictions.dims2()?;
        anyhow::ensure!(
            rows == 4 + NUM_CLASSES,
            "unexpected prediction shape: {rows}x{anchors}"
        );
        let predictions = predictions.to_vec2::<f32>()?;

        let mut detections = Vec::new();
        for anchor in 0..anchors {
            let mut best_class = 0;
            let mut best_confidence = 0.0f32;
            for class in 0..NUM_CLASSES {
                let confidence = predictions[4 + class][anchor];
                if confidence > best_confidence {
                    best_class = class;
                    best_confidence = confidence;
                }
            }
            if best_confidence < self.confidence_threshold {
                continue;
            }
            // Anchors whose best class is outside the recognized
            // vocabulary are dropped here.
            if let Some(label) = Label::from_coco_index(best_class) {
                detections.push(Detection {
                    label,
                    confidence: best_confidence,
                    class_index: best_class,
                });
            }
        }

        debug!(
            "{} anchors above threshold for {}",
            detections.len(),
            path.display()
        );
        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_weights_fail_on_detect_not_construction() {
        let detector = YoloDetector::new("/nonexistent/yolov8n.safetensors", 0.25);
        assert!(detector.detect(Path::new("also-missing.jpg")).is_err());
    }
}
