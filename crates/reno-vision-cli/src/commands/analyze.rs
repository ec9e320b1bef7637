//! Analyze command - classify a renovation photo.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use reno_vision_adapters::{model_path, ContourShapeAnalyzer, YoloDetector};
use reno_vision_core::domain::AnalysisOutcome;
use reno_vision_core::ports::RecordOutput;
use reno_vision_core::Analyzer;
use tracing::{debug, info};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::JsonRecordWriter;

/// Hardcoded default values for tuning.
mod defaults {
    pub const CONFIDENCE_THRESHOLD: f32 = 0.25;
    pub const EDGE_THRESHOLD: u32 = 128;
    pub const MIN_REGION_SIZE: usize = 20;
}

/// Parse and validate a threshold value (0.0-1.0).
fn parse_threshold(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
    }
}

/// Shared arguments for photo analysis.
#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    /// Image file to analyze
    pub image: Option<PathBuf>,

    /// Write the JSON record to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Minimum detection confidence (0.0-1.0)
    #[arg(long, value_parser = parse_threshold)]
    pub confidence_threshold: Option<f32>,

    /// Custom models directory (overrides default and config)
    #[arg(long, value_name = "DIR")]
    pub models_dir: Option<PathBuf>,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl AnalyzeArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    #[must_use]
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.confidence_threshold = args
            .confidence_threshold
            .or(config.detector.confidence_threshold);

        if args.models_dir.is_none() {
            args.models_dir.clone_from(&config.models.dir);
        }

        // Store config so run() can reach the shape tuning
        args.config = Some(config.clone());

        args
    }

    fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
            .unwrap_or(defaults::CONFIDENCE_THRESHOLD)
    }

    fn models_dir(&self) -> PathBuf {
        self.models_dir
            .clone()
            .unwrap_or_else(reno_vision_adapters::default_models_dir)
    }
}

/// Result of running the analyze command.
pub struct AnalyzeResult {
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the analyze command.
///
/// Expects `args` to have been processed through `with_config()` first.
pub fn run(args: &AnalyzeArgs) -> Result<AnalyzeResult> {
    let Some(ref image) = args.image else {
        anyhow::bail!("No image specified");
    };

    let models_dir = args.models_dir();
    debug!("Using models directory: {}", models_dir.display());

    let weights = model_path(&models_dir, "yolov8n")
        .ok_or_else(|| anyhow::anyhow!("Unknown model configuration"))?;
    if !weights.exists() {
        anyhow::bail!(
            "Model weights not found: {}. Run `reno-vision models fetch`.",
            weights.display()
        );
    }

    let config = args.config.as_ref();
    let shapes = ContourShapeAnalyzer::new(
        config
            .and_then(|c| c.shapes.edge_threshold)
            .unwrap_or(defaults::EDGE_THRESHOLD),
        config
            .and_then(|c| c.shapes.min_region_size)
            .unwrap_or(defaults::MIN_REGION_SIZE),
    );
    let detector = YoloDetector::new(&weights, args.confidence_threshold());
    let analyzer = Analyzer::new(Box::new(detector), Box::new(shapes));

    let outcome = analyzer.analyze(image)?;

    match outcome {
        AnalysisOutcome::Analyzed(record) => {
            let writer = match args.output {
                Some(ref path) => JsonRecordWriter::to_file(path)?,
                None => JsonRecordWriter::stdout(),
            };
            writer.write(&record)?;
            writer.flush()?;
            if let Some(ref path) = args.output {
                info!("Record written to {}", path.display());
            }
            Ok(AnalyzeResult {
                exit_code: ExitCode::Success,
            })
        }
        AnalysisOutcome::Skipped { reason } => {
            eprintln!("skipped: {reason}");
            Ok(AnalyzeResult {
                exit_code: ExitCode::Skipped,
            })
        }
    }
}
