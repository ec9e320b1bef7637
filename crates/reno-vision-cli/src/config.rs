//! Configuration file support for reno-vision.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/reno-vision/config.toml` (lowest priority)
//! - Project-local: `.reno-vision.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Object detection settings.
    pub detector: DetectorConfig,
    /// Shape analysis settings.
    pub shapes: ShapesConfig,
    /// Model settings.
    pub models: ModelsConfig,
}

/// Object detection configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Minimum detection confidence (0.0-1.0).
    pub confidence_threshold: Option<f32>,
}

/// Shape analysis configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ShapesConfig {
    /// Gradient magnitude above which a pixel counts as an edge.
    pub edge_threshold: Option<u32>,
    /// Connected regions smaller than this are treated as noise.
    pub min_region_size: Option<usize>,
}

/// Model configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Custom models directory path.
    pub dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/reno-vision/config.toml`
    /// 2. Project-local: `.reno-vision.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(t) = self.detector.confidence_threshold {
            if !(0.0..=1.0).contains(&t) {
                return Err(format!(
                    "detector.confidence_threshold must be 0.0-1.0, got {t}"
                ));
            }
        }
        if let Some(0) = self.shapes.min_region_size {
            return Err("shapes.min_region_size must be at least 1".to_string());
        }
        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.detector.confidence_threshold = other
            .detector
            .confidence_threshold
            .or(self.detector.confidence_threshold);

        self.shapes.edge_threshold = other.shapes.edge_threshold.or(self.shapes.edge_threshold);
        self.shapes.min_region_size = other
            .shapes
            .min_region_size
            .or(self.shapes.min_region_size);

        self.models.dir = other.models.dir.or_else(|| self.models.dir.take());
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("reno-vision").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.reno-vision.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".reno-vision.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
