//! Model downloading and caching.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

/// Placeholder checksum indicating verification should be skipped.
const PLACEHOLDER_CHECKSUM: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Model metadata.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// Model name/identifier.
    pub name: &'static str,
    /// Download URL.
    pub url: &'static str,
    /// Expected SHA256 hash. All zeros skips verification.
    pub sha256: &'static str,
    /// Filename in the models directory.
    pub filename: &'static str,
}

/// Known models.
pub const MODELS: &[ModelInfo] = &[ModelInfo {
    name: "yolov8n",
    url: "https://huggingface.co/lmz/candle-yolo-v8/resolve/main/yolov8n.safetensors",
    sha256: "0000000000000000000000000000000000000000000000000000000000000000", // TODO: pin once the weights are mirrored
    filename: "yolov8n.safetensors",
}];

/// Default models directory.
///
/// Uses `XDG_DATA_HOME/reno-vision/models` or `~/.local/share/reno-vision/models`.
#[must_use]
pub fn default_models_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reno-vision")
        .join("models")
}

/// Reports download progress: model name, bytes so far, total if known.
pub type ProgressCallback = Box<dyn Fn(&str, u64, Option<u64>) + Send + Sync>;

/// Ensures all required models exist under `dir`, downloading the
/// missing ones.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, a download
/// fails, or a checksum does not match.
pub fn ensure_models(dir: &Path) -> Result<()> {
    ensure_models_with_progress(dir, None)
}

/// Like [`ensure_models`], reporting download progress.
///
/// # Errors
///
/// Same failure modes as [`ensure_models`].
pub fn ensure_models_with_progress(dir: &Path, progress: Option<&ProgressCallback>) -> Result<()> {
    fs::create_dir_all(dir).context("Failed to create models directory")?;

    for model in MODELS {
        let path = dir.join(model.filename);
        if path.exists() {
            debug!("Model {} already exists", model.name);
        } else {
            download_model(model, &path, progress)?;
        }
    }

    Ok(())
}

fn download_model(model: &ModelInfo, path: &Path, progress: Option<&ProgressCallback>) -> Result<()> {
    use std::io::Read;

    info!("Downloading model: {}", model.name);

    let mut response = reqwest::blocking::get(model.url)
        .with_context(|| format!("Failed to download {}", model.name))?;

    if !response.status().is_success() {
        anyhow::bail!("Download failed with status: {}", response.status());
    }

    let total = response.content_length();
    let mut bytes = Vec::new();
    let mut chunk = [0u8; 64 * 1024];
    loop {
        let n = response
            .read(&mut chunk)
            .with_context(|| format!("Failed to read response for {}", model.name))?;
        if n == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..n]);
        if let Some(cb) = progress {
            cb(model.name, bytes.len() as u64, total);
        }
    }

    if model.sha256 == PLACEHOLDER_CHECKSUM {
        debug!(
            "Skipping checksum verification for {} (placeholder checksum)",
            model.name
        );
    } else {
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let hash = format!("{:x}", hasher.finalize());

        if hash != model.sha256 {
            anyhow::bail!(
                "Checksum mismatch for {}: expected {}, got {}. \
                 Try deleting {} and re-running to download a fresh copy.",
                model.name,
                model.sha256,
                hash,
                path.display()
            );
        }
    }

    fs::write(path, &bytes).with_context(|| format!("Failed to write {}", model.name))?;

    info!("Downloaded {} ({} bytes)", model.name, bytes.len());
    Ok(())
}

/// Path a named model would occupy under `dir`.
#[must_use]
pub fn model_path(dir: &Path, name: &str) -> Option<PathBuf> {
    MODELS
        .iter()
        .find(|m| m.name == name)
        .map(|m| dir.join(m.filename))
}

/// Whether every known model is present under `dir`.
#[must_use]
pub fn all_models_installed(dir: &Path) -> bool {
    MODELS.iter().all(|m| dir.join(m.filename).exists())
}

/// Each known model with its installed status under `dir`.
#[must_use]
pub fn list_models(dir: &Path) -> Vec<(String, bool)> {
    MODELS
        .iter()
        .map(|m| (m.name.to_string(), dir.join(m.filename).exists()))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_models_dir() {
        assert!(default_models_dir().ends_with("reno-vision/models"));
    }

    #[test]
    fn test_model_path() {
        let path = model_path(Path::new("/models"), "yolov8n").unwrap();
        assert!(path.ends_with("yolov8n.safetensors"));
    }

    #[test]
    fn test_model_path_unknown() {
        assert!(model_path(Path::new("/models"), "unknown").is_none());
    }

    #[test]
    fn test_list_models_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let listed = list_models(dir.path());
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], ("yolov8n".to_string(), false));
        assert!(!all_models_installed(dir.path()));
    }

    #[test]
    fn test_installed_model_is_listed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("yolov8n.safetensors"), b"weights").unwrap();
        assert!(all_models_installed(dir.path()));
    }
}
