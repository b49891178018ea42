//! JSON configuration of the `volume_edges` tool.
use crate::detector::CannyParams;
use crate::image::io::list_slice_files;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct VolumeToolConfig {
    pub input: SliceInput,
    #[serde(default)]
    pub params: CannyParams,
    pub output: VolumeOutputConfig,
}

/// Either a directory scanned in file-name order or an explicit file list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SliceInput {
    Directory(PathBuf),
    Files(Vec<PathBuf>),
}

impl SliceInput {
    /// Slice paths in stack order.
    pub fn resolve(&self) -> Result<Vec<PathBuf>, String> {
        let files = match self {
            SliceInput::Directory(dir) => list_slice_files(dir)?,
            SliceInput::Files(files) => files.clone(),
        };
        if files.is_empty() {
            return Err("Input contains no slice images".to_string());
        }
        Ok(files)
    }
}

#[derive(Debug, Deserialize)]
pub struct VolumeOutputConfig {
    pub dir: PathBuf,
    /// File-name prefix of the final slices, `<prefix><n>.png`.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Also write blurred, gradient, direction, suppressed and thresholded
    /// slices into subdirectories of `dir`.
    #[serde(default)]
    pub write_intermediates: bool,
    #[serde(default)]
    pub summary_json: Option<PathBuf>,
}

fn default_prefix() -> String {
    "final".to_string()
}

pub fn load_config(path: &Path) -> Result<VolumeToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
