//! I/O helpers for slice stacks and JSON.
//!
//! - `list_slice_files`: image files of a directory in file-name order.
//! - `load_slice_stack`: read grayscale PNG/TIFF slices into a `Volume<u16>`.
//! - `save_slice_u8` / `save_volume_u8`: write 8-bit slices as PNGs.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageView, Slice};
use crate::volume::Volume;
use image::{DynamicImage, GrayImage};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const SLICE_EXTENSIONS: [&str; 3] = ["png", "tif", "tiff"];

/// Image files directly inside `dir`, sorted by file name.
pub fn list_slice_files(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries =
        fs::read_dir(dir).map_err(|e| format!("Failed to read dir {}: {e}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| format!("Failed to read dir {}: {e}", dir.display()))?
            .path();
        let is_slice = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| SLICE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if path.is_file() && is_slice {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load one grayscale slice. 8-bit data keeps its values (no rescale to 16 bits).
pub fn load_slice(path: &Path) -> Result<Slice<u16>, String> {
    let img = image::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    let (w, h) = (img.width() as usize, img.height() as usize);
    let data: Vec<u16> = match img {
        DynamicImage::ImageLuma16(buf) => buf.into_raw(),
        other if is_8bit(&other) => other.into_luma8().into_raw().into_iter().map(u16::from).collect(),
        other => other.into_luma16().into_raw(),
    };
    Slice::from_vec(w, h, data)
        .ok_or_else(|| format!("Decoded buffer of {} has unexpected size", path.display()))
}

fn is_8bit(img: &DynamicImage) -> bool {
    let color = img.color();
    color.bytes_per_pixel() == color.channel_count()
}

/// Load an ordered stack of slices into a volume.
pub fn load_slice_stack(paths: &[PathBuf]) -> Result<Volume<u16>, String> {
    let slices = paths
        .iter()
        .map(|p| load_slice(p))
        .collect::<Result<Vec<_>, _>>()?;
    Volume::from_slices(slices).map_err(|e| format!("Failed to assemble slice stack: {e}"))
}

/// Save an 8-bit slice to a grayscale PNG.
pub fn save_slice_u8(slice: &Slice<u8>, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut data = Vec::with_capacity(slice.w * slice.h);
    for row in slice.rows() {
        data.extend_from_slice(row);
    }
    let image = GrayImage::from_raw(slice.w as u32, slice.h as u32, data)
        .ok_or_else(|| "Failed to create image buffer".to_string())?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Write every slice as `<dir>/<prefix><i+1>.png`, returning the paths.
pub fn save_volume_u8(volume: &Volume<u8>, dir: &Path, prefix: &str) -> Result<Vec<PathBuf>, String> {
    fs::create_dir_all(dir).map_err(|e| format!("Failed to create {}: {e}", dir.display()))?;
    volume
        .slices()
        .iter()
        .enumerate()
        .map(|(i, slice)| {
            let path = dir.join(format!("{prefix}{}.png", i + 1));
            save_slice_u8(slice, &path).map(|_| path)
        })
        .collect()
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::VoxelCoordinate;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("canny3d-io-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn volume_round_trips_through_png_stack() {
        let dir = scratch_dir("stack");
        let mut volume = Volume::filled(3, 4, 5, 0u8);
        volume.set(VoxelCoordinate::new(1, 2, 3), 255);
        volume.set(VoxelCoordinate::new(2, 0, 0), 17);
        let written = save_volume_u8(&volume, &dir, "final").expect("save");
        assert_eq!(written[0].file_name().and_then(|n| n.to_str()), Some("final1.png"));

        let listed = list_slice_files(&dir).expect("list");
        assert_eq!(listed, written);
        let loaded = load_slice_stack(&listed).expect("load");
        assert_eq!(loaded, volume.map(u16::from));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_slice_stack(&[PathBuf::from("/nonexistent/slice.png")]).unwrap_err();
        assert!(err.contains("/nonexistent/slice.png"));
        let err = load_slice_stack(&[]).unwrap_err();
        assert!(err.contains("slice stack"));
    }
}
