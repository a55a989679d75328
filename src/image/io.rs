//! I/O helpers for grayscale images, binary masks and JSON.
//!
//! - `load_grayscale_image`: read a PNG/JPEG into an owned 8-bit gray buffer.
//! - `save_mask_png`: write a `PixelGrid` as a black-on-white PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::ImageView;
use crate::error::Result as GridResult;
use crate::grid::{PixelGrid, Polarity};
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned 8-bit grayscale buffer (stride == width).
#[derive(Clone, Debug)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct an owned grayscale buffer given raw bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Binarize with a fixed threshold.
    pub fn threshold(&self, threshold: u8, polarity: Polarity) -> GridResult<PixelGrid> {
        PixelGrid::from_luma(self.width, self.height, &self.data, threshold, polarity)
    }
}

impl ImageView for GrayImageU8 {
    type Pixel = u8;

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
}

/// Load an image from disk and convert to 8-bit grayscale.
pub fn load_grayscale_image(path: &Path) -> Result<GrayImageU8, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.into_raw();
    Ok(GrayImageU8::new(width, height, data))
}

/// Save a binary mask as a PNG with black foreground on white.
pub fn save_mask_png(grid: &PixelGrid, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(grid.width() as u32, grid.height() as u32);
    for (y, row) in grid.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let v = if px != 0 { 0u8 } else { 255u8 };
            out.put_pixel(x as u32, y as u32, Luma([v]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
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
