//! Owned binary mask in row-major layout (stride == width).
//!
//! Foreground is stored as `1`, background as `0`. Coordinate queries take
//! signed pixels and treat everything outside the grid as background, so
//! neighbourhood code never needs explicit padding.
use super::connectivity::Connectivity;
use crate::error::{Error, Result};
use crate::image::ImageView;
use crate::types::Pixel;
use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

/// Which side of a grayscale threshold counts as foreground.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Polarity {
    /// Ink on paper: values below the threshold are foreground.
    #[default]
    DarkForeground,
    /// Values at or above the threshold are foreground.
    LightForeground,
}

impl PixelGrid {
    /// All-background grid. Zero dimensions are rejected.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::ZeroDimension { width, height });
        }
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Infallible constructor for internally computed, non-empty extents.
    pub(crate) fn zeroed(width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Wrap a row-major buffer; any non-zero byte is foreground.
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::ZeroDimension { width, height });
        }
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        let data = data.into_iter().map(|v| u8::from(v != 0)).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_fn(
        width: usize,
        height: usize,
        mut foreground: impl FnMut(usize, usize) -> bool,
    ) -> Result<Self> {
        let mut grid = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                if foreground(x, y) {
                    grid.data[y * width + x] = 1;
                }
            }
        }
        Ok(grid)
    }

    /// Threshold an 8-bit grayscale buffer.
    pub fn from_luma(
        width: usize,
        height: usize,
        luma: &[u8],
        threshold: u8,
        polarity: Polarity,
    ) -> Result<Self> {
        let expected = checked_len(width, height)?;
        if luma.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: luma.len(),
            });
        }
        Self::from_fn(width, height, |x, y| {
            let v = luma[y * width + x];
            match polarity {
                Polarity::DarkForeground => v < threshold,
                Polarity::LightForeground => v >= threshold,
            }
        })
    }

    /// Parse a text picture: `#`, `1`, `x` or `X` are foreground, anything
    /// else is background. Rows may differ in length; short rows are padded.
    pub fn from_ascii(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        Self::from_fn(width, height, |x, y| {
            matches!(rows[y].chars().nth(x), Some('#' | '1' | 'x' | 'X'))
        })
    }

    /// Grid sized to hold `pixels` relative to `origin`.
    pub fn from_pixels(
        width: usize,
        height: usize,
        origin: Pixel,
        pixels: impl IntoIterator<Item = Pixel>,
    ) -> Result<Self> {
        let mut grid = Self::new(width, height)?;
        for p in pixels {
            let local = Pixel::new(p.x - origin.x, p.y - origin.y);
            if !grid.in_bounds(local) {
                return Err(Error::InvalidInput(format!(
                    "pixel ({}, {}) outside {}x{} grid at origin ({}, {})",
                    p.x, p.y, width, height, origin.x, origin.y
                )));
            }
            grid.set(local, true);
        }
        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn in_bounds(&self, p: Pixel) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    /// Linear index of an in-bounds pixel.
    #[inline]
    pub fn index_of(&self, p: Pixel) -> Option<usize> {
        self.in_bounds(p)
            .then(|| p.y as usize * self.width + p.x as usize)
    }

    #[inline]
    pub fn pixel_at(&self, idx: usize) -> Pixel {
        Pixel::new((idx % self.width) as i32, (idx / self.width) as i32)
    }

    /// Foreground test; out-of-bounds pixels are background.
    #[inline]
    pub fn get(&self, p: Pixel) -> bool {
        match self.index_of(p) {
            Some(i) => self.data[i] != 0,
            None => false,
        }
    }

    #[inline]
    pub fn is_set(&self, x: i32, y: i32) -> bool {
        self.get(Pixel::new(x, y))
    }

    /// Set a pixel. Writes outside the grid are ignored.
    #[inline]
    pub fn set(&mut self, p: Pixel, value: bool) {
        if let Some(i) = self.index_of(p) {
            self.data[i] = u8::from(value);
        }
    }

    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    pub fn has_foreground(&self) -> bool {
        self.data.iter().any(|&v| v != 0)
    }

    /// Foreground pixels in row-major order.
    pub fn iter_foreground(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0)
            .map(|(i, _)| self.pixel_at(i))
    }

    /// Foreground neighbours of `p` in row-major order.
    pub fn neighbors(&self, p: Pixel, connectivity: Connectivity) -> impl Iterator<Item = Pixel> + '_ {
        connectivity
            .offsets()
            .map(move |(dx, dy)| p.offset(dx, dy))
            .filter(move |&q| self.get(q))
    }

    pub fn neighbor_count(&self, p: Pixel, connectivity: Connectivity) -> usize {
        self.neighbors(p, connectivity).count()
    }

    /// Render as text using `#` for foreground and `.` for background.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.rows() {
            out.extend(row.iter().map(|&v| if v != 0 { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}

impl ImageView for PixelGrid {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
}

impl fmt::Debug for PixelGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PixelGrid {}x{}", self.width, self.height)?;
        f.write_str(&self.to_ascii())
    }
}

fn checked_len(width: usize, height: usize) -> Result<usize> {
    width.checked_mul(height).ok_or(Error::SizeMismatch {
        expected: usize::MAX,
        actual: 0,
    })
}
