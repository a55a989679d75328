use crate::error::{Error, Result};
use crate::grid::{Connectivity, PixelGrid};
use crate::types::{Pixel, PixelBounds};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identifier of an island within one labelled grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IslandId(pub u32);

/// A set of foreground pixels that belong together, normally one connected
/// component produced by [`ComponentLabeler`](super::ComponentLabeler).
///
/// Membership is stored twice: as a row-major sorted pixel list, and as a
/// bounding-box-local mask for constant-time `contains`. The source grid is
/// shared, never copied.
#[derive(Clone, Debug)]
pub struct Island {
    id: IslandId,
    pixels: Vec<Pixel>,
    bounds: PixelBounds,
    mask: PixelGrid,
    grid: Arc<PixelGrid>,
}

impl Island {
    pub(crate) fn from_sorted(id: IslandId, pixels: Vec<Pixel>, grid: Arc<PixelGrid>) -> Self {
        debug_assert!(pixels.windows(2).all(|w| w[0] < w[1]));
        let bounds = PixelBounds::of(pixels.iter().copied())
            .unwrap_or(PixelBounds {
                min_x: 0,
                min_y: 0,
                max_x: 0,
                max_y: 0,
            });
        let mut mask = PixelGrid::zeroed(bounds.width(), bounds.height());
        let origin = bounds.origin();
        for p in &pixels {
            mask.set(Pixel::new(p.x - origin.x, p.y - origin.y), true);
        }
        Self {
            id,
            pixels,
            bounds,
            mask,
            grid,
        }
    }

    /// Assemble an island from an explicit pixel set.
    ///
    /// Every pixel must be foreground in `grid`. Regions assembled this way
    /// need not be connected, which lets callers group related components
    /// (for example concentric rings) for ring decomposition.
    pub fn from_pixels(
        id: IslandId,
        grid: Arc<PixelGrid>,
        pixels: impl IntoIterator<Item = Pixel>,
    ) -> Result<Self> {
        let mut pixels: Vec<Pixel> = pixels.into_iter().collect();
        if pixels.is_empty() {
            return Err(Error::InvalidInput("island needs at least one pixel".into()));
        }
        if let Some(p) = pixels.iter().find(|&&p| !grid.get(p)) {
            return Err(Error::InvalidInput(format!(
                "pixel ({}, {}) is not foreground in the source grid",
                p.x, p.y
            )));
        }
        pixels.sort_unstable();
        pixels.dedup();
        Ok(Self::from_sorted(id, pixels, grid))
    }

    pub fn id(&self) -> IslandId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Member pixels in row-major order.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// First pixel met by a row-major scan.
    pub fn first_pixel(&self) -> Pixel {
        self.pixels[0]
    }

    pub fn bounds(&self) -> PixelBounds {
        self.bounds
    }

    /// Top-left corner of [`Island::mask`] in grid coordinates.
    pub fn origin(&self) -> Pixel {
        self.bounds.origin()
    }

    /// Bounding-box-local membership mask.
    pub fn mask(&self) -> &PixelGrid {
        &self.mask
    }

    pub fn source_grid(&self) -> &Arc<PixelGrid> {
        &self.grid
    }

    #[inline]
    pub fn contains(&self, p: Pixel) -> bool {
        let o = self.origin();
        self.mask.get(Pixel::new(p.x - o.x, p.y - o.y))
    }

    /// Member pixels adjacent to `p`, in row-major order.
    pub fn neighbors(&self, p: Pixel, connectivity: Connectivity) -> impl Iterator<Item = Pixel> + '_ {
        connectivity
            .offsets()
            .map(move |(dx, dy)| p.offset(dx, dy))
            .filter(move |&q| self.contains(q))
    }

    /// Member pixels with at least one 4-neighbour outside the island, in
    /// row-major order.
    pub fn outline(&self) -> Vec<Pixel> {
        self.pixels
            .iter()
            .copied()
            .filter(|&p| {
                Connectivity::Four
                    .offsets()
                    .any(|(dx, dy)| !self.contains(p.offset(dx, dy)))
            })
            .collect()
    }
}
