//! Morphological thinning of islands to one-pixel-wide skeletons.
//!
//! Two strategies are provided behind [`ThinningStrategy`]:
//!
//! - [`ZhangSuen`]: two subiterations per pass, candidates chosen on a
//!   snapshot of the mask.
//! - [`Hilditch`]: one raster sweep per pass with north/east guards,
//!   candidates chosen on a snapshot so each pass peels one layer.
//!
//! Both only ever delete simple pixels with at least two neighbours, so an
//! island keeps its 8-connectivity and its holes, and stroke end points are
//! never eroded. Thinning repeats whole passes until one removes nothing; a
//! configurable cap turns a runaway loop into
//! [`Error::NotConverged`](crate::error::Error::NotConverged).
//!
//! Thinning works on the island's bounding-box mask, so nothing outside the
//! island can be touched. [`Skeleton::pixels`] maps results back to global
//! coordinates.

mod hilditch;
mod neighbourhood;
mod options;
mod zhang_suen;

pub use hilditch::Hilditch;
pub use options::{ThinningAlgorithm, ThinningOptions};
pub use zhang_suen::ZhangSuen;

use crate::error::{Error, Result};
use crate::grid::PixelGrid;
use crate::islands::{Island, IslandId};
use crate::types::Pixel;
use log::{debug, trace};
use serde::Serialize;

/// One thinning rule set. A pass mutates `grid` and reports how many
/// pixels it deleted; zero means the mask is stable.
pub trait ThinningStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn pass(&self, grid: &mut PixelGrid) -> usize;
}

impl ThinningAlgorithm {
    pub fn strategy(self) -> &'static dyn ThinningStrategy {
        match self {
            ThinningAlgorithm::ZhangSuen => &ZhangSuen,
            ThinningAlgorithm::Hilditch => &Hilditch,
        }
    }
}

/// Counters for a finished thinning run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinningStats {
    /// Full passes run, including the final pass that removed nothing.
    pub iterations: usize,
    pub removed: usize,
}

/// One-pixel-wide centre line of an island, stored in island-local
/// coordinates.
#[derive(Clone, Debug)]
pub struct Skeleton {
    island: Option<IslandId>,
    origin: Pixel,
    mask: PixelGrid,
    stats: ThinningStats,
}

impl Skeleton {
    /// Treat an already thin mask as a skeleton at the global origin.
    pub fn from_grid(mask: PixelGrid) -> Self {
        Self {
            island: None,
            origin: Pixel::new(0, 0),
            mask,
            stats: ThinningStats::default(),
        }
    }

    /// Island the skeleton was thinned from, if any.
    pub fn island(&self) -> Option<IslandId> {
        self.island
    }

    /// Global coordinate of the mask's top-left cell.
    pub fn origin(&self) -> Pixel {
        self.origin
    }

    pub fn mask(&self) -> &PixelGrid {
        &self.mask
    }

    pub fn stats(&self) -> ThinningStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.mask.foreground_count()
    }

    pub fn is_empty(&self) -> bool {
        !self.mask.has_foreground()
    }

    /// Skeleton pixels in global coordinates, row-major.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        let o = self.origin;
        self.mask.iter_foreground().map(move |p| p.offset(o.x, o.y))
    }

    /// Membership test in global coordinates.
    pub fn contains(&self, p: Pixel) -> bool {
        self.mask.get(Pixel::new(p.x - self.origin.x, p.y - self.origin.y))
    }
}

/// Drives a [`ThinningStrategy`] to convergence.
#[derive(Clone, Debug, Default)]
pub struct Skeletonizer {
    options: ThinningOptions,
}

impl Skeletonizer {
    pub fn new(options: ThinningOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ThinningOptions {
        &self.options
    }

    /// Thin `grid` in place until a pass removes nothing.
    pub fn thin(&self, grid: &mut PixelGrid) -> Result<ThinningStats> {
        let strategy = self.options.algorithm.strategy();
        let mut stats = ThinningStats::default();
        loop {
            if stats.iterations >= self.options.max_iterations {
                return Err(Error::NotConverged {
                    iterations: stats.iterations,
                });
            }
            let removed = strategy.pass(grid);
            stats.iterations += 1;
            stats.removed += removed;
            trace!(
                "Skeletonizer::thin {} pass={} removed={}",
                strategy.name(),
                stats.iterations,
                removed
            );
            if removed == 0 {
                return Ok(stats);
            }
        }
    }

    /// Thin a copy of the island's mask. The island itself is not modified.
    pub fn skeletonize(&self, island: &Island) -> Result<Skeleton> {
        let mut mask = island.mask().clone();
        let stats = self.thin(&mut mask)?;
        debug!(
            "Skeletonizer::skeletonize island={} algorithm={:?} pixels {} -> {} passes={}",
            island.id().0,
            self.options.algorithm,
            island.len(),
            mask.foreground_count(),
            stats.iterations
        );
        Ok(Skeleton {
            island: Some(island.id()),
            origin: island.origin(),
            mask,
            stats,
        })
    }
}
