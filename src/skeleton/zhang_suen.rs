use super::neighbourhood::{is_simple, Neighbourhood};
use super::ThinningStrategy;
use crate::grid::PixelGrid;
use crate::types::Pixel;

/// Zhang–Suen thinning.
///
/// Each pass runs two subiterations. Candidates are selected against a
/// snapshot of the mask, then deleted in raster order as long as they are
/// still simple on the live mask. The second check keeps two-pixel-thick
/// strokes from vanishing, which the textbook fully parallel update does.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZhangSuen;

#[derive(Clone, Copy, Debug)]
enum SubIteration {
    SouthEast,
    NorthWest,
}

impl SubIteration {
    fn admits(self, nb: &Neighbourhood) -> bool {
        let b = nb.count();
        if !(2..=6).contains(&b) || nb.transitions() != 1 {
            return false;
        }
        let (n, e, s, w) = (nb.n(), nb.e(), nb.s(), nb.w());
        match self {
            SubIteration::SouthEast => !(n && e && s) && !(e && s && w),
            SubIteration::NorthWest => !(n && e && w) && !(n && s && w),
        }
    }
}

impl ThinningStrategy for ZhangSuen {
    fn name(&self) -> &'static str {
        "zhang-suen"
    }

    fn pass(&self, grid: &mut PixelGrid) -> usize {
        let mut removed = 0;
        let mut candidates: Vec<Pixel> = Vec::new();
        for step in [SubIteration::SouthEast, SubIteration::NorthWest] {
            candidates.clear();
            candidates.extend(
                grid.iter_foreground()
                    .filter(|&p| step.admits(&Neighbourhood::read(grid, p))),
            );
            for &p in &candidates {
                if is_simple(grid, p) {
                    grid.set(p, false);
                    removed += 1;
                }
            }
        }
        removed
    }
}
