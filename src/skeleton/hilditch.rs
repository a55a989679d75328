use super::neighbourhood::{east, is_simple, north, Neighbourhood};
use super::ThinningStrategy;
use crate::grid::PixelGrid;
use crate::types::Pixel;

/// Hilditch thinning: one raster sweep per pass that peels a single
/// boundary layer.
///
/// Candidates are chosen against the mask as it was when the pass started: a
/// pixel qualifies when it has between 2 and 6 neighbours, a crossing number
/// of one, and deleting it would not break the crossing number of its north
/// or east neighbour. Together these only admit pixels with a background
/// 4-neighbour, so pixels uncovered during the sweep wait for the next pass.
/// Candidates are then deleted in raster order while still simple on the
/// live mask, which keeps two-pixel-wide strokes from vanishing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hilditch;

impl ThinningStrategy for Hilditch {
    fn name(&self) -> &'static str {
        "hilditch"
    }

    fn pass(&self, grid: &mut PixelGrid) -> usize {
        let snapshot = grid.clone();
        let candidates: Vec<Pixel> = snapshot
            .iter_foreground()
            .filter(|&p| removable(&snapshot, p))
            .collect();
        let mut removed = 0;
        for p in candidates {
            if is_simple(grid, p) {
                grid.set(p, false);
                removed += 1;
            }
        }
        removed
    }
}

fn removable(grid: &PixelGrid, p: Pixel) -> bool {
    let nb = Neighbourhood::read(grid, p);
    let b = nb.count();
    if !(2..=6).contains(&b) || nb.transitions() != 1 {
        return false;
    }
    let (n, e, s, w) = (nb.n(), nb.e(), nb.s(), nb.w());
    if n && e && w && Neighbourhood::read(grid, north(p)).transitions() == 1 {
        return false;
    }
    if n && e && s && Neighbourhood::read(grid, east(p)).transitions() == 1 {
        return false;
    }
    true
}
