//! 3x3 neighbourhood predicates shared by the thinning strategies.
//!
//! Neighbours are numbered clockwise from north, matching the classic
//! `P2..P9` notation: `N, NE, E, SE, S, SW, W, NW`.
use crate::grid::PixelGrid;
use crate::types::Pixel;

const RING: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

const N: usize = 0;
const E: usize = 2;
const S: usize = 4;
const W: usize = 6;

// Counter-clockwise from east, the order used by the Yokoi formula.
const YOKOI_ORDER: [usize; 8] = [2, 1, 0, 7, 6, 5, 4, 3];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Neighbourhood {
    bits: [bool; 8],
}

impl Neighbourhood {
    #[inline]
    pub(crate) fn read(grid: &PixelGrid, p: Pixel) -> Self {
        let mut bits = [false; 8];
        for (bit, &(dx, dy)) in bits.iter_mut().zip(RING.iter()) {
            *bit = grid.get(p.offset(dx, dy));
        }
        Self { bits }
    }

    /// Number of foreground neighbours, `B(p)`.
    #[inline]
    pub(crate) fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Number of background-to-foreground transitions walking the ring once,
    /// `A(p)` (Rutovitz crossing number).
    #[inline]
    pub(crate) fn transitions(&self) -> usize {
        (0..8)
            .filter(|&i| !self.bits[i] && self.bits[(i + 1) % 8])
            .count()
    }

    /// Yokoi connectivity number for 8-connected foreground. A border pixel
    /// is simple, i.e. deletable without changing topology, iff this is 1.
    pub(crate) fn yokoi8(&self) -> usize {
        let inv = |k: usize| usize::from(!self.bits[YOKOI_ORDER[k % 8]]);
        [0usize, 2, 4, 6]
            .iter()
            .map(|&k| inv(k) - inv(k) * inv(k + 1) * inv(k + 2))
            .sum()
    }

    #[inline]
    pub(crate) fn n(&self) -> bool {
        self.bits[N]
    }

    #[inline]
    pub(crate) fn e(&self) -> bool {
        self.bits[E]
    }

    #[inline]
    pub(crate) fn s(&self) -> bool {
        self.bits[S]
    }

    #[inline]
    pub(crate) fn w(&self) -> bool {
        self.bits[W]
    }
}

/// Pixel north of `p`.
#[inline]
pub(crate) fn north(p: Pixel) -> Pixel {
    p.offset(RING[N].0, RING[N].1)
}

/// Pixel east of `p`.
#[inline]
pub(crate) fn east(p: Pixel) -> Pixel {
    p.offset(RING[E].0, RING[E].1)
}

/// True when deleting `p` from `grid` keeps every 8-connected component and
/// every background hole intact.
#[inline]
pub(crate) fn is_simple(grid: &PixelGrid, p: Pixel) -> bool {
    Neighbourhood::read(grid, p).yokoi8() == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centre(rows: &[&str]) -> Neighbourhood {
        let grid = PixelGrid::from_ascii(rows).expect("valid grid");
        Neighbourhood::read(&grid, Pixel::new(1, 1))
    }

    #[test]
    fn endpoint_is_simple() {
        let nb = centre(&["...", ".##", "..."]);
        assert_eq!(nb.count(), 1);
        assert_eq!(nb.transitions(), 1);
        assert_eq!(nb.yokoi8(), 1);
    }

    #[test]
    fn bridge_pixel_is_not_simple() {
        let nb = centre(&["...", "###", "..."]);
        assert_eq!(nb.transitions(), 2);
        assert_eq!(nb.yokoi8(), 2);
    }

    #[test]
    fn interior_and_isolated_pixels_are_not_simple() {
        assert_eq!(centre(&["###", "###", "###"]).yokoi8(), 0);
        assert_eq!(centre(&["...", ".#.", "..."]).yokoi8(), 0);
    }

    #[test]
    fn diagonal_corner_is_simple_even_with_two_transitions() {
        // N and E touch diagonally, so removing the centre keeps them
        // connected although the crossing number counts two runs.
        let nb = centre(&[".#.", "..#", "..."]);
        assert_eq!(nb.count(), 2);
        assert_eq!(nb.transitions(), 2);
        assert_eq!(nb.yokoi8(), 1);

        let nb = centre(&["##.", ".#.", "..#"]);
        assert_eq!(nb.transitions(), 2);
        assert_eq!(nb.yokoi8(), 2);
    }
}
