//! Binary pixel masks and neighbourhood queries.
//!
//! [`PixelGrid`] is the single input type of the extraction pipeline. It is a
//! plain row-major `u8` mask; out-of-bounds lookups read as background so that
//! thinning and graph walking can probe the full 3x3 neighbourhood of any
//! pixel, including pixels on the border.

mod connectivity;
mod pixel_grid;

pub use connectivity::{is_diagonal_dir, opposite_dir, Connectivity, NEIGH_OFFSETS};
pub use pixel_grid::{PixelGrid, Polarity};
