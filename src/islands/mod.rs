//! Connected-component segmentation of a [`PixelGrid`](crate::grid::PixelGrid).
//!
//! A breadth-first flood fill starts from every unvisited foreground pixel in
//! row-major order; a visited bitmap keeps each pixel in exactly one island.
//! Because seeds are taken in scan order, islands are naturally sorted by the
//! first pixel a row-major scan meets, which keeps output reproducible.

mod island;
mod labeler;
mod options;

pub use island::{Island, IslandId};
pub use labeler::{label_islands, ComponentLabeler};
pub use options::LabelOptions;
