#![doc = include_str!("../README.md")]

// Pipeline stages, leaves first.
pub mod grid;
pub mod islands;
pub mod skeleton;
pub mod graph;
pub mod merge;
pub mod rings;
pub mod snap;

// Driver, reports and shared types.
pub mod analysis;
pub mod diagnostics;
pub mod error;
pub mod types;

// Tool plumbing: image loading and JSON configuration.
pub mod config;
pub mod image;

// --- High-level re-exports -------------------------------------------------

pub use crate::analysis::{analyze_grid, analyze_island, AnalysisParams, GridAnalysis, IslandAnalysis};
pub use crate::error::{Error, Result};
pub use crate::graph::{PixelEdge, PixelGraph, PixelNode};
pub use crate::grid::PixelGrid;
pub use crate::islands::Island;
pub use crate::types::Pixel;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use pixel_graph::prelude::*;
/// use std::sync::Arc;
///
/// # fn main() -> pixel_graph::Result<()> {
/// let grid = PixelGrid::from_ascii(&[
///     "..#..",
///     "..#..",
///     "#####",
///     "..#..",
///     "..#..",
/// ])?;
/// let result = analyze_grid(Arc::new(grid), &AnalysisParams::default())?;
/// for graph in result.graphs() {
///     println!("nodes={} edges={}", graph.node_count(), graph.edge_count());
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::analysis::{analyze_grid, analyze_island, AnalysisParams};
    pub use crate::graph::{GraphBuilder, NodeKind, PixelGraph};
    pub use crate::grid::{Connectivity, PixelGrid};
    pub use crate::islands::{label_islands, Island};
    pub use crate::rings::{RingDecomposer, RingSeed};
    pub use crate::skeleton::Skeletonizer;
    pub use crate::types::Pixel;
}
