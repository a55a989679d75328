//! End-to-end extraction: thinning, graph walking, merging, rings, snapping.
//!
//! [`analyze_island`] is a pure function of an island and its parameters,
//! so islands can be processed independently. [`analyze_grid`] labels a
//! grid and runs every island, across threads when the `parallel` feature
//! is enabled. Results always follow island order.

mod params;

pub use params::AnalysisParams;

use crate::diagnostics::{AnalysisReport, IslandReport, TimingBreakdown};
use crate::error::{Error, Result};
use crate::graph::{GraphBuilder, PixelGraph};
use crate::grid::PixelGrid;
use crate::islands::{ComponentLabeler, Island, IslandId};
use crate::merge::NodeMerger;
use crate::rings::{PixelRingList, RingDecomposer, RingSeed};
use crate::skeleton::{Skeleton, Skeletonizer};
use crate::snap::Snapper;
use log::debug;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Everything derived from one island.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IslandAnalysis {
    pub island: IslandId,
    #[serde(skip)]
    pub skeleton: Skeleton,
    pub graph: PixelGraph,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rings: Option<PixelRingList>,
    pub report: IslandReport,
}

/// Result of [`analyze_grid`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridAnalysis {
    #[serde(skip)]
    pub islands: Vec<Island>,
    pub analyses: Vec<IslandAnalysis>,
    pub report: AnalysisReport,
}

impl GridAnalysis {
    pub fn graphs(&self) -> impl Iterator<Item = &PixelGraph> {
        self.analyses.iter().map(|a| &a.graph)
    }

    /// All island skeletons painted into one grid of the input size.
    pub fn skeleton_grid(&self) -> Result<PixelGrid> {
        let mut out = PixelGrid::new(self.report.width, self.report.height)?;
        for p in self.analyses.iter().flat_map(|a| a.skeleton.pixels()) {
            out.set(p, true);
        }
        Ok(out)
    }
}

pub fn analyze_island(island: &Island, params: &AnalysisParams) -> Result<IslandAnalysis> {
    let total_start = Instant::now();
    let mut timings = TimingBreakdown::default();

    let skeleton = timings.time("thinning", || {
        Skeletonizer::new(params.thinning).skeletonize(island)
    })?;
    let mut graph = timings.time("graph", || GraphBuilder::new(params.graph).build(&skeleton));

    let merge = match &params.merge {
        Some(options) => {
            let (merged, stats) =
                timings.time("merge", || NodeMerger::new(*options).merge_with_stats(graph))?;
            graph = merged;
            Some(stats)
        }
        None => None,
    };

    let rings = match &params.rings {
        Some(options) => Some(timings.time("rings", || {
            RingDecomposer::new(*options).decompose(island, &RingSeed::Outline)
        })?),
        None => None,
    };

    let mut snapped_nodes = 0;
    if !params.snap.is_empty() {
        snapped_nodes = timings.time("snap", || {
            params.snap.iter().try_fold(0, |n, options| {
                Ok::<_, Error>(n + Snapper::new(options.clone()).snap(&mut graph)?)
            })
        })?;
    }

    timings.finish(total_start);
    let report = IslandReport {
        island: island.id(),
        pixel_count: island.len(),
        bounds: island.bounds(),
        skeleton_pixels: skeleton.len(),
        thinning: skeleton.stats(),
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        junctions: graph.num_junctions(),
        ends: graph.num_ends(),
        merge,
        ring_sizes: rings.as_ref().map(PixelRingList::sizes).unwrap_or_default(),
        snapped_nodes,
        timings,
    };

    Ok(IslandAnalysis {
        island: island.id(),
        skeleton,
        graph,
        rings,
        report,
    })
}

/// Label `grid` and analyse every island.
pub fn analyze_grid(grid: Arc<PixelGrid>, params: &AnalysisParams) -> Result<GridAnalysis> {
    let total_start = Instant::now();
    let mut timings = TimingBreakdown::default();

    let islands = timings.time("labeling", || ComponentLabeler::new(params.labeling).label(&grid));
    let analyses = timings.time("islands", || analyze_islands(&islands, params))?;
    timings.finish(total_start);

    let report = AnalysisReport {
        width: grid.width(),
        height: grid.height(),
        foreground_pixels: grid.foreground_count(),
        island_count: islands.len(),
        timings,
        islands: analyses.iter().map(|a| a.report.clone()).collect(),
    };
    debug!("analyze_grid {}", report.summary());

    Ok(GridAnalysis {
        islands,
        analyses,
        report,
    })
}

fn analyze_islands(islands: &[Island], params: &AnalysisParams) -> Result<Vec<IslandAnalysis>> {
    #[cfg(feature = "parallel")]
    {
        islands
            .par_iter()
            .map(|island| analyze_island(island, params))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        islands
            .iter()
            .map(|island| analyze_island(island, params))
            .collect()
    }
}
