use super::timing::TimingBreakdown;
use crate::islands::IslandId;
use crate::merge::MergeStats;
use crate::skeleton::ThinningStats;
use crate::types::PixelBounds;
use serde::Serialize;

/// Summary of one island's trip through the pipeline.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IslandReport {
    pub island: IslandId,
    pub pixel_count: usize,
    pub bounds: PixelBounds,
    pub skeleton_pixels: usize,
    pub thinning: ThinningStats,
    pub node_count: usize,
    pub edge_count: usize,
    pub junctions: usize,
    pub ends: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge: Option<MergeStats>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ring_sizes: Vec<usize>,
    pub snapped_nodes: usize,
    pub timings: TimingBreakdown,
}

/// Grid-level summary: input size, global timings and every island report.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub width: usize,
    pub height: usize,
    pub foreground_pixels: usize,
    pub island_count: usize,
    pub timings: TimingBreakdown,
    pub islands: Vec<IslandReport>,
}

impl AnalysisReport {
    pub fn total_nodes(&self) -> usize {
        self.islands.iter().map(|r| r.node_count).sum()
    }

    pub fn total_edges(&self) -> usize {
        self.islands.iter().map(|r| r.edge_count).sum()
    }

    /// One-line human summary used by the demo binary.
    pub fn summary(&self) -> String {
        format!(
            "{}x{} foreground={} islands={} nodes={} edges={} total_ms={:.3}",
            self.width,
            self.height,
            self.foreground_pixels,
            self.island_count,
            self.total_nodes(),
            self.total_edges(),
            self.timings.total_ms
        )
    }
}
