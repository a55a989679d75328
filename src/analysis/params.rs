//! Parameters for the per-island pipeline.
//!
//! Every stage keeps its own options struct; this module only groups them
//! and decides which optional stages run. Defaults thin with Zhang–Suen,
//! build an 8-connected graph and merge nodes closer than two pixels; ring
//! decomposition and snapping are off until configured.

use crate::graph::GraphOptions;
use crate::islands::LabelOptions;
use crate::merge::MergeOptions;
use crate::rings::RingOptions;
use crate::skeleton::ThinningOptions;
use crate::snap::SnapOptions;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisParams {
    /// Segmentation, used by the grid-level driver only.
    pub labeling: LabelOptions,
    pub thinning: ThinningOptions,
    pub graph: GraphOptions,
    /// `None` keeps the graph exactly as walked.
    pub merge: Option<MergeOptions>,
    /// Outline-seeded ring decomposition; `None` skips it.
    pub rings: Option<RingOptions>,
    /// Applied in order, typically one per axis.
    pub snap: Vec<SnapOptions>,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            labeling: LabelOptions::default(),
            thinning: ThinningOptions::default(),
            graph: GraphOptions::default(),
            merge: Some(MergeOptions::default()),
            rings: None,
            snap: Vec::new(),
        }
    }
}
