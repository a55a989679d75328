//! Serializable diagnostics returned alongside extraction results.
//!
//! [`AnalysisReport`] is the grid-level entry point; it carries global
//! timings and one [`IslandReport`] per analysed island.

pub mod report;
pub mod timing;

pub use report::{AnalysisReport, IslandReport};
pub use timing::{StageTiming, TimingBreakdown};
