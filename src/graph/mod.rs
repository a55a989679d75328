//! Skeleton to node/edge graph extraction.
//!
//! Skeleton pixels are classified by how many skeleton neighbours they have:
//! one makes an end node, three or more a junction, none an isolated node,
//! and two an interior path pixel. Paths are then walked from every node in
//! row-major order, direction by direction, with a per-pixel link bitmask so
//! each pixel-to-pixel step is consumed exactly once. Components that are a
//! single closed loop have no node to start from; the first pixel met in a
//! row-major scan becomes a [`NodeKind::LoopAnchor`] and the loop a
//! self-loop edge.
//!
//! The result is a multigraph: parallel edges and self-loops are kept.

mod builder;
mod types;

pub use builder::{GraphBuilder, GraphOptions};
pub use types::{EdgeId, NodeId, NodeKind, PixelEdge, PixelGraph, PixelNode};
