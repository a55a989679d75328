//! Quantise node coordinates onto externally supplied reference positions,
//! such as axis tick marks or grid lines found by layout analysis.

use crate::error::{Error, Result};
use crate::graph::{PixelGraph, PixelNode};
use crate::types::Axis;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapOptions {
    /// Coordinate that gets replaced.
    pub axis: Axis,
    /// Only nodes with more than this many incident edge ends move.
    pub min_edge_count: usize,
    /// Target positions, ascending. Empty disables snapping.
    pub reference: Vec<i32>,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            axis: Axis::X,
            min_edge_count: 0,
            reference: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Snapper {
    options: SnapOptions,
}

impl Snapper {
    pub fn new(options: SnapOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SnapOptions {
        &self.options
    }

    /// Snap qualifying nodes in place. Returns how many nodes changed
    /// position.
    pub fn snap_nodes(&self, nodes: &mut [PixelNode]) -> Result<usize> {
        let reference = &self.options.reference;
        check_sorted(reference)?;
        if reference.is_empty() {
            return Ok(0);
        }
        let axis = self.options.axis;
        let mut moved = 0;
        for node in nodes
            .iter_mut()
            .filter(|n| n.degree() > self.options.min_edge_count)
        {
            let current = node.pixel.coord(axis);
            let Some(target) = nearest_value(reference, current) else {
                continue;
            };
            if target != current {
                node.pixel = node.pixel.with_coord(axis, target);
                moved += 1;
            }
        }
        Ok(moved)
    }

    pub fn snap(&self, graph: &mut PixelGraph) -> Result<usize> {
        let moved = self.snap_nodes(graph.nodes_mut())?;
        debug!(
            "Snapper::snap axis={:?} reference={} moved={}",
            self.options.axis,
            self.options.reference.len(),
            moved
        );
        Ok(moved)
    }

    /// Snap every graph of a list with the same reference.
    pub fn snap_all(&self, graphs: &mut [PixelGraph]) -> Result<usize> {
        let mut moved = 0;
        for graph in graphs {
            moved += self.snap(graph)?;
        }
        Ok(moved)
    }
}

/// Reject references that are not ascending. Equal neighbours are fine.
pub fn check_sorted(reference: &[i32]) -> Result<()> {
    match reference.windows(2).position(|w| w[1] < w[0]) {
        Some(i) => Err(Error::UnsortedReference { index: i + 1 }),
        None => Ok(()),
    }
}

/// Closest entry of an ascending `reference` to `value`; ties go to the
/// lower entry.
pub fn nearest_value(reference: &[i32], value: i32) -> Option<i32> {
    let idx = reference.partition_point(|&v| v < value);
    let upper = reference.get(idx).copied();
    let lower = idx.checked_sub(1).map(|i| reference[i]);
    match (lower, upper) {
        (Some(lo), Some(hi)) => {
            if i64::from(value) - i64::from(lo) <= i64::from(hi) - i64::from(value) {
                Some(lo)
            } else {
                Some(hi)
            }
        }
        (lo, hi) => lo.or(hi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphBuilder, NodeKind};
    use crate::grid::PixelGrid;
    use crate::skeleton::Skeleton;
    use crate::types::Pixel;

    fn plus_graph() -> PixelGraph {
        let mask = PixelGrid::from_ascii(&["..#..", "..#..", "#####", "..#..", "..#.."])
            .expect("valid grid");
        GraphBuilder::default().build(&Skeleton::from_grid(mask))
    }

    #[test]
    fn nearest_value_prefers_lower_on_ties() {
        let r = [0, 10, 20];
        assert_eq!(nearest_value(&r, 4), Some(0));
        assert_eq!(nearest_value(&r, 5), Some(0));
        assert_eq!(nearest_value(&r, 6), Some(10));
        assert_eq!(nearest_value(&r, -7), Some(0));
        assert_eq!(nearest_value(&r, 99), Some(20));
        assert_eq!(nearest_value(&r, 10), Some(10));
        assert_eq!(nearest_value(&[], 3), None);
    }

    #[test]
    fn unsorted_reference_is_rejected() {
        assert_eq!(
            check_sorted(&[1, 4, 3, 8]),
            Err(Error::UnsortedReference { index: 2 })
        );
        assert!(check_sorted(&[1, 1, 2]).is_ok());

        let mut g = plus_graph();
        let snapper = Snapper::new(SnapOptions {
            reference: vec![5, 1],
            ..Default::default()
        });
        assert!(matches!(
            snapper.snap(&mut g),
            Err(Error::UnsortedReference { index: 1 })
        ));
        assert_eq!(g, plus_graph());
    }

    #[test]
    fn empty_reference_is_a_no_op() {
        let mut g = plus_graph();
        let moved = Snapper::default().snap(&mut g).expect("empty is valid");
        assert_eq!(moved, 0);
        assert_eq!(g, plus_graph());
    }

    #[test]
    fn only_nodes_meeting_edge_count_move() {
        let mut g = plus_graph();
        let snapper = Snapper::new(SnapOptions {
            axis: Axis::X,
            min_edge_count: 3,
            reference: vec![0, 3],
        });
        let moved = snapper.snap(&mut g).expect("sorted reference");
        assert_eq!(moved, 1);
        let hub = g.iter_kind(NodeKind::Junction).next().expect("junction");
        assert_eq!(hub.pixel, Pixel::new(3, 2));
        assert!(g.iter_kind(NodeKind::End).all(|n| n.pixel.x == 0 || n.pixel.x == 2 || n.pixel.x == 4));
        // Edge paths are left alone.
        assert_eq!(g.edge_pixel_count(), plus_graph().edge_pixel_count());
        g.validate().expect("still consistent");
    }

    #[test]
    fn nodes_at_the_edge_count_stay_put() {
        let mut g = plus_graph();
        let snapper = Snapper::new(SnapOptions {
            axis: Axis::X,
            min_edge_count: 1,
            reference: vec![100],
        });
        assert_eq!(snapper.snap(&mut g).expect("sorted reference"), 1);
        let hub = g.iter_kind(NodeKind::Junction).next().expect("junction");
        assert_eq!(hub.pixel, Pixel::new(100, 2));
        assert!(g.iter_kind(NodeKind::End).all(|n| n.pixel.x < 5));

        let mut g = plus_graph();
        let snapper = Snapper::new(SnapOptions {
            axis: Axis::X,
            min_edge_count: 4,
            reference: vec![100],
        });
        assert_eq!(snapper.snap(&mut g).expect("sorted reference"), 0);
        assert_eq!(g, plus_graph());
    }

    #[test]
    fn both_axes_and_graph_lists() {
        let mut graphs = vec![plus_graph(), plus_graph()];
        let xs = Snapper::new(SnapOptions {
            axis: Axis::X,
            min_edge_count: 0,
            reference: vec![1, 3],
        });
        let ys = Snapper::new(SnapOptions {
            axis: Axis::Y,
            min_edge_count: 0,
            reference: vec![-1, 5],
        });
        xs.snap_all(&mut graphs).expect("sorted reference");
        ys.snap_all(&mut graphs).expect("sorted reference");
        for g in &graphs {
            for n in g.nodes() {
                assert!(n.pixel.x == 1 || n.pixel.x == 3, "{n:?}");
                assert!(n.pixel.y == -1 || n.pixel.y == 5, "{n:?}");
            }
        }
    }
}
