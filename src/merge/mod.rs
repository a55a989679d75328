//! Collapse near-coincident graph nodes.
//!
//! Nodes closer than a threshold are clustered by single linkage: a
//! sort-by-x sweep finds candidate pairs and a union-find joins them. Each
//! cluster becomes one node; edges keep their pixel paths and are re-pointed
//! at the representative, so an edge running between two members of one
//! cluster turns into a self-loop.
//!
//! Centroid representatives can move a merged node into range of another
//! node, so rounds repeat until a sweep joins nothing.

use crate::error::{Error, Result};
use crate::graph::{EdgeId, NodeId, NodeKind, PixelEdge, PixelGraph, PixelNode};
use crate::types::Pixel;
use log::debug;
use nalgebra::{Point2, Vector2};
use petgraph::unionfind::UnionFind;
use serde::{Deserialize, Serialize};

/// Where a merged node ends up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Representative {
    /// Mean of all original member coordinates, rounded to a pixel.
    #[default]
    Centroid,
    /// Coordinate of the member with the lowest node id.
    FirstDiscovered,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MergeOptions {
    /// Nodes strictly closer than this (in pixels) are merged.
    pub distance_threshold: f64,
    pub representative: Representative,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            distance_threshold: 2.0,
            representative: Representative::Centroid,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeStats {
    pub rounds: usize,
    pub nodes_before: usize,
    pub nodes_after: usize,
}

#[derive(Clone, Debug, Default)]
pub struct NodeMerger {
    options: MergeOptions,
}

impl NodeMerger {
    pub fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    pub fn merge(&self, graph: PixelGraph) -> Result<PixelGraph> {
        self.merge_with_stats(graph).map(|(g, _)| g)
    }

    /// Merge every graph of a list with the same settings.
    pub fn merge_all(&self, graphs: Vec<PixelGraph>) -> Result<Vec<PixelGraph>> {
        graphs.into_iter().map(|g| self.merge(g)).collect()
    }

    pub fn merge_with_stats(&self, graph: PixelGraph) -> Result<(PixelGraph, MergeStats)> {
        let threshold = self.options.distance_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(Error::InvalidInput(format!(
                "merge distance threshold must be finite and non-negative, got {threshold}"
            )));
        }

        let mut stats = MergeStats {
            nodes_before: graph.node_count(),
            ..Default::default()
        };
        let mut graph = graph;
        // Original coordinates behind every current node.
        let mut members: Vec<Vec<Pixel>> = graph.nodes().iter().map(|n| vec![n.pixel]).collect();

        loop {
            let mut uf = UnionFind::<usize>::new(graph.node_count());
            if !join_close_pairs(graph.nodes(), threshold, &mut uf) {
                break;
            }
            stats.rounds += 1;
            let (next, next_members) = self.rebuild(graph, &members, uf.into_labeling())?;
            graph = next;
            members = next_members;
        }

        stats.nodes_after = graph.node_count();
        debug!(
            "NodeMerger::merge threshold={} rounds={} nodes {} -> {}",
            threshold, stats.rounds, stats.nodes_before, stats.nodes_after
        );
        Ok((graph, stats))
    }

    fn rebuild(
        &self,
        graph: PixelGraph,
        members: &[Vec<Pixel>],
        labels: Vec<usize>,
    ) -> Result<(PixelGraph, Vec<Vec<Pixel>>)> {
        let (island, nodes, edges) = graph.into_parts();

        // Clusters are numbered by their lowest old node id.
        let mut cluster_of_root = vec![usize::MAX; nodes.len()];
        let mut new_id = Vec::with_capacity(nodes.len());
        let mut clusters: Vec<Vec<usize>> = Vec::new();
        for (old, &root) in labels.iter().enumerate() {
            if cluster_of_root[root] == usize::MAX {
                cluster_of_root[root] = clusters.len();
                clusters.push(Vec::new());
            }
            let c = cluster_of_root[root];
            clusters[c].push(old);
            new_id.push(NodeId(c as u32));
        }

        let mut merged_nodes = Vec::with_capacity(clusters.len());
        let mut merged_members = Vec::with_capacity(clusters.len());
        for (c, olds) in clusters.iter().enumerate() {
            let originals: Vec<Pixel> = olds
                .iter()
                .flat_map(|&o| members[o].iter().copied())
                .collect();
            let first = &nodes[olds[0]];
            let pixel = match self.options.representative {
                Representative::Centroid => centroid(&originals),
                Representative::FirstDiscovered => first.pixel,
            };
            merged_nodes.push(PixelNode {
                id: NodeId(c as u32),
                kind: first.kind,
                pixel,
                edges: Vec::new(),
            });
            merged_members.push(originals);
        }

        let edges: Vec<PixelEdge> = edges
            .into_iter()
            .enumerate()
            .map(|(i, e)| PixelEdge {
                id: EdgeId(i as u32),
                a: new_id[e.a.index()],
                b: new_id[e.b.index()],
                pixels: e.pixels,
            })
            .collect();

        let mut merged = PixelGraph::from_parts(island, merged_nodes, edges);
        for (node, olds) in merged.nodes_mut().iter_mut().zip(&clusters) {
            if olds.len() > 1 {
                node.kind = NodeKind::from_degree(node.degree(), NodeKind::Joint);
            }
        }

        if let Err(err) = merged.validate() {
            debug_assert!(false, "merge produced an inconsistent graph: {err}");
            return Err(err);
        }
        Ok((merged, merged_members))
    }
}

/// Union every pair of nodes closer than `threshold`. Returns whether any
/// two distinct sets were joined.
fn join_close_pairs(nodes: &[PixelNode], threshold: f64, uf: &mut UnionFind<usize>) -> bool {
    let mut order: Vec<usize> = (0..nodes.len()).collect();
    order.sort_by_key(|&i| (nodes[i].pixel.x, nodes[i].pixel.y));

    let mut joined = false;
    for (k, &i) in order.iter().enumerate() {
        let pi = nodes[i].pixel;
        for &j in &order[k + 1..] {
            let pj = nodes[j].pixel;
            if (i64::from(pj.x) - i64::from(pi.x)) as f64 >= threshold {
                break;
            }
            if pi.distance(pj) < threshold && uf.union(i, j) {
                joined = true;
            }
        }
    }
    joined
}

fn centroid(pixels: &[Pixel]) -> Pixel {
    let sum = pixels
        .iter()
        .fold(Vector2::<f64>::zeros(), |acc, p| acc + p.to_point().coords);
    Pixel::from_point(&Point2::from(sum / pixels.len().max(1) as f64))
}
