use crate::error::{Error, Result};
use crate::islands::IslandId;
use crate::types::Pixel;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Why a pixel was promoted to a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// Exactly one skeleton neighbour.
    End,
    /// Three or more skeleton neighbours.
    Junction,
    /// No skeleton neighbours; carries no edges.
    Isolated,
    /// Synthetic node placed on a closed loop without junctions.
    LoopAnchor,
    /// Degree-two node left behind by merging.
    Joint,
}

impl NodeKind {
    /// Kind implied by an incident edge count; `two` is used for degree 2,
    /// which never arises from plain classification.
    pub fn from_degree(degree: usize, two: NodeKind) -> Self {
        match degree {
            0 => NodeKind::Isolated,
            1 => NodeKind::End,
            2 => two,
            _ => NodeKind::Junction,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub pixel: Pixel,
    /// Incident edges, one entry per edge end: a self-loop appears twice.
    pub edges: Vec<EdgeId>,
}

impl PixelNode {
    #[inline]
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    pub fn point(&self) -> Point2<f64> {
        self.pixel.to_point()
    }
}

/// Unbranched walked path between two nodes. `pixels` starts at the pixel
/// of node `a` and ends at the pixel of node `b` as walked; merging moves
/// endpoints but never rewrites the path.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelEdge {
    pub id: EdgeId,
    pub a: NodeId,
    pub b: NodeId,
    pub pixels: Vec<Pixel>,
}

impl PixelEdge {
    /// Number of steps along the path.
    #[inline]
    pub fn length(&self) -> usize {
        self.pixels.len().saturating_sub(1)
    }

    #[inline]
    pub fn is_loop(&self) -> bool {
        self.a == self.b
    }

    /// The endpoint opposite `node`, if `node` is an endpoint at all.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    /// Euclidean length of the polyline through the path pixels.
    pub fn arc_length(&self) -> f64 {
        self.pixels
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .sum()
    }
}

/// Node/edge arena for one skeleton. Nodes and edges refer to each other by
/// index only; ids equal positions in the respective vectors.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelGraph {
    island: Option<IslandId>,
    nodes: Vec<PixelNode>,
    edges: Vec<PixelEdge>,
}

impl PixelGraph {
    /// Assemble a graph and rebuild every incidence list from `edges`.
    pub(crate) fn from_parts(
        island: Option<IslandId>,
        mut nodes: Vec<PixelNode>,
        edges: Vec<PixelEdge>,
    ) -> Self {
        for node in &mut nodes {
            node.edges.clear();
        }
        for edge in &edges {
            if let Some(a) = nodes.get_mut(edge.a.index()) {
                a.edges.push(edge.id);
            }
            if let Some(b) = nodes.get_mut(edge.b.index()) {
                b.edges.push(edge.id);
            }
        }
        Self {
            island,
            nodes,
            edges,
        }
    }

    pub fn island(&self) -> Option<IslandId> {
        self.island
    }

    pub fn nodes(&self) -> &[PixelNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[PixelEdge] {
        &self.edges
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [PixelNode] {
        &mut self.nodes
    }

    pub(crate) fn into_parts(self) -> (Option<IslandId>, Vec<PixelNode>, Vec<PixelEdge>) {
        (self.island, self.nodes, self.edges)
    }

    pub fn node(&self, id: NodeId) -> Option<&PixelNode> {
        self.nodes.get(id.index())
    }

    pub fn edge(&self, id: EdgeId) -> Option<&PixelEdge> {
        self.edges.get(id.index())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter_kind(&self, kind: NodeKind) -> impl Iterator<Item = &PixelNode> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    pub fn num_junctions(&self) -> usize {
        self.iter_kind(NodeKind::Junction).count()
    }

    pub fn num_ends(&self) -> usize {
        self.iter_kind(NodeKind::End).count()
    }

    pub fn node_at(&self, pixel: Pixel) -> Option<&PixelNode> {
        self.nodes.iter().find(|n| n.pixel == pixel)
    }

    /// Total number of path pixels over all edges.
    pub fn edge_pixel_count(&self) -> usize {
        self.edges.iter().map(|e| e.pixels.len()).sum()
    }

    /// Check the arena invariants: ids match positions, every edge endpoint
    /// exists, and each node lists exactly the edge ends that touch it.
    pub fn validate(&self) -> Result<()> {
        for (i, node) in self.nodes.iter().enumerate() {
            if node.id.index() != i {
                return Err(Error::Topology(format!(
                    "node at slot {i} has id {}",
                    node.id.0
                )));
            }
        }
        let mut expected = vec![0usize; self.nodes.len()];
        for (i, edge) in self.edges.iter().enumerate() {
            if edge.id.index() != i {
                return Err(Error::Topology(format!(
                    "edge at slot {i} has id {}",
                    edge.id.0
                )));
            }
            for end in [edge.a, edge.b] {
                let Some(slot) = expected.get_mut(end.index()) else {
                    return Err(Error::Topology(format!(
                        "edge {} references missing node {}",
                        edge.id.0, end.0
                    )));
                };
                *slot += 1;
            }
        }
        for node in &self.nodes {
            if node.edges.len() != expected[node.id.index()] {
                return Err(Error::Topology(format!(
                    "node {} lists {} edge ends, edges reference it {} times",
                    node.id.0,
                    node.edges.len(),
                    expected[node.id.index()]
                )));
            }
            for &e in &node.edges {
                let Some(edge) = self.edge(e) else {
                    return Err(Error::Topology(format!(
                        "node {} lists missing edge {}",
                        node.id.0, e.0
                    )));
                };
                let ends = usize::from(edge.a == node.id) + usize::from(edge.b == node.id);
                let listed = node.edges.iter().filter(|&&x| x == e).count();
                if listed != ends {
                    return Err(Error::Topology(format!(
                        "node {} lists edge {} {} times, expected {}",
                        node.id.0, e.0, listed, ends
                    )));
                }
            }
        }
        Ok(())
    }
}
