use super::types::{EdgeId, NodeId, NodeKind, PixelEdge, PixelGraph, PixelNode};
use crate::grid::{is_diagonal_dir, opposite_dir, Connectivity, PixelGrid, NEIGH_OFFSETS};
use crate::islands::IslandId;
use crate::skeleton::Skeleton;
use crate::types::Pixel;
use log::debug;
use serde::{Deserialize, Serialize};

/// Parameters for [`GraphBuilder`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphOptions {
    /// Adjacency used for degree classification and walking. Under
    /// `Eight`, a diagonal step is ignored when either orthogonal pixel it
    /// cuts across is set, so staircases read as simple paths.
    pub connectivity: Connectivity,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Eight,
        }
    }
}

/// Turns a one-pixel-wide skeleton into a [`PixelGraph`].
#[derive(Clone, Debug, Default)]
pub struct GraphBuilder {
    options: GraphOptions,
}

/// Working state over the skeleton mask. Pixels are addressed by linear
/// index into the mask; `used_link` holds one bit per direction.
struct Walker<'a> {
    mask: &'a PixelGrid,
    connectivity: Connectivity,
    deg: Vec<u8>,
    node_at: Vec<Option<NodeId>>,
    used_link: Vec<u8>,
    nodes: Vec<PixelNode>,
    edges: Vec<PixelEdge>,
    origin: Pixel,
}

impl GraphBuilder {
    pub fn new(options: GraphOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    pub fn build(&self, skeleton: &Skeleton) -> PixelGraph {
        self.build_mask(skeleton.mask(), skeleton.origin(), skeleton.island())
    }

    /// Build from a raw mask whose top-left cell sits at `origin`.
    pub fn build_mask(
        &self,
        mask: &PixelGrid,
        origin: Pixel,
        island: Option<IslandId>,
    ) -> PixelGraph {
        let mut walker = Walker::new(mask, self.options.connectivity, origin);
        walker.promote_nodes();
        walker.walk_from_nodes();
        walker.walk_loops();

        let graph = PixelGraph::from_parts(island, walker.nodes, walker.edges);
        debug!(
            "GraphBuilder::build island={:?} nodes={} edges={} junctions={} ends={}",
            island.map(|i| i.0),
            graph.node_count(),
            graph.edge_count(),
            graph.num_junctions(),
            graph.num_ends()
        );
        debug_assert!(graph.validate().is_ok());
        graph
    }
}

impl<'a> Walker<'a> {
    fn new(mask: &'a PixelGrid, connectivity: Connectivity, origin: Pixel) -> Self {
        let n = mask.width() * mask.height();
        let mut walker = Self {
            mask,
            connectivity,
            deg: vec![0; n],
            node_at: vec![None; n],
            used_link: vec![0; n],
            nodes: Vec::new(),
            edges: Vec::new(),
            origin,
        };
        for idx in 0..n {
            if mask.data()[idx] == 0 {
                continue;
            }
            let d = connectivity
                .dirs()
                .iter()
                .filter(|&&dir| walker.connected_neighbor(idx, dir).is_some())
                .count();
            walker.deg[idx] = d as u8;
        }
        walker
    }

    fn global(&self, idx: usize) -> Pixel {
        let p = self.mask.pixel_at(idx);
        p.offset(self.origin.x, self.origin.y)
    }

    fn connected_neighbor(&self, idx: usize, dir: u8) -> Option<usize> {
        let p = self.mask.pixel_at(idx);
        let (dx, dy) = NEIGH_OFFSETS[dir as usize];
        let nb = self.mask.index_of(p.offset(dx, dy))?;
        if self.mask.data()[nb] == 0 {
            return None;
        }
        if self.connectivity == Connectivity::Eight
            && is_diagonal_dir(dir)
            && (self.mask.get(p.offset(dx, 0)) || self.mask.get(p.offset(0, dy)))
        {
            return None;
        }
        Some(nb)
    }

    fn is_link_used(&self, idx: usize, dir: u8) -> bool {
        self.used_link[idx] & (1 << dir) != 0
    }

    fn mark_link_both(&mut self, a: usize, dir_ab: u8, b: usize) {
        self.used_link[a] |= 1 << dir_ab;
        self.used_link[b] |= 1 << opposite_dir(dir_ab);
    }

    fn ensure_node(&mut self, idx: usize, two: NodeKind) -> NodeId {
        if let Some(id) = self.node_at[idx] {
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.node_at[idx] = Some(id);
        self.nodes.push(PixelNode {
            id,
            kind: NodeKind::from_degree(self.deg[idx] as usize, two),
            pixel: self.global(idx),
            edges: Vec::new(),
        });
        id
    }

    /// Every pixel whose degree is not 2 becomes a node, in row-major order.
    fn promote_nodes(&mut self) {
        for idx in 0..self.deg.len() {
            if self.mask.data()[idx] != 0 && self.deg[idx] != 2 {
                self.ensure_node(idx, NodeKind::Junction);
            }
        }
    }

    fn walk_from_nodes(&mut self) {
        // `nodes` only grows at the back, and nodes added while walking have
        // all their links consumed by the walk that created them.
        let mut i = 0;
        while i < self.nodes.len() {
            let start = self.linear(self.nodes[i].pixel);
            self.walk_all_links(start, NodeId(i as u32));
            i += 1;
        }
    }

    /// Closed loops without any node: anchor at the first pixel met.
    fn walk_loops(&mut self) {
        for idx in 0..self.deg.len() {
            if self.mask.data()[idx] == 0 {
                continue;
            }
            let has_unused = self
                .connectivity
                .dirs()
                .iter()
                .any(|&dir| !self.is_link_used(idx, dir) && self.connected_neighbor(idx, dir).is_some());
            if has_unused {
                let anchor = self.ensure_node(idx, NodeKind::LoopAnchor);
                self.walk_all_links(idx, anchor);
            }
        }
    }

    fn walk_all_links(&mut self, start: usize, start_node: NodeId) {
        for &dir in self.connectivity.dirs() {
            if self.is_link_used(start, dir) {
                continue;
            }
            let Some(first) = self.connected_neighbor(start, dir) else {
                continue;
            };
            let (pixels, end) = self.trace_chain(start, first, dir);
            let id = EdgeId(self.edges.len() as u32);
            self.edges.push(PixelEdge {
                id,
                a: start_node,
                b: end,
                pixels,
            });
        }
    }

    /// Follow unused links from `start` through `first` until a node is
    /// reached. A dead end on a degree-2 pixel cannot happen on a
    /// consistent mask; if it does, the last pixel is promoted.
    fn trace_chain(&mut self, start: usize, first: usize, start_dir: u8) -> (Vec<Pixel>, NodeId) {
        let mut pixels = vec![self.global(start)];
        let mut prev = start;
        let mut cur = first;
        let mut dir = start_dir;

        loop {
            self.mark_link_both(prev, dir, cur);
            pixels.push(self.global(cur));

            if let Some(id) = self.node_at[cur] {
                return (pixels, id);
            }

            let next = self
                .connectivity
                .dirs()
                .iter()
                .filter(|&&d| !self.is_link_used(cur, d))
                .find_map(|&d| self.connected_neighbor(cur, d).map(|nb| (d, nb)));
            let Some((next_dir, next)) = next else {
                let id = self.ensure_node(cur, NodeKind::End);
                return (pixels, id);
            };
            prev = cur;
            cur = next;
            dir = next_dir;
        }
    }

    fn linear(&self, global: Pixel) -> usize {
        let local = Pixel::new(global.x - self.origin.x, global.y - self.origin.y);
        local.y as usize * self.mask.width() + local.x as usize
    }
}
