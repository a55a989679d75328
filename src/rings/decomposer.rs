use super::ring::{PixelRing, PixelRingList};
use crate::error::{Error, Result};
use crate::grid::Connectivity;
use crate::islands::Island;
use crate::types::Pixel;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Parameters for [`RingDecomposer`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RingOptions {
    /// Adjacency between a shell and the next one.
    pub connectivity: Connectivity,
    /// Stop after this many rings (seed included). `None` runs to the end.
    pub max_rings: Option<usize>,
    /// Resume at the nearest unclassified component when growth stalls
    /// before the region is covered.
    pub bridge_gaps: bool,
}

impl Default for RingOptions {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Eight,
            max_rings: None,
            bridge_gaps: true,
        }
    }
}

/// Where decomposition starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RingSeed {
    /// A single pixel, grown outwards.
    Pixel(Pixel),
    /// An explicit first ring.
    Ring(Vec<Pixel>),
    /// The island's outline, peeled inwards.
    Outline,
}

#[derive(Clone, Debug, Default)]
pub struct RingDecomposer {
    options: RingOptions,
}

impl RingDecomposer {
    pub fn new(options: RingOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RingOptions {
        &self.options
    }

    /// Island pixels adjacent to `seed` that are neither in `seed` nor in
    /// `inner`. An empty result marks the end of growth.
    pub fn grow_ring(&self, island: &Island, seed: &PixelRing, inner: Option<&PixelRing>) -> PixelRing {
        let mut excluded = seed.to_set();
        if let Some(inner) = inner {
            excluded.extend(inner.pixels().iter().copied());
        }
        PixelRing::from_unique(island.id(), self.shell_around(island, seed.pixels(), &excluded))
    }

    /// Grow rings from `seed` until the island is exhausted.
    ///
    /// Every pixel lands in at most one ring. On a region whose pixels are
    /// all connected to the seed, every pixel lands in exactly one.
    pub fn decompose(&self, island: &Island, seed: &RingSeed) -> Result<PixelRingList> {
        let first = self.seed_ring(island, seed)?;
        let mut classified: HashSet<Pixel> = first.to_set();
        let mut rings = vec![first];
        let limit = self.options.max_rings.unwrap_or(usize::MAX);

        while rings.len() < limit && classified.len() < island.len() {
            let current = rings.last().map(PixelRing::pixels).unwrap_or_default();
            let mut next = self.shell_around(island, current, &classified);
            if next.is_empty() {
                if !self.options.bridge_gaps {
                    break;
                }
                next = resume_ring(island, current, &classified, self.options.connectivity);
                trace!(
                    "RingDecomposer::decompose island={} resumed with {} pixels",
                    island.id().0,
                    next.len()
                );
                if next.is_empty() {
                    break;
                }
            }
            classified.extend(next.iter().copied());
            rings.push(PixelRing::from_unique(island.id(), next));
        }

        debug!(
            "RingDecomposer::decompose island={} rings={} classified={}/{}",
            island.id().0,
            rings.len(),
            classified.len(),
            island.len()
        );
        Ok(PixelRingList::new(island.id(), rings))
    }

    /// Outline-seeded decomposition of every island in a list.
    pub fn decompose_all(&self, islands: &[Island]) -> Result<Vec<PixelRingList>> {
        islands
            .iter()
            .map(|island| self.decompose(island, &RingSeed::Outline))
            .collect()
    }

    fn seed_ring(&self, island: &Island, seed: &RingSeed) -> Result<PixelRing> {
        let pixels = match seed {
            RingSeed::Pixel(p) => vec![*p],
            RingSeed::Ring(pixels) => pixels.clone(),
            RingSeed::Outline => island.outline(),
        };
        if pixels.is_empty() {
            return Err(Error::InvalidInput("ring seed is empty".into()));
        }
        if let Some(p) = pixels.iter().find(|&&p| !island.contains(p)) {
            return Err(Error::InvalidInput(format!(
                "seed pixel ({}, {}) is not part of island {}",
                p.x,
                p.y,
                island.id().0
            )));
        }
        Ok(PixelRing::new(island.id(), pixels))
    }

    /// Island neighbours of `ring` outside `excluded`, in discovery order.
    fn shell_around(&self, island: &Island, ring: &[Pixel], excluded: &HashSet<Pixel>) -> Vec<Pixel> {
        let mut added = HashSet::new();
        let mut shell = Vec::new();
        for &p in ring {
            for q in island.neighbors(p, self.options.connectivity) {
                if !excluded.contains(&q) && added.insert(q) {
                    shell.push(q);
                }
            }
        }
        shell
    }
}

/// Border of the unclassified component closest to `last`: its pixels with
/// a neighbour outside the component. Components and borders both follow
/// `connectivity`, like shell growth.
fn resume_ring(
    island: &Island,
    last: &[Pixel],
    classified: &HashSet<Pixel>,
    connectivity: Connectivity,
) -> Vec<Pixel> {
    let remaining = island.pixels().iter().filter(|p| !classified.contains(p));
    let nearest = remaining.min_by_key(|&&p| {
        last.iter()
            .map(|&q| p.distance_sq(q))
            .min()
            .unwrap_or(i64::MAX)
    });
    let Some(&start) = nearest else {
        return Vec::new();
    };

    let mut component = HashSet::from([start]);
    let mut order = vec![start];
    let mut queue = VecDeque::from([start]);
    while let Some(p) = queue.pop_front() {
        for q in island.neighbors(p, connectivity) {
            if !classified.contains(&q) && component.insert(q) {
                order.push(q);
                queue.push_back(q);
            }
        }
    }
    order.sort_unstable();
    order
        .into_iter()
        .filter(|&p| {
            connectivity
                .offsets()
                .any(|(dx, dy)| !component.contains(&p.offset(dx, dy)))
        })
        .collect()
}
