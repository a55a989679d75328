use crate::islands::IslandId;
use crate::types::{Pixel, PixelBounds};
use serde::Serialize;
use std::collections::HashSet;

/// One shell of pixels, in the order growth discovered them.
///
/// The owning island is referenced by id only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelRing {
    island: IslandId,
    pixels: Vec<Pixel>,
}

impl PixelRing {
    /// Build a ring, dropping repeated pixels while keeping first occurrences.
    pub fn new(island: IslandId, pixels: impl IntoIterator<Item = Pixel>) -> Self {
        let mut seen = HashSet::new();
        let pixels = pixels.into_iter().filter(|p| seen.insert(*p)).collect();
        Self { island, pixels }
    }

    pub(crate) fn from_unique(island: IslandId, pixels: Vec<Pixel>) -> Self {
        Self { island, pixels }
    }

    pub fn empty(island: IslandId) -> Self {
        Self {
            island,
            pixels: Vec::new(),
        }
    }

    pub fn island(&self) -> IslandId {
        self.island
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn contains(&self, p: Pixel) -> bool {
        self.pixels.contains(&p)
    }

    pub fn to_set(&self) -> HashSet<Pixel> {
        self.pixels.iter().copied().collect()
    }

    pub fn bounds(&self) -> Option<PixelBounds> {
        PixelBounds::of(self.pixels.iter().copied())
    }
}

/// Rings of one island in growth order, seed first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelRingList {
    island: IslandId,
    rings: Vec<PixelRing>,
}

impl PixelRingList {
    pub(crate) fn new(island: IslandId, rings: Vec<PixelRing>) -> Self {
        Self { island, rings }
    }

    pub fn island(&self) -> IslandId {
        self.island
    }

    pub fn rings(&self) -> &[PixelRing] {
        &self.rings
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PixelRing> {
        self.rings.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PixelRing> {
        self.rings.iter()
    }

    /// Ring sizes in order, for reports.
    pub fn sizes(&self) -> Vec<usize> {
        self.rings.iter().map(PixelRing::len).collect()
    }

    pub fn total_pixels(&self) -> usize {
        self.rings.iter().map(PixelRing::len).sum()
    }
}

impl<'a> IntoIterator for &'a PixelRingList {
    type Item = &'a PixelRing;
    type IntoIter = std::slice::Iter<'a, PixelRing>;

    fn into_iter(self) -> Self::IntoIter {
        self.rings.iter()
    }
}
