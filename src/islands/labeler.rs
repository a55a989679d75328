use super::island::{Island, IslandId};
use super::options::LabelOptions;
use crate::grid::PixelGrid;
use log::debug;
use std::collections::VecDeque;
use std::sync::Arc;

/// Breadth-first flood-fill labelling of foreground pixels.
#[derive(Clone, Debug, Default)]
pub struct ComponentLabeler {
    options: LabelOptions,
}

impl ComponentLabeler {
    pub fn new(options: LabelOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LabelOptions {
        &self.options
    }

    /// Split `grid` into islands.
    ///
    /// Islands come back ordered by the first pixel a row-major scan meets,
    /// and are numbered densely after the size filter is applied.
    pub fn label(&self, grid: &Arc<PixelGrid>) -> Vec<Island> {
        let width = grid.width();
        let n = width * grid.height();
        let dirs = self.options.connectivity.offsets().collect::<Vec<_>>();
        let min_size = self.options.min_island_size.max(1);

        let mut visited = vec![0u8; n];
        let mut queue = VecDeque::with_capacity(64);
        let mut islands = Vec::new();
        let mut dropped = 0usize;

        for seed in 0..n {
            if visited[seed] != 0 || grid.data()[seed] == 0 {
                continue;
            }
            visited[seed] = 1;
            queue.push_back(seed);
            let mut members = Vec::new();

            while let Some(idx) = queue.pop_front() {
                let p = grid.pixel_at(idx);
                members.push(p);
                for &(dx, dy) in &dirs {
                    let Some(nidx) = grid.index_of(p.offset(dx, dy)) else {
                        continue;
                    };
                    if visited[nidx] == 0 && grid.data()[nidx] != 0 {
                        visited[nidx] = 1;
                        queue.push_back(nidx);
                    }
                }
            }

            if members.len() < min_size {
                dropped += 1;
                continue;
            }
            members.sort_unstable();
            let id = IslandId(islands.len() as u32);
            islands.push(Island::from_sorted(id, members, Arc::clone(grid)));
        }

        debug!(
            "ComponentLabeler::label {}x{} connectivity={:?} islands={} dropped={}",
            width,
            grid.height(),
            self.options.connectivity,
            islands.len(),
            dropped
        );
        islands
    }
}

/// Convenience wrapper around [`ComponentLabeler`] with default size filtering.
pub fn label_islands(grid: &Arc<PixelGrid>, connectivity: crate::grid::Connectivity) -> Vec<Island> {
    ComponentLabeler::new(LabelOptions {
        connectivity,
        ..Default::default()
    })
    .label(grid)
}
