use crate::grid::Connectivity;
use serde::{Deserialize, Serialize};

/// Options controlling connected-component labelling.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelOptions {
    /// Adjacency used to join foreground pixels into one island.
    pub connectivity: Connectivity,
    /// Islands with fewer pixels are discarded (1 keeps everything).
    pub min_island_size: usize,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Eight,
            min_island_size: 1,
        }
    }
}
