use serde::{Deserialize, Serialize};

/// Neighbourhood used for adjacency queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// Axis-aligned neighbours only.
    Four,
    /// Axis-aligned and diagonal neighbours.
    #[default]
    Eight,
}

/// Neighbour offsets in row-major order, which doubles as the deterministic
/// tie-break order for every walk in the crate.
pub const NEIGH_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const DIRS_C4: [u8; 4] = [1, 3, 4, 6];
const DIRS_C8: [u8; 8] = [0, 1, 2, 3, 4, 5, 6, 7];

impl Connectivity {
    /// Direction indices into [`NEIGH_OFFSETS`] admitted by this mode.
    #[inline]
    pub fn dirs(self) -> &'static [u8] {
        match self {
            Connectivity::Four => &DIRS_C4,
            Connectivity::Eight => &DIRS_C8,
        }
    }

    pub fn offsets(self) -> impl Iterator<Item = (i32, i32)> {
        self.dirs().iter().map(|&d| NEIGH_OFFSETS[d as usize])
    }
}

#[inline]
pub fn opposite_dir(dir: u8) -> u8 {
    7 - dir
}

#[inline]
pub fn is_diagonal_dir(dir: u8) -> bool {
    let (dx, dy) = NEIGH_OFFSETS[dir as usize];
    dx != 0 && dy != 0
}
