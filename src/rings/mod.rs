//! Onion-like shell decomposition of islands.
//!
//! Starting from a seed (one pixel, an explicit ring, or the island outline)
//! each new ring is every island pixel touching the previous ring that has
//! not been classified yet. Only island membership matters, so annular
//! shapes decompose into their concentric shells without any assumption
//! about what lies between them.

mod decomposer;
mod ring;

pub use decomposer::{RingDecomposer, RingOptions, RingSeed};
pub use ring::{PixelRing, PixelRingList};

#[cfg(test)]
mod tests;
