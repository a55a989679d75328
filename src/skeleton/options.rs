use serde::{Deserialize, Serialize};

/// Available thinning algorithms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThinningAlgorithm {
    /// Two-subiteration parallel thinning (Zhang & Suen, 1984).
    #[default]
    ZhangSuen,
    /// Raster thinning that peels one layer per pass, with crossing-number
    /// guards (Hilditch, 1969).
    Hilditch,
}

/// Parameters for [`Skeletonizer`](super::Skeletonizer).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThinningOptions {
    pub algorithm: ThinningAlgorithm,
    /// Upper bound on full passes before giving up with
    /// [`Error::NotConverged`](crate::error::Error::NotConverged).
    pub max_iterations: usize,
}

impl Default for ThinningOptions {
    fn default() -> Self {
        Self {
            algorithm: ThinningAlgorithm::ZhangSuen,
            max_iterations: 1000,
        }
    }
}
