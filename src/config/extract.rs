use crate::analysis::AnalysisParams;
use crate::grid::Polarity;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// How a grayscale input becomes a binary mask.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThresholdConfig {
    pub threshold: u8,
    pub polarity: Polarity,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            threshold: 128,
            polarity: Polarity::DarkForeground,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractOutputConfig {
    pub json_out: PathBuf,
    /// Binary mask as seen after thresholding.
    #[serde(default)]
    pub mask_png: Option<PathBuf>,
    /// All island skeletons painted into one image.
    #[serde(default)]
    pub skeleton_png: Option<PathBuf>,
}

/// Configuration for the `extract_graph` tool.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub threshold: ThresholdConfig,
    #[serde(default)]
    pub params: AnalysisParams,
    pub output: ExtractOutputConfig,
}

pub fn load_config(path: &Path) -> Result<ExtractConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(json: &str) -> Result<ExtractConfig, serde_json::Error> {
    serde_json::from_str(json)
}
