use std::path::Path;

use crate::error::SegmentationError;
use crate::segmentation::consensus::FusionPolicy;

/// Tunables for the consensus segmentation pipeline.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct SegmenterConfig {
    /// Per-segment cut penalty; larger values bias toward fewer, longer
    /// segments.
    #[serde(default = "default_lam")]
    pub lam: f32,
    /// Reserved label marking untrustworthy classifications.
    #[serde(default = "default_noise_id")]
    pub noise_id: i64,
    /// How many labeler runs to fuse.
    #[serde(default = "default_num_runs")]
    pub num_runs: usize,
    /// Minimum index distance between consensus boundaries (TopK and
    /// LocalMax policies).
    #[serde(default = "default_min_sep")]
    pub min_sep: usize,
    #[serde(default)]
    pub policy: FusionPolicy,
}

impl SegmenterConfig {
    pub const DEFAULT_LAM: f32 = 1.0;
    pub const DEFAULT_NOISE_ID: i64 = -1;
    pub const DEFAULT_NUM_RUNS: usize = 5;
    pub const DEFAULT_MIN_SEP: usize = 3;

    pub fn load(path: &Path) -> Result<Self, SegmentationError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| SegmentationError::io("read segmenter config", e))?;
        serde_json::from_str(&data).map_err(|e| SegmentationError::json("parse segmenter config", e))
    }
}

fn default_lam() -> f32 {
    SegmenterConfig::DEFAULT_LAM
}
fn default_noise_id() -> i64 {
    SegmenterConfig::DEFAULT_NOISE_ID
}
fn default_num_runs() -> usize {
    SegmenterConfig::DEFAULT_NUM_RUNS
}
fn default_min_sep() -> usize {
    SegmenterConfig::DEFAULT_MIN_SEP
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            lam: Self::DEFAULT_LAM,
            noise_id: Self::DEFAULT_NOISE_ID,
            num_runs: Self::DEFAULT_NUM_RUNS,
            min_sep: Self::DEFAULT_MIN_SEP,
            policy: FusionPolicy::default(),
        }
    }
}
