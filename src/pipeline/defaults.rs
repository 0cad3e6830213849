use crate::error::SegmentationError;
use crate::pipeline::traits::{BoundaryDetector, BoundaryFuser};
use crate::segmentation::consensus::{fuse_consensus, FusionPolicy};
use crate::segmentation::dp::segment_dp;
use crate::types::FusedBoundaries;

pub struct DpBoundaryDetector {
    lam: f32,
    noise_id: i64,
}

impl DpBoundaryDetector {
    pub fn new(lam: f32, noise_id: i64) -> Self {
        Self { lam, noise_id }
    }
}

impl BoundaryDetector for DpBoundaryDetector {
    fn detect(&self, labels: &[i64]) -> Vec<u8> {
        segment_dp(labels, self.lam, self.noise_id)
    }
}

pub struct PolicyBoundaryFuser {
    min_sep: usize,
    policy: FusionPolicy,
}

impl PolicyBoundaryFuser {
    pub fn new(min_sep: usize, policy: FusionPolicy) -> Self {
        Self { min_sep, policy }
    }
}

impl BoundaryFuser for PolicyBoundaryFuser {
    fn fuse(&self, runs: &[Vec<u8>]) -> Result<FusedBoundaries, SegmentationError> {
        fuse_consensus(runs, self.min_sep, self.policy)
    }
}
