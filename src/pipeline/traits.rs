use crate::error::SegmentationError;
use crate::types::FusedBoundaries;

/// External topic-labeling oracle: one integer label per sentence, with a
/// reserved noise id for untrustworthy classifications.
///
/// Implementations are typically stochastic — repeated calls over the same
/// sentences may return different label sequences — which is exactly the
/// variance the consensus fusion absorbs. Errors propagate unchanged; the
/// pipeline never retries.
pub trait SentenceLabeler: Send + Sync {
    fn label_sentences(&self, sentences: &[String]) -> Result<Vec<i64>, SegmentationError>;
}

/// Turns one run's label sequence into a boundary vector of the same length.
pub trait BoundaryDetector: Send + Sync {
    fn detect(&self, labels: &[i64]) -> Vec<u8>;
}

/// Fuses per-run boundary vectors into a consensus vector and probability
/// profile.
pub trait BoundaryFuser: Send + Sync {
    fn fuse(&self, runs: &[Vec<u8>]) -> Result<FusedBoundaries, SegmentationError>;
}
