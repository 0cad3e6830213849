use crate::error::SegmentationError;
use crate::pipeline::traits::{BoundaryDetector, BoundaryFuser, SentenceLabeler};
use crate::segmentation::assemble::assemble_segments;
use crate::types::{Chunk, SegmentationOutput};

/// Runs the full consensus pipeline: label the sentences R times, segment
/// each run with the DP, fuse the boundary runs, and assemble timestamped
/// segments.
///
/// Purely computational and single-threaded per request; every run allocates
/// its own working state, and nothing persists across calls.
pub struct TopicSegmenter {
    labeler: Box<dyn SentenceLabeler>,
    boundary_detector: Box<dyn BoundaryDetector>,
    boundary_fuser: Box<dyn BoundaryFuser>,
    num_runs: usize,
}

pub(crate) struct TopicSegmenterParts {
    pub labeler: Box<dyn SentenceLabeler>,
    pub boundary_detector: Box<dyn BoundaryDetector>,
    pub boundary_fuser: Box<dyn BoundaryFuser>,
    pub num_runs: usize,
}

impl TopicSegmenter {
    pub(crate) fn from_parts(parts: TopicSegmenterParts) -> Self {
        Self {
            labeler: parts.labeler,
            boundary_detector: parts.boundary_detector,
            boundary_fuser: parts.boundary_fuser,
            num_runs: parts.num_runs,
        }
    }

    pub fn segment(&self, chunks: &[Chunk]) -> Result<SegmentationOutput, SegmentationError> {
        if chunks.is_empty() {
            return Ok(SegmentationOutput {
                segments: Vec::new(),
                profile: Vec::new(),
                run_count: 0,
            });
        }

        let sentences: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();

        let mut runs = Vec::with_capacity(self.num_runs);
        for run_idx in 0..self.num_runs {
            let labels = self.labeler.label_sentences(&sentences)?;
            if labels.len() != sentences.len() {
                return Err(SegmentationError::length_mismatch(
                    "labeling sentences",
                    sentences.len(),
                    labels.len(),
                ));
            }
            let boundaries = self.boundary_detector.detect(&labels);
            tracing::debug!(
                run_idx,
                cut_count = boundaries.iter().filter(|&&b| b != 0).count(),
                "segmenter: per-run boundaries"
            );
            runs.push(boundaries);
        }

        let fused = self.boundary_fuser.fuse(&runs)?;
        let segments = assemble_segments(&fused.consensus, chunks)?;
        tracing::debug!(
            segment_count = segments.len(),
            run_count = self.num_runs,
            "segmenter: assembled consensus segments"
        );

        Ok(SegmentationOutput {
            segments,
            profile: fused.profile,
            run_count: self.num_runs,
        })
    }
}
