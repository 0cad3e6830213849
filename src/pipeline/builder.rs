use crate::config::SegmenterConfig;
use crate::error::SegmentationError;
use crate::pipeline::defaults::{DpBoundaryDetector, PolicyBoundaryFuser};
use crate::pipeline::runtime::{TopicSegmenter, TopicSegmenterParts};
use crate::pipeline::traits::{BoundaryDetector, BoundaryFuser, SentenceLabeler};

pub struct TopicSegmenterBuilder {
    config: SegmenterConfig,
    labeler: Option<Box<dyn SentenceLabeler>>,
    boundary_detector: Option<Box<dyn BoundaryDetector>>,
    boundary_fuser: Option<Box<dyn BoundaryFuser>>,
}

impl TopicSegmenterBuilder {
    pub fn new(config: SegmenterConfig) -> Self {
        Self {
            config,
            labeler: None,
            boundary_detector: None,
            boundary_fuser: None,
        }
    }

    /// The external labeling oracle. Mandatory: the pipeline has no built-in
    /// way to produce topic labels.
    pub fn with_labeler(mut self, labeler: Box<dyn SentenceLabeler>) -> Self {
        self.labeler = Some(labeler);
        self
    }

    pub fn with_boundary_detector(mut self, boundary_detector: Box<dyn BoundaryDetector>) -> Self {
        self.boundary_detector = Some(boundary_detector);
        self
    }

    pub fn with_boundary_fuser(mut self, boundary_fuser: Box<dyn BoundaryFuser>) -> Self {
        self.boundary_fuser = Some(boundary_fuser);
        self
    }

    pub fn build(self) -> Result<TopicSegmenter, SegmentationError> {
        if self.config.num_runs == 0 {
            return Err(SegmentationError::invalid_input(
                "num_runs must be at least 1",
            ));
        }
        if !self.config.lam.is_finite() || self.config.lam < 0.0 {
            return Err(SegmentationError::invalid_input(format!(
                "lam must be a finite non-negative number, got {}",
                self.config.lam
            )));
        }
        let labeler = self.labeler.ok_or_else(|| {
            SegmentationError::invalid_input("a sentence labeler is required to build the pipeline")
        })?;

        let boundary_detector = self.boundary_detector.unwrap_or_else(|| {
            Box::new(DpBoundaryDetector::new(
                self.config.lam,
                self.config.noise_id,
            ))
        });
        let boundary_fuser = self.boundary_fuser.unwrap_or_else(|| {
            Box::new(PolicyBoundaryFuser::new(
                self.config.min_sep,
                self.config.policy,
            ))
        });

        Ok(TopicSegmenter::from_parts(TopicSegmenterParts {
            labeler,
            boundary_detector,
            boundary_fuser,
            num_runs: self.config.num_runs,
        }))
    }
}
