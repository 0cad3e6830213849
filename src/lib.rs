pub mod config;
pub mod error;
pub mod pipeline;
pub mod segmentation;
pub mod transcript;
pub mod types;

pub use config::SegmenterConfig;
pub use error::SegmentationError;
pub use pipeline::builder::TopicSegmenterBuilder;
pub use pipeline::defaults::{DpBoundaryDetector, PolicyBoundaryFuser};
pub use pipeline::runtime::TopicSegmenter;
pub use pipeline::traits::{BoundaryDetector, BoundaryFuser, SentenceLabeler};
pub use segmentation::assemble::assemble_segments;
pub use segmentation::consensus::{fuse_consensus, FusionPolicy};
pub use segmentation::dp::segment_dp;
pub use segmentation::normalize::normalize_labels;
pub use segmentation::prefix::PrefixTable;
pub use transcript::{load_chunks, parse_transcript};
pub use types::{Chunk, FusedBoundaries, Segment, SegmentationOutput};
