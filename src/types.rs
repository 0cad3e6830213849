use serde::{Deserialize, Serialize};

/// One timestamped transcript unit, aligned 1:1 with the sentences handed to
/// the labeler: chunk `i` carries the text of sentence `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    /// `[start_sec, end_sec]` interval as emitted by the transcription step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<(f64, f64)>,
    /// Legacy end-time fields kept for heterogeneous chunk producers; only
    /// consulted when `timestamp` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl Chunk {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: None,
            endtime: None,
            end_time: None,
        }
    }
}

/// One contiguous run of chunks sharing a consensus topic.
///
/// Output order is chronological; `end_key` is not guaranteed unique, so
/// consumers must treat the segment list as ordered records rather than a
/// map keyed by end time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub end_key: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,
}

/// Result of fusing one boundary vector per labeling run.
#[derive(Debug, Clone, PartialEq)]
pub struct FusedBoundaries {
    /// Binary consensus vector; entry 1 marks "a segment starts here".
    /// Index 0 is always 1 for non-empty input.
    pub consensus: Vec<u8>,
    /// Per-index fraction of runs that marked a boundary, in [0, 1].
    pub profile: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationOutput {
    pub segments: Vec<Segment>,
    pub profile: Vec<f32>,
    /// Number of labeler runs fused into the consensus.
    pub run_count: usize,
}

impl SegmentationOutput {
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}
