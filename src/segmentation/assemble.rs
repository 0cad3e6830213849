use crate::error::SegmentationError;
use crate::types::{Chunk, Segment};

/// Map consensus boundary positions back onto the aligned timestamped chunks.
///
/// Each boundary index opens a segment that runs until the next boundary (or
/// the end of the chunk list). Chunk texts inside a span are joined with
/// single spaces and trimmed. The `end_key` is taken from the span's last
/// chunk: `timestamp` end if present, else `endtime`, else `end_time`, else
/// the span's end index as a string — a fallback chain kept for
/// compatibility with heterogeneous chunk producers.
///
/// The output is an ordered list of records, one per boundary, in
/// chronological order. Keys are not deduplicated: two spans ending at the
/// same time both survive in the output.
pub fn assemble_segments(
    boundaries: &[u8],
    chunks: &[Chunk],
) -> Result<Vec<Segment>, SegmentationError> {
    if boundaries.len() != chunks.len() {
        return Err(SegmentationError::length_mismatch(
            "aligning chunks with boundary vector",
            boundaries.len(),
            chunks.len(),
        ));
    }

    let n = chunks.len();
    let starts: Vec<usize> = boundaries
        .iter()
        .enumerate()
        .filter_map(|(i, &b)| (b != 0).then_some(i))
        .collect();

    let mut segments = Vec::with_capacity(starts.len());
    for (s, &start) in starts.iter().enumerate() {
        let end = starts.get(s + 1).copied().unwrap_or(n);
        let span = &chunks[start..end];

        let text = span
            .iter()
            .map(|chunk| chunk.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        let last = &span[span.len() - 1];
        tracing::debug!(start, end, end_key = %end_key_for(last, end), "assemble: segment span");
        segments.push(Segment {
            end_key: end_key_for(last, end),
            text,
            start_time: span[0].timestamp.map(|(start_sec, _)| start_sec),
            end_time: last.timestamp.map(|(_, end_sec)| end_sec),
        });
    }
    Ok(segments)
}

fn end_key_for(chunk: &Chunk, end_index: usize) -> String {
    if let Some((_, end_sec)) = chunk.timestamp {
        return end_sec.to_string();
    }
    if let Some(key) = &chunk.endtime {
        return key.clone();
    }
    if let Some(key) = &chunk.end_time {
        return key.clone();
    }
    end_index.to_string()
}
