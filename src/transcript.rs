//! Loading and parsing of timestamped transcript inputs.
//!
//! Two producer formats are supported: a JSON chunk document
//! (`{"chunks": [{"text": …, "timestamp": [start, end]}, …]}`) and raw
//! transcript text with one `[MM:SS.sss --> MM:SS.sss] sentence` line per
//! unit. Both yield [`Chunk`] lists aligned 1:1 with the sentences handed to
//! the labeler.

use std::path::Path;

use serde::Deserialize;

use crate::error::SegmentationError;
use crate::types::Chunk;

#[derive(Debug, Deserialize)]
struct ChunkDocument {
    chunks: Vec<Chunk>,
}

/// Read a chunk document from disk.
pub fn load_chunks(path: &Path) -> Result<Vec<Chunk>, SegmentationError> {
    let data =
        std::fs::read_to_string(path).map_err(|e| SegmentationError::io("read chunk file", e))?;
    let doc: ChunkDocument =
        serde_json::from_str(&data).map_err(|e| SegmentationError::json("parse chunk file", e))?;
    Ok(doc.chunks)
}

/// Parse raw transcript text into chunks.
///
/// Accepts either real newlines or literal `\n` escapes (some producers ship
/// the whole transcript as a single escaped line). Lines that do not carry a
/// `[MM:SS.sss --> MM:SS.sss]` stamp, and stamped lines with empty text, are
/// skipped rather than rejected.
pub fn parse_transcript(text: &str) -> Vec<Chunk> {
    let unescaped;
    let text = if text.contains("\\n") {
        unescaped = text.replace("\\n", "\n");
        unescaped.as_str()
    } else {
        text
    };

    let mut chunks = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((start_sec, end_sec, body)) = parse_timestamp_line(line) else {
            tracing::warn!(line, "transcript: skipping line without a timestamp stamp");
            continue;
        };
        if body.is_empty() {
            continue;
        }
        chunks.push(Chunk {
            text: body.to_string(),
            timestamp: Some((start_sec, end_sec)),
            endtime: None,
            end_time: None,
        });
    }
    chunks
}

fn parse_timestamp_line(line: &str) -> Option<(f64, f64, &str)> {
    let rest = line.strip_prefix('[')?;
    let (stamp, body) = rest.split_once(']')?;
    let (start_raw, end_raw) = stamp.split_once("-->")?;
    let start_sec = parse_minute_stamp(start_raw.trim())?;
    let end_sec = parse_minute_stamp(end_raw.trim())?;
    Some((start_sec, end_sec, body.trim()))
}

/// `MM:SS.sss` to seconds.
fn parse_minute_stamp(raw: &str) -> Option<f64> {
    let (minutes, seconds) = raw.split_once(':')?;
    let minutes: f64 = minutes.parse().ok()?;
    let seconds: f64 = seconds.parse().ok()?;
    if minutes < 0.0 || seconds < 0.0 {
        return None;
    }
    Some(minutes * 60.0 + seconds)
}
