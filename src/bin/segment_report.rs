use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use chrono::Utc;
use clap::Parser;
use dynaseg::{
    load_chunks, parse_transcript, Chunk, FusionPolicy, Segment, SegmentationError,
    SegmenterConfig, SentenceLabeler, TopicSegmenterBuilder,
};
use serde::Serialize;

const SCHEMA_VERSION: u32 = 1;

/// Offline consensus segmentation report: replays captured labeler runs over
/// a chunked transcript and writes the fused segments as JSON.
#[derive(Debug, Parser)]
#[command(name = "segment_report")]
struct Args {
    /// Chunk document (`{"chunks": [...]}`) to segment.
    #[arg(long, conflicts_with = "transcript")]
    chunks: Option<PathBuf>,

    /// Raw transcript with `[MM:SS.sss --> MM:SS.sss]` stamped lines.
    #[arg(long)]
    transcript: Option<PathBuf>,

    /// JSON array of label runs, one inner array per labeler invocation.
    #[arg(long)]
    runs: PathBuf,

    /// Cut penalty; higher values produce fewer, longer segments.
    #[arg(long, default_value_t = 3.0)]
    lam: f32,

    /// Reserved noise label in the runs.
    #[arg(long, default_value_t = -1)]
    noise_id: i64,

    /// Minimum index distance between consensus boundaries.
    #[arg(long, default_value_t = 3)]
    min_sep: usize,

    /// Fusion policy: topk, threshold, or localmax.
    #[arg(long, default_value = "topk")]
    policy: String,

    /// Report destination; stdout when omitted.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SegmentReport {
    schema_version: u32,
    meta: ReportMeta,
    segments: Vec<Segment>,
    segment_count: usize,
    profile: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct ReportMeta {
    generated_at: String,
    lam: f32,
    policy: String,
    run_count: usize,
    min_sep: usize,
    chunk_count: usize,
}

/// Feeds captured label sequences back through the pipeline, one per run.
struct ReplayLabeler {
    runs: Mutex<VecDeque<Vec<i64>>>,
}

impl ReplayLabeler {
    fn new(runs: Vec<Vec<i64>>) -> Self {
        Self {
            runs: Mutex::new(runs.into()),
        }
    }
}

impl SentenceLabeler for ReplayLabeler {
    fn label_sentences(&self, _sentences: &[String]) -> Result<Vec<i64>, SegmentationError> {
        let mut runs = self.runs.lock().unwrap_or_else(|e| e.into_inner());
        runs.pop_front().ok_or_else(|| SegmentationError::Labeler {
            context: "replaying captured runs",
            message: "more runs requested than captured".to_string(),
        })
    }
}

fn main() {
    if let Err(err) = run(Args::parse()) {
        eprintln!("segment_report: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    let chunks = load_input_chunks(&args)?;
    let label_runs = load_label_runs(&args.runs)?;
    if label_runs.is_empty() {
        return Err(format!("no label runs found in '{}'", args.runs.display()));
    }
    let policy = FusionPolicy::from_str(&args.policy).map_err(|err| err.to_string())?;

    let config = SegmenterConfig {
        lam: args.lam,
        noise_id: args.noise_id,
        num_runs: label_runs.len(),
        min_sep: args.min_sep,
        policy,
    };
    let run_count = label_runs.len();
    let segmenter = TopicSegmenterBuilder::new(config)
        .with_labeler(Box::new(ReplayLabeler::new(label_runs)))
        .build()
        .map_err(|err| err.to_string())?;

    let output = segmenter.segment(&chunks).map_err(|err| err.to_string())?;

    let report = SegmentReport {
        schema_version: SCHEMA_VERSION,
        meta: ReportMeta {
            generated_at: Utc::now().to_rfc3339(),
            lam: args.lam,
            policy: policy.as_str().to_string(),
            run_count,
            min_sep: args.min_sep,
            chunk_count: chunks.len(),
        },
        segment_count: output.segments.len(),
        segments: output.segments,
        profile: output.profile,
    };

    match &args.output {
        Some(path) => write_report(path, &report),
        None => print_report(&report),
    }
}

fn load_input_chunks(args: &Args) -> Result<Vec<Chunk>, String> {
    match (&args.chunks, &args.transcript) {
        (Some(path), _) => load_chunks(path).map_err(|err| err.to_string()),
        (None, Some(path)) => {
            let text = fs::read_to_string(path).map_err(|err| {
                format!("failed to read transcript '{}': {err}", path.display())
            })?;
            Ok(parse_transcript(&text))
        }
        (None, None) => Err("either --chunks or --transcript is required".to_string()),
    }
}

fn load_label_runs(path: &Path) -> Result<Vec<Vec<i64>>, String> {
    let data = fs::read_to_string(path)
        .map_err(|err| format!("failed to read label runs '{}': {err}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|err| format!("failed to parse label runs '{}': {err}", path.display()))
}

fn write_report(path: &Path, report: &SegmentReport) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "failed to create report output directory '{}': {err}",
                parent.display()
            )
        })?;
    }
    let mut file = File::create(path)
        .map_err(|err| format!("failed to create report file '{}': {err}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, report)
        .map_err(|err| format!("failed to serialize report JSON '{}': {err}", path.display()))?;
    file.write_all(b"\n")
        .map_err(|err| format!("failed to finalize report file '{}': {err}", path.display()))?;
    Ok(())
}

fn print_report(report: &SegmentReport) -> Result<(), String> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|err| format!("failed to serialize report JSON: {err}"))?;
    println!("{json}");
    Ok(())
}
