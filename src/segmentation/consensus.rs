use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SegmentationError;
use crate::types::FusedBoundaries;

/// Minimum profile value for a local maximum to count as a boundary.
const LOCAL_MAX_MIN_PROB: f32 = 0.2;
/// Majority-vote cutoff for the threshold policy.
const THRESHOLD_MIN_PROB: f32 = 0.5;

/// Policy for collapsing a probability profile into one boundary vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FusionPolicy {
    /// Keep the K most probable positions (K = median per-run cut count),
    /// greedily enforcing `min_sep` spacing.
    #[default]
    TopK,
    /// Keep every position with probability >= 0.5; ignores `min_sep`.
    Threshold,
    /// Keep interior local maxima with probability >= 0.2, suppressing any
    /// maximum within `min_sep` of an earlier acceptance.
    LocalMax,
}

impl FusionPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopK => "topk",
            Self::Threshold => "threshold",
            Self::LocalMax => "localmax",
        }
    }
}

impl FromStr for FusionPolicy {
    type Err = SegmentationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "topk" | "top-k" => Ok(Self::TopK),
            "threshold" => Ok(Self::Threshold),
            "localmax" | "local-max" => Ok(Self::LocalMax),
            _ => Err(SegmentationError::invalid_policy(s)),
        }
    }
}

/// Fuse R independently produced boundary vectors into one consensus vector
/// plus the per-index probability profile they imply.
///
/// Position 0 is forced to 1 after policy selection: every document starts a
/// segment at its first unit. An empty run set, or runs over an empty
/// sequence, fuse to empty outputs without error.
pub fn fuse_consensus(
    runs: &[Vec<u8>],
    min_sep: usize,
    policy: FusionPolicy,
) -> Result<FusedBoundaries, SegmentationError> {
    let n = match runs.first() {
        Some(first) => first.len(),
        None => 0,
    };
    for run in runs.iter().skip(1) {
        if run.len() != n {
            return Err(SegmentationError::length_mismatch(
                "fusing boundary runs",
                n,
                run.len(),
            ));
        }
    }
    if n == 0 {
        return Ok(FusedBoundaries {
            consensus: Vec::new(),
            profile: Vec::new(),
        });
    }

    let run_count = runs.len() as f32;
    let mut profile = vec![0f32; n];
    for run in runs {
        for (k, &bit) in run.iter().enumerate() {
            if bit != 0 {
                profile[k] += 1.0;
            }
        }
    }
    for p in &mut profile {
        *p /= run_count;
    }

    let mut consensus = vec![0u8; n];
    match policy {
        FusionPolicy::TopK => select_top_k(&mut consensus, &profile, runs, min_sep),
        FusionPolicy::Threshold => {
            for (k, &p) in profile.iter().enumerate() {
                if p >= THRESHOLD_MIN_PROB {
                    consensus[k] = 1;
                }
            }
        }
        FusionPolicy::LocalMax => select_local_maxima(&mut consensus, &profile, min_sep),
    }
    consensus[0] = 1;

    tracing::debug!(
        policy = policy.as_str(),
        run_count = runs.len(),
        min_sep,
        boundary_count = consensus.iter().filter(|&&b| b != 0).count(),
        "consensus: fused boundary runs"
    );
    Ok(FusedBoundaries { consensus, profile })
}

/// Median per-run cut count, truncated to an integer. For an even run count
/// this truncates the midpoint average, matching integer division.
fn median_cut_count(runs: &[Vec<u8>]) -> usize {
    let mut sums: Vec<usize> = runs
        .iter()
        .map(|run| run.iter().filter(|&&b| b != 0).count())
        .collect();
    sums.sort_unstable();
    let mid = sums.len() / 2;
    if sums.len() % 2 == 1 {
        sums[mid]
    } else {
        (sums[mid - 1] + sums[mid]) / 2
    }
}

fn select_top_k(consensus: &mut [u8], profile: &[f32], runs: &[Vec<u8>], min_sep: usize) {
    let k_target = median_cut_count(runs);

    // Probability-descending rank; equal probabilities keep the earlier
    // position first.
    let mut order: Vec<usize> = (0..profile.len()).collect();
    order.sort_by(|&a, &b| profile[b].total_cmp(&profile[a]).then(a.cmp(&b)));

    let mut chosen: Vec<usize> = Vec::with_capacity(k_target);
    for idx in order {
        if chosen.len() == k_target {
            break;
        }
        if chosen.iter().all(|&c| idx.abs_diff(c) >= min_sep) {
            chosen.push(idx);
        }
    }
    for idx in chosen {
        consensus[idx] = 1;
    }
}

fn select_local_maxima(consensus: &mut [u8], profile: &[f32], min_sep: usize) {
    let n = profile.len();
    for k in 1..n.saturating_sub(1) {
        if profile[k] > profile[k - 1]
            && profile[k] >= profile[k + 1]
            && profile[k] >= LOCAL_MAX_MIN_PROB
        {
            let window_start = k.saturating_sub(min_sep);
            if consensus[window_start..k].iter().all(|&b| b == 0) {
                consensus[k] = 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(bits: &[u8]) -> Vec<u8> {
        bits.to_vec()
    }

    #[test]
    fn policy_parses_from_original_and_hyphenated_names() {
        assert_eq!("topk".parse::<FusionPolicy>().unwrap(), FusionPolicy::TopK);
        assert_eq!(
            "Top-K".parse::<FusionPolicy>().unwrap(),
            FusionPolicy::TopK
        );
        assert_eq!(
            "threshold".parse::<FusionPolicy>().unwrap(),
            FusionPolicy::Threshold
        );
        assert_eq!(
            "localmax".parse::<FusionPolicy>().unwrap(),
            FusionPolicy::LocalMax
        );
    }

    #[test]
    fn unknown_policy_name_is_rejected() {
        let err = "votes".parse::<FusionPolicy>().unwrap_err();
        assert!(matches!(
            err,
            SegmentationError::InvalidPolicy { name } if name == "votes"
        ));
    }

    #[test]
    fn threshold_majority_vote_example() {
        let runs = vec![run(&[1, 0, 0, 1]), run(&[1, 0, 1, 0]), run(&[1, 1, 0, 0])];
        let fused = fuse_consensus(&runs, 3, FusionPolicy::Threshold).unwrap();
        assert_eq!(fused.consensus, vec![1, 0, 0, 0]);
        assert!((fused.profile[0] - 1.0).abs() < 1e-6);
        for &p in &fused.profile[1..] {
            assert!((p - 1.0 / 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn threshold_single_run_reproduces_the_run() {
        let only = run(&[1, 0, 0, 1, 0, 1]);
        let fused = fuse_consensus(&[only.clone()], 3, FusionPolicy::Threshold).unwrap();
        assert_eq!(fused.consensus, only);
    }

    #[test]
    fn top_k_respects_min_sep_between_selected_positions() {
        let runs = vec![
            run(&[1, 0, 1, 1, 0, 0, 1, 0]),
            run(&[1, 0, 1, 0, 1, 0, 1, 0]),
            run(&[1, 0, 0, 1, 0, 0, 1, 0]),
        ];
        let min_sep = 3;
        let fused = fuse_consensus(&runs, min_sep, FusionPolicy::TopK).unwrap();
        let picked: Vec<usize> = fused
            .consensus
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| (b != 0).then_some(i))
            .collect();
        // Index 0 is force-set after selection and exempt from spacing.
        for pair in picked.iter().filter(|&&i| i != 0).collect::<Vec<_>>().windows(2) {
            assert!(pair[1].abs_diff(*pair[0]) >= min_sep);
        }
        assert_eq!(fused.consensus[0], 1);
    }

    #[test]
    fn top_k_takes_median_cut_count() {
        // Per-run cut counts 2, 3, 3 -> median 3.
        let runs = vec![
            run(&[1, 0, 0, 0, 1, 0, 0, 0, 0]),
            run(&[1, 0, 0, 1, 0, 0, 1, 0, 0]),
            run(&[1, 0, 0, 1, 0, 0, 1, 0, 0]),
        ];
        let fused = fuse_consensus(&runs, 3, FusionPolicy::TopK).unwrap();
        assert_eq!(fused.consensus.iter().filter(|&&b| b != 0).count(), 3);
        assert_eq!(fused.consensus[0], 1);
        assert_eq!(fused.consensus[3], 1);
        assert_eq!(fused.consensus[6], 1);
    }

    #[test]
    fn top_k_breaks_probability_ties_toward_earlier_positions() {
        // Positions 1 and 5 tie at 1/2; with K = 2 and index 0 taking the
        // first slot, position 1 must win the remaining one.
        let runs = vec![run(&[1, 1, 0, 0, 0, 0]), run(&[1, 0, 0, 0, 0, 1])];
        let fused = fuse_consensus(&runs, 0, FusionPolicy::TopK).unwrap();
        assert_eq!(fused.consensus, vec![1, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn local_max_picks_spaced_interior_peaks() {
        let runs: Vec<Vec<u8>> = (0..5)
            .map(|r| {
                let mut v = vec![0u8; 12];
                v[0] = 1;
                v[4] = 1;
                if r < 2 {
                    v[5] = 1;
                } else {
                    v[9] = 1;
                }
                v
            })
            .collect();
        // Profile: p[4] = 1.0, p[5] = 0.4, p[9] = 0.6; 5 is suppressed by 4.
        let fused = fuse_consensus(&runs, 3, FusionPolicy::LocalMax).unwrap();
        assert_eq!(fused.consensus[4], 1);
        assert_eq!(fused.consensus[5], 0);
        assert_eq!(fused.consensus[9], 1);
    }

    #[test]
    fn index_zero_is_forced_even_at_zero_probability() {
        let runs = vec![run(&[0, 0, 1, 0])];
        let fused = fuse_consensus(&runs, 0, FusionPolicy::Threshold).unwrap();
        assert_eq!(fused.consensus[0], 1);
        assert!((fused.profile[0]).abs() < 1e-6);
    }

    #[test]
    fn mismatched_run_lengths_are_rejected() {
        let runs = vec![run(&[1, 0, 0]), run(&[1, 0])];
        let err = fuse_consensus(&runs, 3, FusionPolicy::TopK).unwrap_err();
        assert!(matches!(
            err,
            SegmentationError::LengthMismatch {
                expected: 3,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn empty_run_set_fuses_to_empty_outputs() {
        let fused = fuse_consensus(&[], 3, FusionPolicy::TopK).unwrap();
        assert!(fused.consensus.is_empty());
        assert!(fused.profile.is_empty());
    }

    #[test]
    fn zero_length_runs_fuse_to_empty_outputs() {
        let fused = fuse_consensus(&[Vec::new(), Vec::new()], 3, FusionPolicy::LocalMax).unwrap();
        assert!(fused.consensus.is_empty());
        assert!(fused.profile.is_empty());
    }
}
