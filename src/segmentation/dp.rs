use crate::segmentation::normalize::normalize_labels;
use crate::segmentation::prefix::PrefixTable;

/// Penalized dynamic-programming segmentation over a per-sentence topic-label
/// sequence (Utiyama & Isahara, 2001).
///
/// Minimizes, over all partitions of `[0, n)` into contiguous segments, the
/// sum per segment of `disagreement_cost + lam`: `lam` is the fixed price of
/// opening a segment, so the optimizer only cuts when the reduction in
/// disagreement exceeds it. Larger `lam` means fewer, longer segments.
///
/// Returns a boundary vector of the input's length; entry 1 marks "a segment
/// starts at this index", and index 0 is always marked for non-empty input.
/// Empty input returns an empty vector.
///
/// O(n²·|distinct labels|) time — n is a per-document sentence count, not a
/// streaming quantity.
pub fn segment_dp(labels: &[i64], lam: f32, noise_id: i64) -> Vec<u8> {
    let clean = normalize_labels(labels, noise_id);
    let n = clean.len();
    if n == 0 {
        return Vec::new();
    }

    let table = PrefixTable::build(&clean);

    // dp[j] = best total cost for the prefix [0, j). Seeding dp[0] with -lam
    // cancels the one lam charged for the very first segment.
    let mut dp = vec![f32::INFINITY; n + 1];
    let mut back = vec![0usize; n + 1];
    dp[0] = -lam;

    for j in 1..=n {
        for i in 0..j {
            let cost = dp[i] + table.span_cost(i, j) as f32 + lam;
            // Strict `<` keeps the earliest minimizing `i`: ties bias toward
            // earlier cuts / longer later segments. Documented policy, not an
            // accident of scan order.
            if cost < dp[j] {
                dp[j] = cost;
                back[j] = i;
            }
        }
    }

    let mut boundaries = vec![0u8; n];
    let mut k = n;
    while k > 0 {
        let i = back[k];
        boundaries[i] = 1;
        k = i;
    }

    tracing::debug!(
        n,
        lam,
        cut_count = boundaries.iter().filter(|&&b| b != 0).count(),
        "dp: optimal partition found"
    );
    boundaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmentation::prefix::PrefixTable;

    /// Total disagreement cost of the partition a boundary vector describes.
    fn partition_cost(labels: &[i64], boundaries: &[u8]) -> u32 {
        let table = PrefixTable::build(labels);
        let starts: Vec<usize> = boundaries
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| (b != 0).then_some(i))
            .collect();
        starts
            .iter()
            .enumerate()
            .map(|(s, &start)| {
                let end = starts.get(s + 1).copied().unwrap_or(labels.len());
                table.span_cost(start, end)
            })
            .sum()
    }

    #[test]
    fn output_length_matches_and_first_index_is_boundary() {
        let labels = [4, 4, 1, 1, 1, 0];
        let boundaries = segment_dp(&labels, 1.0, -1);
        assert_eq!(boundaries.len(), labels.len());
        assert_eq!(boundaries[0], 1);
    }

    #[test]
    fn constant_sequence_yields_single_segment() {
        let labels = [3i64; 8];
        let boundaries = segment_dp(&labels, 0.5, -1);
        assert_eq!(boundaries, vec![1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn three_homogeneous_spans_are_cut_apart() {
        let labels = [0, 0, 0, 5, 5, 1, 1, 1];
        let boundaries = segment_dp(&labels, 1.0, -1);
        assert_eq!(boundaries, vec![1, 0, 0, 1, 0, 1, 0, 0]);
    }

    #[test]
    fn noise_is_normalized_before_segmenting() {
        // After normalization this is [0,0,0,5,5,1,1,1] again.
        let labels = [0, -1, 0, 5, -1, 1, 1, -1];
        let boundaries = segment_dp(&labels, 1.0, -1);
        assert_eq!(boundaries, vec![1, 0, 0, 1, 0, 1, 0, 0]);
    }

    #[test]
    fn zero_lambda_partition_is_still_cost_optimal() {
        // With lam = 0 the optimum has zero disagreement: every maximal
        // homogeneous run can be its own segment.
        let labels = [2, 2, 9, 9, 9, 2, 4];
        let boundaries = segment_dp(&labels, 0.0, -1);
        assert_eq!(partition_cost(&labels, &boundaries), 0);
    }

    #[test]
    fn large_lambda_suppresses_all_cuts() {
        let labels = [0, 0, 1, 1, 2, 2];
        let boundaries = segment_dp(&labels, 100.0, -1);
        assert_eq!(boundaries.iter().filter(|&&b| b != 0).count(), 1);
        assert_eq!(boundaries[0], 1);
    }

    #[test]
    fn empty_input_returns_empty_vector() {
        assert!(segment_dp(&[], 1.0, -1).is_empty());
    }

    #[test]
    fn single_element_is_its_own_segment() {
        assert_eq!(segment_dp(&[42], 1.0, -1), vec![1]);
    }
}
