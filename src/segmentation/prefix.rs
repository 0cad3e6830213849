use std::collections::BTreeMap;

/// Prefix label counts over a cleaned label sequence.
///
/// For each distinct label `t`, `counts[t][j]` is how many times `t` occurs
/// among the first `j` entries (`counts[t][0] == 0`). Any span's label
/// histogram is then `counts[t][j] - counts[t][i]` in O(|distinct labels|).
#[derive(Debug, Clone)]
pub struct PrefixTable {
    counts: BTreeMap<i64, Vec<u32>>,
    len: usize,
}

impl PrefixTable {
    pub fn build(labels: &[i64]) -> Self {
        let n = labels.len();
        let mut counts: BTreeMap<i64, Vec<u32>> = BTreeMap::new();
        for &label in labels {
            counts.entry(label).or_insert_with(|| vec![0u32; n + 1]);
        }
        for (j, &label) in labels.iter().enumerate() {
            for (&t, freq) in counts.iter_mut() {
                freq[j + 1] = freq[j] + u32::from(t == label);
            }
        }
        Self { counts, len: n }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Count of label `t` within the half-open span `[i, j)`.
    pub fn span_count(&self, t: i64, i: usize, j: usize) -> u32 {
        debug_assert!(i <= j && j <= self.len);
        self.counts.get(&t).map_or(0, |freq| freq[j] - freq[i])
    }

    /// Disagreement cost of treating `[i, j)` as one segment: the span length
    /// minus the count of its majority label. Zero iff the span is
    /// label-homogeneous.
    pub fn span_cost(&self, i: usize, j: usize) -> u32 {
        debug_assert!(i <= j && j <= self.len);
        let span_len = (j - i) as u32;
        let max_same = self
            .counts
            .values()
            .map(|freq| freq[j] - freq[i])
            .max()
            .unwrap_or(0);
        span_len - max_same
    }
}
