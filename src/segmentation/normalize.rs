/// Replace every `noise_id` entry with the most recent non-noise label so the
/// downstream DP never sees the reserved marker.
///
/// Leading noise (no valid label seen yet) falls back to `0`; an all-noise
/// sequence degenerates to the constant sequence `0`. This assumes noise is
/// rare and locally correlated with its temporal neighbor's true topic.
pub fn normalize_labels(labels: &[i64], noise_id: i64) -> Vec<i64> {
    let mut fixed = Vec::with_capacity(labels.len());
    let mut prev_valid: Option<i64> = None;
    for &label in labels {
        if label == noise_id {
            fixed.push(prev_valid.unwrap_or(0));
        } else {
            fixed.push(label);
            prev_valid = Some(label);
        }
    }
    fixed
}
