//! The segmentation core: noise normalization, prefix-frequency bookkeeping,
//! penalized DP segmentation, multi-run consensus fusion, and mapping of
//! consensus boundaries back onto timestamped chunks.
//!
//! Everything here is pure with respect to its explicit inputs; all per-call
//! state is freshly allocated and nothing persists across calls.

pub mod assemble;
pub mod consensus;
pub mod dp;
pub mod normalize;
pub mod prefix;
