#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Neither the dynamic program nor the greedy fallback could produce a
    /// segmentation under the configured hard caps — typically a single
    /// merged word wider than `max_cue_chars`.
    #[error("no valid caption segmentation under the configured limits")]
    SegmentationInfeasible,
}
