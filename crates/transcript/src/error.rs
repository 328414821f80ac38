#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A non-translation token arrived without usable timing: absent
    /// `start_ms`/`end_ms`, a negative interval, or a negative start.
    /// `index` is the token's position in the original input array.
    #[error("token {index} has missing or negative timing")]
    MalformedToken { index: usize },
    /// No assemblable tokens remained after filtering.
    #[error("no tokens left after filtering")]
    EmptyTranscript,
}
