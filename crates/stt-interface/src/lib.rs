//! Wire types for the asynchronous speech-to-text transcript endpoint.
//!
//! The service returns a flat array of BPE sub-word tokens; whole words are
//! recovered downstream by concatenating contiguous fragments. This crate
//! only models the wire format — assembly lives in the `transcript` crate,
//! which keeps the processing core free of provider field names.

/// Whether a token belongs to the spoken source or to a generated
/// translation track.
///
/// The field is absent entirely when translation was not configured for the
/// request; absent and `None` both mean the token is part of the source
/// audio and must be kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationStatus {
    Original,
    None,
    Translation,
}

/// A single sub-word token from the async transcript response.
///
/// `text` keeps its leading space when present — that space is the word
/// boundary signal and must survive deserialisation untouched.
/// `start_ms`/`end_ms` are absent only on translation tokens, which carry no
/// audio alignment.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SourceToken {
    pub text: String,
    #[serde(default)]
    pub start_ms: Option<i64>,
    #[serde(default)]
    pub end_ms: Option<i64>,
    pub confidence: f64,
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub translation_status: Option<TranslationStatus>,
}

impl SourceToken {
    /// True when the token is part of a translation track and must be
    /// discarded before assembly.
    pub fn is_translation(&self) -> bool {
        self.translation_status == Some(TranslationStatus::Translation)
    }
}

/// Full response body of the transcript endpoint.
///
/// `text` is the service's own pre-assembled plaintext. It is a convenience
/// field only — word assembly always works from `tokens`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TranscriptResponse {
    pub id: String,
    pub text: String,
    pub tokens: Vec<SourceToken>,
}
