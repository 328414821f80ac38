//! # Caption segmentation and SRT rendering
//!
//! Turns an assembled [`transcript::Transcript`] into subtitle cues: the
//! adapter reshapes the IR into a flat caption-word stream, a dynamic
//! program partitions that stream into time-bounded cues with Swedish
//! line-break heuristics, and the SRT pass renders them with final display
//! timing.
//!
//! Configuration is an explicit value threaded through every call — run the
//! broadcast and social presets concurrently, derive custom settings from
//! either, nothing is shared:
//!
//! ```
//! # fn demo(transcript: &transcript::Transcript) -> Result<(), captions::Error> {
//! let broadcast = captions::format_srt(transcript, &captions::Config::broadcast())?;
//! let social = captions::format_srt(transcript, &captions::Config::social())?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod segment;
pub mod srt;
pub mod words;

mod linebreak;
mod text;

pub use config::{Config, WEAK_END_WORDS_SV, Weights};
pub use error::Error;
pub use segment::{CaptionSegment, segment};
pub use srt::srt;
pub use words::{CaptionWord, caption_words};

use transcript::Transcript;

/// Convert a transcript straight to an SRT document.
///
/// Runs the adapter, the segmenter, and the SRT renderer in sequence. A
/// transcript whose caption-word stream is empty renders as an empty
/// string.
pub fn format_srt(transcript: &Transcript, config: &Config) -> Result<String, Error> {
    let words = caption_words(transcript);
    if words.is_empty() {
        return Ok(String::new());
    }
    let segments = segment(&words, config)?;
    Ok(srt(&segments, config))
}
