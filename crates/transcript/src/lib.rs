//! # Token assembly and the transcript intermediate representation
//!
//! The async STT service returns BPE sub-word fragments with per-token
//! timing, confidence, and speaker/language metadata. The leading space on a
//! token is the **sole word boundary signal**: a space prefix means "new
//! word", no prefix means "same word". [`Assembler`] folds the token array
//! into the [`Transcript`] IR — whole words and standalone punctuation with
//! aggregated timing and confidence, inferred sentence boundaries, and a
//! speaker table.
//!
//! The IR is built once and consumed read-only by every emitter: the
//! sentence-segmented editor JSON ([`emit::editor`]), speaker-turn plain
//! text ([`emit::text`]), and the caption and kinetic crates downstream.

pub mod assembler;
pub mod emit;
pub mod error;
pub mod id;
pub mod language;
pub mod types;

pub use assembler::Assembler;
pub use error::Error;
pub use id::{IdGenerator, SequentialIdGen, UuidIdGen};
pub use language::{LANGUAGE_MAP, UNKNOWN_LANGUAGE_CODE, map_language};
pub use types::{AssembledWord, SpeakerInfo, Transcript};
