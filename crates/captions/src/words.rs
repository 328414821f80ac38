//! Adapter from the transcript IR to the segmenter's word stream.
//!
//! The IR keeps punctuation as separate items and marks sentence ends on
//! the closing word; the segmenter wants punctuation attached to words,
//! sentence starts marked on the *next* word, and speaker changes signalled
//! by synthetic dash markers. Three folds bridge the gap, in order:
//! punctuation merge, marker injection, segment-start flagging.

use transcript::{AssembledWord, Transcript};

/// One word as the segmenter sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionWord {
    /// Word text with any attached trailing punctuation.
    pub text: String,
    pub start_s: f64,
    pub end_s: f64,
    /// A synthetic dash standing in for a speaker change; carries no
    /// visible content of its own and has zero duration.
    pub is_speaker_marker: bool,
    /// First word of a sentence — a preferred caption boundary.
    pub is_segment_start: bool,
}

/// Punctuation that merges onto the preceding word. The en-dash is absent
/// on purpose: it is the speaker-marker glyph.
fn merges_onto_previous(text: &str) -> bool {
    matches!(text, "." | "," | "?" | "!" | ";" | ":" | "…" | "—")
}

/// How many punctuation marks may pile onto one word before the next mark
/// starts a stream item of its own.
const MAX_PUNCT_MERGE: usize = 3;

fn starts_sentence_after(text: &str) -> bool {
    matches!(text.chars().next_back(), Some('.' | '?' | '!'))
}

struct Merged {
    text: String,
    start_s: f64,
    end_s: f64,
    speaker: Option<String>,
    is_speaker_marker: bool,
}

/// Convert a transcript into the segmenter's caption-word stream.
///
/// Reads the IR without modifying it; calling it twice yields identical
/// output.
pub fn caption_words(transcript: &Transcript) -> Vec<CaptionWord> {
    let merged = merge_punctuation(&transcript.words);
    let with_markers = inject_speaker_markers(merged);
    apply_segment_starts(with_markers)
}

/// Attach standalone punctuation to the word before it, extending that
/// word's end time. At most [`MAX_PUNCT_MERGE`] consecutive marks merge;
/// the next one becomes its own stream item (and later marks merge onto
/// it). Punctuation before the first word is dropped.
fn merge_punctuation(words: &[AssembledWord]) -> Vec<Merged> {
    let mut merged: Vec<Merged> = Vec::new();
    let mut merge_count = 0;

    for word in words {
        let mergeable = word.is_punct() && merges_onto_previous(word.text());

        if mergeable && merge_count < MAX_PUNCT_MERGE {
            // Leading punctuation has nothing to attach to and is dropped.
            if let Some(prev) = merged.last_mut() {
                prev.text.push_str(word.text());
                prev.end_s = word.end_s();
                merge_count += 1;
            }
        } else {
            merge_count = 0;
            merged.push(Merged {
                text: word.text().to_string(),
                start_s: word.start_s(),
                end_s: word.end_s(),
                speaker: word.speaker().map(str::to_string),
                is_speaker_marker: false,
            });
        }
    }

    merged
}

/// Insert a zero-duration `"–"` marker before the first word of each new
/// speaker. The very first speaker gets none, and a change to an
/// unlabelled word injects nothing.
fn inject_speaker_markers(merged: Vec<Merged>) -> Vec<Merged> {
    let mut result: Vec<Merged> = Vec::with_capacity(merged.len());
    let mut prev_speaker: Option<String> = None;

    for (i, word) in merged.into_iter().enumerate() {
        if i > 0 && word.speaker.is_some() && word.speaker != prev_speaker {
            result.push(Merged {
                text: "–".to_string(),
                start_s: word.start_s,
                end_s: word.start_s,
                speaker: word.speaker.clone(),
                is_speaker_marker: true,
            });
        }
        prev_speaker = word.speaker.clone();
        result.push(word);
    }

    result
}

/// The first real word starts a segment; so does every word following one
/// whose merged text ends in `.`, `?`, or `!`.
fn apply_segment_starts(merged: Vec<Merged>) -> Vec<CaptionWord> {
    let mut result = Vec::with_capacity(merged.len());
    let mut next_starts_segment = true;

    for word in merged {
        if word.is_speaker_marker {
            result.push(CaptionWord {
                text: word.text,
                start_s: word.start_s,
                end_s: word.end_s,
                is_speaker_marker: true,
                is_segment_start: false,
            });
            continue;
        }

        let ends_sentence = starts_sentence_after(&word.text);
        result.push(CaptionWord {
            text: word.text,
            start_s: word.start_s,
            end_s: word.end_s,
            is_speaker_marker: false,
            is_segment_start: next_starts_segment,
        });
        next_starts_segment = ends_sentence;
    }

    result
}
