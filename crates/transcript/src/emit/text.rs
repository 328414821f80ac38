//! Plain-text transcript: one speaker-labelled paragraph per speaker turn.
//!
//! No timecodes, no schema — the review/archival format. Punctuation is
//! merged onto the preceding word so the paragraph reads naturally
//! ("today?" rather than "today ?").

use crate::types::{AssembledWord, Transcript};

/// Punctuation that attaches to the preceding word without a space.
const MERGE_PUNCTUATION: &[&str] = &[".", ",", "?", "!", ";", ":", "…", "—", "–", "-"];

/// Render the transcript as speaker-labelled paragraphs.
///
/// A new turn starts whenever a word's speaker differs from the current
/// turn's (punctuation never breaks a turn). Paragraphs are separated by a
/// blank line; non-empty output ends with a newline.
pub fn plain_text(transcript: &Transcript) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut turn: Vec<&AssembledWord> = Vec::new();
    let mut turn_speaker: Option<&str> = None;

    for word in &transcript.words {
        if !word.is_punct() && !turn.is_empty() && word.speaker() != turn_speaker {
            paragraphs.push(paragraph(transcript, turn_speaker, &turn));
            turn.clear();
        }
        if turn.is_empty() {
            turn_speaker = word.speaker();
        }
        turn.push(word);
    }
    if !turn.is_empty() {
        paragraphs.push(paragraph(transcript, turn_speaker, &turn));
    }

    let mut content = paragraphs.join("\n\n");
    if !content.is_empty() {
        content.push('\n');
    }
    content
}

fn paragraph(transcript: &Transcript, speaker: Option<&str>, words: &[&AssembledWord]) -> String {
    let name = transcript
        .speaker_or_default(speaker)
        .map(|s| s.display_name.as_str())
        .unwrap_or("Speaker");
    format!("{name}:\n{}", merge_words(words))
}

/// Join words with spaces, attaching merge punctuation directly.
///
/// A digit word directly after `","` or `"-"` joins without a space so
/// decimal numbers split across tokens render as `"2,5"` rather than
/// `"2, 5"`.
fn merge_words(words: &[&AssembledWord]) -> String {
    let mut out = String::new();

    for word in words {
        let text = word.text();
        if out.is_empty() {
            out.push_str(text);
        } else if word.is_punct() && MERGE_PUNCTUATION.contains(&text) {
            out.push_str(text);
        } else if (out.ends_with(',') || out.ends_with('-'))
            && text.chars().all(|c| c.is_ascii_digit())
        {
            out.push_str(text);
        } else {
            out.push(' ');
            out.push_str(text);
        }
    }

    out
}
