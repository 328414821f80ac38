//! Editor transcript JSON: one segment per sentence.
//!
//! The editor's speech-to-text panel imports a document of sentence
//! segments — a ten-sentence monologue from one speaker becomes ten
//! segments. Sentences are split at `eos`, with trailing punctuation kept
//! in the sentence it closes.

use crate::language::map_language;
use crate::types::{AssembledWord, Transcript};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordKind {
    Word,
    Punctuation,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Word {
    pub text: String,
    pub start: f64,
    pub duration: f64,
    pub confidence: f64,
    #[serde(rename = "type")]
    pub kind: WordKind,
    pub eos: bool,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    pub start: f64,
    pub duration: f64,
    /// Speaker UUID from the transcript's speaker table.
    pub speaker: String,
    /// BCP-47 locale.
    pub language: String,
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Speaker {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Document {
    pub language: String,
    pub segments: Vec<Segment>,
    pub speakers: Vec<Speaker>,
}

/// Build the editor document from a transcript.
pub fn document(transcript: &Transcript) -> Document {
    let default_language = map_language(&transcript.primary_language);

    Document {
        language: default_language.to_string(),
        segments: sentence_segments(transcript, default_language),
        speakers: transcript
            .speakers
            .iter()
            .map(|s| Speaker {
                id: s.uuid.clone(),
                name: s.display_name.clone(),
            })
            .collect(),
    }
}

/// Serialise the editor document as pretty-printed JSON.
pub fn to_json(transcript: &Transcript) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&document(transcript))
}

/// Split the word stream into sentence segments.
///
/// A sentence closes once a word with `eos` has been seen and the next
/// non-punctuation word arrives — so the terminator (and any piled-up
/// punctuation after it) stays with the sentence it ends.
fn sentence_segments(transcript: &Transcript, default_language: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current: Vec<&AssembledWord> = Vec::new();
    let mut sentence_ended = false;

    for word in &transcript.words {
        if sentence_ended && !word.is_punct() {
            segments.push(build_segment(&current, transcript, default_language));
            current.clear();
            sentence_ended = false;
        }
        current.push(word);
        if word.eos() {
            sentence_ended = true;
        }
    }

    if !current.is_empty() {
        segments.push(build_segment(&current, transcript, default_language));
    }

    segments
}

fn build_segment(
    words: &[&AssembledWord],
    transcript: &Transcript,
    default_language: &str,
) -> Segment {
    let first = words[0];
    let last = words[words.len() - 1];

    let speaker = transcript
        .speaker_or_default(first.speaker())
        .map(|s| s.uuid.clone())
        .unwrap_or_default();

    let language = words
        .iter()
        .find(|w| !w.is_punct() && w.language().is_some())
        .and_then(|w| w.language())
        .map(map_language)
        .unwrap_or(default_language);

    Segment {
        start: first.start_s(),
        duration: last.end_s() - first.start_s(),
        speaker,
        language: language.to_string(),
        words: words.iter().map(|w| word_entry(w)).collect(),
    }
}

fn word_entry(word: &AssembledWord) -> Word {
    Word {
        text: word.text().to_string(),
        start: word.start_s(),
        duration: word.duration_s(),
        confidence: word.confidence(),
        kind: if word.is_punct() {
            WordKind::Punctuation
        } else {
            WordKind::Word
        },
        eos: word.eos(),
        tags: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::Assembler;
    use crate::id::SequentialIdGen;
    use stt_interface::SourceToken;

    fn tok(text: &str, start_ms: i64, end_ms: i64, speaker: &str) -> SourceToken {
        SourceToken {
            text: text.to_string(),
            start_ms: Some(start_ms),
            end_ms: Some(end_ms),
            confidence: 0.9,
            speaker: Some(speaker.to_string()),
            language: Some("en".to_string()),
            translation_status: None,
        }
    }

    fn transcript(tokens: &[SourceToken]) -> Transcript {
        Assembler::with_id_gen(SequentialIdGen::new())
            .assemble(tokens, "test.wav")
            .unwrap()
    }

    #[test]
    fn one_segment_per_sentence() {
        let t = transcript(&[
            tok("One", 0, 100, "1"),
            tok(".", 100, 110, "1"),
            tok(" Two", 200, 300, "1"),
            tok(".", 300, 310, "1"),
        ]);
        let doc = document(&t);
        assert_eq!(doc.segments.len(), 2);
        assert_eq!(doc.segments[0].words.len(), 2);
        assert_eq!(doc.segments[1].words.len(), 2);
    }

    #[test]
    fn trailing_punctuation_stays_with_its_sentence() {
        let t = transcript(&[
            tok("Done", 0, 100, "1"),
            tok("?", 100, 110, "1"),
            tok("!", 110, 120, "1"),
            tok(" Next", 200, 300, "1"),
        ]);
        let doc = document(&t);
        assert_eq!(doc.segments.len(), 2);
        assert_eq!(doc.segments[0].words.len(), 3);
        assert_eq!(doc.segments[1].words[0].text, "Next");
    }

    #[test]
    fn segment_carries_speaker_uuid_and_language() {
        let t = transcript(&[
            tok("Hi", 0, 100, "1"),
            tok(".", 100, 110, "1"),
            tok(" Hej", 200, 300, "2"),
        ]);
        let doc = document(&t);
        assert_eq!(doc.segments[0].speaker, "0");
        assert_eq!(doc.segments[1].speaker, "1");
        assert_eq!(doc.segments[0].language, "en-us");
        assert_eq!(doc.speakers.len(), 2);
        assert_eq!(doc.speakers[0].name, "Speaker 1");
    }

    #[test]
    fn segment_timing_spans_first_to_last_word() {
        let t = transcript(&[tok("Hi", 100, 400, "1"), tok(" there", 500, 900, "1")]);
        let seg = &document(&t).segments[0];
        assert!((seg.start - 0.1).abs() < 1e-9);
        assert!((seg.duration - 0.8).abs() < 1e-9);
    }

    #[test]
    fn document_json_shape() {
        let t = transcript(&[
            tok("Hello", 0, 400, "1"),
            tok(" there", 500, 900, "1"),
            tok(".", 900, 920, "1"),
        ]);
        insta::assert_snapshot!(to_json(&t).unwrap(), @r#"
        {
          "language": "en-us",
          "segments": [
            {
              "start": 0.0,
              "duration": 0.92,
              "speaker": "0",
              "language": "en-us",
              "words": [
                {
                  "text": "Hello",
                  "start": 0.0,
                  "duration": 0.4,
                  "confidence": 0.9,
                  "type": "word",
                  "eos": false,
                  "tags": []
                },
                {
                  "text": "there",
                  "start": 0.5,
                  "duration": 0.4,
                  "confidence": 0.9,
                  "type": "word",
                  "eos": true,
                  "tags": []
                },
                {
                  "text": ".",
                  "start": 0.9,
                  "duration": 0.02,
                  "confidence": 0.9,
                  "type": "punctuation",
                  "eos": false,
                  "tags": []
                }
              ]
            }
          ],
          "speakers": [
            {
              "id": "0",
              "name": "Speaker 1"
            }
          ]
        }
        "#);
    }
}
