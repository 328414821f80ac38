//! Sub-word token assembly: BPE fragments in, [`Transcript`] IR out.
//!
//! The leading space on a token is the sole word boundary signal within the
//! stream. A token consisting only of punctuation closes the open word and
//! becomes a standalone item; a speaker change on a continuation token also
//! forces a boundary, so a word never spans two speakers. Confidence is
//! aggregated conservatively — a word is only as trustworthy as its least
//! trustworthy fragment.

use stt_interface::SourceToken;

use crate::error::Error;
use crate::id::{IdGenerator, UuidIdGen};
use crate::types::{AssembledWord, SpeakerInfo, Transcript};

/// Characters a token may consist of to classify as standalone punctuation.
const PUNCTUATION_CHARS: &[char] = &['.', ',', '?', '!', ';', ':', '…', '—', '–'];

fn is_punctuation_token(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| PUNCTUATION_CHARS.contains(&c))
}

fn is_sentence_terminator(text: &str) -> bool {
    matches!(text, "." | "?" | "!")
}

/// A word still being accumulated from continuation tokens.
struct OpenWord {
    text: String,
    start_ms: i64,
    end_ms: i64,
    /// Running minimum across constituent tokens.
    confidence: f64,
    speaker: Option<String>,
    language: Option<String>,
}

impl OpenWord {
    fn begin(token: &SourceToken, start_ms: i64, end_ms: i64) -> Self {
        let text = token.text.strip_prefix(' ').unwrap_or(&token.text);
        Self {
            text: text.to_string(),
            start_ms,
            end_ms,
            confidence: token.confidence,
            speaker: token.speaker.clone(),
            language: token.language.clone(),
        }
    }

    fn extend(&mut self, token: &SourceToken, end_ms: i64) {
        self.text.push_str(&token.text);
        self.end_ms = end_ms;
        self.confidence = self.confidence.min(token.confidence);
    }

    fn close(self) -> AssembledWord {
        AssembledWord::Word {
            text: self.text,
            start_s: self.start_ms as f64 / 1000.0,
            duration_s: (self.end_ms - self.start_ms) as f64 / 1000.0,
            confidence: self.confidence,
            eos: false,
            speaker: self.speaker,
            language: self.language,
            tags: Vec::new(),
        }
    }
}

/// Builds the [`Transcript`] IR from a flat token array.
///
/// Holds the [`IdGenerator`] that mints speaker UUIDs; inject
/// [`crate::SequentialIdGen`] for deterministic output in tests and
/// snapshots.
pub struct Assembler {
    id_gen: Box<dyn IdGenerator>,
}

impl Assembler {
    pub fn new() -> Self {
        Self::with_id_gen(UuidIdGen)
    }

    pub fn with_id_gen(id_gen: impl IdGenerator + 'static) -> Self {
        Self {
            id_gen: Box::new(id_gen),
        }
    }

    /// Assemble `tokens` into a transcript.
    ///
    /// Translation tokens are discarded up front and empty-text tokens are
    /// skipped silently. Every remaining token must carry a valid
    /// `start_ms..end_ms` interval or the whole conversion is rejected with
    /// [`Error::MalformedToken`]; an array that assembles to zero words is
    /// rejected with [`Error::EmptyTranscript`].
    pub fn assemble(
        &mut self,
        tokens: &[SourceToken],
        source_name: &str,
    ) -> Result<Transcript, Error> {
        let mut words: Vec<AssembledWord> = Vec::new();
        let mut open: Option<OpenWord> = None;

        for (index, token) in tokens.iter().enumerate() {
            if token.is_translation() || token.text.is_empty() {
                continue;
            }

            let (start_ms, end_ms) = match (token.start_ms, token.end_ms) {
                (Some(start), Some(end)) if start >= 0 && end >= start => (start, end),
                _ => return Err(Error::MalformedToken { index }),
            };

            if is_punctuation_token(&token.text) {
                if let Some(word) = open.take() {
                    words.push(word.close());
                }
                words.push(AssembledWord::Punct {
                    text: token.text.clone(),
                    start_s: start_ms as f64 / 1000.0,
                    duration_s: (end_ms - start_ms) as f64 / 1000.0,
                    confidence: token.confidence,
                    speaker: token.speaker.clone(),
                    language: token.language.clone(),
                });
                continue;
            }

            match open.as_mut() {
                Some(word) if !token.text.starts_with(' ') && token.speaker == word.speaker => {
                    word.extend(token, end_ms);
                }
                // Leading space or a mid-word speaker change both end the
                // open word; the first real token just opens one.
                _ => {
                    if let Some(word) = open.take() {
                        words.push(word.close());
                    }
                    open = Some(OpenWord::begin(token, start_ms, end_ms));
                }
            }
        }

        if let Some(word) = open.take() {
            words.push(word.close());
        }

        if words.is_empty() {
            return Err(Error::EmptyTranscript);
        }

        infer_eos(&mut words);

        let speakers = self.build_speaker_table(&words);
        let primary_language = primary_language(&words);
        let duration_s = words.last().map(|w| w.end_s()).unwrap_or(0.0);

        Ok(Transcript {
            words,
            speakers,
            primary_language,
            source_name: source_name.to_string(),
            duration_s,
        })
    }

    /// `"Speaker N"` by order of first appearance, one UUID per label.
    /// A transcript with no labels at all still gets a single default
    /// speaker so downstream emitters always have one to reference.
    fn build_speaker_table(&mut self, words: &[AssembledWord]) -> Vec<SpeakerInfo> {
        let mut speakers: Vec<SpeakerInfo> = Vec::new();

        for word in words {
            let Some(label) = word.speaker() else {
                continue;
            };
            if speakers.iter().any(|s| s.source_label == label) {
                continue;
            }
            speakers.push(SpeakerInfo {
                source_label: label.to_string(),
                display_name: format!("Speaker {}", speakers.len() + 1),
                uuid: self.id_gen.next_id(),
            });
        }

        if speakers.is_empty() {
            speakers.push(SpeakerInfo {
                source_label: String::new(),
                display_name: "Speaker 1".to_string(),
                uuid: self.id_gen.next_id(),
            });
        }

        speakers
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Second pass: each sentence-terminating punctuation item marks the nearest
/// preceding word `eos`.
fn infer_eos(words: &mut [AssembledWord]) {
    for i in 0..words.len() {
        if !(words[i].is_punct() && is_sentence_terminator(words[i].text())) {
            continue;
        }
        for j in (0..i).rev() {
            if let AssembledWord::Word { eos, .. } = &mut words[j] {
                *eos = true;
                break;
            }
        }
    }
}

/// Most frequent word language, ties broken by first occurrence.
fn primary_language(words: &[AssembledWord]) -> String {
    // (code, count) in first-occurrence order.
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for word in words {
        if word.is_punct() {
            continue;
        }
        let Some(code) = word.language() else {
            continue;
        };
        match counts.iter_mut().find(|(c, _)| *c == code) {
            Some((_, n)) => *n += 1,
            None => counts.push((code, 1)),
        }
    }

    // Only a strictly greater count displaces the running best, so ties
    // keep the first-seen code.
    counts
        .iter()
        .fold(None::<(&str, usize)>, |best, &(code, n)| match best {
            Some((_, best_n)) if n <= best_n => best,
            _ => Some((code, n)),
        })
        .map(|(code, _)| code.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIdGen;

    fn tok(text: &str, start_ms: i64, end_ms: i64, confidence: f64) -> SourceToken {
        SourceToken {
            text: text.to_string(),
            start_ms: Some(start_ms),
            end_ms: Some(end_ms),
            confidence,
            speaker: Some("1".to_string()),
            language: Some("en".to_string()),
            translation_status: None,
        }
    }

    fn tok_speaker(text: &str, start_ms: i64, end_ms: i64, speaker: &str) -> SourceToken {
        SourceToken {
            speaker: Some(speaker.to_string()),
            ..tok(text, start_ms, end_ms, 1.0)
        }
    }

    fn assemble(tokens: &[SourceToken]) -> Transcript {
        Assembler::with_id_gen(SequentialIdGen::new())
            .assemble(tokens, "test.wav")
            .unwrap()
    }

    fn word(t: &Transcript, i: usize) -> &AssembledWord {
        &t.words[i]
    }

    #[test]
    fn assembles_sub_words_and_punctuation() {
        let tokens = [
            tok("How", 120, 250, 0.97),
            tok(" are", 260, 380, 0.95),
            tok(" you", 390, 510, 0.96),
            tok(" do", 520, 600, 0.93),
            tok("ing", 600, 720, 0.94),
            tok(" to", 730, 790, 0.91),
            tok("day", 790, 920, 0.96),
            tok("?", 920, 940, 0.99),
        ];
        let t = assemble(&tokens);

        let expected = [
            ("How", 0.120, 0.130, 0.97, false, false),
            ("are", 0.260, 0.120, 0.95, false, false),
            ("you", 0.390, 0.120, 0.96, false, false),
            ("doing", 0.520, 0.200, 0.93, false, false),
            ("today", 0.730, 0.190, 0.91, false, true),
            ("?", 0.920, 0.020, 0.99, true, false),
        ];
        assert_eq!(t.words.len(), expected.len());
        for (w, (text, start, dur, conf, punct, eos)) in t.words.iter().zip(expected) {
            assert_eq!(w.text(), text);
            assert!((w.start_s() - start).abs() < 1e-9, "{text}: {}", w.start_s());
            assert!(
                (w.duration_s() - dur).abs() < 1e-9,
                "{text}: {}",
                w.duration_s()
            );
            assert_eq!(w.confidence(), conf, "{text}");
            assert_eq!(w.is_punct(), punct, "{text}");
            assert_eq!(w.eos(), eos, "{text}");
        }

        assert_eq!(t.primary_language, "en");
        assert!((t.duration_s - 0.940).abs() < 1e-9);
    }

    #[test]
    fn confidence_is_minimum_of_constituents() {
        let tokens = [
            tok("fan", 0, 100, 0.91),
            tok("tas", 100, 200, 0.87),
            tok("tic", 200, 300, 0.95),
        ];
        let t = assemble(&tokens);
        assert_eq!(t.words.len(), 1);
        assert_eq!(word(&t, 0).text(), "fantastic");
        assert_eq!(word(&t, 0).confidence(), 0.87);
    }

    #[test]
    fn speaker_change_forces_word_boundary() {
        let tokens = [
            tok_speaker("hand", 0, 200, "1"),
            tok_speaker("over", 200, 400, "2"),
        ];
        let t = assemble(&tokens);
        assert_eq!(t.words.len(), 2);
        assert_eq!(word(&t, 0).text(), "hand");
        assert_eq!(word(&t, 0).speaker(), Some("1"));
        assert_eq!(word(&t, 1).text(), "over");
        assert_eq!(word(&t, 1).speaker(), Some("2"));
    }

    #[test]
    fn word_adopts_first_token_attribution() {
        let mut second = tok("tastic", 100, 200, 0.9);
        second.language = Some("sv".to_string());
        let tokens = [tok("fan", 0, 100, 0.9), second];
        let t = assemble(&tokens);
        assert_eq!(t.words.len(), 1);
        assert_eq!(word(&t, 0).language(), Some("en"));
    }

    #[test]
    fn translation_tokens_are_filtered() {
        let mut translated = SourceToken {
            text: " hej".to_string(),
            start_ms: None,
            end_ms: None,
            confidence: 0.9,
            speaker: None,
            language: Some("sv".to_string()),
            translation_status: Some(stt_interface::TranslationStatus::Translation),
        };
        let tokens = [tok("Hello", 0, 300, 0.9), translated.clone()];
        let t = assemble(&tokens);
        assert_eq!(t.words.len(), 1);
        assert_eq!(word(&t, 0).text(), "Hello");

        // Same token without the translation flag is malformed instead.
        translated.translation_status = None;
        let result = Assembler::new().assemble(&[tok("Hello", 0, 300, 0.9), translated], "x");
        assert_eq!(result.unwrap_err(), Error::MalformedToken { index: 1 });
    }

    #[test]
    fn empty_text_tokens_are_skipped() {
        let tokens = [tok("Hi", 0, 100, 0.9), tok("", 100, 100, 0.9)];
        let t = assemble(&tokens);
        assert_eq!(t.words.len(), 1);
    }

    #[test]
    fn negative_interval_is_malformed() {
        let result = Assembler::new().assemble(&[tok("Hi", 200, 100, 0.9)], "x");
        assert_eq!(result.unwrap_err(), Error::MalformedToken { index: 0 });

        let result = Assembler::new().assemble(&[tok("Hi", -5, 100, 0.9)], "x");
        assert_eq!(result.unwrap_err(), Error::MalformedToken { index: 0 });
    }

    #[test]
    fn no_tokens_after_filtering_is_empty_transcript() {
        assert_eq!(
            Assembler::new().assemble(&[], "x").unwrap_err(),
            Error::EmptyTranscript
        );

        let blank = SourceToken {
            text: String::new(),
            ..tok("", 0, 0, 1.0)
        };
        assert_eq!(
            Assembler::new().assemble(&[blank], "x").unwrap_err(),
            Error::EmptyTranscript
        );
    }

    #[test]
    fn eos_marks_word_before_sentence_terminator() {
        let tokens = [
            tok("Hi", 0, 100, 0.9),
            tok(".", 100, 120, 0.9),
            tok(" There", 200, 300, 0.9),
        ];
        let t = assemble(&tokens);
        assert!(word(&t, 0).eos());
        assert!(!word(&t, 1).eos());
        assert!(!word(&t, 2).eos());
    }

    #[test]
    fn eos_skips_intervening_punctuation() {
        let tokens = [
            tok("Hi", 0, 100, 0.9),
            tok(",", 100, 110, 0.9),
            tok(".", 110, 120, 0.9),
        ];
        let t = assemble(&tokens);
        assert!(word(&t, 0).eos());
    }

    #[test]
    fn comma_is_not_a_sentence_terminator() {
        let tokens = [tok("Hi", 0, 100, 0.9), tok(",", 100, 110, 0.9)];
        let t = assemble(&tokens);
        assert!(!word(&t, 0).eos());
    }

    #[test]
    fn punctuation_run_classifies_as_punctuation() {
        let tokens = [tok("Va", 0, 100, 0.9), tok("?!", 100, 120, 0.9)];
        let t = assemble(&tokens);
        assert_eq!(t.words.len(), 2);
        assert!(word(&t, 1).is_punct());
        // A run is not a single terminator; eos stays unset.
        assert!(!word(&t, 0).eos());
    }

    #[test]
    fn speaker_table_numbers_by_first_appearance() {
        let tokens = [
            tok_speaker("A", 0, 100, "7"),
            tok_speaker(" B", 100, 200, "2"),
            tok_speaker(" C", 200, 300, "7"),
        ];
        let t = assemble(&tokens);
        assert_eq!(t.speakers.len(), 2);
        assert_eq!(t.speakers[0].source_label, "7");
        assert_eq!(t.speakers[0].display_name, "Speaker 1");
        assert_eq!(t.speakers[0].uuid, "0");
        assert_eq!(t.speakers[1].source_label, "2");
        assert_eq!(t.speakers[1].display_name, "Speaker 2");
        assert_eq!(t.speakers[1].uuid, "1");
    }

    #[test]
    fn default_speaker_when_no_labels() {
        let mut token = tok("Hello", 0, 100, 0.9);
        token.speaker = None;
        let t = assemble(&[token]);
        assert_eq!(t.speakers.len(), 1);
        assert_eq!(t.speakers[0].display_name, "Speaker 1");
    }

    #[test]
    fn primary_language_majority_with_first_occurrence_ties() {
        let mut sv = tok(" hej", 100, 200, 0.9);
        sv.language = Some("sv".to_string());
        let mut sv2 = tok(" du", 200, 300, 0.9);
        sv2.language = Some("sv".to_string());
        let tokens = [tok("Hello", 0, 100, 0.9), sv, sv2];
        assert_eq!(assemble(&tokens).primary_language, "sv");

        // One vote each: the first seen code wins.
        let mut da = tok(" hej", 100, 200, 0.9);
        da.language = Some("da".to_string());
        let tokens = [tok("Hello", 0, 100, 0.9), da];
        assert_eq!(assemble(&tokens).primary_language, "en");
    }

    #[test]
    fn word_texts_reassemble_source_text() {
        let tokens = [
            tok("How", 120, 250, 0.97),
            tok(" are", 260, 380, 0.95),
            tok(" do", 520, 600, 0.93),
            tok("ing", 600, 720, 0.94),
            tok("?", 920, 940, 0.99),
        ];
        let t = assemble(&tokens);

        let assembled: String = t
            .words
            .iter()
            .filter(|w| !w.is_punct())
            .map(|w| w.text())
            .collect();
        let source: String = tokens
            .iter()
            .filter(|t| !is_punctuation_token(&t.text))
            .map(|t| t.text.strip_prefix(' ').unwrap_or(&t.text))
            .collect();
        assert_eq!(assembled, source);
    }

    #[test]
    fn words_are_ordered_by_start_time() {
        let tokens = [
            tok("a", 0, 100, 0.9),
            tok(" b", 100, 200, 0.9),
            tok(".", 200, 210, 0.9),
            tok(" c", 300, 400, 0.9),
        ];
        let t = assemble(&tokens);
        assert!(
            t.words
                .windows(2)
                .all(|w| w[0].start_s() <= w[1].start_s())
        );
    }
}
