//! # Kinetic word reveal
//!
//! Social video captions where words pop onto screen one at a time in a
//! three-row stack. Words are merged with their trailing punctuation, split
//! into sentences at `eos`, and grouped left-to-right into buckets of up to
//! three words. All words in a bucket clear together when the next bucket's
//! first word appears, with a bounded hold; within a bucket the first word
//! renders on row 1, the second on row 2, the third on row 3.
//!
//! The output is three independent streams in the editor-JSON schema — one
//! per row — so the editor can place each row as its own track. The editor
//! handles positioning; this module only does the timing math.
//!
//! Diarization is ignored: the whole transcript is treated as one logical
//! speaker.

use transcript::emit::editor::{Document, Segment, Speaker, Word, WordKind};
use transcript::id::{IdGenerator, UuidIdGen};
use transcript::{AssembledWord, Transcript, map_language};

/// Number of visual rows, and therefore of output streams.
pub const ROW_COUNT: usize = 3;

/// Timing knobs for the reveal.
#[derive(Debug, Clone, PartialEq)]
pub struct KineticConfig {
    /// Words per bucket; clamped to `1..=ROW_COUNT` since each word in a
    /// bucket occupies its own row.
    pub max_bucket_size: usize,
    /// Longest a bucket may stay on screen past its last word's start.
    pub max_hold_s: f64,
    /// Extra hold after the final word of the transcript.
    pub final_hold_s: f64,
    /// Display-time floor for every word.
    pub min_word_display_s: f64,
}

impl Default for KineticConfig {
    fn default() -> Self {
        Self {
            max_bucket_size: 3,
            max_hold_s: 3.0,
            final_hold_s: 1.5,
            min_word_display_s: 0.15,
        }
    }
}

impl KineticConfig {
    fn bucket_size(&self) -> usize {
        self.max_bucket_size.clamp(1, ROW_COUNT)
    }
}

/// A word with trailing punctuation attached, ready for bucketing.
#[derive(Debug, Clone)]
struct MergedWord {
    text: String,
    start_s: f64,
    end_s: f64,
    confidence: f64,
    eos: bool,
}

/// A group of words that appear one by one and clear together.
struct Bucket {
    words: Vec<MergedWord>,
    clear_s: f64,
}

/// Build the three row streams for a transcript.
///
/// Speaker UUIDs come from a fresh random generator; use
/// [`rows_with_id_gen`] with [`transcript::SequentialIdGen`] when the
/// output must be reproducible.
pub fn rows(transcript: &Transcript, config: &KineticConfig) -> [Document; ROW_COUNT] {
    rows_with_id_gen(transcript, config, &mut UuidIdGen)
}

pub fn rows_with_id_gen(
    transcript: &Transcript,
    config: &KineticConfig,
    id_gen: &mut dyn IdGenerator,
) -> [Document; ROW_COUNT] {
    let language = map_language(&transcript.primary_language);
    let speaker_uuid = id_gen.next_id();

    let merged = merge_punctuation(&transcript.words);
    let mut buckets = Vec::new();
    for sentence in split_sentences(merged) {
        make_buckets(sentence, config.bucket_size(), &mut buckets);
    }
    compute_clear_times(&mut buckets, config);

    let mut row_segments: [Vec<Segment>; ROW_COUNT] = Default::default();
    for bucket in &buckets {
        for (row, word) in bucket.words.iter().enumerate() {
            let duration = (bucket.clear_s - word.start_s).max(config.min_word_display_s);
            row_segments[row].push(Segment {
                start: word.start_s,
                duration,
                speaker: speaker_uuid.clone(),
                language: language.to_string(),
                words: vec![Word {
                    text: word.text.clone(),
                    start: word.start_s,
                    duration,
                    confidence: word.confidence,
                    kind: WordKind::Word,
                    eos: word.eos,
                    tags: Vec::new(),
                }],
            });
        }
    }

    row_segments.map(|segments| Document {
        language: language.to_string(),
        segments,
        speakers: vec![Speaker {
            id: speaker_uuid.clone(),
            name: "Speaker 1".to_string(),
        }],
    })
}

/// Attach standalone punctuation to the preceding word so each row slot
/// shows "världen!" rather than "världen" and a dangling "!". Same rules
/// as the caption adapter: at most three consecutive marks merge, the next
/// one becomes its own slot, and punctuation before the first word is
/// dropped.
fn merge_punctuation(words: &[AssembledWord]) -> Vec<MergedWord> {
    const MAX_PUNCT_MERGE: usize = 3;
    let mut merged: Vec<MergedWord> = Vec::new();
    let mut merge_count = 0;

    for word in words {
        let mergeable = word.is_punct()
            && matches!(
                word.text(),
                "." | "," | "?" | "!" | ";" | ":" | "…" | "—"
            );

        if mergeable && merge_count < MAX_PUNCT_MERGE {
            if let Some(prev) = merged.last_mut() {
                prev.text.push_str(word.text());
                prev.end_s = word.end_s();
                merge_count += 1;
            }
        } else {
            merge_count = 0;
            merged.push(MergedWord {
                text: word.text().to_string(),
                start_s: word.start_s(),
                end_s: word.end_s(),
                confidence: word.confidence(),
                eos: word.eos(),
            });
        }
    }

    merged
}

/// Split at `eos` words; trailing words without one form a final sentence.
fn split_sentences(words: Vec<MergedWord>) -> Vec<Vec<MergedWord>> {
    let mut sentences = Vec::new();
    let mut current = Vec::new();

    for word in words {
        let ends = word.eos;
        current.push(word);
        if ends {
            sentences.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }

    sentences
}

/// Chunk a sentence left-to-right; the final bucket takes the remainder.
fn make_buckets(sentence: Vec<MergedWord>, size: usize, out: &mut Vec<Bucket>) {
    let mut words = sentence.into_iter().peekable();
    while words.peek().is_some() {
        out.push(Bucket {
            words: words.by_ref().take(size).collect(),
            clear_s: 0.0,
        });
    }
}

/// A bucket clears when the next bucket's first word appears, never more
/// than `max_hold_s` after its own last word started. The final bucket of
/// the transcript lingers `final_hold_s` past its last word instead.
fn compute_clear_times(buckets: &mut [Bucket], config: &KineticConfig) {
    for i in 0..buckets.len() {
        let last = buckets[i].words.last().expect("buckets are never empty");
        let cap = last.start_s + config.max_hold_s;

        let clear = match buckets.get(i + 1) {
            Some(next) => next.words[0].start_s,
            None => last.end_s + config.final_hold_s,
        };
        buckets[i].clear_s = clear.min(cap);
    }
}
