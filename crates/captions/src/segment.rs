//! Caption segmentation over the word stream.
//!
//! Greedy left-to-right grouping produces locally fine but globally poor
//! caption boundaries, so segmentation is a shortest-path dynamic program:
//! `dp[j]` is the minimum cost of captioning `words[..j]`, relaxed over
//! every valid start position inside the lookback window. Speaker markers
//! are forced breaks — a caption may begin at a marker but never step over
//! one. A greedy pass remains as the fallback for constraint sets the DP
//! cannot satisfy.

use std::collections::HashSet;

use crate::config::Config;
use crate::error::Error;
use crate::linebreak::{LineBreak, best_line_break};
use crate::text::{ends_comma, ends_sentence, last_word_clean, visible_len};
use crate::words::CaptionWord;

/// How far past `max_cue_chars` a growing span may overshoot before the
/// inner DP loop stops extending it.
const CUE_OVERSHOOT_SLACK: usize = 10;

/// Spans shorter than this many visible characters are penalised as
/// stragglers unless they close the transcript.
const STRAGGLER_CUE_CHARS: usize = 35;

/// One finished caption cue.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionSegment {
    pub start_s: f64,
    pub end_s: f64,
    /// One or two laid-out lines, speaker dash included when present.
    pub lines: Vec<String>,
    pub has_speaker_prefix: bool,
}

/// A candidate span evaluated during the DP sweep.
struct SpanCost {
    cost: f64,
    segment: CaptionSegment,
}

/// Partition `words` into caption segments under `config`.
///
/// Empty input yields empty output. When neither the DP nor the greedy
/// fallback can honour the hard caps (for instance a single merged word
/// wider than `max_cue_chars`), the whole pass fails with
/// [`Error::SegmentationInfeasible`].
pub fn segment(words: &[CaptionWord], config: &Config) -> Result<Vec<CaptionSegment>, Error> {
    if words.is_empty() {
        return Ok(Vec::new());
    }

    let weak_words: HashSet<&str> = config.weak_end_words.iter().copied().collect();
    let n = words.len();

    // dp[j]: minimum total cost to caption words[..j].
    let mut dp = vec![f64::INFINITY; n + 1];
    let mut back = vec![0usize; n + 1];
    let mut info: Vec<Option<CaptionSegment>> = (0..=n).map(|_| None).collect();
    dp[0] = 0.0;

    for j in 1..=n {
        // A span may begin at a marker but never contain one beyond its
        // first word, so the nearest marker below j bounds the lookback.
        let nearest_marker = (0..j).rev().find(|&i| i > 0 && words[i].is_speaker_marker);
        let min_i = j
            .saturating_sub(config.max_lookback_words)
            .max(nearest_marker.unwrap_or(0));

        for i in (min_i..j).rev() {
            if dp[i].is_infinite() {
                continue;
            }

            let Some(span) = evaluate_span(words, i, j, config, &weak_words) else {
                // Spans only grow leftwards; once over the cap with slack,
                // deeper starts cannot recover.
                match span_text(words, i, j) {
                    Some((text, _)) => {
                        if visible_len(&text) > config.max_cue_chars + CUE_OVERSHOOT_SLACK {
                            break;
                        }
                        continue;
                    }
                    None => continue,
                }
            };

            let total = dp[i] + span.cost;
            if total < dp[j] {
                dp[j] = total;
                back[j] = i;
                info[j] = Some(span.segment);
            }
        }
    }

    if dp[n].is_infinite() {
        return greedy_segment(words, config, &weak_words);
    }

    let mut segments = Vec::new();
    let mut j = n;
    while j > 0 {
        segments.push(info[j].take().expect("reachable dp state has a segment"));
        j = back[j];
    }
    segments.reverse();
    Ok(segments)
}

/// Join the span's visible words, prefixing the speaker dash when the span
/// opens at a marker. `None` when the span holds no visible words.
fn span_text(words: &[CaptionWord], i: usize, j: usize) -> Option<(String, bool)> {
    let span = &words[i..j];
    let has_speaker = span.iter().any(|w| w.is_speaker_marker);

    let mut text = String::new();
    for word in span.iter().filter(|w| !w.is_speaker_marker) {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&word.text);
    }
    if text.is_empty() {
        return None;
    }

    if has_speaker {
        text.insert_str(0, "– ");
    }
    Some((text, has_speaker))
}

fn evaluate_span(
    words: &[CaptionWord],
    i: usize,
    j: usize,
    config: &Config,
    weak_words: &HashSet<&str>,
) -> Option<SpanCost> {
    let n = words.len();
    let (text, has_speaker) = span_text(words, i, j)?;
    if visible_len(&text) > config.max_cue_chars {
        return None;
    }

    let start = words[i].start_s;
    let end = words[j - 1].end_s;
    let lb = best_line_break(&text, start, end, config, weak_words)?;

    let mut cost = span_cost(&text, start, end, &lb, has_speaker, config, weak_words);

    let duration = end - start;
    if j < n {
        // Mid-stream adjustments: nudge boundaries toward sentence starts
        // and away from tiny straggler cues.
        if words[j].is_segment_start {
            cost -= 2.0;
        } else if !ends_sentence(&text) && !ends_comma(&text) {
            cost += 1.0;
        }
        if duration < config.min_cue_dur {
            cost += 2.0;
        }
        if visible_len(&text) < STRAGGLER_CUE_CHARS {
            cost += 1.5;
        }
    }

    Some(SpanCost {
        cost,
        segment: CaptionSegment {
            start_s: start,
            end_s: end,
            lines: lb.lines,
            has_speaker_prefix: has_speaker,
        },
    })
}

fn span_cost(
    text: &str,
    start: f64,
    end: f64,
    lb: &LineBreak,
    has_speaker: bool,
    config: &Config,
    weak_words: &HashSet<&str>,
) -> f64 {
    let w = &config.weights;
    let mut cost = lb.score;

    let cue_len = visible_len(text) as f64;
    let duration = (end - start).max(0.001);

    cost += w.cue_len_deviation * (cue_len - config.target_cue_chars as f64).abs();
    if duration < config.min_cue_dur {
        cost += w.cue_dur_below * (config.min_cue_dur - duration);
    }
    if duration > config.max_cue_dur {
        cost += w.cue_dur_above * (duration - config.max_cue_dur);
    }

    // Boundary quality, by precedence: terminal punctuation, comma-class,
    // weak final word, bare end.
    if ends_sentence(text) {
        cost += w.boundary_punct_bonus;
    } else if ends_comma(text) {
        cost += w.boundary_punct_bonus * 0.3;
    } else if weak_words.contains(last_word_clean(text).as_str()) {
        cost += w.boundary_weak_end;
    } else {
        cost += w.boundary_no_punct;
    }

    if has_speaker {
        cost += w.speaker_change_bonus;
    }

    cost
}

/// Fallback for constraint sets the DP cannot satisfy: extend each span as
/// far as the cue cap allows without crossing a marker, lay it out, repeat.
fn greedy_segment(
    words: &[CaptionWord],
    config: &Config,
    weak_words: &HashSet<&str>,
) -> Result<Vec<CaptionSegment>, Error> {
    let n = words.len();
    let mut segments = Vec::new();
    let mut i = 0;

    while i < n {
        let mut best: Option<(usize, CaptionSegment)> = None;

        for j in (i + 1)..=n.min(i + config.max_lookback_words) {
            // The span may open at a marker but not swallow a later one.
            if j - 1 > i && words[j - 1].is_speaker_marker {
                break;
            }
            let Some((text, has_speaker)) = span_text(words, i, j) else {
                continue;
            };
            if visible_len(&text) > config.max_cue_chars {
                break;
            }

            let start = words[i].start_s;
            let end = words[j - 1].end_s;
            if let Some(lb) = best_line_break(&text, start, end, config, weak_words) {
                best = Some((
                    j,
                    CaptionSegment {
                        start_s: start,
                        end_s: end,
                        lines: lb.lines,
                        has_speaker_prefix: has_speaker,
                    },
                ));
            }
        }

        match best {
            Some((j, segment)) => {
                segments.push(segment);
                i = j;
            }
            // A marker with nothing visible after it cannot form a cue.
            None if words[i].is_speaker_marker => i += 1,
            None => return Err(Error::SegmentationInfeasible),
        }
    }

    Ok(segments)
}
