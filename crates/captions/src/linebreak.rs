//! Line-break search for a single caption.
//!
//! Candidates are the single-line layout plus every two-word-boundary split
//! (when the configuration allows two lines). Each candidate gets a score
//! from length deviation, balance, orphaned lines, weak or very short words
//! before the break, punctuation alignment, and reading speed; the lowest
//! score wins. Hard caps are absolute — a candidate with any over-long line
//! is never produced.

use std::collections::HashSet;

use crate::config::Config;
use crate::text::{ends_comma, ends_sentence, last_word_clean, visible_len};

/// Guard against zero-duration cues in reading-speed calculations.
const MIN_CUE_SECONDS: f64 = 0.001;

#[derive(Debug, Clone)]
pub(crate) struct LineBreak {
    /// One or two lines, none exceeding `max_line_chars` visible characters.
    pub(crate) lines: Vec<String>,
    pub(crate) score: f64,
}

/// Find the best layout for `text` shown from `start` to `end` seconds.
///
/// Returns `None` when no layout satisfies the hard caps.
pub(crate) fn best_line_break(
    text: &str,
    start: f64,
    end: f64,
    config: &Config,
    weak_words: &HashSet<&str>,
) -> Option<LineBreak> {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return None;
    }

    let mut best: Option<LineBreak> = None;
    let mut consider = |candidate: LineBreak| {
        if best.as_ref().is_none_or(|b| candidate.score < b.score) {
            best = Some(candidate);
        }
    };

    if visible_len(&text) <= config.max_line_chars {
        consider(LineBreak {
            score: score_single_line(&text, start, end, config),
            lines: vec![text.clone()],
        });
    }

    if config.max_lines >= 2 {
        for split in 1..words.len() {
            let line1 = words[..split].join(" ");
            let line2 = words[split..].join(" ");
            if visible_len(&line1) > config.max_line_chars
                || visible_len(&line2) > config.max_line_chars
            {
                continue;
            }
            consider(LineBreak {
                score: score_two_lines(&line1, &line2, &text, start, end, config, weak_words),
                lines: vec![line1, line2],
            });
        }
    }

    best
}

fn score_single_line(text: &str, start: f64, end: f64, config: &Config) -> f64 {
    let w = &config.weights;
    let length = visible_len(text);
    let mut score = w.len_deviation * (length as f64 - config.target_line_chars as f64).abs();

    if length > config.prefer_split_over {
        score += w.single_line_long * (length - config.prefer_split_over) as f64;
    }

    score + cps_penalty(length, start, end, config)
}

fn score_two_lines(
    line1: &str,
    line2: &str,
    full_text: &str,
    start: f64,
    end: f64,
    config: &Config,
    weak_words: &HashSet<&str>,
) -> f64 {
    let w = &config.weights;
    let len1 = visible_len(line1);
    let len2 = visible_len(line2);
    let target = config.target_line_chars as f64;

    let mut score = w.len_deviation * ((len1 as f64 - target).abs() + (len2 as f64 - target).abs());
    score += w.balance * (len1 as f64 - len2 as f64).abs();

    let min_len = len1.min(len2);
    if min_len < config.min_line_chars {
        score += w.orphan * (config.min_line_chars - min_len) as f64;
    }

    let break_word = last_word_clean(line1);
    if weak_words.contains(break_word.as_str()) {
        score += w.weak_end;
    }
    if !break_word.is_empty() && break_word.chars().count() <= 2 {
        score += w.short_end;
    }

    if ends_sentence(line1) {
        score += w.punct_bonus;
    } else if ends_comma(line1) {
        score += w.comma_bonus;
    }

    score + cps_penalty(visible_len(full_text), start, end, config)
}

fn cps_penalty(length: usize, start: f64, end: f64, config: &Config) -> f64 {
    let w = &config.weights;
    let duration = (end - start).max(MIN_CUE_SECONDS);
    let cps = length as f64 / duration;

    let mut penalty = 0.0;
    if cps > config.target_cps {
        penalty += w.cps_above_target * (cps - config.target_cps);
    }
    if cps > config.max_cps {
        penalty += w.cps_above_max * (cps - config.max_cps);
    }
    penalty
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weak(config: &Config) -> HashSet<&'static str> {
        config.weak_end_words.iter().copied().collect()
    }

    fn break_lines(text: &str, start: f64, end: f64, config: &Config) -> Vec<String> {
        best_line_break(text, start, end, config, &weak(config))
            .unwrap()
            .lines
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let config = Config::broadcast();
        let lines = break_lines("Hej och välkommen hit.", 0.0, 2.0, &config);
        assert_eq!(lines, ["Hej och välkommen hit."]);
    }

    #[test]
    fn long_text_splits_into_two_lines_under_cap() {
        let config = Config::broadcast();
        let lines = break_lines(
            "Det här är en ganska lång mening som aldrig får plats på en enda rad.",
            0.0,
            5.0,
            &config,
        );
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(visible_len(line) <= config.max_line_chars);
        }
    }

    #[test]
    fn social_never_produces_two_lines() {
        let config = Config::social();
        assert!(
            best_line_break(
                "En text som är alldeles för lång för en social rad",
                0.0,
                3.0,
                &config,
                &weak(&config),
            )
            .is_none()
        );
    }

    #[test]
    fn break_avoids_weak_word_at_line_end() {
        let config = Config::broadcast();
        let lines = break_lines(
            "Vi har pratat mycket om programmet och vi fortsätter gärna imorgon.",
            0.0,
            5.0,
            &config,
        );
        assert_eq!(lines.len(), 2);
        let break_word = last_word_clean(&lines[0]);
        assert!(
            !weak(&config).contains(break_word.as_str()),
            "line 1 ends with weak word {break_word:?}: {lines:?}"
        );
    }

    #[test]
    fn markup_does_not_count_toward_line_length() {
        let config = Config::broadcast();
        let lines = break_lines("<i>Hej och välkommen hit allihop.</i>", 0.0, 3.0, &config);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn oversized_single_word_has_no_layout() {
        let config = Config::social();
        let text = "a".repeat(config.max_line_chars + 1);
        assert!(best_line_break(&text, 0.0, 2.0, &config, &weak(&config)).is_none());
    }
}
