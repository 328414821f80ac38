//! Caption layout configuration.
//!
//! Two delivery targets exist: broadcast (16:9, two lines of 42) and social
//! (9:16 vertical, one line of 25). Each is a plain value — configuration is
//! threaded explicitly through every call, so broadcast and social runs can
//! share a process without interfering. Derive a custom configuration by
//! taking a preset and updating fields on the copy; the presets themselves
//! are never mutated.

/// Scalar weights for the segmentation and line-break cost functions.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights {
    pub len_deviation: f64,
    pub balance: f64,
    pub orphan: f64,
    pub weak_end: f64,
    pub short_end: f64,
    pub punct_bonus: f64,
    pub comma_bonus: f64,
    pub single_line_long: f64,
    pub cps_above_target: f64,
    pub cps_above_max: f64,
    pub cue_len_deviation: f64,
    pub cue_dur_below: f64,
    pub cue_dur_above: f64,
    pub boundary_weak_end: f64,
    pub boundary_punct_bonus: f64,
    pub boundary_no_punct: f64,
    pub speaker_change_bonus: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Hard cap on lines per caption (1 or 2).
    pub max_lines: usize,
    /// Hard cap on visible characters per line.
    pub max_line_chars: usize,
    /// Hard cap on total visible characters per caption.
    pub max_cue_chars: usize,
    /// Soft per-line length target.
    pub target_line_chars: usize,
    /// Single-line length at which splitting starts being favoured.
    pub prefer_split_over: usize,
    /// Soft floor below which a line counts as orphaned.
    pub min_line_chars: usize,
    /// Reading-speed ceilings, characters per second.
    pub target_cps: f64,
    pub max_cps: f64,
    /// Soft caption-length target.
    pub target_cue_chars: usize,
    /// Caption duration bounds, seconds.
    pub min_cue_dur: f64,
    pub max_cue_dur: f64,
    /// Display-time floor enforced at SRT emission.
    pub min_display_dur: f64,
    /// How many words back the dynamic program may look for a cue start.
    pub max_lookback_words: usize,
    /// Words that read poorly as line terminators, per language.
    pub weak_end_words: &'static [&'static str],
    pub weights: Weights,
}

impl Config {
    /// Broadcast preset: 16:9, traditional two-line TV subtitles.
    pub fn broadcast() -> Self {
        Self {
            max_lines: 2,
            max_line_chars: 42,
            max_cue_chars: 84,
            target_line_chars: 32,
            prefer_split_over: 36,
            min_line_chars: 12,
            target_cps: 13.0,
            max_cps: 17.3,
            target_cue_chars: 50,
            min_cue_dur: 1.5,
            max_cue_dur: 7.0,
            min_display_dur: 1.2,
            max_lookback_words: 18,
            weak_end_words: WEAK_END_WORDS_SV,
            weights: Weights {
                len_deviation: 0.20,
                balance: 0.12,
                orphan: 2.5,
                weak_end: 8.0,
                short_end: 1.5,
                punct_bonus: -2.5,
                comma_bonus: -1.2,
                single_line_long: 1.2,
                cps_above_target: 0.8,
                cps_above_max: 3.0,
                cue_len_deviation: 0.08,
                cue_dur_below: 2.5,
                cue_dur_above: 0.5,
                boundary_weak_end: 4.0,
                boundary_punct_bonus: -3.5,
                boundary_no_punct: 2.0,
                speaker_change_bonus: -5.0,
            },
        }
    }

    /// Social preset: 9:16 vertical video, single-line captions.
    pub fn social() -> Self {
        Self {
            max_lines: 1,
            max_line_chars: 25,
            max_cue_chars: 25,
            target_line_chars: 18,
            prefer_split_over: 18,
            min_line_chars: 6,
            target_cps: 12.0,
            max_cps: 15.0,
            target_cue_chars: 16,
            min_cue_dur: 0.8,
            max_cue_dur: 3.5,
            min_display_dur: 0.6,
            max_lookback_words: 6,
            weak_end_words: WEAK_END_WORDS_SV,
            weights: Weights {
                len_deviation: 0.15,
                balance: 0.0,
                orphan: 2.0,
                weak_end: 5.0,
                short_end: 0.8,
                punct_bonus: -3.5,
                comma_bonus: -2.0,
                single_line_long: 3.0,
                cps_above_target: 1.0,
                cps_above_max: 4.0,
                cue_len_deviation: 0.10,
                cue_dur_below: 1.5,
                cue_dur_above: 1.0,
                boundary_weak_end: 4.0,
                boundary_punct_bonus: -4.0,
                boundary_no_punct: 1.5,
                speaker_change_bonus: -4.0,
            },
        }
    }

    /// Resolve a preset by name. `"some"` is an alias for `"social"`.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "broadcast" => Some(Self::broadcast()),
            "social" | "some" => Some(Self::social()),
            _ => None,
        }
    }
}

/// Swedish function words (conjunctions, prepositions, pronouns,
/// auxiliaries) that leave a line feeling unfinished when they end it.
pub const WEAK_END_WORDS_SV: &[&str] = &[
    "och", "att", "som", "men", "eller", "utan", "eftersom", "medan", // conjunctions
    "i", "på", "av", "för", "med", "till", "om", "från", "kring", "mot", "via", "under", "över",
    "mellan", "innan", "efter", "trots", // prepositions
    "när", "då", "så", // adverbs
    "det", "de", "den", "detta", "dessa", "man", "vi", "jag", "du", "han", "hon", "ni", "en",
    "ett", "där", "här", "ju", // pronouns and articles
    "är", "var", "blir", "ska", "kan", "har", "hade", "får", "vill", "kommer",
    "inte", // auxiliaries
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_lookup_resolves_names_and_alias() {
        assert_eq!(Config::preset("broadcast").unwrap().max_line_chars, 42);
        assert_eq!(Config::preset("social").unwrap().max_line_chars, 25);
        assert_eq!(Config::preset("some"), Config::preset("social"));
        assert!(Config::preset("cinema").is_none());
    }

    #[test]
    fn derived_config_leaves_preset_untouched() {
        let mut custom = Config::broadcast();
        custom.max_line_chars = 37;
        assert_eq!(Config::broadcast().max_line_chars, 42);
    }

    #[test]
    fn social_is_single_line() {
        let cfg = Config::social();
        assert_eq!(cfg.max_lines, 1);
        assert_eq!(cfg.max_cue_chars, cfg.max_line_chars);
    }
}
