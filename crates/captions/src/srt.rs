//! SRT rendering with final display-timing rules.
//!
//! Segmentation decides what each cue says; this pass decides exactly when
//! it is on screen: every cue gets at least `min_display_dur`, and no cue
//! bleeds into its successor (a 50 ms gap is always kept).

use crate::config::Config;
use crate::segment::CaptionSegment;

/// Gap enforced between consecutive cues, seconds.
const CUE_GAP_S: f64 = 0.05;

/// Render segments as an SRT document: 1-based indices,
/// `HH:MM:SS,mmm --> HH:MM:SS,mmm` timing lines, LF endings, one blank
/// line after every cue.
pub fn srt(segments: &[CaptionSegment], config: &Config) -> String {
    let mut out = String::new();

    for (i, segment) in segments.iter().enumerate() {
        let start = segment.start_s;
        let mut end = segment.end_s;

        if end - start < config.min_display_dur {
            end = start + config.min_display_dur;
        }
        if let Some(next) = segments.get(i + 1) {
            if end > next.start_s - CUE_GAP_S {
                end = next.start_s - CUE_GAP_S;
            }
        }

        out.push_str(&format!("{}\n", i + 1));
        out.push_str(&format!("{} --> {}\n", srt_time(start), srt_time(end)));
        for line in &segment.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

fn srt_time(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0) as u64;
    let h = total_ms / 3_600_000;
    let m = total_ms % 3_600_000 / 60_000;
    let s = total_ms % 60_000 / 1000;
    let ms = total_ms % 1000;
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}
