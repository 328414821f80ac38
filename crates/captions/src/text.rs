//! Text measurement and boundary predicates.
//!
//! All length checks count Unicode scalar values after stripping `<…>`
//! markup — styling tags occupy no screen columns.

/// Remove complete `<…>` tags. A `<` with no closing `>` (or an empty
/// `<>`) is visible text, not markup.
pub(crate) fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(i) = rest.find('<') {
        out.push_str(&rest[..i]);
        let tail = &rest[i..];
        match tail[1..].find('>') {
            Some(j) if j > 0 => rest = &tail[j + 2..],
            _ => {
                out.push('<');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Visible character count: scalar values after tag stripping.
pub(crate) fn visible_len(s: &str) -> usize {
    strip_tags(s).chars().count()
}

const LEADING_PUNCT: &[char] = &['"', '“', '”', '\'', '('];
const TRAILING_PUNCT: &[char] = &[
    '.', ',', '!', '?', '…', ':', ';', ')', ']', '"', '“', '”', '\'',
];

/// Strip surrounding quotes/brackets/punctuation from a single word.
pub(crate) fn strip_punct(word: &str) -> &str {
    word.trim_start_matches(LEADING_PUNCT)
        .trim_end_matches(TRAILING_PUNCT)
}

/// Last word of a line, lowercased and stripped of punctuation — the token
/// checked against the weak-word list at break points.
pub(crate) fn last_word_clean(line: &str) -> String {
    strip_tags(line)
        .split_whitespace()
        .rev()
        .map(|w| strip_punct(w).to_lowercase())
        .find(|w| !w.is_empty())
        .unwrap_or_default()
}

/// True if the line ends with sentence punctuation (`.`, `!`, `?`, `…`).
pub(crate) fn ends_sentence(line: &str) -> bool {
    matches!(
        strip_tags(line).trim_end().chars().next_back(),
        Some('.' | '!' | '?' | '…')
    )
}

/// True if the line ends with comma-class punctuation (`,`, `;`, `:`).
pub(crate) fn ends_comma(line: &str) -> bool {
    matches!(
        strip_tags(line).trim_end().chars().next_back(),
        Some(',' | ';' | ':')
    )
}
