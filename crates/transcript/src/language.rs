/// ISO 639-1 → BCP-47 locale mapping used by the editor-JSON emitters.
///
/// The upstream service reports bare ISO 639-1 codes; the editor wants
/// full locale tags. Surfaced as a public table so callers can inspect
/// what is supported.
pub const LANGUAGE_MAP: &[(&str, &str)] = &[
    ("sv", "sv-se"),
    ("en", "en-us"),
    ("da", "da-dk"),
    ("no", "nb-no"),
    ("fi", "fi-fi"),
    ("de", "de-de"),
    ("fr", "fr-fr"),
    ("es", "es-es"),
    ("nl", "nl-nl"),
    ("it", "it-it"),
    ("pt", "pt-br"),
    ("ja", "ja-jp"),
    ("ko", "ko-kr"),
    ("zh", "cmn-hans"),
    ("ar", "ar-sa"),
    ("ru", "ru-ru"),
    ("pl", "pl-pl"),
    ("tr", "tr-tr"),
    ("hi", "hi-in"),
];

/// Sentinel the editor accepts for unknown/unsupported languages.
pub const UNKNOWN_LANGUAGE_CODE: &str = "??-??";

/// Map an ISO 639-1 code to its BCP-47 locale.
///
/// Unmapped codes fall back to [`UNKNOWN_LANGUAGE_CODE`] with a warning —
/// an unknown language never fails a conversion.
pub fn map_language(iso_code: &str) -> &'static str {
    match LANGUAGE_MAP.iter().find(|(iso, _)| *iso == iso_code) {
        Some((_, bcp47)) => bcp47,
        None => {
            tracing::warn!(code = iso_code, "no BCP-47 mapping for language code");
            UNKNOWN_LANGUAGE_CODE
        }
    }
}
