//! Language utilities for log output
//!
//! Language identifiers are opaque to the translation engines and are sent
//! exactly as the user typed them. These helpers only resolve a readable
//! name for status messages.

use isolang::Language;

/// Look up an ISO 639-1 or ISO 639-3 code, ignoring any region subtag
pub fn lookup_language(code: &str) -> Option<Language> {
    let normalized_code = code.trim().to_lowercase();
    let primary = normalized_code
        .split(['-', '_'])
        .next()
        .unwrap_or_default();

    match primary.len() {
        2 => Language::from_639_1(primary),
        3 => Language::from_639_3(primary),
        _ => None,
    }
}

/// Get the English language name for a code
pub fn get_language_name(code: &str) -> Option<String> {
    lookup_language(code).map(|lang| lang.to_name().to_string())
}

/// Describe a code for status messages, e.g. `Chinese (zh-cn)`.
///
/// `auto` and unrecognized codes are returned unchanged.
pub fn describe_language(code: &str) -> String {
    match get_language_name(code) {
        Some(name) => format!("{} ({})", name, code),
        None => code.to_string(),
    }
}
