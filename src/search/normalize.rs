use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Folds text for accent- and case-insensitive comparison.
///
/// "Águas Claras" and " aguas claras " both become "aguas claras".
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// Substring match after folding both sides. An empty haystack never matches.
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    let haystack = normalize(haystack);
    if haystack.is_empty() {
        return false;
    }
    haystack.contains(&normalize(needle))
}
