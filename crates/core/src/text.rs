//! Text comparison helpers shared by search and filtering.

/// Trims surrounding whitespace and lowercases.
///
/// Apply to both the query and the searched fields so matching ignores case
/// and padding.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
