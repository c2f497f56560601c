//! Canonical form for scanned label text.

/// Clean scanned text for display or storage.
///
/// Keeps ASCII letters, digits, hyphens and whitespace, lowercases the
/// letters, and collapses whitespace runs into single spaces with no leading
/// or trailing space. Everything else (punctuation, symbols, accented letters)
/// is dropped, not replaced.
///
/// The result is a fixed point: normalizing it again returns it unchanged.
pub fn normalize_for_storage(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .map(|c| c.to_ascii_lowercase())
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}
