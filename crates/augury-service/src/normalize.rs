/// Cache identity for free text: trimmed, internal whitespace collapsed to
/// single spaces, lowercased.
pub fn normalize_query(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
