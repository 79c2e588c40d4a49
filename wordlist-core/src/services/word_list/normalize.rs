/// Trimmed, lowercased form used for duplicate detection and search.
pub fn fold(text: &str) -> String {
    text.trim().to_lowercase()
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
