/// Collapses runs of whitespace into single spaces and trims the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of whitespace-separated words containing at least one alphanumeric char
pub fn word_count(text: &str) -> usize {
    text.split_whitespace()
        .filter(|w| w.chars().any(char::is_alphanumeric))
        .count()
}

/// Splits text into sentences on `.`, `!` and `?`
pub fn sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| word_count(s) > 0)
        .collect()
}

/// Average words per sentence, 0 for text without sentences
pub fn average_sentence_length(text: &str) -> f64 {
    let sentences = sentences(text);
    if sentences.is_empty() {
        return 0.0;
    }
    let words: usize = sentences.iter().map(|s| word_count(s)).sum();
    words as f64 / sentences.len() as f64
}

/// Cuts text to at most `max_chars` characters, on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \n\t b  "), "a b");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_word_count_ignores_punctuation_tokens() {
        assert_eq!(word_count("Hello - world !"), 2);
        assert_eq!(word_count("Welcome"), 1);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn test_average_sentence_length() {
        assert_eq!(average_sentence_length("One two. Three four five six!"), 3.0);
        assert_eq!(average_sentence_length(""), 0.0);
    }

    #[test]
    fn test_truncate_chars_respects_multibyte() {
        assert_eq!(truncate_chars("Jetzt kostenlos prüfen", 20), "Jetzt kostenlos prüf");
        assert_eq!(truncate_chars("short", 50), "short");
    }
}
