//! Helpers for the text around the caret.

use once_cell::sync::Lazy;
use regex::Regex;

static VIETNAMESE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-ZÀ-ỹ\s]+$").unwrap());
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://").unwrap());
static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap());
static CAMEL_HUMP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z][A-Z]").unwrap());

/// Word ending at char index `caret`, with its start index.
pub fn last_word(value: &str, caret: usize, is_boundary: impl Fn(char) -> bool) -> (usize, &str) {
    let caret = caret.min(value.chars().count());
    let end = byte_offset(value, caret);
    let before = &value[..end];
    let start = before
        .char_indices()
        .rev()
        .find(|&(_, c)| is_boundary(c))
        .map_or(0, |(i, c)| i + c.len_utf8());
    let word = &before[start..];
    (caret - word.chars().count(), word)
}

/// Whitespace-delimited token ending at char index `caret`.
pub fn token_before(value: &str, caret: usize) -> &str {
    last_word(value, caret, char::is_whitespace).1
}

pub fn is_vietnamese_word(text: &str) -> bool {
    VIETNAMESE_WORD.is_match(text)
}

/// Emails, URLs, snake_case and camelCase identifiers.
pub fn looks_like_code(token: &str) -> bool {
    EMAIL.is_match(token)
        || URL.is_match(token)
        || (IDENTIFIER.is_match(token) && (token.contains('_') || CAMEL_HUMP.is_match(token)))
}

pub(crate) fn byte_offset(value: &str, char_idx: usize) -> usize {
    value.char_indices().nth(char_idx).map_or(value.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BOUNDARIES;

    fn boundary(c: char) -> bool {
        DEFAULT_BOUNDARIES.contains(c)
    }

    #[test]
    fn last_word_before_caret() {
        assert_eq!(last_word("Xin chao cac ban", 16, boundary), (13, "ban"));
        assert_eq!(last_word("Xin chao cac ban", 12, boundary), (9, "cac"));
        assert_eq!(last_word("Xin chao", 8, boundary), (4, "chao"));
        assert_eq!(last_word("Xin", 3, boundary), (0, "Xin"));
        assert_eq!(last_word("Chào bạn", 8, boundary), (5, "bạn"));
        assert_eq!(last_word("xin.chao", 8, boundary), (4, "chao"));
    }

    #[test]
    fn last_word_empty_cases() {
        assert_eq!(last_word("   ", 3, boundary), (3, ""));
        assert_eq!(last_word("", 0, boundary), (0, ""));
        assert_eq!(last_word("abc", 99, boundary), (0, "abc"));
    }

    #[test]
    fn vietnamese_words() {
        assert!(!is_vietnamese_word(""));
        assert!(!is_vietnamese_word("!@#$%^&*()"));
        assert!(is_vietnamese_word("Tiếng Việt"));
        assert!(is_vietnamese_word("Nguyen"));
        assert!(is_vietnamese_word("Đặng Thái Sơn"));
        assert!(!is_vietnamese_word("hello123"));
        assert!(!is_vietnamese_word("test@domain.com"));
        assert!(!is_vietnamese_word("code_snippet"));
    }

    #[test]
    fn code_like_tokens() {
        assert!(looks_like_code("test@email.com"));
        assert!(looks_like_code("https://abc.com"));
        assert!(looks_like_code("http://abc.com"));
        assert!(looks_like_code("variableName"));
        assert!(looks_like_code("snake_case"));
        assert!(!looks_like_code("Vieejt"));
        assert!(!looks_like_code("tie6ng"));
        assert!(!looks_like_code("Tiếng"));
    }
}
