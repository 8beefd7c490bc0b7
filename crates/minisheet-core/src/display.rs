/// Shorten cell text for grid display.
///
/// Returns the input unchanged when it fits in `limit` characters; otherwise
/// the first `limit - 3` characters followed by `"..."`. Limits below 3 are
/// floored to 3, so the smallest possible output is the bare marker.
///
/// Counts `char`s rather than bytes so multi-byte text is never split inside
/// a code point. Display-only: stored cell content is never truncated.
pub fn truncate_with_ellipsis(text: &str, limit: usize) -> String {
    let limit = limit.max(3);
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit - 3).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(truncate_with_ellipsis("hi", 8), "hi");
        assert_eq!(truncate_with_ellipsis("", 8), "");
    }

    #[test]
    fn test_exact_fit_unchanged() {
        assert_eq!(truncate_with_ellipsis("12345678", 8), "12345678");
    }

    #[test]
    fn test_long_text_truncated() {
        assert_eq!(truncate_with_ellipsis("hello world", 8), "hello...");
    }

    #[test]
    fn test_limit_below_three_floors_to_marker() {
        assert_eq!(truncate_with_ellipsis("hello", 0), "...");
        assert_eq!(truncate_with_ellipsis("hello", 2), "...");
        assert_eq!(truncate_with_ellipsis("hi", 0), "hi");
    }

    #[test]
    fn test_multibyte_text_counts_chars() {
        // 6 chars, 18 bytes
        assert_eq!(truncate_with_ellipsis("日本語日本語", 8), "日本語日本語");
        assert_eq!(truncate_with_ellipsis("日本語日本語日本語", 8), "日本語日本...");
    }
}
