//! String helpers for diagnostics.

/// Truncate a string to a maximum byte length with ellipsis (UTF-8 safe)
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(3).min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

/// Collapse whitespace runs (including newlines) and truncate, for one-line
/// log previews of backend payloads.
pub fn preview(s: &str, max_len: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&collapsed, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        // "é" is 2 bytes; target of 3 bytes falls inside the second one
        assert_eq!(truncate("éééé", 6), "é...");
    }

    #[test]
    fn test_preview_collapses_lines() {
        let body = "{\n  \"error\": {\n    \"code\": 500\n  }\n}";
        assert_eq!(preview(body, 100), "{ \"error\": { \"code\": 500 } }");
        assert_eq!(preview(body, 10), "{ \"erro...");
    }
}
