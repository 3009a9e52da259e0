// Output formatting — terminal tables for creators and search history.

pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Respects UTF-8 character boundaries, so it never panics on emoji or
/// accented letters the way byte slicing would.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Compact audience count: 950, 12.5K, 3.2M.
pub fn format_count(n: u64) -> String {
    match n {
        n if n >= 1_000_000 => format!("{:.1}M", n as f64 / 1_000_000.0),
        n if n >= 1_000 => format!("{:.1}K", n as f64 / 1_000.0),
        n => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(950), "950");
        assert_eq!(format_count(12_500), "12.5K");
        assert_eq!(format_count(2_000_000), "2.0M");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate_chars("café ☕ time", 6), "café ☕...");
        assert_eq!(truncate_chars("short", 10), "short");
    }
}
