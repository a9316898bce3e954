/// Render a tenths-scaled integer with two decimal places: 70 -> "7.00"
pub fn format_tenths(value: i64) -> String {
    format!("{:.2}", value as f64 / 10.0)
}

/// Case-insensitive substring match using Unicode lowercasing
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tenths() {
        assert_eq!(format_tenths(70), "7.00");
        assert_eq!(format_tenths(705), "70.50");
        assert_eq!(format_tenths(4), "0.40");
        assert_eq!(format_tenths(60), "6.00");
        assert_eq!(format_tenths(0), "0.00");
        assert_eq!(format_tenths(-15), "-1.50");
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Pikachu", "PIKA"));
        assert!(contains_ignore_case("pikachu", "Chu"));
        assert!(contains_ignore_case("Flabébé", "BÉBÉ"));
        assert!(contains_ignore_case("anything", ""));
        assert!(!contains_ignore_case("Raichu", "pika"));
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("Hello", 3), "Hel");
    }
}
