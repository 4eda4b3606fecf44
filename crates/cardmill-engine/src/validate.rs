//! Content meaningfulness gate.
//!
//! Decides whether a string carries enough signal to become a card:
//! rejects placeholders, bare dates and times, and mostly-numeric noise.
//! Pure predicate, no side effects. The pattern tables are behavior —
//! any change here changes which sections survive extraction.

use once_cell::sync::Lazy;
use regex::Regex;

/// Literal placeholder values that never count as content.
const PLACEHOLDERS: &[&str] = &[
    "n/a", "na", "n.a.", "none", "null", "nil", "tbd", "unknown", "not applicable", "-", "--",
    "...",
];

const MONTHS: &str = "jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|jun(?:e)?|jul(?:y)?|aug(?:ust)?|sep(?:tember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

/// Whole-string date formats, evaluated in priority order.
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let bodies = [
        r"\d{1,2}/\d{1,2}/\d{2,4}".to_string(),      // MM/DD/YYYY
        r"\d{4}-\d{1,2}-\d{1,2}".to_string(),        // YYYY-MM-DD
        format!(r"(?:{MONTHS})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?,?\s+\d{{4}}"), // Mon D, YYYY
        format!(r"\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{MONTHS})\.?,?\s+\d{{4}}"), // D Mon YYYY
        r"\d{1,2}\.\d{1,2}\.\d{4}".to_string(),      // DD.MM.YYYY
    ];
    bodies
        .iter()
        .map(|b| Regex::new(&format!("(?i)^{}$", b)).unwrap())
        .collect()
});

/// Whole-string time format: HH:MM[:SS][ AM/PM].
static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\d{1,2}:\d{2}(?::\d{2})?(?:\s*[ap]m)?$").unwrap());

/// Loose (unanchored) date/time hints, used for the short-text rule.
static DATE_TIME_HINTS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let bodies = [
        r"\d{1,2}/\d{1,2}/\d{2,4}".to_string(),
        r"\d{4}-\d{1,2}-\d{1,2}".to_string(),
        format!(r"(?:{MONTHS})\.?\s+\d{{1,2}}"),
        format!(r"\d{{1,2}}\s+(?:{MONTHS})"),
        r"\d{1,2}\.\d{1,2}\.\d{4}".to_string(),
        r"\d{1,2}:\d{2}".to_string(),
    ];
    bodies
        .iter()
        .map(|b| Regex::new(&format!("(?i){}", b)).unwrap())
        .collect()
});

/// Whether the whole trimmed string is a bare date or time.
fn is_date_or_time(trimmed: &str) -> bool {
    DATE_PATTERNS.iter().any(|re| re.is_match(trimmed)) || TIME_PATTERN.is_match(trimmed)
}

/// Whether text is meaningful enough to become card content.
pub fn is_meaningful(text: &str, min_length: usize) -> bool {
    let trimmed = text.trim();
    if trimmed.chars().count() < min_length {
        return false;
    }

    let lower = trimmed.to_lowercase();
    if PLACEHOLDERS.contains(&lower.as_str()) {
        return false;
    }

    // Strip filler characters; what remains must still be substantial.
    let core: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '.')
        .collect();
    if core.chars().count() < min_length / 2 {
        return false;
    }

    if is_date_or_time(trimmed) {
        return false;
    }

    // Mostly-numeric content (dates aside) is noise, not knowledge.
    let non_separator: Vec<char> = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && !",.-/:$%()".contains(*c))
        .collect();
    if !non_separator.is_empty() {
        let digits = non_separator.iter().filter(|c| c.is_ascii_digit()).count();
        if digits as f32 / non_separator.len() as f32 > 0.7 {
            return false;
        }
    }

    // Short fragments that merely mention a date or time.
    let word_count = trimmed.split_whitespace().count();
    if word_count <= 2
        && trimmed.chars().count() < 20
        && DATE_TIME_HINTS.iter().any(|re| re.is_match(trimmed))
    {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_rejected() {
        assert!(!is_meaningful("", 10));
        assert!(!is_meaningful("short", 10));
        assert!(!is_meaningful("123456789", 10));
    }

    #[test]
    fn test_placeholders_rejected() {
        // Length alone catches the short ones; use a lower minimum to
        // exercise the placeholder table itself.
        assert!(!is_meaningful("N/A", 2));
        assert!(!is_meaningful("none", 2));
        assert!(!is_meaningful("NULL", 2));
        assert!(!is_meaningful("not applicable", 2));
    }

    #[test]
    fn test_dates_rejected() {
        assert!(!is_meaningful("12/31/2024", 10));
        assert!(!is_meaningful("2024-12-31", 10));
        assert!(!is_meaningful("January 15, 2025", 10));
        assert!(!is_meaningful("Jan 15, 2025", 10));
        assert!(!is_meaningful("15 January 2025", 10));
        assert!(!is_meaningful("31.12.2024", 10));
    }

    #[test]
    fn test_times_rejected() {
        assert!(!is_meaningful("10:30:00 AM", 10));
        assert!(!is_meaningful("23:59:59", 8));
    }

    #[test]
    fn test_mostly_numeric_rejected() {
        assert!(!is_meaningful("123,456,789.00", 10));
        assert!(!is_meaningful("$1,234,567.89", 10));
    }

    #[test]
    fn test_short_date_mention_rejected() {
        assert!(!is_meaningful("Due 12/31/24", 5));
    }

    #[test]
    fn test_real_content_accepted() {
        assert!(is_meaningful("Quarterly revenue grew faster than projected.", 10));
        assert!(is_meaningful("Review the onboarding checklist with the team", 10));
        // Dates embedded in prose are fine; only bare dates are noise.
        assert!(is_meaningful(
            "The launch is planned for January 15, 2025 pending review.",
            10
        ));
    }

    #[test]
    fn test_filler_stripped_rejected() {
        assert!(!is_meaningful("a . b - c .", 10));
        assert!(!is_meaningful("- - - - - - - -", 10));
    }
}
