//! Title synthesis: first line, salient words, then a typed fallback.

use cardmill_core::config::MAX_FIRST_LINE_TITLE_LEN;
use cardmill_core::CardType;

/// Words too common to be salient for titles or tags.
pub(crate) const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "this", "that", "with", "have", "from", "they", "been", "were", "will",
    "would", "there", "their", "what", "about", "which", "when", "make", "like", "time",
    "just", "know", "take", "into", "your", "some", "could", "them", "than", "then", "also",
    "more", "these", "other", "should", "after", "being", "over", "such", "where", "most",
    "through", "before", "between", "because", "during", "under", "while",
];

/// Derive a human-readable title for a section. Never empty.
pub fn synthesize_title(text: &str, card_type: CardType) -> String {
    // Primary: the first line, stripped of bullet markers and quotes.
    if let Some(first_line) = text.lines().next() {
        let cleaned = first_line
            .trim()
            .trim_start_matches(['-', '•', '*'])
            .trim()
            .trim_matches(['"', '\u{201c}', '\u{201d}', '\'', '\u{2018}', '\u{2019}'])
            .trim();
        let len = cleaned.chars().count();
        if len > 0 && len < MAX_FIRST_LINE_TITLE_LEN {
            return cleaned.to_string();
        }
    }

    // Fallback: first three salient words, capitalized.
    let mut picked: Vec<String> = Vec::new();
    for token in text.split(|c: char| !c.is_alphanumeric()) {
        if picked.len() >= 3 {
            break;
        }
        let lower = token.to_lowercase();
        if lower.chars().count() <= 3 || STOP_WORDS.contains(&lower.as_str()) {
            continue;
        }
        let capitalized = capitalize(&lower);
        if !picked.contains(&capitalized) {
            picked.push(capitalized);
        }
    }
    if !picked.is_empty() {
        return picked.join(" ");
    }

    format!("{} Card", card_type.display_name())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line_used() {
        let text = "Pricing model overview\nDetails follow in the body.";
        assert_eq!(
            synthesize_title(text, CardType::Concept),
            "Pricing model overview"
        );
    }

    #[test]
    fn test_bullet_and_quotes_stripped() {
        assert_eq!(
            synthesize_title("- \"Ship the beta\"\nmore", CardType::Action),
            "Ship the beta"
        );
    }

    #[test]
    fn test_long_first_line_falls_back_to_words() {
        let text = format!(
            "migration strategy requires downtime {}",
            "filler ".repeat(20)
        );
        let title = synthesize_title(&text, CardType::Concept);
        assert_eq!(title, "Migration Strategy Requires");
    }

    #[test]
    fn test_final_fallback_is_typed() {
        let text = "a b c d e f g h i j k l m n o p q r s t u v w x y z a b c d e f g h i j k l m n o p q r s t u v w x y z a b c d";
        assert_eq!(synthesize_title(text, CardType::Quote), "Quote Card");
    }
}
