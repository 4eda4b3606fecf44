//! Tag extraction: matched category keywords plus salient tokens.

use cardmill_core::config::MAX_TAGS;
use cardmill_core::RuleSet;

use crate::title::STOP_WORDS;

/// Maximum salient (non-keyword) tokens added after keyword tags.
const MAX_SALIENT_TOKENS: usize = 5;

/// Collect up to [`MAX_TAGS`] lowercase tags: every category keyword found
/// in the section, then up to five additional distinct tokens longer than
/// four chars that are not stop words, in first-seen order.
pub fn extract_tags(text: &str, rules: &RuleSet) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut tags: Vec<String> = Vec::new();

    'keywords: for keywords in rules.category_keywords.values() {
        for kw in keywords {
            if tags.len() >= MAX_TAGS {
                break 'keywords;
            }
            if lower.contains(kw.as_str()) && !tags.contains(kw) {
                tags.push(kw.clone());
            }
        }
    }

    let mut salient = 0;
    for token in lower.split(|c: char| !c.is_alphanumeric()) {
        if tags.len() >= MAX_TAGS || salient >= MAX_SALIENT_TOKENS {
            break;
        }
        if token.chars().count() > 4
            && !STOP_WORDS.contains(&token)
            && !tags.iter().any(|t| t == token)
        {
            tags.push(token.to_string());
            salient += 1;
        }
    }

    tags
}
