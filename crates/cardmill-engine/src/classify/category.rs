//! Category scoring with a contextual fallback chain.
//!
//! Keyword scoring first: a distinct match is worth 1 plus a bonus per
//! repeat occurrence. When nothing matches, an ordered indicator-word
//! table is evaluated first-match-wins, ending in `"General"`.

use cardmill_core::RuleSet;

/// Fallback category when every other signal is absent.
pub const GENERAL_CATEGORY: &str = "General";

/// Contextual inference table, evaluated top to bottom, first match wins.
/// The row order is behavior: reordering changes classification.
pub(crate) const CONTEXT_RULES: &[(&str, &[&str])] = &[
    ("Financial Management", &[
        "budget", "cost", "revenue", "profit", "expense", "financial", "invoice", "payment",
        "cash flow",
    ]),
    ("Communication", &[
        "meeting", "presentation", "discussion", "email", "conference", "agenda", "memo",
    ]),
    ("Strategic Planning", &[
        "goal", "objective", "strategy", "vision", "mission", "roadmap", "long-term",
    ]),
    ("Problem Solving", &[
        "problem", "issue", "challenge", "solution", "resolve", "troubleshoot", "root cause",
    ]),
    ("Learning & Development", &[
        "learn", "study", "training", "course", "skill", "tutorial", "education",
    ]),
    ("Customer Service", &[
        "customer", "client", "support ticket", "satisfaction", "feedback", "complaint",
    ]),
    ("Human Resources", &[
        "employee", "staff", "hiring", "recruitment", "onboarding", "payroll",
    ]),
    ("Sales", &[
        "sale", "sales", "selling", "pipeline", "prospect", "quota", "deal",
    ]),
    ("Marketing", &[
        "market", "marketing", "brand", "campaign", "advertising", "promotion",
    ]),
    ("Operations", &[
        "system", "process", "workflow", "operations", "logistics", "procedure",
    ]),
    ("Technology", &[
        "technology", "software", "digital", "computer", "data", "platform", "automation",
    ]),
];

/// Classify a section into a category by rule-set keywords, falling back to
/// contextual inference and finally [`GENERAL_CATEGORY`].
///
/// Tie-break is the category map's iteration order (lexicographic by name);
/// the first category at the maximum wins.
pub fn classify_category(text: &str, rules: &RuleSet) -> String {
    let lower = text.to_lowercase();

    let mut best: Option<&str> = None;
    let mut best_score = 0usize;

    for (category, keywords) in &rules.category_keywords {
        let mut score = 0usize;
        for kw in keywords {
            let occurrences = lower.matches(kw.as_str()).count();
            if occurrences > 0 {
                // 1 for the distinct match, plus a bonus per repeat.
                score += occurrences;
            }
        }
        if score > best_score {
            best = Some(category);
            best_score = score;
        }
    }

    if let Some(category) = best {
        return category.to_string();
    }

    infer_from_context(&lower)
        .unwrap_or(GENERAL_CATEGORY)
        .to_string()
}

/// First contextual rule whose indicator words appear in the text.
pub(crate) fn infer_from_context(text_lower: &str) -> Option<&'static str> {
    CONTEXT_RULES
        .iter()
        .find(|(_, indicators)| indicators.iter().any(|w| text_lower.contains(w)))
        .map(|(category, _)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn keyword_rules(categories: &[(&str, &[&str])]) -> RuleSet {
        let mut rules = RuleSet::default_rules();
        rules.category_keywords = categories
            .iter()
            .map(|(name, kws)| {
                (
                    name.to_string(),
                    kws.iter().map(|k| k.to_string()).collect(),
                )
            })
            .collect::<BTreeMap<_, _>>();
        rules
    }

    #[test]
    fn test_keyword_match_wins() {
        let rules = keyword_rules(&[("Gardening", &["compost", "seedling"])]);
        assert_eq!(
            classify_category("The compost pile needs turning weekly", &rules),
            "Gardening"
        );
    }

    #[test]
    fn test_repeat_occurrences_add_bonus() {
        let rules = keyword_rules(&[
            ("A", &["shared"]),
            ("B", &["shared", "shared topic"]),
        ]);
        // "shared" appears twice for B's two keyword hits; A sees the same
        // word twice too, so the bonus decides nothing here — but the
        // distinct "shared topic" keyword does.
        let text = "This shared topic mentions shared work";
        assert_eq!(classify_category(text, &rules), "B");
    }

    #[test]
    fn test_tie_breaks_lexicographically() {
        let rules = keyword_rules(&[("Zeta", &["widget"]), ("Alpha", &["widget"])]);
        assert_eq!(
            classify_category("a widget appeared in the report", &rules),
            "Alpha"
        );
    }

    #[test]
    fn test_contextual_fallback() {
        let rules = keyword_rules(&[]);
        assert_eq!(
            classify_category("we must resolve this issue before launch", &rules),
            "Problem Solving"
        );
        assert_eq!(
            classify_category("the quarterly budget exceeded its cost ceiling", &rules),
            "Financial Management"
        );
    }

    #[test]
    fn test_contextual_priority_order() {
        // "budget" (Financial, row 1) beats "meeting" (Communication, row 2).
        let rules = keyword_rules(&[]);
        assert_eq!(
            classify_category("the budget meeting ran long", &rules),
            "Financial Management"
        );
    }

    #[test]
    fn test_general_when_nothing_matches() {
        let rules = keyword_rules(&[]);
        assert_eq!(
            classify_category("lorem ipsum dolor sit amet consectetur", &rules),
            GENERAL_CATEGORY
        );
    }
}
