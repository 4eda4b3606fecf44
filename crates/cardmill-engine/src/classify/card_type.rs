//! Card-type scoring: keyword hits plus structural pattern bonuses.
//!
//! Additive integer scoring per type; the highest total wins. Ties break
//! toward the earlier [`CardType`] variant, and a zero maximum falls back
//! to `Concept`.

use once_cell::sync::Lazy;
use regex::Regex;

use cardmill_core::{CardType, RuleSet};

/// Label prefixes that mark action content, anchored at line/sentence start.
static ACTION_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*(?:action\s+items?|actions?|to-?dos?|tasks?|next\s+steps?|follow-?ups?|deliverables?|milestones?|assign(?:ed)?|owners?|responsible|deadlines?|due\s+dates?|timelines?)\b\s*:?",
    )
    .unwrap()
});

/// Numbered list entry: `"1. Capitalized…"`.
static NUMBERED_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*\d+\.\s+[A-Z]").unwrap());

/// Quoted span with non-trivial content (straight or curly double quotes).
static QUOTED_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new("\"[^\"\n]{2,}\"|\u{201c}[^\u{201d}\n]{2,}\u{201d}").unwrap());

/// Modal/intent phrases; each contributes at most once.
const MODAL_PHRASES: &[&str] = &[
    "need to", "should", "must", "will", "going to", "plan to", "intend to",
];

/// Classify a section against the rule set's card-type keywords and the
/// structural heuristics. Deterministic: same input, same output.
pub fn classify_type(text: &str, rules: &RuleSet) -> CardType {
    let lower = text.to_lowercase();
    let lines: Vec<&str> = split_units(text);

    let mut best = CardType::Concept;
    let mut best_score = 0i32;

    for &card_type in CardType::all() {
        let mut score = 0i32;

        if let Some(keywords) = rules.card_type_keywords.get(&card_type) {
            score += keywords.iter().filter(|kw| lower.contains(kw.as_str())).count() as i32;
        }

        score += match card_type {
            CardType::Checklist => checklist_bonus(text),
            CardType::Quote => quote_bonus(text),
            CardType::Action => action_bonus(text, &lower, &lines, rules),
            _ => 0,
        };

        if score > best_score {
            best = card_type;
            best_score = score;
        }
    }

    best
}

/// +2 when any line starts with a bullet marker.
fn checklist_bonus(text: &str) -> i32 {
    let bulleted = text.lines().any(|line| {
        let t = line.trim_start();
        matches!(t.chars().next(), Some('-') | Some('•') | Some('*'))
            && t.chars().nth(1).map(|c| c.is_whitespace()).unwrap_or(true)
    });
    if bulleted {
        2
    } else {
        0
    }
}

/// +3 when the text contains a quoted span.
fn quote_bonus(text: &str) -> i32 {
    if QUOTED_SPAN.is_match(text) {
        3
    } else {
        0
    }
}

fn action_bonus(text: &str, lower: &str, lines: &[&str], rules: &RuleSet) -> i32 {
    let mut score = 0i32;

    // +3 per line/sentence carrying an action label prefix.
    score += lines.iter().filter(|l| ACTION_PREFIX.is_match(l)).count() as i32 * 3;

    // +1 per imperative line (first word is an action verb), capped at +3.
    let imperative = lines
        .iter()
        .filter(|l| {
            l.split_whitespace()
                .next()
                .map(|w| {
                    let w = w
                        .trim_matches(|c: char| !c.is_alphanumeric())
                        .to_lowercase();
                    rules.action_verbs.iter().any(|v| *v == w)
                })
                .unwrap_or(false)
        })
        .count() as i32;
    score += imperative.min(3);

    // +2 for a numbered-list entry.
    if NUMBERED_LIST.is_match(text) {
        score += 2;
    }

    // Each distinct action verb found anywhere contributes at most 2,
    // regardless of how often it repeats.
    for verb in &rules.action_verbs {
        let pattern = format!(r"\b{}\b", regex::escape(verb));
        if let Ok(re) = Regex::new(&pattern) {
            let occurrences = re.find_iter(lower).count() as i32;
            score += occurrences.min(2);
        }
    }

    // +1 per modal/intent phrase present, word-boundary matched so
    // "willing" and "shoulder" don't count as "will" and "should".
    for phrase in MODAL_PHRASES {
        let pattern = format!(r"\b{}\b", regex::escape(phrase));
        if let Ok(re) = Regex::new(&pattern) {
            if re.is_match(lower) {
                score += 1;
            }
        }
    }

    score
}

/// A "line" for imperative/prefix detection: text split on newlines or
/// sentence-ending periods.
fn split_units(text: &str) -> Vec<&str> {
    text.split(['\n', '.'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
