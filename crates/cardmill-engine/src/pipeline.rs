//! Extraction pipeline: raw text or sheet rows → card candidates.

use std::sync::Arc;

use tracing::{debug, info};

use cardmill_core::config::{MAX_SNIPPET_LEN, MAX_TITLE_LEN, MIN_MEANINGFUL_LEN};
use cardmill_core::{
    truncate_with_ellipsis, validate_rules, CardCandidate, Error, Provenance, Result, RuleSet,
    Schema, TextSection,
};

use crate::classify::{classify_category, classify_type};
use crate::segment::segment;
use crate::tabular::extract_row;
use crate::tags::extract_tags;
use crate::title::synthesize_title;
use crate::validate::is_meaningful;

/// Runs the full extraction pipeline against one resolved rule set.
///
/// Holds an `Arc<RuleSet>` so a batch keeps classifying against the rule
/// set it started with even if the cache refreshes mid-flight.
#[derive(Debug)]
pub struct CardExtractor {
    rules: Arc<RuleSet>,
}

impl CardExtractor {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    /// Extractor over the compiled-in default rule set.
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(RuleSet::default_rules()))
    }

    /// Validate an externally supplied rule set and build an extractor from
    /// it. Fails closed with every violation.
    pub fn from_raw(raw: &serde_json::Value) -> Result<Self> {
        let validation = validate_rules(raw);
        match validation.sanitized {
            Some(rules) => Ok(Self::new(Arc::new(rules))),
            None => Err(Error::RuleValidation(validation.errors)),
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Extract cards from a block of raw document text.
    ///
    /// An empty result is a valid outcome: it means every section failed
    /// the meaningfulness gate, not that extraction failed.
    pub fn extract_document(&self, text: &str, source: &str) -> Vec<CardCandidate> {
        let sections = segment(text);
        let total = sections.len();

        let cards: Vec<CardCandidate> = sections
            .iter()
            .filter_map(|section| self.section_to_card(section, source))
            .collect();

        info!(
            source,
            sections = total,
            cards = cards.len(),
            "document extraction complete"
        );
        cards
    }

    /// Extract cards from one spreadsheet: a header row followed by data
    /// rows. Row numbers are 1-based and include the header, so the first
    /// data row is row 2. A malformed row degrades to a skip, never an
    /// abort.
    pub fn extract_sheet(
        &self,
        sheet_name: &str,
        rows: &[Vec<String>],
        source: &str,
    ) -> Vec<CardCandidate> {
        let Some(header) = rows.first() else {
            debug!(sheet = sheet_name, "empty sheet, nothing to extract");
            return Vec::new();
        };
        let schema = Schema::from_header(header);

        let cards: Vec<CardCandidate> = rows
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(i, cells)| {
                extract_row(cells, i + 1, sheet_name, &schema, header, source)
            })
            .collect();

        info!(
            source,
            sheet = sheet_name,
            rows = rows.len().saturating_sub(1),
            cards = cards.len(),
            "sheet extraction complete"
        );
        cards
    }

    /// Regenerate exactly one card from a snippet (a section of one),
    /// without re-running full-document segmentation.
    pub fn regenerate(&self, snippet: &str, source: &str) -> Result<CardCandidate> {
        let section = TextSection {
            text: snippet.trim().to_string(),
            index: 1,
            total: 1,
        };
        self.section_to_card(&section, source)
            .ok_or_else(|| Error::NoCards("snippet failed the meaningfulness gate".to_string()))
    }

    fn section_to_card(&self, section: &TextSection, source: &str) -> Option<CardCandidate> {
        if !is_meaningful(&section.text, MIN_MEANINGFUL_LEN) {
            debug!(index = section.index, "section failed meaningfulness gate");
            return None;
        }

        let card_type = classify_type(&section.text, &self.rules);
        let category = classify_category(&section.text, &self.rules);
        let title = synthesize_title(&section.text, card_type);
        let tags = extract_tags(&section.text, &self.rules);

        Some(CardCandidate {
            title: truncate_with_ellipsis(&title, MAX_TITLE_LEN),
            content: normalize_whitespace(&section.text),
            card_type,
            category,
            tags,
            source: source.to_string(),
            provenance: Provenance {
                location: format!("Paragraph {} of {}", section.index, section.total),
                snippet: truncate_with_ellipsis(&section.text, MAX_SNIPPET_LEN),
            },
        })
    }
}

/// Normalize card content: trim lines, collapse intra-line space runs, and
/// collapse blank-line runs. Line structure survives so bullets stay
/// readable.
fn normalize_whitespace(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut blank_pending = false;
    for line in text.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            blank_pending = !out.is_empty();
        } else {
            if blank_pending {
                out.push(String::new());
                blank_pending = false;
            }
            out.push(collapsed);
        }
    }
    out.join("\n")
}
