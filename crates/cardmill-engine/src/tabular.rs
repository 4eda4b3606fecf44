//! Spreadsheet row → card structuring.
//!
//! Rows are zipped against the header-derived schema, screened for
//! duplicate-header rows and non-meaningful content, then rendered as
//! `"Column: value"` card content. Tabular cards bypass the type/category
//! classifiers: a data row rarely carries conceptual or action semantics,
//! so type is fixed to `concept` and category to `"Data"`.

use cardmill_core::config::{
    MAX_ROW_CONTENT_LEN, MAX_ROW_TITLE_LEN, MAX_ROW_TITLE_PART_LEN, MAX_SNIPPET_LEN, MAX_TAGS,
    MAX_TITLE_LEN, MIN_MEANINGFUL_LEN, MIN_NON_EMPTY_CELL_RATIO,
};
use cardmill_core::{
    truncate_with_ellipsis, CardCandidate, CardType, Provenance, Schema, StructuredRow,
};
use tracing::debug;

use crate::validate::is_meaningful;

/// Category assigned to every tabular card.
pub const TABULAR_CATEGORY: &str = "Data";

/// Convert one data row into a card candidate, or `None` when the row is a
/// duplicate header or fails the meaningfulness gate.
pub fn extract_row(
    cells: &[String],
    row_number: usize,
    sheet_name: &str,
    schema: &Schema,
    header: &[String],
    source: &str,
) -> Option<CardCandidate> {
    if schema.is_empty() {
        return None;
    }

    let row = StructuredRow::from_cells(cells, schema);

    if looks_like_header(&row, schema, header) {
        debug!(row_number, sheet = sheet_name, "discarding duplicate header row");
        return None;
    }

    let content = build_content(&row, schema);

    if !row_is_meaningful(&row, schema, &content) {
        debug!(row_number, sheet = sheet_name, "discarding non-meaningful row");
        return None;
    }

    let title = build_title(&row, schema, sheet_name, row_number);
    let tags = build_tags(schema, sheet_name, row_number);
    let snippet = serde_json::to_string(&row).unwrap_or_default();

    Some(CardCandidate {
        // MAX_ROW_TITLE_LEN only gates first-cell eligibility; emitted
        // titles are bound by the general card cap.
        title: truncate_with_ellipsis(&title, MAX_TITLE_LEN),
        content: truncate_with_ellipsis(&content, MAX_ROW_CONTENT_LEN),
        card_type: CardType::Concept,
        category: TABULAR_CATEGORY.to_string(),
        tags,
        source: source.to_string(),
        provenance: Provenance {
            location: format!("{}!Row {}", sheet_name, row_number),
            snippet: truncate_with_ellipsis(&snippet, MAX_SNIPPET_LEN),
        },
    })
}

/// Header-likeness test: count non-empty cells that repeat their column
/// name or the original header cell. Exact match scores 1, substring match
/// 0.5 (only for column names longer than two chars). A row is a duplicate
/// header when the total reaches min(2, non-empty-cell count).
fn looks_like_header(row: &StructuredRow, schema: &Schema, header: &[String]) -> bool {
    let non_empty = row.non_empty_count();
    if non_empty == 0 {
        return false;
    }

    let mut score = 0f32;
    for (col, (_, value)) in schema.columns.iter().zip(row.entries()) {
        if value.is_empty() {
            continue;
        }
        let value_lower = value.to_lowercase();
        let name_lower = col.name.to_lowercase();
        let header_lower = header
            .get(col.index)
            .map(|h| h.trim().to_lowercase())
            .unwrap_or_default();

        if value_lower == name_lower || (!header_lower.is_empty() && value_lower == header_lower) {
            score += 1.0;
        } else if name_lower.chars().count() > 2
            && (value_lower.contains(&name_lower) || name_lower.contains(&value_lower))
        {
            score += 0.5;
        }
    }

    score >= (non_empty as f32).min(2.0)
}

/// Render `"Column: value"` pairs for non-blank cells. Auto-generated
/// column names contribute the bare value.
fn build_content(row: &StructuredRow, schema: &Schema) -> String {
    let parts: Vec<String> = schema
        .columns
        .iter()
        .zip(row.entries())
        .filter(|(_, (_, value))| !value.is_empty())
        .map(|(col, (_, value))| {
            if col.is_generated() {
                value.clone()
            } else {
                format!("{}: {}", col.name, value)
            }
        })
        .collect();
    parts.join("\n\n")
}

fn row_is_meaningful(row: &StructuredRow, schema: &Schema, content: &str) -> bool {
    let non_empty = row.non_empty_count();

    if (non_empty as f32) / (schema.len() as f32) < MIN_NON_EMPTY_CELL_RATIO {
        return false;
    }

    if !is_meaningful(content, MIN_MEANINGFUL_LEN) {
        return false;
    }

    // A single surviving cell that just repeats a column name is a header
    // fragment, not data.
    let normalized = normalize(content);
    if schema
        .columns
        .iter()
        .any(|col| !col.is_generated() && normalize(&col.name) == normalized)
    {
        return false;
    }

    // A couple of bare numbers is not a card.
    if non_empty <= 2
        && row
            .entries()
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .all(|(_, v)| is_numeric_like(v))
    {
        return false;
    }

    true
}

/// Title ladder: first cell verbatim, then up to two short cells joined
/// with an en-dash, then a positional fallback.
fn build_title(row: &StructuredRow, schema: &Schema, sheet_name: &str, row_number: usize) -> String {
    if let Some(first_col) = schema.columns.first() {
        if let Some(value) = row.get(&first_col.name) {
            if !value.is_empty()
                && value.chars().count() <= MAX_ROW_TITLE_LEN
                && !cell_is_header_like(value, schema)
            {
                return value.to_string();
            }
        }
    }

    let parts: Vec<&str> = row
        .entries()
        .iter()
        .map(|(_, v)| v.as_str())
        .filter(|v| {
            !v.is_empty()
                && v.chars().count() <= MAX_ROW_TITLE_PART_LEN
                && !cell_is_header_like(v, schema)
        })
        .take(2)
        .collect();
    if !parts.is_empty() {
        return parts.join(" – ");
    }

    format!("{} – Row {}", sheet_name, row_number)
}

fn cell_is_header_like(value: &str, schema: &Schema) -> bool {
    let value_lower = value.to_lowercase();
    schema
        .columns
        .iter()
        .any(|col| col.name.to_lowercase() == value_lower)
}

/// One slug tag per named column, plus the sheet and a row marker.
fn build_tags(schema: &Schema, sheet_name: &str, row_number: usize) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for col in &schema.columns {
        if !col.is_generated() {
            let slug = slugify(&col.name);
            if !slug.is_empty() && !tags.contains(&slug) {
                tags.push(slug);
            }
        }
    }
    // The sheet and row markers always make it in, so column slugs only
    // get the remaining slots.
    tags.truncate(MAX_TAGS - 2);
    let sheet_slug = slugify(sheet_name);
    if !sheet_slug.is_empty() && !tags.contains(&sheet_slug) {
        tags.push(sheet_slug);
    }
    tags.push(format!("row-{}", row_number));
    tags.truncate(MAX_TAGS);
    tags
}

fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for c in name.to_lowercase().chars() {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if (c.is_whitespace() || c == '-' || c == '_') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Purely numeric or currency-like cell values.
fn is_numeric_like(value: &str) -> bool {
    let stripped: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !"$€£,.%-()".contains(*c))
        .collect();
    !stripped.is_empty() && stripped.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_basic_row_extraction() {
        let header = strings(&["Name", "Age"]);
        let schema = Schema::from_header(&header);
        let card = extract_row(
            &strings(&["Alice Henderson", "34"]),
            2,
            "Sheet1",
            &schema,
            &header,
            "people.xlsx",
        )
        .expect("row should produce a card");

        assert_eq!(card.title, "Alice Henderson");
        assert_eq!(card.card_type, CardType::Concept);
        assert_eq!(card.category, "Data");
        assert!(card.content.contains("Name: Alice Henderson"));
        assert!(card.content.contains("Age: 34"));
        assert_eq!(card.provenance.location, "Sheet1!Row 2");
        assert!(card.provenance.snippet.contains("Alice Henderson"));
        assert!(card.tags.contains(&"name".to_string()));
        assert!(card.tags.contains(&"sheet1".to_string()));
        assert!(card.tags.contains(&"row-2".to_string()));
    }

    #[test]
    fn test_duplicate_header_row_discarded() {
        let header = strings(&["Name", "Age"]);
        let schema = Schema::from_header(&header);
        let card = extract_row(&strings(&["Name", "Age"]), 2, "Sheet1", &schema, &header, "f.xlsx");
        assert!(card.is_none());
    }

    #[test]
    fn test_mostly_empty_row_discarded() {
        let header = strings(&["A", "B", "C", "D", "E", "F"]);
        let schema = Schema::from_header(&header);
        let card = extract_row(
            &strings(&["only one value here", "", "", "", "", ""]),
            3,
            "Sheet1",
            &schema,
            &header,
            "f.xlsx",
        );
        // 1 of 6 cells non-empty is below the 0.2 ratio floor.
        assert!(card.is_none());
    }

    #[test]
    fn test_numeric_only_row_discarded() {
        let header = strings(&["Amount", "Total"]);
        let schema = Schema::from_header(&header);
        let card = extract_row(
            &strings(&["$1,250.00", "99,000"]),
            4,
            "Budget",
            &schema,
            &header,
            "f.xlsx",
        );
        assert!(card.is_none());
    }

    #[test]
    fn test_generated_column_has_no_label() {
        let header = strings(&["Name", ""]);
        let schema = Schema::from_header(&header);
        let card = extract_row(
            &strings(&["Quarterly planning notes", "carry these forward"]),
            2,
            "Notes",
            &schema,
            &header,
            "f.xlsx",
        )
        .unwrap();
        assert!(card.content.contains("Name: Quarterly planning notes"));
        assert!(card.content.contains("\n\ncarry these forward"));
        assert!(!card.content.contains("Column_2:"));
        // Generated columns contribute no tag either.
        assert!(!card.tags.iter().any(|t| t.starts_with("column")));
    }

    #[test]
    fn test_title_falls_back_when_first_cell_blank() {
        let header = strings(&["Id", "Description", "Owner"]);
        let schema = Schema::from_header(&header);
        let card = extract_row(
            &strings(&["", "Migrate billing exports", "Priya"]),
            5,
            "Tasks",
            &schema,
            &header,
            "f.xlsx",
        )
        .unwrap();
        assert_eq!(card.title, "Migrate billing exports – Priya");
    }

    #[test]
    fn test_positional_title_fallback() {
        let header = strings(&["Description"]);
        let schema = Schema::from_header(&header);
        let long = "x".repeat(200);
        let card = extract_row(&strings(&[&long]), 7, "Log", &schema, &header, "f.xlsx").unwrap();
        assert_eq!(card.title, "Log – Row 7");
    }

    #[test]
    fn test_composite_title_kept_intact() {
        let header = strings(&["Id", "Description", "Details"]);
        let schema = Schema::from_header(&header);
        let a = "a".repeat(80);
        let b = "b".repeat(80);
        let card = extract_row(
            &strings(&["", &a, &b]),
            3,
            "Tasks",
            &schema,
            &header,
            "f.xlsx",
        )
        .unwrap();
        // Two 80-char cells joined with an en-dash fit under the general
        // 200-char title cap and must not be cut at the first-cell limit.
        assert_eq!(card.title, format!("{} – {}", a, b));
        assert_eq!(card.title.chars().count(), 163);
    }

    #[test]
    fn test_sheet_and_row_tags_survive_wide_sheets() {
        let names: Vec<String> = (1..=12).map(|i| format!("Field {}", i)).collect();
        let schema = Schema::from_header(&names);
        let tags = build_tags(&schema, "Inventory", 3);
        assert_eq!(tags.len(), MAX_TAGS);
        assert!(tags.contains(&"inventory".to_string()));
        assert!(tags.contains(&"row-3".to_string()));
        // Column slugs fill only the remaining slots.
        assert_eq!(tags.iter().filter(|t| t.starts_with("field-")).count(), 8);
    }

    #[test]
    fn test_snippet_is_json() {
        let header = strings(&["Name", "Role"]);
        let schema = Schema::from_header(&header);
        let card = extract_row(
            &strings(&["Dana Petrov", "Site reliability"]),
            2,
            "Team",
            &schema,
            &header,
            "f.xlsx",
        )
        .unwrap();
        assert!(card.provenance.snippet.starts_with('{'));
        assert!(card.provenance.snippet.contains("\"Role\":\"Site reliability\""));
    }
}
