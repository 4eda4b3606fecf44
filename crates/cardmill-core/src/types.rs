//! Card, section, and tabular-schema types.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// The closed set of card types.
///
/// The derived `Ord` follows declaration order, and that order is the
/// tie-break for type classification: when two types score equally, the
/// earlier variant wins. `Concept` first also makes it the zero-signal
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Concept,
    Action,
    Quote,
    Checklist,
    Mindmap,
}

impl CardType {
    /// All card types, in tie-break order.
    pub fn all() -> &'static [CardType] {
        &[
            Self::Concept,
            Self::Action,
            Self::Quote,
            Self::Checklist,
            Self::Mindmap,
        ]
    }

    /// Lowercase wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Concept => "concept",
            Self::Action => "action",
            Self::Quote => "quote",
            Self::Checklist => "checklist",
            Self::Mindmap => "mindmap",
        }
    }

    /// Parse a lowercase wire name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "concept" => Some(Self::Concept),
            "action" => Some(Self::Action),
            "quote" => Some(Self::Quote),
            "checklist" => Some(Self::Checklist),
            "mindmap" => Some(Self::Mindmap),
            _ => None,
        }
    }

    /// Capitalized display name ("Concept", "Action", ...).
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Concept => "Concept",
            Self::Action => "Action",
            Self::Quote => "Quote",
            Self::Checklist => "Checklist",
            Self::Mindmap => "Mindmap",
        }
    }
}

impl Default for CardType {
    fn default() -> Self {
        Self::Concept
    }
}

/// A contiguous fragment of source text produced by segmentation.
///
/// Ephemeral — exists only within one extraction call.
#[derive(Debug, Clone)]
pub struct TextSection {
    pub text: String,
    /// 1-based position within the source document.
    pub index: usize,
    /// Total section count for the source document.
    pub total: usize,
}

/// Where a card came from within its source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Human-readable position, e.g. `"Paragraph 3 of 12"` or `"Sheet1!Row 5"`.
    pub location: String,
    /// First 500 chars of the original section, ellipsis-suffixed if cut.
    pub snippet: String,
}

/// The output unit: one extracted knowledge card, not yet persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardCandidate {
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub category: String,
    pub tags: Vec<String>,
    /// Originating file name.
    pub source: String,
    pub provenance: Provenance,
}

/// One column of a spreadsheet schema, derived from the header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub index: usize,
}

impl Column {
    /// Whether the name was auto-generated for a blank header cell.
    pub fn is_generated(&self) -> bool {
        self.name
            .strip_prefix("Column_")
            .map(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
            .unwrap_or(false)
    }
}

/// Ordered column definition derived from a spreadsheet header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub columns: Vec<Column>,
}

impl Schema {
    /// Build a schema from a header row. Blank header cells get synthetic
    /// `Column_N` names (1-based).
    pub fn from_header(header: &[String]) -> Self {
        let columns = header
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                let trimmed = cell.trim();
                let name = if trimmed.is_empty() {
                    format!("Column_{}", index + 1)
                } else {
                    trimmed.to_string()
                };
                Column { name, index }
            })
            .collect();
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One data row keyed by schema column name, in schema order.
#[derive(Debug, Clone, Default)]
pub struct StructuredRow {
    entries: Vec<(String, String)>,
}

impl StructuredRow {
    /// Zip a row of cells against a schema. Missing cells become empty
    /// strings; extra cells beyond the schema are dropped.
    pub fn from_cells(cells: &[String], schema: &Schema) -> Self {
        let entries = schema
            .columns
            .iter()
            .map(|col| {
                let value = cells
                    .get(col.index)
                    .map(|c| c.trim().to_string())
                    .unwrap_or_default();
                (col.name.clone(), value)
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Entries in schema order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn non_empty_count(&self) -> usize {
        self.entries.iter().filter(|(_, v)| !v.is_empty()).count()
    }
}

/// Truncate to `max_chars` characters, appending an ellipsis when cut.
/// Char-based, never splits a UTF-8 sequence.
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars).collect();
        out.push('…');
        out
    }
}

// Serialized as a JSON object in schema order (the default map types would
// re-sort the keys).
impl Serialize for StructuredRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_blank_headers() {
        let header = vec!["Name".to_string(), "  ".to_string(), "Age".to_string()];
        let schema = Schema::from_header(&header);
        assert_eq!(schema.columns[0].name, "Name");
        assert_eq!(schema.columns[1].name, "Column_2");
        assert_eq!(schema.columns[2].name, "Age");
        assert!(schema.columns[1].is_generated());
        assert!(!schema.columns[0].is_generated());
    }

    #[test]
    fn test_structured_row_missing_cells() {
        let schema = Schema::from_header(&["A".to_string(), "B".to_string()]);
        let row = StructuredRow::from_cells(&["1".to_string()], &schema);
        assert_eq!(row.get("A"), Some("1"));
        assert_eq!(row.get("B"), Some(""));
        assert_eq!(row.non_empty_count(), 1);
    }

    #[test]
    fn test_structured_row_preserves_order() {
        let schema = Schema::from_header(&["Zebra".to_string(), "Apple".to_string()]);
        let row = StructuredRow::from_cells(&["z".to_string(), "a".to_string()], &schema);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"Zebra":"z","Apple":"a"}"#);
    }

    #[test]
    fn test_card_type_order() {
        assert!(CardType::Concept < CardType::Action);
        assert_eq!(CardType::default(), CardType::Concept);
        assert_eq!(CardType::parse("quote"), Some(CardType::Quote));
        assert_eq!(CardType::parse("unknown"), None);
    }
}
