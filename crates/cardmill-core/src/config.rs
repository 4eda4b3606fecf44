//! Tuning constants for the extraction heuristics.
//!
//! Every threshold here is a behavior knob: changing one changes which
//! sections and rows survive the gates, so they are named rather than
//! scattered as literals.

/// Minimum trimmed length for text to count as meaningful.
pub const MIN_MEANINGFUL_LEN: usize = 10;

/// Sections longer than this are re-split on sentence boundaries.
pub const MAX_SECTION_LEN: usize = 500;

/// Card titles are truncated here with an ellipsis.
pub const MAX_TITLE_LEN: usize = 200;

/// A first line qualifies as a title only below this length.
pub const MAX_FIRST_LINE_TITLE_LEN: usize = 100;

/// Provenance snippets keep this many characters of the original text.
pub const MAX_SNIPPET_LEN: usize = 500;

/// Maximum tags on a single card.
pub const MAX_TAGS: usize = 10;

/// Tabular card content is capped here before the truncation marker.
pub const MAX_ROW_CONTENT_LEN: usize = 9500;

/// A spreadsheet cell used verbatim as a title must fit in this length.
pub const MAX_ROW_TITLE_LEN: usize = 120;

/// Cells joined into a composite row title must each fit in this length.
pub const MAX_ROW_TITLE_PART_LEN: usize = 80;

/// Rows with fewer non-empty cells than this fraction are discarded.
pub const MIN_NON_EMPTY_CELL_RATIO: f32 = 0.2;

/// Rule-set shape limits (enforced by validation, mirrored by the default
/// rule set).
pub const MAX_CARD_TYPES: usize = 10;
pub const MAX_CATEGORIES: usize = 50;
pub const MAX_KEYWORDS_PER_ENTRY: usize = 100;
pub const MAX_ACTION_VERBS: usize = 100;
pub const MAX_KEYWORD_LEN: usize = 100;
pub const MAX_CATEGORY_NAME_LEN: usize = 80;
