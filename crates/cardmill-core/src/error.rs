//! Error types for Cardmill.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The supplied rule set failed validation. Carries every violation,
    /// not just the first — the rule set is never partially applied.
    #[error("Rule set validation failed: {}", .0.join("; "))]
    RuleValidation(Vec<String>),

    /// No card could be produced from the input (every section or row
    /// failed the meaningfulness gate). Distinct from a rule-set failure.
    #[error("No cards could be produced: {0}")]
    NoCards(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
