//! Cardmill Core — shared types, rule-set model and validation, error taxonomy.

pub mod config;
pub mod error;
pub mod rules;
pub mod types;

pub use error::{Error, Result};
pub use rules::{validate_rules, RuleSet, RuleSetValidation};
pub use types::{
    truncate_with_ellipsis, CardCandidate, CardType, Column, Provenance, Schema, StructuredRow,
    TextSection,
};
