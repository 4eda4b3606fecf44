//! Cardmill Engine — turns raw document text and spreadsheet rows into
//! classified knowledge-card candidates.
//!
//! Everything here is a pure function over immutable inputs: no I/O, no
//! shared mutable state. The only stateful piece is [`cache::RulesCache`],
//! which holds the active rule set behind a whole-object swap.

pub mod cache;
pub mod classify;
pub mod pipeline;
pub mod segment;
pub mod tabular;
pub mod tags;
pub mod title;
pub mod validate;

pub use cache::RulesCache;
pub use pipeline::CardExtractor;
pub use segment::segment;
pub use validate::is_meaningful;
