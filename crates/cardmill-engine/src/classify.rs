//! Card-type and category classification over a rule set.

pub mod card_type;
pub mod category;

pub use card_type::classify_type;
pub use category::classify_category;
