//! FAQ knowledge base records and matching.

pub mod matcher;
pub mod types;

pub use matcher::{find_match, normalize};
pub use types::{FaqRecord, InteractionRecord};
