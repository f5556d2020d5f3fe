//! Link deduplication engine.
//!
//! `deduplicate` is a pure function over processed links: canonicalize,
//! group, fold, score. Given the same input multiset it produces the same
//! canonical set content independent of input order; internal list orders
//! are sorted only for determinism, so tests should still compare as sets.

pub mod canonical;
pub mod confidence;
pub mod marketplace;
mod merge;

pub use canonical::canonical_key;
pub use marketplace::{product_identity, ProductIdentity};
pub use merge::deduplicate;
