//! Leaf path construction.
//!
//! Every text-bearing leaf element gets a path like
//! `/d:root[1]/d:item[@id="7"][1]/d:name[d:name="Widget"][1]`, built from
//! one segment per element on the way from the start element down to the leaf.

mod classify;
mod engine;
mod predicate;
mod sibling;
mod truncate;
mod types;

pub use classify::{classify, NodeKind};
pub use engine::PathEngine;
pub use predicate::{
    attribute_clause, attribute_predicates, build_segment, child_clause, child_predicates,
    escape_value, index_clause, leaf_value_predicate,
};
pub use sibling::{identity_key, sibling_index, SiblingCounter};
pub use truncate::{split_segments, truncate_path};
pub use types::LeafRow;
