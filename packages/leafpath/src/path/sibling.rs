//! Sibling disambiguation.

use std::collections::HashMap;
use std::iter;

use roxmltree::Node;

use super::predicate::attribute_clause;
use crate::config::{Config, SiblingIdentity};
use crate::xml::get_tag_name;

/// Grouping key of an element among its siblings.
///
/// Either the local tag name, or the tag name followed by the attribute
/// clause, so `<a x="1"/>` and `<a x="2"/>` count as different identities.
pub fn identity_key(node: Node<'_, '_>, config: &Config) -> String {
    let tag = get_tag_name(node);
    match config.sibling_identity {
        SiblingIdentity::Tag => tag.to_string(),
        SiblingIdentity::TagAndAttributes => match attribute_clause(node, config) {
            Some(clause) => format!("{tag}{clause}"),
            None => tag.to_string(),
        },
    }
}

/// 1-based occurrence index of an element among preceding same-identity siblings.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use leafpath::config::Config;
/// use leafpath::path::sibling_index;
///
/// let doc = Document::parse("<r><a/><b/><a/></r>").unwrap();
/// let last = doc.root_element().last_element_child().unwrap();
/// assert_eq!(sibling_index(last, &Config::default()), 2);
/// ```
pub fn sibling_index(node: Node<'_, '_>, config: &Config) -> usize {
    let tag = get_tag_name(node);
    let key = identity_key(node, config);

    let preceding = iter::successors(node.prev_sibling_element(), |n| n.prev_sibling_element())
        .filter(|sibling| get_tag_name(*sibling) == tag)
        .filter(|sibling| identity_key(*sibling, config) == key)
        .count();

    preceding + 1
}

/// Incremental occurrence counter for one parent's children.
///
/// Feeding the children in document order yields the same numbers as
/// [`sibling_index`] without rescanning preceding siblings.
#[derive(Debug, Default)]
pub struct SiblingCounter {
    seen: HashMap<String, usize>,
}

impl SiblingCounter {
    /// Create a new empty counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count this element and return its occurrence index.
    pub fn next_index(&mut self, node: Node<'_, '_>, config: &Config) -> usize {
        let count = self.seen.entry(identity_key(node, config)).or_insert(0);
        *count += 1;
        *count
    }
}
