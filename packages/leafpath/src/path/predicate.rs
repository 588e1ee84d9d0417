//! Predicate and segment construction.
//!
//! A segment is composed, in order, of the qualified tag name, the attribute
//! clause, the child-value clause, the leaf-value predicate (only on the
//! segment that addresses the emitted leaf) and the sibling-index clause.

use std::borrow::Cow;

use roxmltree::Node;

use crate::config::Config;
use crate::xml::{
    element_children, find_child, get_attribute, get_tag_name, get_text, has_element_children,
};

/// Double every `"` so a value can sit inside a quoted predicate.
///
/// # Examples
/// ```
/// use leafpath::path::escape_value;
///
/// assert_eq!(escape_value(r#"He said "hi""#), r#"He said ""hi"""#);
/// assert_eq!(escape_value("plain"), "plain");
/// ```
pub fn escape_value(value: &str) -> Cow<'_, str> {
    if value.contains('"') {
        Cow::Owned(value.replace('"', "\"\""))
    } else {
        Cow::Borrowed(value)
    }
}

fn equality(lhs: &str, value: &str) -> String {
    format!("{lhs}=\"{}\"", escape_value(value))
}

/// Wrap predicates in one bracket pair joined with `and`.
fn bracket(predicates: &[String]) -> Option<String> {
    if predicates.is_empty() {
        None
    } else {
        Some(format!("[{}]", predicates.join(" and ")))
    }
}

/// Equality tests for every configured attribute present on the node.
pub fn attribute_predicates(node: Node<'_, '_>, config: &Config) -> Vec<String> {
    config
        .attributes_to_include_in_path
        .iter()
        .filter_map(|name| {
            get_attribute(node, name).map(|value| equality(&format!("@{name}"), value))
        })
        .collect()
}

/// Attribute clause, e.g. `[@id="7" and @type="x"]`.
pub fn attribute_clause(node: Node<'_, '_>, config: &Config) -> Option<String> {
    bracket(&attribute_predicates(node, config))
}

/// Child-value predicates for a node.
///
/// With `childFilters`, each listed name yields a predicate on the first
/// same-named child when it is a value child (not ignored, no child elements,
/// non-empty text), otherwise on a same-named attribute. Without `childFilters`, the legacy mode (when
/// enabled) yields one predicate per value child.
pub fn child_predicates(node: Node<'_, '_>, config: &Config) -> Vec<String> {
    match &config.child_filters {
        Some(filters) => filters
            .iter()
            .filter_map(|name| {
                let child_text = find_child(node, name)
                    .filter(|_| !config.is_ignored(name))
                    .filter(|child| !has_element_children(*child))
                    .map(get_text)
                    .filter(|text| !text.is_empty());

                match child_text {
                    Some(text) => Some(equality(&config.qualify(name), &text)),
                    None => get_attribute(node, name)
                        .map(|value| equality(&format!("@{name}"), value)),
                }
            })
            .collect(),
        None if config.include_all_child_values => element_children(node)
            .filter(|child| !config.is_ignored(get_tag_name(*child)))
            .filter(|child| !has_element_children(*child))
            .filter_map(|child| {
                let text = get_text(child);
                (!text.is_empty()).then(|| equality(&config.qualify(get_tag_name(child)), &text))
            })
            .collect(),
        None => Vec::new(),
    }
}

/// Child-value clause, e.g. `[d:code="A1" and @lang="nl"]`.
pub fn child_clause(node: Node<'_, '_>, config: &Config) -> Option<String> {
    bracket(&child_predicates(node, config))
}

/// Leaf-value predicate, e.g. `[d:name="Widget"]`, when enabled.
pub fn leaf_value_predicate(tag: &str, text: &str, config: &Config) -> Option<String> {
    config
        .include_leaf_value_predicate
        .then(|| format!("[{}]", equality(&config.qualify(tag), text)))
}

/// Sibling-index clause.
///
/// Indices above one are always rendered; `[1]` only when forced for the tag.
///
/// # Examples
/// ```
/// use leafpath::config::Config;
/// use leafpath::path::index_clause;
///
/// let config = Config::default();
/// assert_eq!(index_clause("a", 1, &config).as_deref(), Some("[1]"));
/// assert_eq!(index_clause("a", 3, &config).as_deref(), Some("[3]"));
/// ```
pub fn index_clause(tag: &str, index: usize, config: &Config) -> Option<String> {
    (index > 1 || config.renders_index_one(tag)).then(|| format!("[{index}]"))
}

/// Build the path segment for one element.
///
/// # Arguments
/// * `node` - Element the segment addresses
/// * `index` - Its occurrence index among same-identity siblings
/// * `leaf_text` - The trimmed text when this segment addresses the emitted leaf
/// * `config` - Normalized configuration
pub fn build_segment(
    node: Node<'_, '_>,
    index: usize,
    leaf_text: Option<&str>,
    config: &Config,
) -> String {
    let tag = get_tag_name(node);
    let mut segment = config.qualify(tag);

    if let Some(clause) = attribute_clause(node, config) {
        segment.push_str(&clause);
    }
    if let Some(clause) = child_clause(node, config) {
        segment.push_str(&clause);
    }
    if let Some(predicate) = leaf_text.and_then(|text| leaf_value_predicate(tag, text, config)) {
        segment.push_str(&predicate);
    }
    if let Some(clause) = index_clause(tag, index, config) {
        segment.push_str(&clause);
    }

    segment
}
