//! Leaf classification.

use roxmltree::Node;

use crate::config::Config;
use crate::xml::{get_tag_name, get_text, has_element_children};

/// What the traversal does with an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Tag is listed in `ignoreLeafNodes`; the whole subtree is skipped.
    Ignored,
    /// Has child elements; the traversal descends into them.
    Internal,
    /// No child elements and non-empty trimmed text; produces one row.
    Leaf,
    /// No child elements and blank text; a dead end.
    Empty,
}

/// Classify an element.
///
/// The ignore list wins over every structural check, so an ignored element
/// is never emitted or descended into, whatever it contains.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use leafpath::config::Config;
/// use leafpath::path::{classify, NodeKind};
///
/// let doc = Document::parse("<root><name>Widget</name><empty/></root>").unwrap();
/// let root = doc.root_element();
/// let config = Config::default();
///
/// assert_eq!(classify(root, &config), NodeKind::Internal);
/// let mut children = root.children().filter(|n| n.is_element());
/// assert_eq!(classify(children.next().unwrap(), &config), NodeKind::Leaf);
/// assert_eq!(classify(children.next().unwrap(), &config), NodeKind::Empty);
/// ```
pub fn classify(node: Node<'_, '_>, config: &Config) -> NodeKind {
    if config.is_ignored(get_tag_name(node)) {
        NodeKind::Ignored
    } else if has_element_children(node) {
        NodeKind::Internal
    } else if get_text(node).is_empty() {
        NodeKind::Empty
    } else {
        NodeKind::Leaf
    }
}
