//! Path engine that walks the document and emits one row per leaf.

use roxmltree::{Document, Node};

use super::classify::{classify, NodeKind};
use super::predicate::build_segment;
use super::sibling::{sibling_index, SiblingCounter};
use super::truncate::truncate_path;
use super::types::LeafRow;
use crate::config::{Config, StartStrategy};
use crate::xml::{element_children, get_tag_name, get_text, local_name, tag_matches_ignore_case};

/// Anchor of a path built from the document element.
const ROOT_ANCHOR: &str = "/";

/// Anchor of a path re-rooted at a start element.
const REROOT_ANCHOR: &str = "//";

/// Pending element on the traversal work stack.
struct Frame<'a, 'input> {
    node: Node<'a, 'input>,
    kind: NodeKind,
    /// Trimmed text, set for leaves only.
    text: Option<String>,
    path: String,
}

/// Engine for building leaf paths.
///
/// Holds the normalized configuration for one run. Traversal is depth-first
/// in document order with an explicit work stack, so deeply nested
/// documents do not exhaust the call stack.
#[derive(Debug, Clone)]
pub struct PathEngine {
    config: Config,
}

impl PathEngine {
    /// Create a new engine.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build `(text, path)` rows for every leaf of a document.
    ///
    /// Without `startAtTag` every leaf gets its full path from the document
    /// element. With `startAtTag`, the reroot strategy walks only the subtree
    /// of the first matching element, while the truncate strategy cuts the
    /// full paths at the first matching segment.
    ///
    /// # Examples
    /// ```
    /// use roxmltree::Document;
    /// use leafpath::config::Config;
    /// use leafpath::path::PathEngine;
    ///
    /// let doc = Document::parse("<root><name>Widget</name></root>").unwrap();
    /// let rows = PathEngine::new(Config::default()).extract(&doc);
    ///
    /// assert_eq!(rows.len(), 1);
    /// assert_eq!(rows[0].text, "Widget");
    /// assert_eq!(rows[0].path, r#"/d:root[1]/d:name[d:name="Widget"][1]"#);
    /// ```
    pub fn extract(&self, doc: &Document<'_>) -> Vec<LeafRow> {
        let root = doc.root_element();

        let Some(start_tag) = self.config.start_at_tag.as_deref() else {
            return self.walk(root, ROOT_ANCHOR);
        };

        match self.config.start_strategy {
            StartStrategy::Reroot => match self.resolve_start(doc, start_tag) {
                Some(start) => self.walk(start, REROOT_ANCHOR),
                None => {
                    tracing::warn!(
                        start_tag = %start_tag,
                        "Start tag not found, building paths from the document element"
                    );
                    self.walk(root, ROOT_ANCHOR)
                }
            },
            StartStrategy::Truncate => self
                .walk(root, ROOT_ANCHOR)
                .into_iter()
                .map(|row| LeafRow {
                    path: truncate_path(&row.path, start_tag, &self.config.namespace),
                    ..row
                })
                .collect(),
        }
    }

    /// Find the element traversal starts from.
    ///
    /// Lookup order, each in document order: elements in the document
    /// element's namespace, then any element with the local name, then a
    /// case-insensitive local name match. Elements that are ignored, or sit
    /// inside an ignored subtree, never qualify.
    pub fn resolve_start<'a, 'input>(
        &self,
        doc: &'a Document<'input>,
        start_tag: &str,
    ) -> Option<Node<'a, 'input>> {
        let wanted = local_name(start_tag);
        let root = doc.root_element();
        let document_namespace = root.tag_name().namespace();
        let elements = || {
            root.descendants()
                .filter(|n| n.is_element())
                .filter(|n| !self.in_ignored_subtree(*n))
        };

        elements()
            .find(|n| get_tag_name(*n) == wanted && n.tag_name().namespace() == document_namespace)
            .or_else(|| elements().find(|n| get_tag_name(*n) == wanted))
            .or_else(|| elements().find(|n| tag_matches_ignore_case(get_tag_name(*n), wanted)))
    }

    /// Full path of a single element, built by walking parent links to the root.
    ///
    /// For a leaf this is the path a full-tree [`PathEngine::extract`] emits
    /// for it; `startAtTag` is not applied.
    pub fn absolute_path(&self, node: Node<'_, '_>) -> String {
        let leaf_text =
            (classify(node, &self.config) == NodeKind::Leaf).then(|| get_text(node));

        let mut segments: Vec<String> = node
            .ancestors()
            .filter(|n| n.is_element())
            .enumerate()
            .map(|(depth, n)| {
                let text = if depth == 0 { leaf_text.as_deref() } else { None };
                build_segment(n, sibling_index(n, &self.config), text, &self.config)
            })
            .collect();
        segments.reverse();

        format!("{ROOT_ANCHOR}{}", segments.join("/"))
    }

    fn in_ignored_subtree(&self, node: Node<'_, '_>) -> bool {
        node.ancestors()
            .filter(|n| n.is_element())
            .any(|n| self.config.is_ignored(get_tag_name(n)))
    }

    fn frame<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        index: usize,
        prefix: &str,
    ) -> Frame<'a, 'input> {
        let kind = classify(node, &self.config);
        let text = (kind == NodeKind::Leaf).then(|| get_text(node));

        // Ignored and empty elements are never emitted, so skip building their path
        let path = match kind {
            NodeKind::Leaf | NodeKind::Internal => format!(
                "{prefix}{}",
                build_segment(node, index, text.as_deref(), &self.config)
            ),
            NodeKind::Ignored | NodeKind::Empty => String::new(),
        };

        Frame {
            node,
            kind,
            text,
            path,
        }
    }

    fn walk(&self, start: Node<'_, '_>, anchor: &str) -> Vec<LeafRow> {
        let mut rows = Vec::new();
        let mut stack = vec![self.frame(start, sibling_index(start, &self.config), anchor)];

        while let Some(frame) = stack.pop() {
            if self.config.debug {
                tracing::debug!(
                    tag = %get_tag_name(frame.node),
                    kind = ?frame.kind,
                    path = %frame.path,
                    "Visiting element"
                );
            }

            match frame.kind {
                NodeKind::Ignored | NodeKind::Empty => {}
                NodeKind::Leaf => {
                    if let Some(text) = frame.text {
                        rows.push(LeafRow::new(text, frame.path));
                    }
                }
                NodeKind::Internal => {
                    let prefix = format!("{}/", frame.path);
                    let mut counter = SiblingCounter::new();
                    let children: Vec<_> = element_children(frame.node)
                        .map(|child| {
                            let index = counter.next_index(child, &self.config);
                            self.frame(child, index, &prefix)
                        })
                        .collect();

                    // Reversed so the first child is popped first
                    stack.extend(children.into_iter().rev());
                }
            }
        }

        if self.config.debug {
            tracing::debug!(rows = rows.len(), "Traversal finished");
        }

        rows
    }
}
