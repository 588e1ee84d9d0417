//! Types produced by the path engine.

use serde::Serialize;

/// One emitted leaf: its raw trimmed text and the path that addresses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafRow {
    /// Trimmed leaf text, unescaped.
    pub text: String,

    /// Generated path expression.
    pub path: String,
}

impl LeafRow {
    /// Create a new row.
    #[must_use]
    pub fn new(text: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            path: path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_row_serializes_fields() {
        let row = LeafRow::new("Widget", "/d:name[1]");
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["text"], "Widget");
        assert_eq!(value["path"], "/d:name[1]");
    }
}
