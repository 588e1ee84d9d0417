//! Extraction service that ties parsing and path construction together.

use std::fs;
use std::path::Path;

use roxmltree::{Document, ParsingOptions};

use crate::config::Config;
use crate::error::{LeafPathError, Result};
use crate::path::{LeafRow, PathEngine};

/// Parse XML text and build a row for every leaf.
///
/// Documents with a DOCTYPE declaration are accepted.
///
/// # Arguments
/// * `xml` - The XML document text
/// * `config` - Normalized configuration
///
/// # Returns
/// Rows in document order
///
/// # Examples
/// ```
/// use leafpath::config::Config;
/// use leafpath::extractor::extract_from_str;
///
/// let rows = extract_from_str("<root><a>1</a></root>", &Config::default()).unwrap();
/// assert_eq!(rows[0].path, r#"/d:root[1]/d:a[d:a="1"][1]"#);
/// ```
pub fn extract_from_str(xml: &str, config: &Config) -> Result<Vec<LeafRow>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)?;

    let engine = PathEngine::new(config.clone());
    let rows = engine.extract(&doc);

    tracing::info!(rows = rows.len(), "Extracted leaf paths");
    Ok(rows)
}

/// Read an XML file and build a row for every leaf.
///
/// # Errors
/// `InputNotFound` when the file does not exist, `Io` when it cannot be read
/// and `XmlParse` when it is not well-formed.
pub fn extract_from_file(path: &Path, config: &Config) -> Result<Vec<LeafRow>> {
    if !path.is_file() {
        return Err(LeafPathError::InputNotFound(path.to_path_buf()));
    }

    tracing::debug!(path = %path.display(), "Reading XML input");
    let xml = fs::read_to_string(path)?;
    extract_from_str(&xml, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_str_with_doctype() {
        let xml = r#"<?xml version="1.0"?>
<!DOCTYPE root [<!ENTITY co "ACME">]>
<root><name>&co;</name></root>"#;
        let rows = extract_from_str(xml, &Config::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, "ACME");
    }

    #[test]
    fn test_extract_from_str_malformed() {
        let result = extract_from_str("<root><open></root>", &Config::default());
        assert!(matches!(result, Err(LeafPathError::XmlParse(_))));
    }

    #[test]
    fn test_extract_from_file_missing() {
        let result = extract_from_file(Path::new("does/not/exist.xml"), &Config::default());
        assert!(matches!(result, Err(LeafPathError::InputNotFound(_))));
    }

    #[test]
    fn test_extract_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.xml");
        fs::write(&path, "<r><a>x</a><a>y</a></r>").unwrap();

        let rows = extract_from_file(&path, &Config::default()).unwrap();
        let texts: Vec<_> = rows.iter().map(|row| row.text.as_str()).collect();
        assert_eq!(texts, vec!["x", "y"]);
    }
}
