//! leafpath - Turn XML leaf elements into (text, path) rows.
//!
//! Every element without child elements and with non-empty text becomes a
//! row holding its text and an XPath-like path describing how to reach it.
//! How the path is built (namespace prefix, attribute and child predicates,
//! index rendering, start element) is driven by a [`Config`].
//!
//! # Example
//!
//! ```
//! use leafpath::{extract_from_str, Config};
//!
//! let config = Config::from_json_str(r#"{"attributesToIncludeInPath": ["id"]}"#).unwrap();
//! let rows = extract_from_str(
//!     r#"<root><item id="7"><name>Widget</name></item></root>"#,
//!     &config,
//! )
//! .unwrap();
//!
//! assert_eq!(rows[0].text, "Widget");
//! assert_eq!(
//!     rows[0].path,
//!     r#"/d:root[1]/d:item[@id="7"][1]/d:name[d:name="Widget"][1]"#
//! );
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration loading and normalization
//! - [`error`]: Error types and Result alias
//! - [`xml`]: XML utilities
//! - [`path`]: Node classification, predicates, sibling indexing and traversal
//! - [`extractor`]: Parsing plus path construction for strings and files
//! - [`output`]: Text and CSV rendering of rows
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod output;
pub mod path;
pub mod xml;

// Re-export main functions
pub use extractor::{extract_from_file, extract_from_str};

// Re-export commonly used items
pub use config::{Config, SiblingIdentity, StartStrategy};
pub use error::{ConfigError, LeafPathError, Result};
pub use path::{LeafRow, PathEngine};
