//! Writers for extracted rows.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::error::Result;
use crate::path::LeafRow;

/// Value of the `type` column in typed CSV output.
pub const ROW_TYPE: &str = "leaf";

/// Destination format for rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `text : path` lines.
    Text,
    /// Two columns: `text,path`.
    Csv,
    /// Three columns: `type,text,path`.
    TypedCsv,
}

impl OutputFormat {
    /// Pick a format from the destination file name.
    ///
    /// `.csv` files get the typed CSV layout, anything else plain text lines.
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    /// use leafpath::output::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path(Path::new("out/rows.CSV")), OutputFormat::TypedCsv);
    /// assert_eq!(OutputFormat::from_path(Path::new("rows.txt")), OutputFormat::Text);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        if is_csv {
            Self::TypedCsv
        } else {
            Self::Text
        }
    }
}

/// Format one row as a `text : path` line (without newline).
pub fn format_line(row: &LeafRow) -> String {
    format!("{} : {}", row.text, row.path)
}

/// Render rows as newline-delimited `text : path` lines.
pub fn render_text(rows: &[LeafRow]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&format_line(row));
        out.push('\n');
    }
    out
}

/// Quote a CSV field, doubling embedded quotes.
///
/// # Examples
/// ```
/// use leafpath::output::csv_field;
///
/// assert_eq!(csv_field("plain"), "\"plain\"");
/// assert_eq!(csv_field("a \"b\""), "\"a \"\"b\"\"\"");
/// ```
pub fn csv_field(value: &str) -> String {
    let escaped = if value.contains('"') {
        Cow::Owned(value.replace('"', "\"\""))
    } else {
        Cow::Borrowed(value)
    };
    format!("\"{escaped}\"")
}

/// Render rows as CSV with a header line.
///
/// Every field is quoted, so commas and line breaks in leaf text stay inside
/// their field.
pub fn render_csv(rows: &[LeafRow], with_type: bool) -> String {
    let mut out = String::new();
    out.push_str(if with_type { "type,text,path\n" } else { "text,path\n" });

    for row in rows {
        if with_type {
            out.push_str(&csv_field(ROW_TYPE));
            out.push(',');
        }
        out.push_str(&csv_field(&row.text));
        out.push(',');
        out.push_str(&csv_field(&row.path));
        out.push('\n');
    }
    out
}

/// Render rows in the given format.
pub fn render(rows: &[LeafRow], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_text(rows),
        OutputFormat::Csv => render_csv(rows, false),
        OutputFormat::TypedCsv => render_csv(rows, true),
    }
}

/// Save rows to a file, creating parent directories as needed.
///
/// # Returns
/// The path written to
pub fn save_rows(rows: &[LeafRow], path: &Path, format: OutputFormat) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, render(rows, format))?;
    tracing::debug!(path = %path.display(), rows = rows.len(), ?format, "Saved rows");

    Ok(path.to_path_buf())
}
