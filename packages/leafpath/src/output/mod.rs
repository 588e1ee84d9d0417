//! Rendering and saving of extracted rows.

mod writer;

pub use writer::{
    csv_field, format_line, render, render_csv, render_text, save_rows, OutputFormat, ROW_TYPE,
};
