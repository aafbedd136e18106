// src/ingest/mod.rs
use anyhow::{bail, Result};
use std::path::Path;
use tracing::info;

pub mod csv;
pub mod excel;

/// One uploaded table, read wholesale: a header row plus every data row in
/// original order. Rows may be ragged; missing cells read as empty.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Column names, from the header row of the file.
    pub headers: Vec<String>,
    /// Each data row, as a Vec of Strings (one per field).
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Position of a named column, matching on the trimmed header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }
}

/// Cell accessor tolerant of ragged rows and absent columns.
pub fn cell<'a>(row: &'a [String], idx: Option<usize>) -> &'a str {
    idx.and_then(|i| row.get(i)).map(String::as_str).unwrap_or("")
}

/// Load a tabular file wholesale, dispatching on the extension.
/// Anything that cannot be read as a table is a single descriptive failure;
/// no partial table is returned.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let table = match ext.as_str() {
        "csv" => csv::load_csv(path)?,
        "xlsx" | "xlsm" | "xls" => excel::load_workbook(path)?,
        other => bail!(
            "unsupported input format `{}` for {}",
            other,
            path.display()
        ),
    };

    info!(
        rows = table.rows.len(),
        columns = table.headers.len(),
        "loaded table"
    );
    Ok(table)
}
