//! CSV file I/O for the minisheet editor.
//!
//! RFC 4180 parsing via the `csv` crate: quoted fields, escaped quotes and
//! embedded newlines all round-trip. Files are UTF-8; a leading byte-order
//! mark is tolerated on read and never written. Ragged input rows are padded
//! to the widest row so callers always receive a rectangular table.

use std::fs;
use std::path::Path;

use thiserror::Error;

/// Errors surfaced by [`load`] and [`save`].
///
/// Never swallowed here: the controller catches these at its boundary and
/// turns them into a status message, aborting the operation with no partial
/// mutation.
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),
}

/// UTF-8 byte-order mark, tolerated at the start of loaded files.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Load a CSV file into a rectangular table.
///
/// Every row is padded with `""` to the maximum observed row length. An
/// empty file normalizes to a single empty cell, so the result is always at
/// least 1x1.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Vec<String>>, CsvError> {
    let mut bytes = fs::read(path)?;
    if bytes.starts_with(UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }
    let content = String::from_utf8(bytes)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let max_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    if max_cols == 0 {
        return Ok(vec![vec![String::new()]]);
    }
    for row in &mut rows {
        row.resize(max_cols, String::new());
    }
    Ok(rows)
}

/// Write a table to a CSV file.
///
/// Rows are written verbatim with conventional quoting (fields containing
/// the delimiter, quotes or newlines get quoted, quotes doubled), UTF-8
/// without a BOM, `\n` record terminator.
pub fn save(path: impl AsRef<Path>, rows: &[Vec<String>]) -> Result<(), CsvError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
