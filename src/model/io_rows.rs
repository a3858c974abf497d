//! Readers for loose tabular input.
//!
//! These readers do not produce a [`Dataset`](super::Dataset). They return
//! plain JSON rows that the [format adapter](crate::adapter) turns into the
//! canonical shape. Three sources are supported:
//!
//! - JSON: a top-level array of objects
//! - YAML: a top-level sequence of mappings
//! - CSV: a header row followed by records; cells that parse cleanly as
//!   finite numbers become JSON numbers, everything else stays a string
//!
//! Currency strings such as `"$1,200"` are left as strings here. Turning
//! them into numbers is the adapter's job.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::{Map, Number, Value};

use crate::adapter::rows_from_value;
use crate::error::StackError;

/// Source format for row input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowFormat {
    Json,
    Yaml,
    Csv,
}

impl RowFormat {
    /// Human-readable name for the format.
    pub fn name(&self) -> &'static str {
        match self {
            RowFormat::Json => "json",
            RowFormat::Yaml => "yaml",
            RowFormat::Csv => "csv",
        }
    }

    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(RowFormat::Json),
            "yaml" | "yml" => Some(RowFormat::Yaml),
            "csv" => Some(RowFormat::Csv),
            _ => None,
        }
    }
}

/// Reads rows from a file in the given format.
pub fn read_rows(path: &Path, format: RowFormat) -> Result<Vec<Value>, StackError> {
    let file = File::open(path).map_err(StackError::Io)?;
    let mut reader = BufReader::new(file);

    match format {
        RowFormat::Json => {
            let value: Value =
                serde_json::from_reader(reader).map_err(|source| StackError::JsonParse {
                    path: path.to_path_buf(),
                    source,
                })?;
            rows_from_value(value)
        }
        RowFormat::Yaml => {
            let mut text = String::new();
            reader.read_to_string(&mut text).map_err(StackError::Io)?;
            rows_from_yaml_str(&text, path)
        }
        RowFormat::Csv => rows_from_csv_reader(reader, path),
    }
}

/// Reads rows from a CSV string.
///
/// Useful for testing and fuzzing without file I/O.
pub fn rows_from_csv_str(csv_str: &str) -> Result<Vec<Value>, StackError> {
    rows_from_csv_reader(csv_str.as_bytes(), Path::new("<string>"))
}

/// Reads rows from a YAML string.
pub fn rows_from_yaml(yaml: &str) -> Result<Vec<Value>, StackError> {
    rows_from_yaml_str(yaml, Path::new("<string>"))
}

/// Fuzz-only entrypoint: reads CSV rows from raw bytes and adapts them.
///
/// Returns the number of adapted entries, which always equals the row count.
#[cfg(feature = "fuzzing")]
pub fn fuzz_adapt_csv_bytes(data: &[u8]) -> Result<usize, StackError> {
    let rows = rows_from_csv_reader(data, Path::new("<fuzz>"))?;
    let dataset = crate::adapter::to_canonical(&rows, &crate::adapter::FormatOptions::default());
    Ok(dataset.len())
}

fn rows_from_yaml_str(yaml: &str, path: &Path) -> Result<Vec<Value>, StackError> {
    let value: Value = serde_yaml::from_str(yaml).map_err(|source| StackError::YamlParse {
        path: path.to_path_buf(),
        source,
    })?;
    rows_from_value(value)
}

fn rows_from_csv_reader<R: Read>(reader: R, path: &Path) -> Result<Vec<Value>, StackError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|source| StackError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|source| StackError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut row = Map::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            row.insert(header.trim().to_string(), csv_cell_value(cell));
        }
        rows.push(Value::Object(row));
    }

    Ok(rows)
}

fn csv_cell_value(cell: &str) -> Value {
    let trimmed = cell.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(cell.to_string()))
}
