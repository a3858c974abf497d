//! JSON serialization for canonical datasets.
//!
//! Datasets are written as a bare JSON array of entries. Reading goes through
//! [`validate_value`](crate::validation::validate_value) so that a malformed
//! file reports which entry and segment broke the shape, instead of a serde
//! "missing field" message.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde_json::Value;

use super::types::Dataset;
use crate::error::StackError;
use crate::validation::validate_value;

/// Reads any JSON document from a file.
pub fn read_json_value(path: &Path) -> Result<Value, StackError> {
    let file = File::open(path).map_err(StackError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| StackError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and structurally validates a canonical dataset from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read, is not JSON, or does not
/// have the canonical `[{label, stacks: [{value, color}]}]` shape.
pub fn read_dataset_json(path: &Path) -> Result<Dataset, StackError> {
    let value = read_json_value(path)?;
    Ok(validate_value(&value)?)
}

/// Writes a dataset to a JSON file (pretty-printed).
pub fn write_dataset_json(path: &Path, dataset: &Dataset) -> Result<(), StackError> {
    let file = File::create(path).map_err(StackError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, dataset).map_err(|source| StackError::JsonWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and validates a dataset from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_json_str(json: &str) -> Result<Dataset, StackError> {
    let value: Value = serde_json::from_str(json).map_err(|source| StackError::JsonParse {
        path: Path::new("<string>").to_path_buf(),
        source,
    })?;
    Ok(validate_value(&value)?)
}

/// Writes a dataset to a pretty JSON string.
pub fn to_json_string(dataset: &Dataset) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(dataset)
}
