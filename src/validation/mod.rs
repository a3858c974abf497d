//! Dataset validation for stackbrush.
//!
//! Two entry points share one rule set:
//! - [`validate`] checks an already-typed [`Dataset`] (non-empty, non-empty
//!   labels and stacks, finite values, non-empty colors)
//! - [`validate_value`] checks untyped JSON input first for structure
//!   (arrays, objects, strings, numbers) and then for the same rules,
//!   returning the typed dataset on success
//!
//! Both stop at the first violation and never mutate their input.

mod report;

pub use report::{IssueContext, ValidationError, ValidationRule};

use serde_json::{Map, Value};
use tracing::debug;

use crate::model::{Dataset, Entry, Segment};

/// Validates a typed dataset.
///
/// Checks, in order: the dataset is non-empty; each entry has a non-empty
/// label and at least one segment; each segment has a finite value and a
/// non-empty color.
pub fn validate(dataset: &Dataset) -> Result<(), ValidationError> {
    if dataset.is_empty() {
        return Err(ValidationError::new(
            ValidationRule::EmptyDataset,
            IssueContext::Dataset,
            "dataset must contain at least one entry",
        ));
    }

    for (index, entry) in dataset.iter().enumerate() {
        check_label(index, &entry.label)?;

        if entry.stacks.is_empty() {
            return Err(empty_stacks(index));
        }

        for (segment, seg) in entry.stacks.iter().enumerate() {
            check_value(index, segment, seg.value)?;
            check_color(index, segment, &seg.color)?;
        }
    }

    Ok(())
}

/// Validates untyped JSON and converts it into a dataset.
pub fn validate_value(value: &Value) -> Result<Dataset, ValidationError> {
    let items = value.as_array().ok_or_else(|| {
        ValidationError::new(
            ValidationRule::NotASequence,
            IssueContext::Dataset,
            format!("expected an array of entries, found {}", json_type(value)),
        )
    })?;

    if items.is_empty() {
        return Err(ValidationError::new(
            ValidationRule::EmptyDataset,
            IssueContext::Dataset,
            "dataset must contain at least one entry",
        ));
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| validate_entry_value(index, item))
        .collect()
}

/// Validates a single untyped entry and converts it.
///
/// `index` is only used to label errors. The format adapter uses this to
/// decide whether a row is already canonical.
pub fn validate_entry_value(index: usize, value: &Value) -> Result<Entry, ValidationError> {
    let obj = value.as_object().ok_or_else(|| {
        ValidationError::new(
            ValidationRule::EntryNotAnObject,
            IssueContext::Entry { index },
            format!("expected an object, found {}", json_type(value)),
        )
    })?;

    let label = obj.get("label").and_then(Value::as_str).ok_or_else(|| {
        ValidationError::new(
            ValidationRule::MissingLabel,
            IssueContext::Entry { index },
            "label must be a string",
        )
    })?;
    check_label(index, label)?;

    let raw_stacks = obj.get("stacks").and_then(Value::as_array).ok_or_else(|| {
        ValidationError::new(
            ValidationRule::StacksNotASequence,
            IssueContext::Entry { index },
            "stacks must be an array",
        )
    })?;
    if raw_stacks.is_empty() {
        return Err(empty_stacks(index));
    }

    let stacks = raw_stacks
        .iter()
        .enumerate()
        .map(|(segment, raw)| segment_from_value(index, segment, raw))
        .collect::<Result<Vec<_>, _>>()?;

    // Derived fields are optional; a malformed one is dropped, not fatal.
    let original_stacks = match obj.get("originalStacks") {
        None | Some(Value::Null) => None,
        Some(raw) => match serde_json::from_value::<Vec<Segment>>(raw.clone()) {
            Ok(segments) => Some(segments),
            Err(err) => {
                debug!(entry = index, error = %err, "discarding malformed originalStacks");
                None
            }
        },
    };

    let aggregated_value = match obj.get("aggregatedValue") {
        None | Some(Value::Null) => None,
        Some(raw) => {
            let number = raw.as_f64();
            if number.is_none() {
                debug!(
                    entry = index,
                    found = json_type(raw),
                    "discarding non-numeric aggregatedValue"
                );
            }
            number
        }
    };

    Ok(Entry {
        label: label.to_string(),
        stacks,
        aggregated_value,
        original_stacks,
    })
}

fn segment_from_value(
    entry: usize,
    segment: usize,
    value: &Value,
) -> Result<Segment, ValidationError> {
    let context = IssueContext::Segment { entry, segment };
    let obj: &Map<String, Value> = value.as_object().ok_or_else(|| {
        ValidationError::new(
            ValidationRule::SegmentNotAnObject,
            context,
            format!("expected an object, found {}", json_type(value)),
        )
    })?;

    let number = obj.get("value").and_then(Value::as_f64).ok_or_else(|| {
        ValidationError::new(
            ValidationRule::NonNumericValue,
            context,
            format!(
                "value must be a number, found {}",
                obj.get("value").map_or("nothing", json_type)
            ),
        )
    })?;
    check_value(entry, segment, number)?;

    let color = obj.get("color").and_then(Value::as_str).ok_or_else(|| {
        ValidationError::new(
            ValidationRule::NonStringColor,
            context,
            "color must be a string",
        )
    })?;
    check_color(entry, segment, color)?;

    Ok(Segment {
        value: number,
        color: color.to_string(),
        label: obj.get("label").and_then(Value::as_str).map(str::to_string),
        percentage: obj.get("percentage").and_then(Value::as_f64),
        original_value: obj.get("originalValue").and_then(Value::as_f64),
    })
}

fn check_label(index: usize, label: &str) -> Result<(), ValidationError> {
    if label.is_empty() {
        return Err(ValidationError::new(
            ValidationRule::EmptyLabel,
            IssueContext::Entry { index },
            "label must not be empty",
        ));
    }
    Ok(())
}

fn empty_stacks(index: usize) -> ValidationError {
    ValidationError::new(
        ValidationRule::EmptyStacks,
        IssueContext::Entry { index },
        "stacks must contain at least one segment",
    )
}

fn check_value(entry: usize, segment: usize, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::new(
            ValidationRule::NonFiniteValue,
            IssueContext::Segment { entry, segment },
            format!("value must be finite, found {}", value),
        ));
    }
    Ok(())
}

fn check_color(entry: usize, segment: usize, color: &str) -> Result<(), ValidationError> {
    if color.is_empty() {
        return Err(ValidationError::new(
            ValidationRule::EmptyColor,
            IssueContext::Segment { entry, segment },
            "color must not be empty",
        ));
    }
    Ok(())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
