//! Format adapter: loose rows to canonical entries.
//!
//! Each input row is first checked against the canonical entry shape. Rows
//! that pass are kept as-is. Every other row is turned into a one-segment
//! entry using the configured column names, with defaults filled in for
//! anything missing or unreadable.
//!
//! The adapter never fails on a malformed row. Callers run
//! [`validate`](crate::validation::validate) on the result when they need a
//! guarantee.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::StackError;
use crate::model::{Dataset, Entry, Segment};
use crate::validation::validate_entry_value;

/// Color used when a row has no usable color column.
pub const DEFAULT_COLOR: &str = "#4682b4";

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥', '₹', '₩', '¢'];

/// Options for adapting rows.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatOptions {
    /// Column holding the numeric value.
    pub value_column: String,
    /// Column holding the category label.
    pub label_column: String,
    /// Column holding the segment color.
    pub color_column: String,
    /// Color for rows without one.
    pub default_color: String,
    /// Parse currency-formatted strings into numbers.
    pub parse_numbers: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            value_column: "value".to_string(),
            label_column: "label".to_string(),
            color_column: "color".to_string(),
            default_color: DEFAULT_COLOR.to_string(),
            parse_numbers: true,
        }
    }
}

/// Unwraps a top-level JSON array into its rows.
///
/// # Errors
/// Returns [`StackError::TypeMismatch`] if `value` is not an array.
pub fn rows_from_value(value: Value) -> Result<Vec<Value>, StackError> {
    match value {
        Value::Array(rows) => Ok(rows),
        Value::Null => Err(type_mismatch("null")),
        Value::Bool(_) => Err(type_mismatch("boolean")),
        Value::Number(_) => Err(type_mismatch("number")),
        Value::String(_) => Err(type_mismatch("string")),
        Value::Object(_) => Err(type_mismatch("object")),
    }
}

fn type_mismatch(found: &str) -> StackError {
    StackError::TypeMismatch {
        expected: "an array of rows",
        found: found.to_string(),
    }
}

/// Converts rows into a canonical dataset.
pub fn to_canonical(rows: &[Value], opts: &FormatOptions) -> Dataset {
    let dataset: Dataset = rows
        .iter()
        .enumerate()
        .map(|(index, row)| match validate_entry_value(index, row) {
            Ok(entry) => entry,
            Err(_) => synthesize_entry(index, row, opts),
        })
        .collect();

    tracing::debug!(rows = rows.len(), "adapted rows to canonical entries");
    dataset
}

fn synthesize_entry(index: usize, row: &Value, opts: &FormatOptions) -> Entry {
    let empty = Map::new();
    let fields = row.as_object().unwrap_or(&empty);

    let label = fields
        .get(&opts.label_column)
        .and_then(cell_text)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("Item {}", index + 1));

    let value = fields
        .get(&opts.value_column)
        .map(|cell| cell_number(cell, opts.parse_numbers))
        .unwrap_or(0.0);

    let color = fields
        .get(&opts.color_column)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(opts.default_color.as_str())
        .to_string();

    Entry::new(
        label,
        vec![Segment::new(value, color).with_label(signed_label(value))],
    )
}

fn cell_text(cell: &Value) -> Option<String> {
    match cell {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn cell_number(cell: &Value, parse_numbers: bool) -> f64 {
    let value = match cell {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) if parse_numbers => parse_number(s).unwrap_or(0.0),
        _ => 0.0,
    };
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Parses a possibly currency-formatted number such as `"$1,234.50"`.
///
/// Strips whitespace, thousands separators (`,` and `_`) and common currency
/// symbols before parsing. Returns `None` when what remains is not a number.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '_')
        .filter(|c| !CURRENCY_SYMBOLS.contains(c))
        .collect();

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Renders a value with an explicit sign (`+12`, `-5`).
pub fn signed_label(value: f64) -> String {
    if value < 0.0 {
        format!("{}", value)
    } else {
        format!("+{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_rows_pass_through() {
        let row = json!({
            "label": "Kept",
            "stacks": [{"value": 4, "color": "red"}, {"value": -1, "color": "blue"}]
        });
        let dataset = to_canonical(&[row], &FormatOptions::default());

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.entries[0].label, "Kept");
        assert_eq!(dataset.entries[0].stacks.len(), 2);
        assert_eq!(dataset.entries[0].stacks[0].label, None);
    }

    #[test]
    fn test_flat_rows_are_synthesized() {
        let rows = vec![
            json!({"label": "Revenue", "value": "$1,200.50", "color": "#0a0"}),
            json!({"value": -300}),
        ];
        let dataset = to_canonical(&rows, &FormatOptions::default());

        let first = &dataset.entries[0];
        assert_eq!(first.label, "Revenue");
        assert_eq!(first.stacks[0].value, 1200.5);
        assert_eq!(first.stacks[0].color, "#0a0");
        assert_eq!(first.stacks[0].label.as_deref(), Some("+1200.5"));

        let second = &dataset.entries[1];
        assert_eq!(second.label, "Item 2");
        assert_eq!(second.stacks[0].value, -300.0);
        assert_eq!(second.stacks[0].color, DEFAULT_COLOR);
        assert_eq!(second.stacks[0].label.as_deref(), Some("-300"));
    }

    #[test]
    fn test_custom_columns_and_no_parsing() {
        let opts = FormatOptions {
            value_column: "amount".into(),
            label_column: "name".into(),
            color_column: "fill".into(),
            default_color: "gray".into(),
            parse_numbers: false,
        };
        let rows = vec![
            json!({"name": "A", "amount": "1,000"}),
            json!({"name": 2024, "amount": 7.5, "fill": "red"}),
        ];
        let dataset = to_canonical(&rows, &opts);

        assert_eq!(dataset.entries[0].stacks[0].value, 0.0);
        assert_eq!(dataset.entries[0].stacks[0].color, "gray");
        assert_eq!(dataset.entries[1].label, "2024");
        assert_eq!(dataset.entries[1].stacks[0].value, 7.5);
    }

    #[test]
    fn test_malformed_rows_degrade_to_defaults() {
        let rows = vec![json!(null), json!("text"), json!({"label": "", "value": "abc"})];
        let dataset = to_canonical(&rows, &FormatOptions::default());

        assert_eq!(dataset.labels(), vec!["Item 1", "Item 2", "Item 3"]);
        assert!(dataset.iter().all(|e| e.stacks[0].value == 0.0));
        assert!(crate::validation::validate(&dataset).is_ok());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("€ 1 234,5"), Some(12345.0));
        assert_eq!(parse_number("-$45.10"), Some(-45.1));
        assert_eq!(parse_number("£1_000"), Some(1000.0));
        assert_eq!(parse_number("n/a"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_signed_label() {
        assert_eq!(signed_label(12.0), "+12");
        assert_eq!(signed_label(-5.5), "-5.5");
        assert_eq!(signed_label(0.0), "+0");
    }

    #[test]
    fn test_rows_from_value_requires_array() {
        assert!(rows_from_value(json!([1, 2])).is_ok());
        match rows_from_value(json!({"a": 1})) {
            Err(StackError::TypeMismatch { found, .. }) => assert_eq!(found, "object"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let opts: FormatOptions =
            serde_json::from_value(json!({"valueColumn": "amount", "parseNumbers": false}))
                .expect("deserialize");
        assert_eq!(opts.value_column, "amount");
        assert_eq!(opts.label_column, "label");
        assert!(!opts.parse_numbers);
    }
}
