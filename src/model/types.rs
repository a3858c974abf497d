//! Segment, Entry and Dataset types.

use serde::{Deserialize, Serialize};

/// One signed contribution inside an entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Signed value of the contribution.
    pub value: f64,

    /// Display color (any CSS color string).
    pub color: String,

    /// Optional display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Share of the entry's absolute total, set by `percentages`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,

    /// Value before the last `normalize`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_value: Option<f64>,
}

impl Segment {
    /// Creates a segment with a value and color.
    pub fn new(value: f64, color: impl Into<String>) -> Self {
        Self {
            value,
            color: color.into(),
            label: None,
            percentage: None,
            original_value: None,
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// One category row of the chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Category label (x-axis key).
    pub label: String,

    /// Stacked segments, bottom to top.
    pub stacks: Vec<Segment>,

    /// Scalar set by `aggregate`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregated_value: Option<f64>,

    /// Snapshot of `stacks` taken by `aggregate`, used by `restore`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_stacks: Option<Vec<Segment>>,
}

impl Entry {
    /// Creates an entry with a label and its segments.
    pub fn new(label: impl Into<String>, stacks: Vec<Segment>) -> Self {
        Self {
            label: label.into(),
            stacks,
            aggregated_value: None,
            original_stacks: None,
        }
    }

    /// Signed sum of all segment values.
    pub fn total(&self) -> f64 {
        self.stacks.iter().map(|s| s.value).sum()
    }

    /// Absolute value of the signed sum.
    pub fn abs_total(&self) -> f64 {
        self.total().abs()
    }

    /// Largest segment value, or `None` when there are no segments.
    pub fn max_stack(&self) -> Option<f64> {
        self.stacks.iter().map(|s| s.value).reduce(f64::max)
    }
}

/// An ordered sequence of entries. Order is the categorical axis order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    pub entries: Vec<Entry>,
}

impl Dataset {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Labels in dataset order.
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }
}

impl From<Vec<Entry>> for Dataset {
    fn from(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

impl FromIterator<Entry> for Dataset {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
