//! Summary statistics over a selected subset.

use serde::Serialize;
use std::fmt;

use crate::model::Entry;

/// Count, sum, mean and range of the selected entries' values.
///
/// An empty subset has every numeric field at 0 and no extent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SelectionSummary {
    pub count: usize,
    pub sum: f64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    /// `(min, max)`, or `None` for an empty subset.
    pub extent: Option<(f64, f64)>,
}

impl SelectionSummary {
    /// Summarizes a sequence of values.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut extent: Option<(f64, f64)> = None;

        for value in values {
            count += 1;
            sum += value;
            extent = Some(match extent {
                Some((lo, hi)) => (lo.min(value), hi.max(value)),
                None => (value, value),
            });
        }

        match extent {
            Some((min, max)) => Self {
                count,
                sum,
                average: sum / count as f64,
                min,
                max,
                extent,
            },
            None => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Summarizes `entries` using `accessor` to pick each entry's value.
pub fn compute_summary<'a, I, F>(entries: I, accessor: F) -> SelectionSummary
where
    I: IntoIterator<Item = &'a Entry>,
    F: Fn(&Entry) -> f64,
{
    SelectionSummary::from_values(entries.into_iter().map(accessor))
}

impl fmt::Display for SelectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Selection summary")?;
        writeln!(f, "  count:   {}", self.count)?;
        writeln!(f, "  sum:     {}", self.sum)?;
        writeln!(f, "  average: {}", self.average)?;
        match self.extent {
            Some((min, max)) => writeln!(f, "  extent:  [{}, {}]", min, max),
            None => writeln!(f, "  extent:  (none)"),
        }
    }
}
