//! Transform operators over canonical datasets.
//!
//! Every operator validates its input first and returns a fresh dataset.
//! Entries and segments are cloned with only the relevant fields replaced;
//! the input is never modified.

use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;

use crate::error::StackError;
use crate::model::{Dataset, Entry, Segment};
use crate::validation::validate;

/// Target of [`normalize`] when the caller has no preference.
pub const DEFAULT_TARGET_MAX: f64 = 100.0;

/// Reduction used by [`aggregate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AggregateMode {
    #[default]
    Sum,
    Average,
    Max,
    Min,
}

/// Key used by [`sort`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Case-insensitive label.
    #[default]
    Label,
    /// Absolute value of the segment sum.
    Total,
    /// Largest segment value.
    MaxStack,
    /// Number of segments.
    StackCount,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Attaches one scalar per entry, computed over its segment values.
///
/// The segments are kept and also copied into `original_stacks`.
pub fn aggregate(dataset: &Dataset, mode: AggregateMode) -> Result<Dataset, StackError> {
    validate(dataset)?;

    Ok(dataset
        .iter()
        .map(|entry| {
            let values = entry.stacks.iter().map(|s| s.value);
            let scalar = match mode {
                AggregateMode::Sum => values.sum::<f64>(),
                AggregateMode::Average => values.sum::<f64>() / entry.stacks.len() as f64,
                AggregateMode::Max => values.fold(f64::NEG_INFINITY, f64::max),
                AggregateMode::Min => values.fold(f64::INFINITY, f64::min),
            };

            Entry {
                aggregated_value: Some(scalar),
                original_stacks: Some(entry.stacks.clone()),
                ..entry.clone()
            }
        })
        .collect())
}

/// Reorders entries by `key`. Equal keys keep their input order.
pub fn sort(
    dataset: &Dataset,
    key: SortKey,
    direction: SortDirection,
) -> Result<Dataset, StackError> {
    validate(dataset)?;

    let mut entries = dataset.entries.clone();
    match (key, direction) {
        // Lowercase each label once instead of on every comparison.
        (SortKey::Label, SortDirection::Ascending) => {
            entries.sort_by_cached_key(|e| e.label.to_lowercase());
        }
        (SortKey::Label, SortDirection::Descending) => {
            entries.sort_by_cached_key(|e| Reverse(e.label.to_lowercase()));
        }
        (_, SortDirection::Ascending) => entries.sort_by(|a, b| compare_numeric(a, b, key)),
        (_, SortDirection::Descending) => {
            entries.sort_by(|a, b| compare_numeric(a, b, key).reverse());
        }
    }

    Ok(Dataset::new(entries))
}

fn compare_numeric(a: &Entry, b: &Entry, key: SortKey) -> Ordering {
    match key {
        SortKey::Label => Ordering::Equal,
        // Absolute value: a large decrement sorts next to a large increment.
        SortKey::Total => a.abs_total().total_cmp(&b.abs_total()),
        SortKey::MaxStack => {
            let max_a = a.max_stack().unwrap_or(f64::NEG_INFINITY);
            let max_b = b.max_stack().unwrap_or(f64::NEG_INFINITY);
            max_a.total_cmp(&max_b)
        }
        SortKey::StackCount => a.stacks.len().cmp(&b.stacks.len()),
    }
}

/// Keeps the entries for which `predicate` returns true.
pub fn filter<F>(dataset: &Dataset, predicate: F) -> Result<Dataset, StackError>
where
    F: Fn(&Entry) -> bool,
{
    validate(dataset)?;
    Ok(dataset.iter().filter(|e| predicate(*e)).cloned().collect())
}

/// Replaces every segment with `transform(segment)`.
///
/// The output is not re-validated; a transform that produces a NaN value or
/// an empty color is only caught by the next operator or an explicit
/// [`validate`] call.
pub fn map_segments<F>(dataset: &Dataset, transform: F) -> Result<Dataset, StackError>
where
    F: Fn(&Segment) -> Segment,
{
    validate(dataset)?;

    Ok(dataset
        .iter()
        .map(|entry| Entry {
            stacks: entry.stacks.iter().map(&transform).collect(),
            ..entry.clone()
        })
        .collect())
}

/// Scales all values so the largest absolute value becomes `target_max`.
///
/// The factor is computed once over the whole dataset. Each segment keeps its
/// pre-scale value in `original_value`. An all-zero dataset is returned
/// unchanged.
pub fn normalize(dataset: &Dataset, target_max: f64) -> Result<Dataset, StackError> {
    validate(dataset)?;

    let max_abs = dataset
        .iter()
        .flat_map(|e| e.stacks.iter())
        .map(|s| s.value.abs())
        .fold(0.0, f64::max);

    if max_abs == 0.0 {
        return Ok(dataset.clone());
    }

    let factor = target_max / max_abs;
    map_segments(dataset, |segment| Segment {
        value: segment.value * factor,
        original_value: Some(segment.value),
        ..segment.clone()
    })
}

/// Partitions entries by the key `category` computes for each of them.
///
/// Entries keep their relative order inside each group.
pub fn group_by<K, F>(dataset: &Dataset, category: F) -> Result<BTreeMap<K, Vec<Entry>>, StackError>
where
    K: Ord,
    F: Fn(&Entry) -> K,
{
    validate(dataset)?;

    let mut groups: BTreeMap<K, Vec<Entry>> = BTreeMap::new();
    for entry in dataset {
        groups.entry(category(entry)).or_default().push(entry.clone());
    }
    Ok(groups)
}

/// Sets each segment's share of its entry's absolute total, in percent.
pub fn percentages(dataset: &Dataset) -> Result<Dataset, StackError> {
    validate(dataset)?;

    Ok(dataset
        .iter()
        .map(|entry| {
            let abs_sum: f64 = entry.stacks.iter().map(|s| s.value.abs()).sum();
            let stacks = entry
                .stacks
                .iter()
                .map(|s| Segment {
                    percentage: Some(if abs_sum == 0.0 {
                        0.0
                    } else {
                        100.0 * s.value.abs() / abs_sum
                    }),
                    ..s.clone()
                })
                .collect();

            Entry {
                stacks,
                ..entry.clone()
            }
        })
        .collect())
}

/// Linearly interpolates segment values between two datasets of equal shape.
///
/// `t` is not clamped, so values outside `[0, 1]` extrapolate. Labels, colors
/// and other fields come from `from`.
pub fn interpolate(from: &Dataset, to: &Dataset, t: f64) -> Result<Dataset, StackError> {
    validate(from)?;
    validate(to)?;

    if from.len() != to.len() {
        return Err(StackError::ShapeMismatch {
            message: format!(
                "datasets have different lengths ({} vs {})",
                from.len(),
                to.len()
            ),
        });
    }

    from.iter()
        .zip(to.iter())
        .enumerate()
        .map(|(index, (a, b))| {
            if a.stacks.len() != b.stacks.len() {
                return Err(StackError::ShapeMismatch {
                    message: format!(
                        "entry {} has {} segment(s) in the first dataset and {} in the second",
                        index,
                        a.stacks.len(),
                        b.stacks.len()
                    ),
                });
            }

            let stacks = a
                .stacks
                .iter()
                .zip(&b.stacks)
                .map(|(sa, sb)| Segment {
                    value: sa.value + (sb.value - sa.value) * t,
                    ..sa.clone()
                })
                .collect();

            Ok(Entry {
                stacks,
                ..a.clone()
            })
        })
        .collect()
}

/// Undoes `aggregate` and `normalize`.
///
/// Entries with `original_stacks` get them back; segments with an
/// `original_value` get it back as their value. Derived fields are cleared.
pub fn restore(dataset: &Dataset) -> Result<Dataset, StackError> {
    validate(dataset)?;

    Ok(dataset
        .iter()
        .map(|entry| {
            let stacks = entry
                .original_stacks
                .as_ref()
                .unwrap_or(&entry.stacks)
                .iter()
                .map(|s| Segment {
                    value: s.original_value.unwrap_or(s.value),
                    original_value: None,
                    percentage: None,
                    ..s.clone()
                })
                .collect();

            Entry {
                label: entry.label.clone(),
                stacks,
                aggregated_value: None,
                original_stacks: None,
            }
        })
        .collect())
}

/// Running total after each entry, as drawn by a waterfall chart.
pub fn cumulative_totals(dataset: &Dataset) -> Vec<f64> {
    dataset
        .iter()
        .scan(0.0, |running, entry| {
            *running += entry.total();
            Some(*running)
        })
        .collect()
}
