//! Pixel selection to entry indices, and the highlight contract.

use serde::Serialize;

use super::{BrushDimension, Selection};
use crate::model::Dataset;
use crate::scale::{ScaleAdapter, ScaleKey, ScaleKind};

/// Opacity of selected entries, and of every entry when nothing is selected.
pub const FULL_OPACITY: f64 = 1.0;

/// Opacity of entries outside a non-empty selection.
pub const DIMMED_OPACITY: f64 = 0.3;

/// Per-entry styling consumed by the rendering layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Highlight {
    pub selected: bool,
    pub opacity: f64,
}

/// Cached selection positions for every entry, per axis.
///
/// `None` for a whole axis means no scale is attached on it; `None` for a
/// single entry means the scale could not map it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MappedEntries {
    pub len: usize,
    pub x: Option<Vec<Option<f64>>>,
    pub y: Option<Vec<Option<f64>>>,
}

impl MappedEntries {
    /// Indices of entries inside `selection`, in dataset order.
    ///
    /// No selection selects everything. An entry must fall within the bounds
    /// (inclusive) on every brushed axis that has a scale.
    pub fn select(&self, dimension: BrushDimension, selection: Option<&Selection>) -> Vec<usize> {
        let Some(selection) = selection else {
            return (0..self.len).collect();
        };

        let (x_bounds, y_bounds) = selection.bounds_for(dimension);
        (0..self.len)
            .filter(|&i| {
                within(self.x.as_deref(), x_bounds, i) && within(self.y.as_deref(), y_bounds, i)
            })
            .collect()
    }
}

fn within(positions: Option<&[Option<f64>]>, bounds: Option<(f64, f64)>, index: usize) -> bool {
    let (Some(positions), Some((low, high))) = (positions, bounds) else {
        return true;
    };
    matches!(positions.get(index), Some(Some(p)) if *p >= low && *p <= high)
}

/// Indices of the entries whose category falls within `range` on `scale`.
///
/// A standalone form of the engine's x-axis mapping for hosts that keep
/// their own selection state. `None` selects everything. A scale without a
/// bandwidth is treated as continuous.
pub fn select_by_scale(
    dataset: &Dataset,
    scale: &dyn ScaleAdapter,
    range: Option<(f64, f64)>,
) -> Vec<usize> {
    let kind = ScaleKind::detect(scale).unwrap_or(ScaleKind::Continuous);
    let mapped = MappedEntries {
        len: dataset.len(),
        x: Some(
            dataset
                .iter()
                .map(|e| kind.selection_position(scale, &ScaleKey::Category(&e.label)))
                .collect(),
        ),
        y: None,
    };

    let selection = range.map(|(a, b)| Selection::span(a, b));
    mapped.select(BrushDimension::X, selection.as_ref())
}

/// Styling for `len` entries given the selected indices.
///
/// An empty index list excludes nothing: every entry stays fully visible.
pub fn highlight(len: usize, selected: &[usize]) -> Vec<Highlight> {
    let mut flags = vec![false; len];
    for &i in selected {
        if let Some(flag) = flags.get_mut(i) {
            *flag = true;
        }
    }

    let nothing_excluded = selected.is_empty();
    flags
        .into_iter()
        .map(|selected| Highlight {
            selected,
            opacity: if selected || nothing_excluded {
                FULL_OPACITY
            } else {
                DIMMED_OPACITY
            },
        })
        .collect()
}
