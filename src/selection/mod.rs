//! Brush selection for stackbrush.
//!
//! The rendering layer forwards pointer events in pixel space; the
//! [`SelectionEngine`] turns them into a [`Selection`], maps it onto dataset
//! entries through the attached scales, and reports the selected subset with
//! a [`SelectionSummary`] to registered listeners.
//!
//! Selections live in the rendering layer's coordinate space, never in data
//! space. Data-space bounds are only available through
//! [`SelectionEngine::domain_range`] on continuous scales.

mod engine;
mod mapping;
mod summary;

pub use engine::{
    create_selection_engine, AxisField, BrushEvent, BrushEventKind, BrushHost, BrushState,
    PointerEvent, SelectionEngine,
};
pub use mapping::{
    highlight, select_by_scale, Highlight, MappedEntries, DIMMED_OPACITY, FULL_OPACITY,
};
pub use summary::{compute_summary, SelectionSummary};

use serde::{Deserialize, Serialize};

/// A pixel-space selection. Bounds are always stored low-to-high.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Selection {
    /// A 1-D range along the brushed axis.
    Span { low: f64, high: f64 },
    /// A 2-D rectangle.
    Region { x: (f64, f64), y: (f64, f64) },
}

impl Selection {
    pub fn span(a: f64, b: f64) -> Self {
        let (low, high) = ordered(a, b);
        Selection::Span { low, high }
    }

    pub fn region(x: (f64, f64), y: (f64, f64)) -> Self {
        Selection::Region {
            x: ordered(x.0, x.1),
            y: ordered(y.0, y.1),
        }
    }

    /// True when the selection has zero extent on any axis.
    pub fn is_empty(&self) -> bool {
        match *self {
            Selection::Span { low, high } => !(high > low),
            Selection::Region { x, y } => !(x.1 > x.0) || !(y.1 > y.0),
        }
    }

    /// Bounds to test on the x and y axes for a brush of `dimension`.
    pub fn bounds_for(&self, dimension: BrushDimension) -> (Option<(f64, f64)>, Option<(f64, f64)>) {
        match (*self, dimension) {
            (Selection::Span { low, high }, BrushDimension::Y) => (None, Some((low, high))),
            (Selection::Span { low, high }, _) => (Some((low, high)), None),
            (Selection::Region { x, .. }, BrushDimension::X) => (Some(x), None),
            (Selection::Region { y, .. }, BrushDimension::Y) => (None, Some(y)),
            (Selection::Region { x, y }, BrushDimension::XY) => (Some(x), Some(y)),
        }
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if b < a {
        (b, a)
    } else {
        (a, b)
    }
}

/// Which axes a brush constrains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushDimension {
    #[default]
    X,
    Y,
    XY,
}

/// Brush region geometry.
///
/// Deserializes from `{"type": "x" | "y" | "xy", "extent": [[x0, y0], [x1, y1]]}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrushOptions {
    #[serde(rename = "type", default)]
    pub dimension: BrushDimension,
    #[serde(default = "default_extent")]
    pub extent: [[f64; 2]; 2],
}

fn default_extent() -> [[f64; 2]; 2] {
    [[0.0, 0.0], [1.0, 1.0]]
}

impl Default for BrushOptions {
    fn default() -> Self {
        Self {
            dimension: BrushDimension::default(),
            extent: default_extent(),
        }
    }
}

impl BrushOptions {
    pub fn new(dimension: BrushDimension, extent: [[f64; 2]; 2]) -> Self {
        Self { dimension, extent }
    }

    fn x_bounds(&self) -> (f64, f64) {
        ordered(self.extent[0][0], self.extent[1][0])
    }

    fn y_bounds(&self) -> (f64, f64) {
        ordered(self.extent[0][1], self.extent[1][1])
    }

    /// Whether a point lies inside the brush region (inclusive).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (x0, x1) = self.x_bounds();
        let (y0, y1) = self.y_bounds();
        x >= x0 && x <= x1 && y >= y0 && y <= y1
    }

    /// Clamps a point into the brush region.
    ///
    /// A NaN extent bound leaves that side unclamped instead of panicking.
    pub fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
        let (x0, x1) = self.x_bounds();
        let (y0, y1) = self.y_bounds();
        (x.max(x0).min(x1), y.max(y0).min(y1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_order_bounds() {
        assert_eq!(
            Selection::span(9.0, 3.0),
            Selection::Span {
                low: 3.0,
                high: 9.0
            }
        );
        assert_eq!(
            Selection::region((5.0, 1.0), (2.0, 8.0)),
            Selection::Region {
                x: (1.0, 5.0),
                y: (2.0, 8.0)
            }
        );
    }

    #[test]
    fn test_empty_selections() {
        assert!(Selection::span(4.0, 4.0).is_empty());
        assert!(Selection::region((0.0, 5.0), (3.0, 3.0)).is_empty());
        assert!(!Selection::span(4.0, 4.5).is_empty());
    }

    #[test]
    fn test_brush_options_deserialize() {
        let opts: BrushOptions =
            serde_json::from_str(r#"{"type": "xy", "extent": [[0, 0], [640, 480]]}"#)
                .expect("parse");
        assert_eq!(opts.dimension, BrushDimension::XY);
        assert!(opts.contains(640.0, 0.0));
        assert!(!opts.contains(641.0, 10.0));
        assert_eq!(opts.clamp(-5.0, 500.0), (0.0, 480.0));

        let defaults: BrushOptions = serde_json::from_str("{}").expect("parse");
        assert_eq!(defaults, BrushOptions::default());
    }

    #[test]
    fn test_clamp_with_nan_extent_does_not_panic() {
        let opts = BrushOptions::new(BrushDimension::X, [[0.0, 0.0], [f64::NAN, 1.0]]);
        assert_eq!(opts.clamp(-5.0, 2.0), (0.0, 1.0));
        assert_eq!(opts.clamp(40.0, 0.5).0, 40.0);
        assert!(!opts.contains(40.0, 0.5));
    }
}
