//! Canonical data model for stackbrush.
//!
//! Every operator in the crate works on the nested `Dataset -> Entry -> Segment`
//! shape defined here. Format readers produce loose rows, the adapter turns
//! them into this shape, and the validator decides whether it is well formed.
//!
//! # Design Principles
//!
//! 1. **Value semantics**: operators take `&Dataset` and return a new
//!    `Dataset`. Nothing in the crate mutates a dataset it was handed.
//!
//! 2. **Permissive construction**: the types can hold data that breaks the
//!    invariants (empty labels, NaN values) so that validation can report
//!    the problem instead of a constructor panicking.
//!
//! # Example
//!
//! ```
//! use stackbrush::model::{Dataset, Entry, Segment};
//!
//! let dataset = Dataset::new(vec![
//!     Entry::new("Revenue", vec![Segment::new(120.0, "#2ca02c")]),
//!     Entry::new("Costs", vec![Segment::new(-45.0, "#d62728")]),
//! ]);
//! assert_eq!(dataset.len(), 2);
//! ```

pub mod io_json;
pub mod io_rows;
mod types;

pub use types::{Dataset, Entry, Segment};
