//! Synthetic dataset generation for demos and tests.

use rand::prelude::*;

use crate::error::StackError;
use crate::model::{Dataset, Entry, Segment};

/// Chance that a generated segment value is negated.
pub const NEGATE_PROBABILITY: f64 = 0.2;

/// Colors assigned to segments by stack position.
pub const PALETTE: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
];

/// Sample generation options.
#[derive(Clone, Debug)]
pub struct SampleOptions {
    /// Number of entries to generate.
    pub categories: usize,
    /// Upper bound (inclusive) on segments per entry.
    pub max_stacks: usize,
    /// Inclusive range segment magnitudes are drawn from.
    pub value_range: (f64, f64),
    /// Seed for reproducible output.
    pub seed: Option<u64>,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            categories: 8,
            max_stacks: 3,
            value_range: (10.0, 100.0),
            seed: None,
        }
    }
}

/// Validate sample options before running.
pub fn validate_sample_options(opts: &SampleOptions) -> Result<(), StackError> {
    if opts.categories == 0 {
        return Err(StackError::InvalidSampleParams {
            message: "--categories must be greater than 0".to_string(),
        });
    }

    if opts.max_stacks == 0 {
        return Err(StackError::InvalidSampleParams {
            message: "--max-stacks must be greater than 0".to_string(),
        });
    }

    let (lo, hi) = opts.value_range;
    if !lo.is_finite() || !hi.is_finite() {
        return Err(StackError::InvalidSampleParams {
            message: "value range bounds must be finite".to_string(),
        });
    }
    if lo > hi {
        return Err(StackError::InvalidSampleParams {
            message: format!("value range is reversed ({} > {})", lo, hi),
        });
    }
    if !(hi - lo).is_finite() {
        return Err(StackError::InvalidSampleParams {
            message: format!("value range [{}, {}] is too wide", lo, hi),
        });
    }

    Ok(())
}

/// Generate a random dataset.
///
/// Each entry gets a uniform number of segments in `[1, max_stacks]`; each
/// segment value is uniform in `value_range` and negated with probability
/// [`NEGATE_PROBABILITY`]. Output is deterministic for a given seed.
pub fn generate_sample(opts: &SampleOptions) -> Result<Dataset, StackError> {
    validate_sample_options(opts)?;

    let seed = opts.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let (lo, hi) = opts.value_range;

    let dataset: Dataset = (0..opts.categories)
        .map(|i| {
            let stack_count = rng.random_range(1..=opts.max_stacks);
            let stacks = (0..stack_count)
                .map(|j| {
                    let magnitude = if lo == hi {
                        lo
                    } else {
                        rng.random_range(lo..=hi)
                    };
                    let value = if rng.random_bool(NEGATE_PROBABILITY) {
                        -magnitude
                    } else {
                        magnitude
                    };
                    Segment::new(value, PALETTE[j % PALETTE.len()])
                        .with_label(format!("Stack {}", j + 1))
                })
                .collect();

            Entry::new(format!("Category {}", i + 1), stacks)
        })
        .collect();

    tracing::debug!(
        seed,
        categories = opts.categories,
        "generated sample dataset"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;

    fn opts(seed: u64) -> SampleOptions {
        SampleOptions {
            categories: 12,
            max_stacks: 4,
            value_range: (5.0, 50.0),
            seed: Some(seed),
        }
    }

    #[test]
    fn validate_opts_rejects_invalid_params() {
        let zero = SampleOptions {
            categories: 0,
            ..opts(1)
        };
        assert!(validate_sample_options(&zero).is_err());

        let no_stacks = SampleOptions {
            max_stacks: 0,
            ..opts(1)
        };
        assert!(validate_sample_options(&no_stacks).is_err());

        let reversed = SampleOptions {
            value_range: (10.0, 1.0),
            ..opts(1)
        };
        assert!(generate_sample(&reversed).is_err());
    }

    #[test]
    fn validate_opts_rejects_overflowing_range() {
        let too_wide = SampleOptions {
            value_range: (-1e308, 1e308),
            ..opts(1)
        };
        assert!(matches!(
            generate_sample(&too_wide),
            Err(StackError::InvalidSampleParams { .. })
        ));

        let wide_but_finite = SampleOptions {
            value_range: (-1e307, 1e307),
            ..opts(1)
        };
        assert!(generate_sample(&wide_but_finite).is_ok());
    }

    #[test]
    fn generated_shape_is_valid() {
        let dataset = generate_sample(&opts(7)).expect("generate");
        assert_eq!(dataset.len(), 12);
        assert!(validate(&dataset).is_ok());

        for (i, entry) in dataset.iter().enumerate() {
            assert_eq!(entry.label, format!("Category {}", i + 1));
            assert!((1..=4).contains(&entry.stacks.len()));
            for segment in &entry.stacks {
                let magnitude = segment.value.abs();
                assert!((5.0..=50.0).contains(&magnitude), "{}", segment.value);
            }
        }
    }

    #[test]
    fn sampling_is_deterministic_with_seed() {
        let a = generate_sample(&opts(42)).expect("generate");
        let b = generate_sample(&opts(42)).expect("generate");
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_range_produces_fixed_magnitude() {
        let dataset = generate_sample(&SampleOptions {
            value_range: (3.0, 3.0),
            ..opts(9)
        })
        .expect("generate");
        assert!(dataset
            .iter()
            .flat_map(|e| e.stacks.iter())
            .all(|s| s.value.abs() == 3.0));
    }
}
