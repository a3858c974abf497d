use std::collections::HashMap;

use super::{ScaleAdapter, ScaleKey};
use crate::error::StackError;

/// A band scale divides a continuous pixel range into uniform bands, one per
/// category, in domain order.
///
/// # Defaults
/// - range: (0.0, 1.0)
/// - padding_inner: 0.0
/// - padding_outer: 0.0
/// - align: 0.5
#[derive(Debug, Clone)]
pub struct BandScale {
    domain: Vec<String>,
    index: HashMap<String, usize>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
}

impl BandScale {
    /// Creates a band scale over `domain`.
    ///
    /// Duplicate keys are dropped, keeping the first occurrence, so there is
    /// one band per distinct key.
    pub fn try_new(domain: Vec<String>) -> Result<Self, StackError> {
        if domain.is_empty() {
            return Err(StackError::Configuration {
                message: "band scale domain is empty".to_string(),
            });
        }

        let mut index = HashMap::with_capacity(domain.len());
        let mut unique = Vec::with_capacity(domain.len());
        for key in domain {
            if !index.contains_key(&key) {
                index.insert(key.clone(), unique.len());
                unique.push(key);
            }
        }

        Ok(Self {
            domain: unique,
            index,
            range: (0.0, 1.0),
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
        })
    }

    /// Sets the output range. A reversed range lays bands out back to front.
    pub fn range(mut self, range: (f64, f64)) -> Self {
        self.range = range;
        self
    }

    /// Sets the share of each step left blank between bands, clamped to [0, 1].
    pub fn padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self
    }

    /// Sets the blank space before the first and after the last band, in steps.
    pub fn padding_outer(mut self, padding: f64) -> Self {
        self.padding_outer = padding.max(0.0);
        self
    }

    /// Sets how leftover space is distributed (0 = start, 0.5 = centered, 1 = end).
    pub fn align(mut self, align: f64) -> Self {
        self.align = align.clamp(0.0, 1.0);
        self
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    fn ordered_range(&self) -> (f64, f64, bool) {
        let (r0, r1) = self.range;
        if r1 < r0 {
            (r1, r0, true)
        } else {
            (r0, r1, false)
        }
    }

    /// Distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        let (start, stop, _) = self.ordered_range();
        let n = self.domain.len() as f64;
        let space = n - self.padding_inner + self.padding_outer * 2.0;
        (stop - start) / space.max(1.0)
    }

    /// Start of the band at `index`.
    fn band_start(&self, index: usize) -> f64 {
        let (start, stop, reverse) = self.ordered_range();
        let n = self.domain.len();
        let step = self.step();
        let first = start + (stop - start - step * (n as f64 - self.padding_inner)) * self.align;

        let slot = if reverse { n - 1 - index } else { index };
        first + step * slot as f64
    }
}

impl ScaleAdapter for BandScale {
    fn position_of(&self, key: &ScaleKey<'_>) -> Option<f64> {
        let index = match key {
            ScaleKey::Category(label) => *self.index.get(*label)?,
            ScaleKey::Value(_) => return None,
        };
        Some(self.band_start(index))
    }

    fn bandwidth(&self) -> Option<f64> {
        Some(self.step() * (1.0 - self.padding_inner))
    }
}
