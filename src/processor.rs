//! A stateless bundle of the data operations, for hosts that want one handle.
//!
//! Each method forwards to the operator of the same purpose in
//! [`transform`](crate::transform), [`validation`](crate::validation) or
//! [`sample`](crate::sample).

use std::collections::BTreeMap;

use crate::error::StackError;
use crate::model::{Dataset, Entry, Segment};
use crate::sample::{generate_sample, SampleOptions};
use crate::transform::{self, AggregateMode, SortDirection, SortKey};
use crate::validation::validate;

#[derive(Clone, Copy, Debug, Default)]
pub struct DataProcessor;

/// Creates a processor. Processors hold no state; construct one per host.
pub fn create_data_processor() -> DataProcessor {
    DataProcessor
}

impl DataProcessor {
    pub fn validate_data(&self, dataset: &Dataset) -> Result<(), StackError> {
        validate(dataset)?;
        Ok(())
    }

    pub fn aggregate_data(&self, dataset: &Dataset, mode: AggregateMode) -> Result<Dataset, StackError> {
        transform::aggregate(dataset, mode)
    }

    pub fn sort_data(
        &self,
        dataset: &Dataset,
        key: SortKey,
        direction: SortDirection,
    ) -> Result<Dataset, StackError> {
        transform::sort(dataset, key, direction)
    }

    pub fn filter_data<F>(&self, dataset: &Dataset, predicate: F) -> Result<Dataset, StackError>
    where
        F: Fn(&Entry) -> bool,
    {
        transform::filter(dataset, predicate)
    }

    pub fn transform_stacks<F>(&self, dataset: &Dataset, transform: F) -> Result<Dataset, StackError>
    where
        F: Fn(&Segment) -> Segment,
    {
        transform::map_segments(dataset, transform)
    }

    pub fn normalize_values(&self, dataset: &Dataset, target_max: f64) -> Result<Dataset, StackError> {
        transform::normalize(dataset, target_max)
    }

    pub fn group_by_category<K, F>(
        &self,
        dataset: &Dataset,
        category: F,
    ) -> Result<BTreeMap<K, Vec<Entry>>, StackError>
    where
        K: Ord,
        F: Fn(&Entry) -> K,
    {
        transform::group_by(dataset, category)
    }

    pub fn calculate_percentages(&self, dataset: &Dataset) -> Result<Dataset, StackError> {
        transform::percentages(dataset)
    }

    pub fn interpolate_data(&self, from: &Dataset, to: &Dataset, t: f64) -> Result<Dataset, StackError> {
        transform::interpolate(from, to, t)
    }

    pub fn generate_sample_data(&self, opts: &SampleOptions) -> Result<Dataset, StackError> {
        generate_sample(opts)
    }

    pub fn restore_data(&self, dataset: &Dataset) -> Result<Dataset, StackError> {
        transform::restore(dataset)
    }
}
