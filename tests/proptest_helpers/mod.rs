#![allow(dead_code)]

use stackbrush::model::{Dataset, Entry, Segment};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub const EPS: f64 = 1e-9;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps * a.abs().max(b.abs()).max(1.0)
}

fn arb_label() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,11}"
}

fn arb_color() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("#1f77b4".to_string()),
        Just("#d62728".to_string()),
        Just("green".to_string()),
        "#[0-9a-f]{6}",
    ]
}

/// Signed segment values, with exact zeros showing up now and then.
fn arb_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        1 => Just(0.0),
        8 => -1000.0f64..1000.0,
    ]
}

pub fn arb_segment() -> impl Strategy<Value = Segment> {
    (arb_value(), arb_color(), proptest::option::of(arb_label())).prop_map(
        |(value, color, label)| Segment {
            label,
            ..Segment::new(value, color)
        },
    )
}

pub fn arb_entry(max_stacks: usize) -> impl Strategy<Value = Entry> {
    (
        arb_label(),
        proptest::collection::vec(arb_segment(), 1..=max_stacks),
    )
        .prop_map(|(label, stacks)| Entry::new(label, stacks))
}

/// Valid datasets with 1..=`max_entries` entries of 1..=`max_stacks` segments.
pub fn arb_dataset(max_entries: usize, max_stacks: usize) -> BoxedStrategy<Dataset> {
    proptest::collection::vec(arb_entry(max_stacks), 1..=max_entries)
        .prop_map(Dataset::new)
        .boxed()
}

/// Two datasets with identical shape, for interpolation.
pub fn arb_dataset_pair(max_entries: usize, max_stacks: usize) -> BoxedStrategy<(Dataset, Dataset)> {
    arb_dataset(max_entries, max_stacks)
        .prop_flat_map(|from| {
            let shape: Vec<usize> = from.iter().map(|e| e.stacks.len()).collect();
            let to = shape
                .into_iter()
                .map(|n| proptest::collection::vec(arb_value(), n))
                .collect::<Vec<_>>();
            (Just(from), to)
        })
        .prop_map(|(from, values)| {
            let to = from
                .iter()
                .zip(values)
                .map(|(entry, vals)| Entry {
                    stacks: entry
                        .stacks
                        .iter()
                        .zip(vals)
                        .map(|(s, v)| Segment {
                            value: v,
                            ..s.clone()
                        })
                        .collect(),
                    ..entry.clone()
                })
                .collect();
            (from, to)
        })
        .boxed()
}

/// Multiset of (label, values) pairs, for permutation checks.
pub fn entry_fingerprints(dataset: &Dataset) -> Vec<String> {
    let mut prints: Vec<String> = dataset
        .iter()
        .map(|e| {
            let values: Vec<String> = e.stacks.iter().map(|s| s.value.to_string()).collect();
            format!("{}|{}", e.label, values.join(","))
        })
        .collect();
    prints.sort();
    prints
}
