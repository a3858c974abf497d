//! Validation error types.
//!
//! Validation stops at the first violation, so the result is a single
//! structured error rather than a report. The rule code is stable and can be
//! matched on programmatically; the context says where the problem is.

use std::fmt;

/// The first rule a dataset broke.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationError {
    /// A stable code for the rule that failed.
    pub rule: ValidationRule,

    /// Where the violation occurred.
    pub context: IssueContext,

    /// A human-readable description of the violation.
    pub message: String,
}

impl ValidationError {
    pub fn new(rule: ValidationRule, context: IssueContext, message: impl Into<String>) -> Self {
        Self {
            rule,
            context,
            message: message.into(),
        }
    }

    /// Index of the offending entry, if the error is scoped to one.
    pub fn entry_index(&self) -> Option<usize> {
        match self.context {
            IssueContext::Dataset => None,
            IssueContext::Entry { index } => Some(index),
            IssueContext::Segment { entry, .. } => Some(entry),
        }
    }

    /// Index of the offending segment, if the error is scoped to one.
    pub fn segment_index(&self) -> Option<usize> {
        match self.context {
            IssueContext::Segment { segment, .. } => Some(segment),
            _ => None,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] in {}: {}", self.rule, self.context, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// A stable code identifying which rule was violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValidationRule {
    // Dataset issues
    /// The input is not a sequence of entries.
    NotASequence,
    /// The dataset has no entries.
    EmptyDataset,

    // Entry issues
    /// An entry is not an object.
    EntryNotAnObject,
    /// An entry has no string `label`.
    MissingLabel,
    /// An entry label is the empty string.
    EmptyLabel,
    /// An entry's `stacks` is missing or not a sequence.
    StacksNotASequence,
    /// An entry has no segments.
    EmptyStacks,

    // Segment issues
    /// A segment is not an object.
    SegmentNotAnObject,
    /// A segment `value` is missing or not a number.
    NonNumericValue,
    /// A segment `value` is NaN or infinite.
    NonFiniteValue,
    /// A segment `color` is missing or not a string.
    NonStringColor,
    /// A segment `color` is the empty string.
    EmptyColor,
}

/// Context about where a validation error occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IssueContext {
    /// The dataset as a whole.
    Dataset,
    /// A specific entry.
    Entry { index: usize },
    /// A specific segment of a specific entry.
    Segment { entry: usize, segment: usize },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Dataset => write!(f, "dataset"),
            IssueContext::Entry { index } => write!(f, "entry {}", index),
            IssueContext::Segment { entry, segment } => {
                write!(f, "entry {} segment {}", entry, segment)
            }
        }
    }
}
