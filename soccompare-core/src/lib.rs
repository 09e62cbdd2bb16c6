//! Weighted scoring and head-to-head comparison of processor (SoC) records.
//!
//! Raw records go through [`normalize`], are scored with [`ComponentScores::of`], and two of
//! them are compared with [`ComparisonResult::build`]. Nothing here does I/O or keeps state
//! between calls.

pub(crate) mod common;
pub mod compare;
pub mod error;
pub mod record;
pub mod result;
pub mod score;

#[cfg(test)]
mod proptest_tests;

pub use compare::{compare, CategoryComparison, Direction, Metric, MetricOutcome, Winner};
pub use error::{Error, Result, SelectionError, Side};
pub use record::{normalize, ProcessorRecord, UNKNOWN_FAB_PROCESS};
pub use result::{compare_selection, select_pair, ComparisonResult};
pub use score::{aggregate, score, ComponentScores, Weights, WEIGHTS};
