// Copyright 2025 Benchtab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark result types.
//!
//! [`ResultRow`] is the computation record every importer converges on.
//! [`RawRow`], [`PersistedResults`] and [`SubOutput`] are the JSON shapes
//! exchanged with child processes and result files.

use serde::{Deserialize, Serialize};

/// How a row compares to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffClass {
    /// Row is faster than the baseline.
    Faster,
    /// Row is slower than the baseline.
    Slower,
    /// Row took exactly as long as the baseline.
    Equal,
}

/// One row of a benchmark run, at full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Target name (namespaced by file stem for file imports).
    pub name: String,
    /// Total elapsed wall time in seconds.
    pub elapsed: f64,
    /// Fastest single call in seconds.
    pub min: Option<f64>,
    /// Slowest single call in seconds.
    pub max: Option<f64>,
    /// Average seconds per call.
    pub avg: f64,
    /// Rounded calls per second.
    pub iters_per_sec: Option<u64>,
    /// Percentage difference from the baseline, e.g. `-12.34%`.
    pub diff: Option<String>,
    /// Classification of `diff`.
    pub diff_class: Option<DiffClass>,
}

impl ResultRow {
    /// Build a row from an elapsed total and the iteration count that
    /// produced it.
    pub fn new(name: impl Into<String>, elapsed: f64, number: u64) -> Self {
        Self {
            name: name.into(),
            elapsed,
            min: None,
            max: None,
            avg: elapsed / number as f64,
            iters_per_sec: None,
            diff: None,
            diff_class: None,
        }
    }

    /// Set per-call extremes.
    pub fn with_extremes(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Fill in the throughput column for `number` calls.
    pub fn with_throughput(mut self, number: u64) -> Self {
        self.iters_per_sec = Some(iters_per_sec(number, self.elapsed));
        self
    }

    /// Interchange representation of this row.
    pub fn to_raw(&self) -> RawRow {
        RawRow {
            name: self.name.clone(),
            sec: self.elapsed,
            min: self.min,
            max: self.max,
            iters_per_sec: self.iters_per_sec.map(crate::format::group_int),
        }
    }
}

/// Calls per second, rounded half away from zero.
///
/// A zero elapsed time saturates instead of dividing by zero.
pub fn iters_per_sec(number: u64, elapsed: f64) -> u64 {
    (number as f64 / elapsed).round() as u64
}

/// A row as written to result files and by child processes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    /// Row name.
    pub name: String,
    /// Total elapsed seconds.
    pub sec: f64,
    /// Fastest call in seconds.
    #[serde(default)]
    pub min: Option<f64>,
    /// Slowest call in seconds.
    #[serde(default)]
    pub max: Option<f64>,
    /// Pre-formatted throughput, informational only.
    #[serde(rename = "iters/s", default, skip_serializing_if = "Option::is_none")]
    pub iters_per_sec: Option<String>,
}

/// On-disk result file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedResults {
    /// Rows in report order.
    pub result: Vec<RawRow>,
    /// Iteration count used to produce `sec`/`min`/`max`.
    pub number: u64,
}

/// Document a child process prints to stdout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubOutput {
    /// Rows measured by the child.
    pub result: Vec<RawRow>,
    /// Baseline chosen by the child, if any.
    pub base: Option<String>,
}

/// Outcome of a complete run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Rows in final (possibly sorted) order.
    pub rows: Vec<ResultRow>,
    /// Baseline name in effect when diffs were computed.
    pub base: Option<String>,
}

impl AggregateResult {
    /// Find a row by name. Returns the first match.
    pub fn get(&self, name: &str) -> Option<&ResultRow> {
        self.rows.iter().find(|row| row.name == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no target produced a row.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
