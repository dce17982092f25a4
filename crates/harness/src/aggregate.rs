// Copyright 2025 Benchtab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Running a benchmark and merging every target's rows.
//!
//! Targets run strictly in registration order on the calling thread. The
//! first failing target aborts the run and no rows are returned.

use crate::error::{BenchError, Result};
use crate::format::{format_rows, group_float, FormatOptions};
use crate::io;
use crate::registry::Benchmark;
use crate::report::{Reporter, TerminalReporter};
use crate::result::{AggregateResult, DiffClass, PersistedResults, ResultRow};
use crate::subprocess;
use crate::target::TargetKind;
use crate::timing;
use crate::units::TimeUnit;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Row ordering by elapsed time.
///
/// The names are inverted relative to elapsed time: `Asc` puts the
/// slowest row first, `Desc` the fastest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    /// Slowest first.
    Asc,
    /// Fastest first.
    Desc,
}

/// Options for [`Benchmark::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Calls per in-process target; also handed to sub-processes.
    pub number: u64,
    /// Digits after the decimal point in the report.
    pub precision: usize,
    /// Unit for min/max/avg in the report.
    pub units: TimeUnit,
    /// Row ordering, `None` keeps registration order.
    pub sort: Option<Sort>,
    /// Hand the formatted table to the reporter.
    pub emit_report: bool,
    /// Compute iters/s and diffs.
    pub full: bool,
    /// Save the merged raw rows here.
    pub output: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            number: 100,
            precision: 3,
            units: TimeUnit::S,
            sort: Some(Sort::Desc),
            emit_report: true,
            full: true,
            output: None,
        }
    }
}

impl RunOptions {
    /// Iterations per in-process target, passed on to sub-processes.
    pub fn number(mut self, number: u64) -> Self {
        self.number = number;
        self
    }

    /// Digits after the decimal point.
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Unit for min/max/avg.
    pub fn units(mut self, units: TimeUnit) -> Self {
        self.units = units;
        self
    }

    /// Row order, or `None` for registration order.
    pub fn sort(mut self, sort: Option<Sort>) -> Self {
        self.sort = sort;
        self
    }

    /// Whether to print banners and the table.
    pub fn report(mut self, emit_report: bool) -> Self {
        self.emit_report = emit_report;
        self
    }

    /// Whether to compute and show throughput and diffs.
    pub fn full(mut self, full: bool) -> Self {
        self.full = full;
        self
    }

    /// Save the merged rows to this path.
    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Formatting options for the report.
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            precision: self.precision,
            units: self.units,
            full: self.full,
        }
    }
}

impl Benchmark<'_> {
    /// Run every target and report to standard output.
    pub fn run(&mut self, options: &RunOptions) -> Result<AggregateResult> {
        let mut reporter = TerminalReporter::stdout();
        self.run_with(options, &mut reporter)
    }

    /// Run every target, sending progress and the table to `reporter`.
    pub fn run_with(
        &mut self,
        options: &RunOptions,
        reporter: &mut dyn Reporter,
    ) -> Result<AggregateResult> {
        let number = options.number;
        if number == 0 {
            return Err(BenchError::InvalidOption {
                kind: "iteration count",
                value: number.to_string(),
            });
        }

        let mut rows: Vec<ResultRow> = Vec::new();
        for target in self.targets.iter_mut() {
            let kind = target.kind.label();
            info!(kind, name = %target.name, number, "Running benchmark target");
            if options.emit_report {
                reporter
                    .target_started(kind, &target.name)
                    .map_err(BenchError::Report)?;
            }

            let produced = match &mut target.kind {
                TargetKind::Func(func) => {
                    let m = timing::measure(number, || func()).map_err(BenchError::TargetExecution)?;
                    let mut row =
                        ResultRow::new(target.name.clone(), m.elapsed, number).with_extremes(m.min, m.max);
                    if options.full {
                        row = row.with_throughput(number);
                    }
                    debug!(name = %row.name, elapsed = row.elapsed, avg = row.avg, "Timed function");
                    vec![row]
                }
                TargetKind::Sub(command) => subprocess::import(command, number, &mut self.base)?,
                TargetKind::File(path) => io::import_file(path)?,
            };
            if produced.is_empty() {
                warn!(kind, name = %target.name, "Target produced no rows");
            }
            rows.extend(produced);
        }

        if let Some(path) = &options.output {
            let persisted = PersistedResults {
                result: rows.iter().map(ResultRow::to_raw).collect(),
                number,
            };
            io::write_results(path, &persisted)?;
            info!(path = %path.display(), rows = rows.len(), "Saved results");
        }

        if options.full {
            apply_diffs(&mut rows, self.base.as_deref());
        }

        if let Some(sort) = options.sort {
            sort_rows(&mut rows, sort);
        }

        if options.emit_report {
            let table = format_rows(&rows, options.format_options());
            if !table.is_empty() {
                reporter.report(&table).map_err(BenchError::Report)?;
            }
            if let Some(path) = &options.output {
                reporter.saved(path).map_err(BenchError::Report)?;
            }
        }

        Ok(AggregateResult {
            rows,
            base: self.base.clone(),
        })
    }
}

/// Fill in diff labels relative to the first row named `base`.
///
/// Nothing happens when there is no such row or its elapsed time is zero.
pub fn apply_diffs(rows: &mut [ResultRow], base: Option<&str>) {
    let Some(base) = base else {
        return;
    };
    let Some(reference) = rows.iter().position(|row| row.name == base) else {
        return;
    };
    let base_elapsed = rows[reference].elapsed;
    if base_elapsed == 0.0 {
        return;
    }

    for (i, row) in rows.iter_mut().enumerate() {
        if i == reference {
            row.diff = Some(String::new());
            row.diff_class = None;
        } else {
            let (label, class) = diff_label(base_elapsed, row.elapsed);
            row.diff = Some(label);
            row.diff_class = Some(class);
        }
    }
}

/// Percentage label for a row that took `elapsed` against `base_elapsed`.
pub fn diff_label(base_elapsed: f64, elapsed: f64) -> (String, DiffClass) {
    if base_elapsed < elapsed {
        let diff = 100.0 - base_elapsed / elapsed * 100.0;
        (format!("-{}%", group_float(diff, 2)), DiffClass::Slower)
    } else if base_elapsed > elapsed {
        let diff = base_elapsed / elapsed * 100.0 - 100.0;
        (format!("+{}%", group_float(diff, 2)), DiffClass::Faster)
    } else {
        ("0%".to_string(), DiffClass::Equal)
    }
}

/// Stable sort by elapsed time.
pub fn sort_rows(rows: &mut [ResultRow], sort: Sort) {
    match sort {
        Sort::Desc => rows.sort_by(|a, b| a.elapsed.total_cmp(&b.elapsed)),
        Sort::Asc => rows.sort_by(|a, b| b.elapsed.total_cmp(&a.elapsed)),
    }
}
