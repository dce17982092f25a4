// Copyright 2025 Benchtab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Micro-benchmark harness with cross-process result merging.
//!
//! A [`Benchmark`] holds an ordered list of targets: in-process functions,
//! external programs that run their own benchmarks, and result files saved
//! by earlier runs. [`Benchmark::run`] times or imports each target in
//! turn, merges everything into one list of rows, computes throughput and
//! the percentage difference from a baseline, and prints a table.
//!
//! # Quick Start
//!
//! ```no_run
//! use benchtab_harness::{Benchmark, RunOptions};
//!
//! fn checksum() {
//!     let _ = (0..1_000u64).sum::<u64>();
//! }
//!
//! let mut bench = Benchmark::new();
//! bench.append(checksum, None, true);
//! bench.append(|| std::thread::sleep(std::time::Duration::from_millis(1)), Some("sleep"), false);
//! bench.append_sub("./target/release/other-bench");
//!
//! let result = bench.run(&RunOptions::default().number(50))?;
//! for row in &result.rows {
//!     println!("{}: {:?}", row.name, row.diff);
//! }
//! # Ok::<(), benchtab_harness::BenchError>(())
//! ```
//!
//! # Modules
//!
//! - [`registry`] - target registration
//! - [`timing`] - the in-process timing loop
//! - [`subprocess`] - importing rows from child processes
//! - [`io`] - result files
//! - [`aggregate`] - running, diffing and sorting
//! - [`format`] / [`report`] / [`markdown`] - presentation

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod aggregate;
pub mod error;
pub mod format;
pub mod io;
pub mod markdown;
pub mod registry;
pub mod report;
pub mod result;
pub mod sub;
pub mod subprocess;
pub mod target;
pub mod timing;
pub mod units;

/// Environment variable carrying the iteration count to child processes.
pub const NUMBER_ENV: &str = "BENCHTAB_NUMBER";

/// Environment variable the CLI reads the output path from.
pub const OUTPUT_ENV: &str = "BENCHTAB_OUTPUT";

pub use aggregate::{RunOptions, Sort};
pub use error::{BenchError, Result};
pub use format::{format_rows, FormatOptions, FormattedRow, Table};
pub use registry::Benchmark;
pub use report::{Reporter, TerminalReporter};
pub use result::{AggregateResult, DiffClass, PersistedResults, RawRow, ResultRow, SubOutput};
pub use subprocess::SubCommand;
pub use target::{Target, TargetKind};
pub use units::TimeUnit;
