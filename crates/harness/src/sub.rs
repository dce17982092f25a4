// Copyright 2025 Benchtab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Child side of the sub-process protocol.
//!
//! A program registered with [`Benchmark::append_sub`] builds its own
//! [`Benchmark`] and calls [`Benchmark::sub`], which reads the iteration
//! count from [`NUMBER_ENV`] and prints a [`SubOutput`] document.

use crate::aggregate::RunOptions;
use crate::error::{BenchError, Result};
use crate::registry::Benchmark;
use crate::result::{ResultRow, SubOutput};
use crate::NUMBER_ENV;
use std::io::{self, Write};

/// Read the iteration count passed by the parent process.
pub fn number_from_env() -> Result<u64> {
    let value = std::env::var(NUMBER_ENV).map_err(|e| BenchError::InvalidEnv {
        var: NUMBER_ENV,
        reason: e.to_string(),
    })?;
    parse_number(&value)
}

fn parse_number(value: &str) -> Result<u64> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(BenchError::InvalidEnv {
            var: NUMBER_ENV,
            reason: "iteration count must be at least 1".to_string(),
        }),
        Ok(number) => Ok(number),
        Err(e) => Err(BenchError::InvalidEnv {
            var: NUMBER_ENV,
            reason: format!("{value:?}: {e}"),
        }),
    }
}

impl Benchmark<'_> {
    /// Run as a child: no report, no diffs, registration order.
    pub fn run_sub(&mut self, number: u64) -> Result<SubOutput> {
        let options = RunOptions::default()
            .number(number)
            .report(false)
            .full(false)
            .sort(None);
        let result = self.run(&options)?;
        Ok(SubOutput {
            result: result.rows.iter().map(ResultRow::to_raw).collect(),
            base: result.base,
        })
    }

    /// Child entry point: run with the parent's iteration count and print
    /// the result document to stdout.
    pub fn sub(&mut self) -> Result<()> {
        let number = number_from_env()?;
        let output = self.run_sub(number)?;
        let json = serde_json::to_string(&output)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", json).map_err(BenchError::Report)?;
        stdout.flush().map_err(BenchError::Report)
    }
}
