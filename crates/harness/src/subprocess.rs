// Copyright 2025 Benchtab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Sub-process result importer.
//!
//! The child inherits the environment plus [`NUMBER_ENV`](crate::NUMBER_ENV)
//! and prints at most one [`SubOutput`] document to stdout. There is no
//! timeout: a child that never exits blocks the run.

use crate::error::{BenchError, Result};
use crate::result::{ResultRow, SubOutput};
use crate::NUMBER_ENV;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

/// Program plus arguments for a sub-process target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCommand {
    /// Program to execute.
    pub program: PathBuf,
    /// Arguments passed to the program.
    pub args: Vec<String>,
}

impl SubCommand {
    /// Command with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for SubCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Run `command` with `number` iterations and convert its output into rows.
///
/// Averages and throughput use `number`, not whatever count the child may
/// have used itself. When the child names a baseline and `base` is still
/// unset, `base` adopts it.
pub fn import(command: &SubCommand, number: u64, base: &mut Option<String>) -> Result<Vec<ResultRow>> {
    let command_line = command.to_string();
    debug!(command = %command_line, number, "Spawning sub-process");

    let output = Command::new(&command.program)
        .args(&command.args)
        .env(NUMBER_ENV, number.to_string())
        .output()
        .map_err(|source| BenchError::SubprocessSpawn {
            command: command_line.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(BenchError::SubprocessFailure {
            command: command_line,
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    if output.stdout.is_empty() {
        return Ok(Vec::new());
    }
    let stdout = String::from_utf8_lossy(&output.stdout);

    let parsed: SubOutput =
        serde_json::from_str(&stdout).map_err(|source| BenchError::MalformedSubOutput {
            command: command_line.clone(),
            source,
        })?;

    if base.is_none() {
        if let Some(child_base) = &parsed.base {
            info!(command = %command_line, base = %child_base, "Adopting baseline from sub-process");
            *base = Some(child_base.clone());
        }
    }

    Ok(parsed
        .result
        .into_iter()
        .map(|raw| {
            ResultRow::new(raw.name, raw.sec, number)
                .with_extremes(raw.min, raw.max)
                .with_throughput(number)
        })
        .collect())
}
