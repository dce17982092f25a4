// Copyright 2025 Benchtab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for benchmark runs.
//!
//! Every failure aborts the whole run: there is no partial result and no
//! per-target recovery.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running or importing benchmarks.
#[derive(Debug, Error)]
pub enum BenchError {
    /// An in-process target returned an error. Forwarded unchanged.
    #[error(transparent)]
    TargetExecution(anyhow::Error),

    /// The sub-process could not be started at all.
    #[error("Failed to spawn sub-process {command}: {source}")]
    SubprocessSpawn {
        /// Command line.
        command: String,
        /// Spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The sub-process exited with a non-zero status.
    #[error("process exit code: {}\n{stderr}", describe_exit(.code))]
    SubprocessFailure {
        /// Command line.
        command: String,
        /// Exit code, `None` when killed by a signal.
        code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },

    /// The sub-process exited cleanly but printed something that is not a
    /// result document.
    #[error("Malformed output from sub-process {command}: {source}")]
    MalformedSubOutput {
        /// Command line.
        command: String,
        /// Parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A result file is missing, unreadable or malformed.
    #[error("Failed to import result file {}: {reason}", .path.display())]
    FileImportFailure {
        /// File that failed.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// The merged result set could not be written.
    #[error("Failed to save results to {}: {source}", .path.display())]
    PersistFailure {
        /// Output path.
        path: PathBuf,
        /// Write error.
        #[source]
        source: std::io::Error,
    },

    /// The reporter could not write its output.
    #[error("Failed to write report: {0}")]
    Report(#[source] std::io::Error),

    /// Results could not be encoded as JSON.
    #[error("Failed to encode results: {0}")]
    Encode(#[from] serde_json::Error),

    /// An environment variable required by the sub-process protocol is
    /// missing or invalid.
    #[error("Invalid environment variable {var}: {reason}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// What went wrong.
        reason: String,
    },

    /// An option value could not be parsed.
    #[error("Invalid {kind}: {value}")]
    InvalidOption {
        /// Which option.
        kind: &'static str,
        /// Rejected value.
        value: String,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "terminated by signal".to_string(),
    }
}

/// Result type for benchmark operations.
pub type Result<T> = std::result::Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subprocess_failure_message_carries_code_and_stderr() {
        let err = BenchError::SubprocessFailure {
            command: "./bench".to_string(),
            code: Some(2),
            stderr: "boom".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains('2'));
        assert!(message.contains("boom"));
    }

    #[test]
    fn test_signal_exit_is_described() {
        let err = BenchError::SubprocessFailure {
            command: "./bench".to_string(),
            code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("signal"));
    }

    #[test]
    fn test_target_error_is_transparent() {
        let err = BenchError::TargetExecution(anyhow::anyhow!("disk on fire"));
        assert_eq!(err.to_string(), "disk on fire");
    }

    #[test]
    fn test_json_error_converts_to_encode() {
        let err: BenchError = serde_json::from_str::<u32>("x").unwrap_err().into();
        assert!(matches!(err, BenchError::Encode(_)));
    }
}
