// Copyright 2025 Benchtab Contributors
// SPDX-License-Identifier: Apache-2.0

//! I/O operations for benchmark results.
//!
//! Reads and writes [`PersistedResults`] files and turns a saved file back
//! into rows for a new report.

use crate::error::{BenchError, Result};
use crate::result::{PersistedResults, ResultRow};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Write results as pretty-printed JSON, creating parent directories.
pub fn write_results(path: impl AsRef<Path>, results: &PersistedResults) -> Result<()> {
    let path = path.as_ref();
    let persist_err = |source| BenchError::PersistFailure {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(persist_err)?;
    }
    let json = serde_json::to_string_pretty(results)?;
    fs::write(path, json).map_err(persist_err)
}

/// Read a results file.
pub fn read_results(path: impl AsRef<Path>) -> Result<PersistedResults> {
    let path = path.as_ref();
    let import_err = |reason: String| BenchError::FileImportFailure {
        path: path.to_path_buf(),
        reason,
    };

    let content = fs::read_to_string(path).map_err(|e| import_err(e.to_string()))?;
    let results: PersistedResults =
        serde_json::from_str(&content).map_err(|e| import_err(e.to_string()))?;
    if results.number == 0 {
        return Err(import_err("stored iteration count is zero".to_string()));
    }
    Ok(results)
}

/// Import a results file as rows.
///
/// Row names become `<file-stem>.<name>`. Averages and throughput use the
/// iteration count stored in the file, which may differ from the current
/// run's count.
pub fn import_file(path: impl AsRef<Path>) -> Result<Vec<ResultRow>> {
    let path = path.as_ref();
    let stored = read_results(path)?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    debug!(path = %path.display(), number = stored.number, rows = stored.result.len(), "Importing result file");

    let number = stored.number;
    Ok(stored
        .result
        .into_iter()
        .map(|raw| {
            ResultRow::new(format!("{}.{}", stem, raw.name), raw.sec, number)
                .with_extremes(raw.min, raw.max)
                .with_throughput(number)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::RawRow;
    use tempfile::TempDir;

    #[test]
    fn test_import_uses_stored_number_and_stem() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("baseline.json");
        fs::write(
            &path,
            r#"{"result":[{"name":"x","sec":2.0,"min":0.01,"max":0.03}],"number":100}"#,
        )
        .unwrap();

        let rows = import_file(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "baseline.x");
        assert_eq!(rows[0].avg, 0.02);
        assert_eq!(rows[0].elapsed, 2.0);
        assert_eq!(rows[0].min, Some(0.01));
        assert_eq!(rows[0].max, Some(0.03));
        assert_eq!(rows[0].iters_per_sec, Some(50));
    }

    #[test]
    fn test_stem_drops_only_final_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.v2.json");
        fs::write(&path, r#"{"result":[{"name":"x","sec":1.0}],"number":10}"#).unwrap();
        assert_eq!(import_file(&path).unwrap()[0].name, "run.v2.x");
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = import_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, BenchError::FileImportFailure { .. }));
    }

    #[test]
    fn test_malformed_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"result": "nope"}"#).unwrap();
        let err = import_file(&path).unwrap_err();
        assert!(matches!(err, BenchError::FileImportFailure { .. }));
    }

    #[test]
    fn test_zero_number_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("zero.json");
        fs::write(&path, r#"{"result":[],"number":0}"#).unwrap();
        assert!(read_results(&path).is_err());
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out.json");
        let results = PersistedResults {
            result: vec![RawRow {
                name: "a".to_string(),
                sec: 0.25,
                min: Some(0.001),
                max: Some(0.004),
                iters_per_sec: Some("400".to_string()),
            }],
            number: 100,
        };
        write_results(&path, &results).unwrap();
        assert_eq!(read_results(&path).unwrap(), results);
    }

    #[test]
    fn test_write_under_a_file_is_persist_failure() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let results = PersistedResults {
            result: Vec::new(),
            number: 1,
        };
        let err = write_results(blocker.join("out.json"), &results).unwrap_err();
        assert!(matches!(err, BenchError::PersistFailure { .. }));
    }
}
