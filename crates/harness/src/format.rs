// Copyright 2025 Benchtab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Presentation records.
//!
//! Turns [`ResultRow`]s into pre-formatted strings in a fixed column order.
//! Nothing here touches the terminal; reporters consume [`Table`].

use crate::result::{DiffClass, ResultRow};
use crate::units::TimeUnit;

/// Options controlling number formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Digits after the decimal point.
    pub precision: usize,
    /// Unit for min/max/avg.
    pub units: TimeUnit,
    /// Include iters/s and diff columns.
    pub full: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            precision: 3,
            units: TimeUnit::S,
            full: true,
        }
    }
}

/// One presentation row. Every value is already a display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRow {
    /// Target name.
    pub name: String,
    /// Fastest call, scaled.
    pub min: String,
    /// Slowest call, scaled.
    pub max: String,
    /// Mean call time, scaled.
    pub avg: String,
    /// Grouped throughput, when shown.
    pub iters_per_sec: Option<String>,
    /// Total elapsed seconds.
    pub sec: String,
    /// Signed percentage against the baseline.
    pub diff: Option<String>,
    /// Color class for `diff`.
    pub diff_class: Option<DiffClass>,
}

/// Presentation table: column headers plus rows in report order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Unit of the scaled columns.
    pub units: TimeUnit,
    /// Rows in report order.
    pub rows: Vec<FormattedRow>,
    show_iters: bool,
    show_diff: bool,
}

impl Table {
    /// Column headers, in display order.
    pub fn columns(&self) -> Vec<String> {
        let mut columns = vec![
            "name".to_string(),
            format!("min {}", self.units),
            format!("max {}", self.units),
            format!("avg {}", self.units),
        ];
        if self.show_iters {
            columns.push("iters/s".to_string());
        }
        columns.push("sec".to_string());
        if self.show_diff {
            columns.push("diff".to_string());
        }
        columns
    }

    /// Cells of `row`, aligned with [`Table::columns`].
    pub fn cells<'a>(&self, row: &'a FormattedRow) -> Vec<&'a str> {
        let mut cells = vec![
            row.name.as_str(),
            row.min.as_str(),
            row.max.as_str(),
            row.avg.as_str(),
        ];
        if self.show_iters {
            cells.push(row.iters_per_sec.as_deref().unwrap_or(""));
        }
        cells.push(row.sec.as_str());
        if self.show_diff {
            cells.push(row.diff.as_deref().unwrap_or(""));
        }
        cells
    }

    /// Ordered `(column, value)` pairs for every row.
    pub fn records(&self) -> Vec<Vec<(String, &str)>> {
        let columns = self.columns();
        self.rows
            .iter()
            .map(|row| columns.iter().cloned().zip(self.cells(row)).collect())
            .collect()
    }

    /// Whether the diff column is present.
    pub fn has_diff(&self) -> bool {
        self.show_diff
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Format computation rows for display.
pub fn format_rows(rows: &[ResultRow], options: FormatOptions) -> Table {
    let multiplier = options.units.multiplier();
    let scaled = |value: Option<f64>| {
        value
            .map(|v| group_float(v * multiplier, options.precision))
            .unwrap_or_default()
    };

    let formatted = rows
        .iter()
        .map(|row| FormattedRow {
            name: row.name.clone(),
            min: scaled(row.min),
            max: scaled(row.max),
            avg: scaled(Some(row.avg)),
            iters_per_sec: row.iters_per_sec.map(group_int),
            sec: group_float(row.elapsed, options.precision),
            diff: row.diff.clone(),
            diff_class: row.diff_class,
        })
        .collect::<Vec<_>>();

    let show_diff = options.full && formatted.iter().any(|row| row.diff.is_some());

    Table {
        units: options.units,
        rows: formatted,
        show_iters: options.full,
        show_diff,
    }
}

/// Integer with `_` thousands separators, e.g. `1_234_567`.
pub fn group_int(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Fixed-point number with `_` thousands separators, e.g. `1_234.500`.
pub fn group_float(value: f64, precision: usize) -> String {
    let text = format!("{:.*}", precision, value);
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    match unsigned.split_once('.') {
        Some((int, frac)) => format!("{}{}.{}", sign, group_digits(int), frac),
        None => format!("{}{}", sign, group_digits(unsigned)),
    }
}

fn group_digits(digits: &str) -> String {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, elapsed: f64) -> ResultRow {
        ResultRow::new(name, elapsed, 100)
            .with_extremes(Some(0.001), Some(0.5))
            .with_throughput(100)
    }

    #[test]
    fn test_group_int() {
        assert_eq!(group_int(0), "0");
        assert_eq!(group_int(999), "999");
        assert_eq!(group_int(1_000), "1_000");
        assert_eq!(group_int(1_234_567), "1_234_567");
    }

    #[test]
    fn test_group_float() {
        assert_eq!(group_float(1234.5, 3), "1_234.500");
        assert_eq!(group_float(0.0123456, 3), "0.012");
        assert_eq!(group_float(-98765.4321, 2), "-98_765.43");
        assert_eq!(group_float(12.0, 0), "12");
    }

    #[test]
    fn test_units_scale_min_max_avg_but_not_sec() {
        let table = format_rows(
            &[row("a", 2.0)],
            FormatOptions {
                precision: 1,
                units: TimeUnit::Ms,
                full: true,
            },
        );
        let formatted = &table.rows[0];
        assert_eq!(formatted.min, "1.0");
        assert_eq!(formatted.max, "500.0");
        assert_eq!(formatted.avg, "20.0");
        assert_eq!(formatted.sec, "2.0");
        assert_eq!(formatted.iters_per_sec.as_deref(), Some("50"));
    }

    #[test]
    fn test_column_order_full() {
        let mut with_diff = row("a", 1.0);
        with_diff.diff = Some(String::new());
        let table = format_rows(&[with_diff], FormatOptions::default());
        assert_eq!(
            table.columns(),
            vec!["name", "min s", "max s", "avg s", "iters/s", "sec", "diff"]
        );
        assert_eq!(table.cells(&table.rows[0]).len(), 7);
    }

    #[test]
    fn test_brief_mode_drops_iters_and_diff() {
        let mut with_diff = row("a", 1.0);
        with_diff.diff = Some("+1.00%".to_string());
        let table = format_rows(
            &[with_diff],
            FormatOptions {
                full: false,
                ..FormatOptions::default()
            },
        );
        assert_eq!(table.columns(), vec!["name", "min s", "max s", "avg s", "sec"]);
        assert!(!table.has_diff());
    }

    #[test]
    fn test_no_diff_column_without_baseline() {
        let table = format_rows(&[row("a", 1.0), row("b", 2.0)], FormatOptions::default());
        assert!(!table.columns().contains(&"diff".to_string()));
    }

    #[test]
    fn test_records_pair_columns_with_cells() {
        let table = format_rows(&[row("a", 1.0)], FormatOptions::default());
        let records = table.records();
        assert_eq!(records[0][0], ("name".to_string(), "a"));
        assert_eq!(records[0][5], ("sec".to_string(), "1.000"));
    }

    #[test]
    fn test_missing_extremes_render_empty() {
        let table = format_rows(&[ResultRow::new("a", 1.0, 10)], FormatOptions::default());
        assert_eq!(table.rows[0].min, "");
        assert_eq!(table.rows[0].avg, "0.100");
    }
}
