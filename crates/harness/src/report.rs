// Copyright 2025 Benchtab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Reporters render a finished [`Table`].
//!
//! [`TerminalReporter`] prints a colorized, column-aligned table. Custom
//! reporters implement [`Reporter`] and are passed to
//! [`Benchmark::run_with`](crate::Benchmark::run_with).

use crate::format::Table;
use crate::result::DiffClass;
use colored::{Color, Colorize};
use std::io::{self, Write};
use std::path::Path;

const SPACER: &str = "  ";

/// Sink for run progress and the final table.
pub trait Reporter {
    /// Called before each target runs.
    fn target_started(&mut self, _kind: &str, _name: &str) -> io::Result<()> {
        Ok(())
    }

    /// Render the final table. Not called when there are no rows.
    fn report(&mut self, table: &Table) -> io::Result<()>;

    /// Called after the table when results were saved to `path`.
    fn saved(&mut self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

/// Colorized table printer.
pub struct TerminalReporter<W: Write> {
    out: W,
}

impl TerminalReporter<io::Stdout> {
    /// Reporter writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalReporter<W> {
    /// Reporter writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the reporter, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TerminalReporter<W> {
    fn target_started(&mut self, kind: &str, name: &str) -> io::Result<()> {
        let spacer = "-".repeat(4);
        writeln!(
            self.out,
            "{}",
            format!("{} {} {} {}", spacer, kind, name, spacer).bright_black()
        )
    }

    fn report(&mut self, table: &Table) -> io::Result<()> {
        let columns = table.columns();
        let widths = column_widths(table, &columns);

        let header = columns
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (column, width))| pad(column, *width, i == 0))
            .collect::<Vec<_>>()
            .join(SPACER);
        writeln!(self.out, "{}", header.blue())?;

        let rule_len: usize = widths.iter().map(|w| w + SPACER.len()).sum();
        writeln!(self.out, "{}", "-".repeat(rule_len).bright_black())?;

        for row in &table.rows {
            let cells = table.cells(row);
            let line = columns
                .iter()
                .zip(cells)
                .zip(&widths)
                .enumerate()
                .map(|(i, ((column, cell), width))| {
                    let padded = pad(cell, *width, i == 0);
                    match column_color(column, row.diff_class) {
                        Some(color) => padded.color(color).to_string(),
                        None => padded,
                    }
                })
                .collect::<Vec<_>>()
                .join(SPACER);
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }

    fn saved(&mut self, path: &Path) -> io::Result<()> {
        writeln!(self.out, "results saved to {}", path.display())
    }
}

fn column_widths(table: &Table, columns: &[String]) -> Vec<usize> {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(table.cells(row)) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn pad(text: &str, width: usize, left: bool) -> String {
    if left {
        format!("{:<width$}", text, width = width)
    } else {
        format!("{:>width$}", text, width = width)
    }
}

fn column_color(column: &str, diff_class: Option<DiffClass>) -> Option<Color> {
    match column {
        "name" => None,
        "iters/s" => Some(Color::Blue),
        "sec" => Some(Color::Yellow),
        "diff" => match diff_class {
            Some(DiffClass::Slower) => Some(Color::Red),
            Some(DiffClass::Faster) => Some(Color::Green),
            _ => None,
        },
        c if c.starts_with("min") => Some(Color::Green),
        c if c.starts_with("max") => Some(Color::Cyan),
        c if c.starts_with("avg") => Some(Color::White),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{format_rows, FormatOptions};
    use crate::result::ResultRow;

    fn table() -> Table {
        let mut fast = ResultRow::new("fast", 0.5, 100)
            .with_extremes(Some(0.004), Some(0.006))
            .with_throughput(100);
        fast.diff = Some(String::new());
        let mut slow = ResultRow::new("slow_path", 1.0, 100)
            .with_extremes(Some(0.009), Some(0.012))
            .with_throughput(100);
        slow.diff = Some("-50.00%".to_string());
        slow.diff_class = Some(DiffClass::Slower);
        format_rows(&[fast, slow], FormatOptions::default())
    }

    #[test]
    fn test_table_contains_headers_and_cells() {
        let mut reporter = TerminalReporter::new(Vec::new());
        reporter.report(&table()).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        for needle in ["name", "min s", "iters/s", "diff", "slow_path", "-50.00%", "1.000"] {
            assert!(text.contains(needle), "missing {needle} in {text}");
        }
        // header, rule, two rows
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_banner_and_saved_line() {
        let mut reporter = TerminalReporter::new(Vec::new());
        reporter.target_started("func", "fast").unwrap();
        reporter.saved(Path::new("out/results.json")).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.contains("---- func fast ----"));
        assert!(text.contains("results saved to out/results.json"));
    }

    #[test]
    fn test_widths_cover_longest_cell() {
        let t = table();
        let widths = column_widths(&t, &t.columns());
        assert_eq!(widths[0], "slow_path".len());
    }

    #[test]
    fn test_diff_colors_follow_class() {
        assert_eq!(column_color("diff", Some(DiffClass::Slower)), Some(Color::Red));
        assert_eq!(column_color("diff", Some(DiffClass::Faster)), Some(Color::Green));
        assert_eq!(column_color("diff", Some(DiffClass::Equal)), None);
        assert_eq!(column_color("avg ms", None), Some(Color::White));
    }
}
