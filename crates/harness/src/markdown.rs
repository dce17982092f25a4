// Copyright 2025 Benchtab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Markdown output generation for benchmark results.
//!
//! Renders the same [`Table`] the terminal reporter uses, for pasting into
//! pull requests and CI summaries.

use crate::format::Table;

/// Generate a markdown summary from a formatted table.
pub fn render(table: &Table) -> String {
    let mut output = String::new();
    let columns = table.columns();

    output.push_str("# Benchmark Summary\n\n");
    output.push_str(&format!("Generated: {}\n\n", chrono::Utc::now().to_rfc3339()));

    output.push_str(&row_line(columns.iter().map(String::as_str)));
    let align = columns
        .iter()
        .enumerate()
        .map(|(i, _)| if i == 0 { "---" } else { "---:" });
    output.push_str(&row_line(align));

    for row in &table.rows {
        output.push_str(&row_line(table.cells(row).into_iter()));
    }

    output.push_str("\n---\n");
    output.push_str(&format!("Total benchmarks: {}\n", table.rows.len()));
    output
}

fn row_line<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    let escaped: Vec<String> = cells.map(|c| c.replace('|', "\\|")).collect();
    format!("| {} |\n", escaped.join(" | "))
}
