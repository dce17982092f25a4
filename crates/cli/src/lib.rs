// Copyright 2025 Benchtab Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI for benchtab.
//!
//! Composes sub-process benchmarks and saved result files into a single
//! comparison table. This is the only place that reads the iteration count
//! and output path from the environment.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use benchtab_harness::{
    format_rows, markdown, Benchmark, RunOptions, Sort, TimeUnit, NUMBER_ENV, OUTPUT_ENV,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Benchtab CLI.
#[derive(Parser, Debug)]
#[command(name = "benchtab")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose logging to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run sub-process benchmarks and merge them with saved result files.
    ///
    /// Each sub-process receives the iteration count in BENCHTAB_NUMBER and
    /// must print its results as JSON on stdout.
    Run {
        /// Program to run as a sub-benchmark (repeatable).
        #[arg(short, long = "sub", value_name = "PROGRAM")]
        subs: Vec<PathBuf>,

        /// Saved result file to include (repeatable).
        #[arg(short, long = "file", value_name = "PATH")]
        files: Vec<PathBuf>,

        /// Iterations per target.
        #[arg(short, long, env = NUMBER_ENV, default_value_t = 100)]
        number: u64,

        /// Save merged results to this file.
        #[arg(short, long, env = OUTPUT_ENV)]
        output: Option<PathBuf>,

        /// Table display options.
        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Render saved result files without running anything.
    Show {
        /// Result files to include.
        #[arg(required = true, value_name = "PATH")]
        files: Vec<PathBuf>,

        /// Table display options.
        #[command(flatten)]
        display: DisplayArgs,
    },
}

/// Options shared by every command that prints a table.
#[derive(Args, Debug)]
pub struct DisplayArgs {
    /// Digits after the decimal point.
    #[arg(short, long, default_value_t = 3)]
    pub precision: usize,

    /// Unit for min/max/avg: s, ms, us or ns.
    #[arg(short, long, default_value = "s")]
    pub units: TimeUnit,

    /// Row order: `desc` is fastest first, `asc` slowest first.
    #[arg(long, value_enum, default_value_t = SortOrder::Desc)]
    pub sort: SortOrder,

    /// Baseline row name for the diff column.
    #[arg(short, long)]
    pub base: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Omit the iters/s and diff columns.
    #[arg(long)]
    pub brief: bool,
}

/// Row order as given on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    /// Slowest first.
    Asc,
    /// Fastest first.
    Desc,
    /// Registration order.
    None,
}

impl SortOrder {
    fn to_sort(self) -> Option<Sort> {
        match self {
            Self::Asc => Some(Sort::Asc),
            Self::Desc => Some(Sort::Desc),
            Self::None => None,
        }
    }
}

/// How results are printed.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colorized terminal table.
    Table,
    /// Markdown summary.
    Markdown,
    /// Raw rows as JSON.
    Json,
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI with the process arguments.
pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    execute(cli)
}

/// Execute an already parsed command line.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Run {
            subs,
            files,
            number,
            output,
            display,
        } => {
            if subs.is_empty() && files.is_empty() {
                bail!("nothing to run: pass --sub or --file");
            }
            let mut bench = Benchmark::new();
            for sub in subs {
                bench.append_sub(sub);
            }
            for file in files {
                bench.append_file(file);
            }
            let mut options = run_options(&display).number(number);
            options.output = output;
            render(&mut bench, &options, &display)
        }
        Commands::Show { files, display } => {
            let mut bench = Benchmark::new();
            for file in files {
                bench.append_file(file);
            }
            render(&mut bench, &run_options(&display), &display)
        }
    }
}

fn run_options(display: &DisplayArgs) -> RunOptions {
    RunOptions::default()
        .precision(display.precision)
        .units(display.units)
        .sort(display.sort.to_sort())
        .full(!display.brief)
}

fn render(bench: &mut Benchmark<'_>, options: &RunOptions, display: &DisplayArgs) -> anyhow::Result<()> {
    if let Some(base) = &display.base {
        bench.set_base(base.clone());
    }
    debug!(targets = bench.len(), ?options, "Starting run");

    match display.format {
        OutputFormat::Table => {
            bench.run(options).context("benchmark run failed")?;
        }
        OutputFormat::Markdown => {
            let result = bench
                .run(&options.clone().report(false))
                .context("benchmark run failed")?;
            let table = format_rows(&result.rows, options.format_options());
            print!("{}", markdown::render(&table));
        }
        OutputFormat::Json => {
            let result = bench
                .run(&options.clone().report(false))
                .context("benchmark run failed")?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_arguments() {
        let cli = Cli::try_parse_from([
            "benchtab", "run", "--sub", "./a", "--sub", "./b", "--file", "old.json", "-n", "50",
            "--units", "ms", "--sort", "asc", "--brief",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                subs,
                files,
                number,
                display,
                ..
            } => {
                assert_eq!(subs, vec![PathBuf::from("./a"), PathBuf::from("./b")]);
                assert_eq!(files, vec![PathBuf::from("old.json")]);
                assert_eq!(number, 50);
                assert_eq!(display.units, TimeUnit::Ms);
                assert_eq!(display.sort, SortOrder::Asc);
                assert!(display.brief);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_show_requires_files() {
        assert!(Cli::try_parse_from(["benchtab", "show"]).is_err());
    }

    #[test]
    fn test_invalid_unit_rejected() {
        assert!(Cli::try_parse_from(["benchtab", "show", "a.json", "--units", "hours"]).is_err());
    }

    #[test]
    fn test_run_without_targets_fails() {
        let cli = Cli::try_parse_from(["benchtab", "run", "-n", "5"]).unwrap();
        let err = execute(cli).unwrap_err();
        assert!(err.to_string().contains("nothing to run"));
    }

    #[test]
    fn test_sort_order_mapping() {
        assert_eq!(SortOrder::Asc.to_sort(), Some(Sort::Asc));
        assert_eq!(SortOrder::None.to_sort(), None);
    }
}
