// Copyright 2025 Benchtab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark registry.
//!
//! [`Benchmark`] keeps targets in registration order together with the
//! baseline name. Nothing is validated here; missing programs or files
//! surface when the benchmark runs.

use crate::subprocess::SubCommand;
use crate::target::{intrinsic_name, Target, TargetKind};
use std::path::PathBuf;

/// Ordered set of benchmark targets plus the baseline name.
#[derive(Debug, Default)]
pub struct Benchmark<'a> {
    pub(crate) targets: Vec<Target<'a>>,
    pub(crate) base: Option<String>,
}

impl<'a> Benchmark<'a> {
    /// Create an empty benchmark.
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            base: None,
        }
    }

    /// Register an in-process function.
    ///
    /// `name` defaults to the function's own name. With `base` set, the
    /// target becomes the baseline for diff computation.
    pub fn append<F>(&mut self, mut func: F, name: Option<&str>, base: bool) -> &mut Self
    where
        F: FnMut() + 'a,
    {
        let name = name.map(str::to_string).unwrap_or_else(intrinsic_name::<F>);
        self.push_func(
            name,
            Box::new(move || {
                func();
                Ok(())
            }),
            base,
        )
    }

    /// Register an in-process function that can fail.
    ///
    /// The first error aborts the run and is returned to the caller as is.
    pub fn append_fallible<F>(&mut self, func: F, name: Option<&str>, base: bool) -> &mut Self
    where
        F: FnMut() -> anyhow::Result<()> + 'a,
    {
        let name = name.map(str::to_string).unwrap_or_else(intrinsic_name::<F>);
        self.push_func(name, Box::new(func), base)
    }

    fn push_func(
        &mut self,
        name: String,
        func: Box<dyn FnMut() -> anyhow::Result<()> + 'a>,
        base: bool,
    ) -> &mut Self {
        if base {
            self.base = Some(name.clone());
        }
        self.targets.push(Target {
            name,
            kind: TargetKind::Func(func),
        });
        self
    }

    /// Register an external program. Its name is the path.
    pub fn append_sub(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.push_sub(SubCommand::new(path))
    }

    /// Register an external program with arguments. Its name is the
    /// command line.
    pub fn append_sub_args<I, S>(&mut self, program: impl Into<PathBuf>, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_sub(SubCommand::new(program).args(args))
    }

    fn push_sub(&mut self, command: SubCommand) -> &mut Self {
        self.targets.push(Target {
            name: command.to_string(),
            kind: TargetKind::Sub(command),
        });
        self
    }

    /// Register a saved result file. Its name is the path.
    pub fn append_file(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        let path = path.into();
        self.targets.push(Target {
            name: path.display().to_string(),
            kind: TargetKind::File(path),
        });
        self
    }

    /// Current baseline name.
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Set the baseline by name, e.g. one produced by a sub-process or file.
    pub fn set_base(&mut self, name: impl Into<String>) -> &mut Self {
        self.base = Some(name.into());
        self
    }

    /// Registered targets in order.
    pub fn targets(&self) -> &[Target<'a>] {
        &self.targets
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether no target is registered.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checksum() {}

    #[test]
    fn test_registration_order_and_kinds() {
        let mut bench = Benchmark::new();
        bench
            .append(checksum, None, false)
            .append_sub("./child.sh")
            .append_file("saved/run1.json");

        let labels: Vec<_> = bench.targets().iter().map(|t| t.kind.label()).collect();
        assert_eq!(labels, vec!["func", "sub", "file"]);
        let names: Vec<_> = bench.targets().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["checksum", "./child.sh", "saved/run1.json"]);
    }

    #[test]
    fn test_named_baseline() {
        let mut bench = Benchmark::new();
        bench.append(|| (), Some("fast"), true);
        bench.append(|| (), Some("slow"), false);
        assert_eq!(bench.base(), Some("fast"));
        assert_eq!(bench.len(), 2);
    }

    #[test]
    fn test_later_baseline_replaces_earlier() {
        let mut bench = Benchmark::new();
        bench.append(|| (), Some("a"), true);
        bench.append(|| (), Some("b"), true);
        assert_eq!(bench.base(), Some("b"));
    }

    #[test]
    fn test_sub_with_args_named_by_command_line() {
        let mut bench = Benchmark::new();
        bench.append_sub_args("/bin/sh", ["-c", "exit 0"]);
        assert_eq!(bench.targets()[0].name, "/bin/sh -c exit 0");
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let mut bench = Benchmark::new();
        bench.append(|| (), Some("x"), false);
        bench.append(|| (), Some("x"), false);
        assert_eq!(bench.len(), 2);
    }

    #[test]
    fn test_closure_may_borrow_locals() {
        let data = vec![1u64, 2, 3];
        let mut bench = Benchmark::new();
        bench.append(
            || {
                let _ = data.iter().sum::<u64>();
            },
            Some("sum"),
            false,
        );
        assert!(!bench.is_empty());
    }
}
