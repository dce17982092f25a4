// Copyright 2025 Benchtab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark targets.

use crate::subprocess::SubCommand;
use std::fmt;
use std::path::PathBuf;

/// Boxed in-process callable.
pub type TargetFn<'a> = Box<dyn FnMut() -> anyhow::Result<()> + 'a>;

/// What a target runs, and therefore which importer handles it.
pub enum TargetKind<'a> {
    /// Callable timed on the current thread.
    Func(TargetFn<'a>),
    /// External program that prints its own results.
    Sub(SubCommand),
    /// Previously saved result file.
    File(PathBuf),
}

impl TargetKind<'_> {
    /// Short label: `func`, `sub` or `file`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Func(_) => "func",
            Self::Sub(_) => "sub",
            Self::File(_) => "file",
        }
    }
}

impl fmt::Debug for TargetKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Func(_) => f.write_str("Func(..)"),
            Self::Sub(cmd) => f.debug_tuple("Sub").field(cmd).finish(),
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
        }
    }
}

/// A registered target. Identity is its name.
#[derive(Debug)]
pub struct Target<'a> {
    /// Display name, unique by convention.
    pub name: String,
    /// What runs.
    pub kind: TargetKind<'a>,
}

/// Name of a callable type: the last path segment of its type name.
///
/// Function items yield their own name. Closures yield `{{closure}}`.
pub fn intrinsic_name<F: ?Sized>() -> String {
    let path = strip_generics(std::any::type_name::<F>());
    path.rsplit("::").next().unwrap_or(path.as_str()).to_string()
}

fn strip_generics(name: &str) -> String {
    let mut depth = 0usize;
    name.chars()
        .filter(|&c| {
            match c {
                '<' => depth += 1,
                '>' => {
                    depth = depth.saturating_sub(1);
                    return false;
                }
                _ => {}
            }
            depth == 0
        })
        .collect()
}
