// Copyright 2025 Benchtab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Time units used to present min/max/avg columns.

use crate::error::BenchError;
use std::fmt;
use std::str::FromStr;

/// Unit for the per-call columns. Elapsed totals are always in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeUnit {
    /// Seconds
    #[default]
    S,
    /// Milliseconds
    Ms,
    /// Microseconds
    Us,
    /// Nanoseconds
    Ns,
}

impl TimeUnit {
    /// Multiplier converting seconds into this unit.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::S => 1.0,
            Self::Ms => 1_000.0,
            Self::Us => 1_000_000.0,
            Self::Ns => 1_000_000_000.0,
        }
    }

    /// Unit symbol as shown in column headers.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::S => "s",
            Self::Ms => "ms",
            Self::Us => "us",
            Self::Ns => "ns",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for TimeUnit {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s" => Ok(Self::S),
            "ms" => Ok(Self::Ms),
            "us" => Ok(Self::Us),
            "ns" => Ok(Self::Ns),
            other => Err(BenchError::InvalidOption {
                kind: "time unit",
                value: other.to_string(),
            }),
        }
    }
}
