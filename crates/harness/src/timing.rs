// Copyright 2025 Benchtab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Timing loop for in-process targets.
//!
//! Calls run back to back on the calling thread. The total is taken from
//! just before the first call to just after the last one, so it includes
//! the per-call timer overhead and is not the sum of the per-call times.

use std::time::Instant;

/// Raw numbers from one timing loop, all in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Total wall time across all calls.
    pub elapsed: f64,
    /// Fastest call.
    pub min: Option<f64>,
    /// Slowest call.
    pub max: Option<f64>,
    /// Number of calls made.
    pub number: u64,
}

impl Measurement {
    /// Average seconds per call.
    pub fn avg(&self) -> f64 {
        self.elapsed / self.number as f64
    }
}

/// Monotonic clock abstraction.
pub(crate) trait Timer {
    type Instant: Copy;

    fn now(&self) -> Self::Instant;
    fn elapsed_secs(&self, start: Self::Instant) -> f64;
}

/// Timer backed by [`std::time::Instant`].
pub(crate) struct NativeTimer;

impl Timer for NativeTimer {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_secs(&self, start: Self::Instant) -> f64 {
        start.elapsed().as_secs_f64()
    }
}

/// Call `f` `number` times and record total, min and max wall time.
///
/// The first error returned by `f` stops the loop and is handed back as is.
pub fn measure<F>(number: u64, f: F) -> anyhow::Result<Measurement>
where
    F: FnMut() -> anyhow::Result<()>,
{
    measure_with_timer(&NativeTimer, number, f)
}

pub(crate) fn measure_with_timer<T, F>(
    timer: &T,
    number: u64,
    mut f: F,
) -> anyhow::Result<Measurement>
where
    T: Timer,
    F: FnMut() -> anyhow::Result<()>,
{
    let mut min: Option<f64> = None;
    let mut max: Option<f64> = None;

    let op_start = timer.now();
    for _ in 0..number {
        let call_start = timer.now();
        f()?;
        let call_elapsed = timer.elapsed_secs(call_start);
        match min {
            Some(current) if current <= call_elapsed => {}
            _ => min = Some(call_elapsed),
        }
        match max {
            Some(current) if current >= call_elapsed => {}
            _ => max = Some(call_elapsed),
        }
    }
    let elapsed = timer.elapsed_secs(op_start);

    Ok(Measurement {
        elapsed,
        min,
        max,
        number,
    })
}
