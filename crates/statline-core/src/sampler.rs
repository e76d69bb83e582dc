// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Delta-based CPU utilisation sampling.
//!
//! Utilisation is the share of non-idle ticks between two snapshots of the
//! cumulative counters. A window in which the counters did not advance, or
//! went backwards because a kernel counter wrapped, reports 0% instead of
//! failing or retrying.

use stat_source::{CpuCounters, StatError, StatSource};
use std::time::Duration;

/// Computes the busy percentage between two counter snapshots.
///
/// Rounds half up. Returns 0 when the window is empty or the counters are
/// inconsistent (wrap-around, idle advancing faster than total).
pub fn cpu_usage_between(before: CpuCounters, after: CpuCounters) -> u8 {
    let total = i128::from(after.total_ticks) - i128::from(before.total_ticks);
    let idle = i128::from(after.idle_ticks) - i128::from(before.idle_ticks);
    let busy = total - idle;

    if total <= 0 || busy < 0 || busy > total {
        tracing::debug!(total = %total, busy = %busy, "degenerate cpu delta, reporting 0%");
        return 0;
    }

    // busy <= total, so the quotient is at most 100.
    ((100 * busy + total / 2) / total) as u8
}

/// Samples CPU utilisation over `duration`.
///
/// Reads the counters, sleeps, and reads them again. `std::thread::sleep`
/// resumes after signal interruptions, so the window is never cut short.
pub fn sample_cpu_usage<S>(source: &S, duration: Duration) -> Result<u8, StatError>
where
    S: StatSource + ?Sized,
{
    let before = source.read_cpu_counters()?;
    std::thread::sleep(duration);
    let after = source.read_cpu_counters()?;

    let percent = cpu_usage_between(before, after);
    tracing::debug!(
        source = source.name(),
        window_ms = duration.as_millis() as u64,
        total_delta = after.total_ticks.wrapping_sub(before.total_ticks),
        percent,
        "cpu sample"
    );
    Ok(percent)
}
