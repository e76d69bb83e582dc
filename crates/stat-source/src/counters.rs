// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Raw counter snapshots and the [`StatSource`] capability.

use crate::StatError;

/// Cumulative CPU time since boot, in kernel ticks.
///
/// Both fields only ever grow, except when the underlying kernel counter
/// wraps around. Consumers must tolerate an apparent decrease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct CpuCounters {
    /// Ticks spent idle.
    pub idle_ticks: u64,
    /// Ticks spent in any state, idle included.
    pub total_ticks: u64,
}

impl CpuCounters {
    pub fn new(idle_ticks: u64, total_ticks: u64) -> Self {
        Self {
            idle_ticks,
            total_ticks,
        }
    }
}

/// System memory usage in bytes.
///
/// `used_bytes <= total_bytes` holds on a quiet system, but the two values
/// come from separate kernel reads and may briefly disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct MemStat {
    /// Memory in use by the system, in bytes.
    pub used_bytes: u64,
    /// Installed physical memory, in bytes.
    pub total_bytes: u64,
}

impl MemStat {
    pub fn new(used_bytes: u64, total_bytes: u64) -> Self {
        Self {
            used_bytes,
            total_bytes,
        }
    }
}

/// A host that can report CPU tick counters and memory usage.
///
/// Implementations either return a fully populated value or an error;
/// they never hand back a partially filled snapshot.
pub trait StatSource {
    /// Short identifier used in log output (e.g. `"procfs"`).
    fn name(&self) -> &'static str;

    /// Reads the aggregate CPU tick counters.
    fn read_cpu_counters(&self) -> Result<CpuCounters, StatError>;

    /// Reads current memory usage.
    fn read_mem_stat(&self) -> Result<MemStat, StatError>;
}

impl<S: StatSource + ?Sized> StatSource for &S {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn read_cpu_counters(&self) -> Result<CpuCounters, StatError> {
        (**self).read_cpu_counters()
    }

    fn read_mem_stat(&self) -> Result<MemStat, StatError> {
        (**self).read_mem_stat()
    }
}

impl<S: StatSource + ?Sized> StatSource for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn read_cpu_counters(&self) -> Result<CpuCounters, StatError> {
        (**self).read_cpu_counters()
    }

    fn read_mem_stat(&self) -> Result<MemStat, StatError> {
        (**self).read_mem_stat()
    }
}
