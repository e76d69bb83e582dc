// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # stat-source
//!
//! Reads raw CPU tick counters and memory byte counts from the host OS.
//!
//! # Platforms
//! - **Linux and other procfs hosts**: [`ProcfsSource`] parses
//!   `/proc/stat` and `/proc/meminfo`.
//! - **macOS**: `MachSource` queries Mach host statistics and `sysctl`.
//!
//! Both implement [`StatSource`]. [`platform_source()`] picks the right one
//! for the running target so callers never branch on platform themselves.
//!
//! # Failure Model
//! Every read either succeeds completely or returns a [`StatError`]. There
//! is no degraded mode: callers are expected to abort.
//!
//! # Example
//! ```no_run
//! use stat_source::StatSource;
//!
//! let source = stat_source::platform_source();
//! let mem = source.read_mem_stat().expect("failed to read memory stats");
//! println!("{} / {} bytes", mem.used_bytes, mem.total_bytes);
//! ```

mod counters;
mod error;
#[cfg(target_os = "macos")]
mod mach;
mod procfs;

pub use counters::{CpuCounters, MemStat, StatSource};
pub use error::StatError;
#[cfg(target_os = "macos")]
pub use mach::MachSource;
pub use procfs::ProcfsSource;

/// Returns the counter source for the platform this binary was built for.
#[cfg(target_os = "macos")]
pub fn platform_source() -> Box<dyn StatSource> {
    Box::new(MachSource::new())
}

/// Returns the counter source for the platform this binary was built for.
#[cfg(not(target_os = "macos"))]
pub fn platform_source() -> Box<dyn StatSource> {
    Box::new(ProcfsSource::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_source_name() {
        let expected = if cfg!(target_os = "macos") {
            "mach"
        } else {
            "procfs"
        };
        assert_eq!(platform_source().name(), expected);
    }
}
