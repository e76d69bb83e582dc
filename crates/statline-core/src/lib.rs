// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # statline-core
//!
//! The numeric core of `statline`: CPU utilisation from two counter
//! snapshots, and fixed-width formatting of byte quantities.
//!
//! # Pipeline
//! ```text
//! StatSource ──read──► sample_cpu_usage ──┐
//!      │                                   ├──► StatsRenderer ──► " 42% 2289/8192M"
//!      └──────read_mem_stat───────────────┘
//! ```
//!
//! - [`sample_cpu_usage`] reads the CPU counters twice around a sleep and
//!   reduces the delta to a whole percentage.
//! - [`Unit::for_total`] picks one binary unit for a used/total pair.
//! - [`Scaled`] prints a quantity in at most four characters, choosing
//!   between 0 and 2 decimals by magnitude.
//! - [`StatsRenderer`] assembles the line.
//!
//! Everything is synchronous. The only blocking point is the sleep between
//! the two CPU reads.
//!
//! # Example
//! ```
//! use stat_source::MemStat;
//!
//! let mem = MemStat::new(6 << 30, 16 << 30);
//! assert_eq!(statline_core::render(42, &mem), " 42% 6.00/16G");
//! ```

mod config;
mod error;
mod format;
mod render;
mod sampler;
mod units;

pub use config::{parse_duration, StatlineConfig, DEFAULT_SAMPLE_DURATION};
pub use error::ConfigError;
pub use format::{format_in_unit, format_quantity, Scaled};
pub use render::{render, ByteSuffix, StatsRenderer};
pub use sampler::{cpu_usage_between, sample_cpu_usage};
pub use units::Unit;

use stat_source::{StatError, StatSource};

/// Runs one full measurement and returns the rendered status line.
///
/// Samples CPU usage over `config.sample_duration`, then reads memory and
/// renders both. Any counter read failure is returned unchanged.
pub fn status_line<S>(source: &S, config: &StatlineConfig) -> Result<String, StatError>
where
    S: StatSource + ?Sized,
{
    let cpu = sample_cpu_usage(source, config.sample_duration)?;
    let mem = source.read_mem_stat()?;
    tracing::debug!(
        used_bytes = mem.used_bytes,
        total_bytes = mem.total_bytes,
        unit = %Unit::for_total(mem.total_bytes),
        "memory sample"
    );
    Ok(StatsRenderer::new(config.byte_suffix).render(cpu, &mem))
}
