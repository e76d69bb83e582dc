// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Assembly of the final status line.
//!
//! ```text
//!  42% 2289/8192M
//! ```
//! The CPU percentage is right-aligned in three columns. The used figure
//! keeps its decimals so the line does not jitter as usage changes; the
//! total has trailing zeros trimmed. Both share the unit symbol printed last.

use crate::format::Scaled;
use crate::Unit;
use stat_source::MemStat;

/// When to print an extra `B` after the unit symbol (`M` → `MB`).
///
/// Historical builds disagreed on this: one appended `B` whenever the used
/// figure rendered exactly three characters wide, others never did. The
/// rule is therefore opt-in and explicit rather than inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub enum ByteSuffix {
    /// Never append `B`.
    #[default]
    Never,
    /// Append `B` when the used figure is exactly this many characters.
    UsedWidth(usize),
}

impl ByteSuffix {
    fn applies(&self, used: &str) -> bool {
        match *self {
            ByteSuffix::Never => false,
            ByteSuffix::UsedWidth(width) => used.chars().count() == width,
        }
    }
}

/// Renders a CPU percentage and memory usage into one status line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsRenderer {
    byte_suffix: ByteSuffix,
}

impl StatsRenderer {
    pub fn new(byte_suffix: ByteSuffix) -> Self {
        Self { byte_suffix }
    }

    /// Produces `"{cpu:>3}% {used}/{total}{unit}"`.
    ///
    /// Both figures share the unit chosen for `mem.total_bytes`.
    pub fn render(&self, cpu_percent: u8, mem: &MemStat) -> String {
        let unit = Unit::for_total(mem.total_bytes);
        let used = Scaled::new(mem.used_bytes, unit, false).to_string();
        let total = Scaled::new(mem.total_bytes, unit, true);

        let mut line = format!("{cpu_percent:>3}% {used}/{total}{unit}");
        if self.byte_suffix.applies(&used) {
            line.push('B');
        }
        line
    }
}

/// Renders with the default renderer (no byte suffix).
pub fn render(cpu_percent: u8, mem: &MemStat) -> String {
    StatsRenderer::default().render(cpu_percent, mem)
}
