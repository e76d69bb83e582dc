// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Counter acquisition from `/proc/stat` and `/proc/meminfo`.
//!
//! CPU time comes from the aggregate `cpu` line of `/proc/stat`:
//! ```text
//! cpu  4705 356 584 3699176 23060 0 277 0 0 0
//!      user nice system idle iowait ...
//! ```
//! Only the first four columns are summed into the total. iowait and the
//! columns after it are left out, matching how the tool has always counted.
//!
//! Memory comes from `MemTotal` and `MemAvailable`. Kernels older than 3.14
//! lack `MemAvailable`; `MemFree` is used instead.

use crate::{CpuCounters, MemStat, StatError, StatSource};
use std::path::{Path, PathBuf};

/// Default path to the kernel CPU statistics file.
const STAT_PATH: &str = "/proc/stat";

/// Default path to the kernel memory info file.
const MEMINFO_PATH: &str = "/proc/meminfo";

/// Reads counters from procfs.
#[derive(Debug, Clone)]
pub struct ProcfsSource {
    stat_path: PathBuf,
    meminfo_path: PathBuf,
}

impl ProcfsSource {
    /// Creates a source reading the standard `/proc` files.
    pub fn new() -> Self {
        Self::with_paths(STAT_PATH, MEMINFO_PATH)
    }

    /// Creates a source reading from custom file locations (for testing or
    /// for a procfs mounted elsewhere, e.g. inside a container).
    pub fn with_paths(stat_path: impl Into<PathBuf>, meminfo_path: impl Into<PathBuf>) -> Self {
        Self {
            stat_path: stat_path.into(),
            meminfo_path: meminfo_path.into(),
        }
    }
}

impl Default for ProcfsSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StatSource for ProcfsSource {
    fn name(&self) -> &'static str {
        "procfs"
    }

    fn read_cpu_counters(&self) -> Result<CpuCounters, StatError> {
        let content = read_proc_file(&self.stat_path)?;
        parse_stat(&content, &self.stat_path)
    }

    fn read_mem_stat(&self) -> Result<MemStat, StatError> {
        let content = read_proc_file(&self.meminfo_path)?;
        parse_meminfo(&content, &self.meminfo_path)
    }
}

fn read_proc_file(path: &Path) -> Result<String, StatError> {
    std::fs::read_to_string(path).map_err(|e| StatError::ReadError {
        path: path.display().to_string(),
        source: e,
    })
}

/// Parses the aggregate `cpu` line of a `/proc/stat`-formatted string.
pub(crate) fn parse_stat(content: &str, source_path: &Path) -> Result<CpuCounters, StatError> {
    let line = content
        .lines()
        .find(|l| l.split_whitespace().next() == Some("cpu"))
        .ok_or_else(|| StatError::MissingField {
            path: source_path.display().to_string(),
            field: "cpu",
        })?;

    let mut fields = line.split_whitespace().skip(1);
    let mut ticks = [0u64; 4];
    for (slot, name) in ticks.iter_mut().zip(["user", "nice", "system", "idle"]) {
        let raw = fields.next().ok_or_else(|| StatError::ParseError {
            path: source_path.display().to_string(),
            detail: format!("cpu line has no '{name}' column"),
        })?;
        *slot = raw.parse::<u64>().map_err(|_| StatError::ParseError {
            path: source_path.display().to_string(),
            detail: format!("expected integer '{name}' ticks, got '{raw}'"),
        })?;
    }

    let [user, nice, system, idle] = ticks;
    Ok(CpuCounters {
        idle_ticks: idle,
        total_ticks: user
            .wrapping_add(nice)
            .wrapping_add(system)
            .wrapping_add(idle),
    })
}

/// Parses the content of a `/proc/meminfo`-formatted string.
pub(crate) fn parse_meminfo(content: &str, source_path: &Path) -> Result<MemStat, StatError> {
    let mut total_kb: Option<u64> = None;
    let mut free_kb: Option<u64> = None;
    let mut available_kb: Option<u64> = None;

    for line in content.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            continue;
        }
        match parts[0] {
            "MemTotal:" => total_kb = Some(parse_kb_value(parts[1], source_path)?),
            "MemFree:" => free_kb = Some(parse_kb_value(parts[1], source_path)?),
            "MemAvailable:" => available_kb = Some(parse_kb_value(parts[1], source_path)?),
            _ => {}
        }

        if total_kb.is_some() && available_kb.is_some() {
            break;
        }
    }

    let total_kb = total_kb.ok_or_else(|| StatError::MissingField {
        path: source_path.display().to_string(),
        field: "MemTotal",
    })?;
    let unused_kb = match (available_kb, free_kb) {
        (Some(available), _) => available,
        (None, Some(free)) => {
            tracing::debug!("MemAvailable missing, falling back to MemFree");
            free
        }
        (None, None) => {
            return Err(StatError::MissingField {
                path: source_path.display().to_string(),
                field: "MemAvailable",
            })
        }
    };

    Ok(MemStat {
        used_bytes: total_kb.saturating_sub(unused_kb).saturating_mul(1024),
        total_bytes: total_kb.saturating_mul(1024),
    })
}

/// Parses a numeric string from `/proc/meminfo` (values are in kB).
fn parse_kb_value(s: &str, source_path: &Path) -> Result<u64, StatError> {
    s.parse::<u64>().map_err(|_| StatError::ParseError {
        path: source_path.display().to_string(),
        detail: format!("expected integer kB value, got '{s}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_STAT: &str = "\
cpu  4705 356 584 3699176 23060 0 277 0 0 0
cpu0 1393 280 290 924193 5804 0 95 0 0 0
cpu1 1097 20 95 925288 5700 0 47 0 0 0
intr 1462898 11 0 0
ctxt 1990473
btime 1062191376
";

    const SAMPLE_MEMINFO: &str = "\
MemTotal:        3884292 kB
MemFree:          218456 kB
MemAvailable:    2456780 kB
Buffers:          123456 kB
Cached:          1987654 kB
";

    fn stat_path() -> &'static Path {
        Path::new("/proc/stat")
    }

    fn meminfo_path() -> &'static Path {
        Path::new("/proc/meminfo")
    }

    #[test]
    fn test_parse_stat() {
        let c = parse_stat(SAMPLE_STAT, stat_path()).unwrap();
        assert_eq!(c.idle_ticks, 3699176);
        assert_eq!(c.total_ticks, 4705 + 356 + 584 + 3699176);
    }

    #[test]
    fn test_parse_stat_ignores_per_core_lines() {
        let content = "cpu0 1 1 1 1\ncpu  10 20 30 40\n";
        let c = parse_stat(content, stat_path()).unwrap();
        assert_eq!(c.total_ticks, 100);
        assert_eq!(c.idle_ticks, 40);
    }

    #[test]
    fn test_parse_stat_missing_cpu_line() {
        let result = parse_stat("intr 1 2 3\n", stat_path());
        assert!(matches!(result, Err(StatError::MissingField { field: "cpu", .. })));
    }

    #[test]
    fn test_parse_stat_short_line() {
        let result = parse_stat("cpu 1 2 3\n", stat_path());
        assert!(matches!(result, Err(StatError::ParseError { .. })));
    }

    #[test]
    fn test_parse_stat_non_numeric() {
        let result = parse_stat("cpu 1 2 x 4\n", stat_path());
        assert!(matches!(result, Err(StatError::ParseError { .. })));
    }

    #[test]
    fn test_parse_meminfo() {
        let m = parse_meminfo(SAMPLE_MEMINFO, meminfo_path()).unwrap();
        assert_eq!(m.total_bytes, 3884292 * 1024);
        assert_eq!(m.used_bytes, (3884292 - 2456780) * 1024);
    }

    #[test]
    fn test_parse_meminfo_falls_back_to_memfree() {
        let old_kernel = "MemTotal:        3884292 kB\nMemFree:          218456 kB\n";
        let m = parse_meminfo(old_kernel, meminfo_path()).unwrap();
        assert_eq!(m.used_bytes, (3884292 - 218456) * 1024);
    }

    #[test]
    fn test_parse_meminfo_missing_total() {
        let result = parse_meminfo("MemAvailable: 100 kB\n", meminfo_path());
        assert!(matches!(
            result,
            Err(StatError::MissingField {
                field: "MemTotal",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_meminfo_missing_unused() {
        let result = parse_meminfo("MemTotal: 100 kB\n", meminfo_path());
        assert!(matches!(result, Err(StatError::MissingField { .. })));
    }

    #[test]
    fn test_parse_meminfo_invalid_number() {
        let result = parse_meminfo("MemTotal: lots kB\n", meminfo_path());
        assert!(matches!(result, Err(StatError::ParseError { .. })));
    }

    #[test]
    fn test_read_from_files() {
        let dir = std::env::temp_dir().join("statline_procfs_test");
        std::fs::create_dir_all(&dir).unwrap();
        let stat = dir.join("stat");
        let meminfo = dir.join("meminfo");
        std::fs::write(&stat, SAMPLE_STAT).unwrap();
        std::fs::write(&meminfo, SAMPLE_MEMINFO).unwrap();

        let source = ProcfsSource::with_paths(&stat, &meminfo);
        assert_eq!(source.read_cpu_counters().unwrap().idle_ticks, 3699176);
        assert_eq!(source.read_mem_stat().unwrap().total_bytes, 3884292 * 1024);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file() {
        let source = ProcfsSource::with_paths("/nonexistent/stat", "/nonexistent/meminfo");
        assert!(matches!(
            source.read_cpu_counters(),
            Err(StatError::ReadError { .. })
        ));
        assert!(matches!(
            source.read_mem_stat(),
            Err(StatError::ReadError { .. })
        ));
    }

    #[test]
    fn test_read_real_procfs() {
        // Runs against the actual host when procfs is mounted.
        if Path::new(STAT_PATH).exists() && Path::new(MEMINFO_PATH).exists() {
            let source = ProcfsSource::new();
            let cpu = source.read_cpu_counters().unwrap();
            assert!(cpu.idle_ticks <= cpu.total_ticks);
            let mem = source.read_mem_stat().unwrap();
            assert!(mem.total_bytes > 0);
        }
    }
}
