// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Counter acquisition from Mach host statistics (macOS).
//!
//! CPU ticks are summed across all processors from
//! `host_processor_info(PROCESSOR_CPU_LOAD_INFO)`. `host_statistics` with
//! `HOST_CPU_LOAD_INFO` is avoided because the kernel refreshes it too
//! rarely for a 100 ms window.
//!
//! Used memory follows Activity Monitor's "Memory Used":
//! `internal - purgeable + wired + compressed` pages. Total memory is
//! `sysctl hw.memsize`.

use crate::{CpuCounters, MemStat, StatError, StatSource};
use std::ffi::CString;
use std::mem::{size_of, MaybeUninit};
use std::ptr;

/// Reads counters through Mach host calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct MachSource;

impl MachSource {
    pub fn new() -> Self {
        Self
    }
}

impl StatSource for MachSource {
    fn name(&self) -> &'static str {
        "mach"
    }

    fn read_cpu_counters(&self) -> Result<CpuCounters, StatError> {
        let mut cpu_count: libc::natural_t = 0;
        let mut info: libc::processor_info_array_t = ptr::null_mut();
        let mut info_count: libc::mach_msg_type_number_t = 0;

        // SAFETY: all out-pointers reference live locals; on success the
        // kernel hands us `info_count` integers that we own and release below.
        let ret = unsafe {
            #[allow(deprecated)]
            let host = libc::mach_host_self();
            libc::host_processor_info(
                host,
                libc::PROCESSOR_CPU_LOAD_INFO,
                &mut cpu_count,
                &mut info,
                &mut info_count,
            )
        };
        if ret != libc::KERN_SUCCESS {
            return Err(StatError::OsCallFailed {
                call: "host_processor_info",
                code: ret,
            });
        }

        let mut idle: u64 = 0;
        let mut total: u64 = 0;
        // SAFETY: the array holds `cpu_count` processor_cpu_load_info records.
        let loads = unsafe {
            std::slice::from_raw_parts(
                info as *const libc::processor_cpu_load_info,
                cpu_count as usize,
            )
        };
        for load in loads {
            idle = idle.wrapping_add(u64::from(load.cpu_ticks[libc::CPU_STATE_IDLE as usize]));
            for ticks in load.cpu_ticks.iter() {
                total = total.wrapping_add(u64::from(*ticks));
            }
        }

        // SAFETY: `info` was allocated by the kernel in our task's address space.
        let ret = unsafe {
            #[allow(deprecated)]
            let task = libc::mach_task_self();
            libc::vm_deallocate(
                task,
                info as libc::vm_address_t,
                info_count as libc::vm_size_t * size_of::<libc::integer_t>() as libc::vm_size_t,
            )
        };
        if ret != libc::KERN_SUCCESS {
            return Err(StatError::OsCallFailed {
                call: "vm_deallocate",
                code: ret,
            });
        }

        Ok(CpuCounters {
            idle_ticks: idle,
            total_ticks: total,
        })
    }

    fn read_mem_stat(&self) -> Result<MemStat, StatError> {
        let mut stats = MaybeUninit::<libc::vm_statistics64>::uninit();
        let mut count: libc::mach_msg_type_number_t = libc::HOST_VM_INFO64_COUNT;

        // SAFETY: `stats` is large enough for HOST_VM_INFO64_COUNT words.
        let ret = unsafe {
            #[allow(deprecated)]
            let host = libc::mach_host_self();
            libc::host_statistics64(
                host,
                libc::HOST_VM_INFO64,
                stats.as_mut_ptr() as *mut _,
                &mut count,
            )
        };
        if ret != libc::KERN_SUCCESS {
            return Err(StatError::OsCallFailed {
                call: "host_statistics64",
                code: ret,
            });
        }
        // SAFETY: host_statistics64 succeeded and filled the struct.
        let stats = unsafe { stats.assume_init() };

        // SAFETY: sysconf has no memory-safety preconditions.
        let page_size = match unsafe { libc::sysconf(libc::_SC_PAGESIZE) } {
            n if n > 0 => n as u64,
            _ => {
                return Err(StatError::SysctlError {
                    name: "_SC_PAGESIZE".to_string(),
                    source: std::io::Error::last_os_error(),
                })
            }
        };

        let used_pages = u64::from(stats.internal_page_count)
            .saturating_sub(u64::from(stats.purgeable_count))
            + u64::from(stats.wire_count)
            + u64::from(stats.compressor_page_count);

        Ok(MemStat {
            used_bytes: used_pages.saturating_mul(page_size),
            total_bytes: read_sysctl_u64("hw.memsize")?,
        })
    }
}

fn read_sysctl_u64(name: &str) -> Result<u64, StatError> {
    let c_name = CString::new(name).map_err(|e| StatError::SysctlError {
        name: name.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
    })?;
    let mut value: u64 = 0;
    let mut size: libc::size_t = size_of::<u64>();
    // SAFETY: `value` and `size` outlive the call and `size` matches `value`.
    let result = unsafe {
        libc::sysctlbyname(
            c_name.as_ptr(),
            &mut value as *mut u64 as *mut libc::c_void,
            &mut size,
            ptr::null_mut(),
            0,
        )
    };
    if result != 0 {
        return Err(StatError::SysctlError {
            name: name.to_string(),
            source: std::io::Error::last_os_error(),
        });
    }
    Ok(value)
}
