// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for counter acquisition.

/// Errors that can occur when reading raw counters from the host OS.
///
/// None of these are recoverable: a status line without real numbers is
/// useless, so callers are expected to abort on any variant.
#[derive(Debug, thiserror::Error)]
pub enum StatError {
    /// Failed to read a procfs file.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    /// A procfs file was readable but its content was malformed.
    #[error("failed to parse value from {path}: {detail}")]
    ParseError { path: String, detail: String },

    /// A required field was absent from a procfs file.
    #[error("{field} not found in {path}")]
    MissingField { path: String, field: &'static str },

    /// A Mach host call returned a non-success `kern_return_t`.
    #[error("{call} returned {code}")]
    OsCallFailed { call: &'static str, code: i32 },

    /// A `sysctlbyname` lookup failed.
    #[error("sysctl {name} failed: {source}")]
    SysctlError {
        name: String,
        source: std::io::Error,
    },
}
