// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for run configuration.

/// Errors that can occur while building a [`StatlineConfig`](crate::StatlineConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A sample duration string could not be understood.
    #[error("invalid duration '{input}': {detail}")]
    InvalidDuration { input: String, detail: String },

    /// The byte-suffix width must name a real string width.
    #[error("byte suffix width must be at least 1")]
    ZeroSuffixWidth,
}
