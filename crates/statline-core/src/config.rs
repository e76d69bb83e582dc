// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Run configuration assembled from command-line arguments.
//!
//! There is no configuration file. Everything a run needs fits in
//! [`StatlineConfig`], which is validated before any counter is read.

use crate::{ByteSuffix, ConfigError};
use std::time::Duration;

/// Sample window used when none is given.
pub const DEFAULT_SAMPLE_DURATION: Duration = Duration::from_millis(100);

/// Configuration for a single status-line run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StatlineConfig {
    /// Time between the two CPU counter reads.
    pub sample_duration: Duration,
    /// Rule for the optional `B` after the unit symbol.
    pub byte_suffix: ByteSuffix,
}

impl StatlineConfig {
    /// Sets the sample window.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.sample_duration = duration;
        self
    }

    /// Enables the `B` suffix when the used figure is `width` characters.
    pub fn with_byte_suffix_width(mut self, width: usize) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroSuffixWidth);
        }
        self.byte_suffix = ByteSuffix::UsedWidth(width);
        Ok(self)
    }
}

impl Default for StatlineConfig {
    fn default() -> Self {
        Self {
            sample_duration: DEFAULT_SAMPLE_DURATION,
            byte_suffix: ByteSuffix::Never,
        }
    }
}

/// Parses a sample duration.
///
/// Accepted formats: `"150"` (milliseconds), `"150ms"`, or seconds with an
/// `s` suffix such as `"0.25s"` or `"1s"`. Surrounding whitespace is
/// ignored.
pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let trimmed = s.trim();
    let invalid = |detail: &str| ConfigError::InvalidDuration {
        input: s.to_string(),
        detail: detail.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid("empty value"));
    }

    if let Some(ms) = trimmed.strip_suffix("ms") {
        let ms: u64 = ms
            .trim()
            .parse()
            .map_err(|_| invalid("expected whole milliseconds before 'ms'"))?;
        return Ok(Duration::from_millis(ms));
    }

    if let Some(secs) = trimmed.strip_suffix('s') {
        let secs: f64 = secs
            .trim()
            .parse()
            .map_err(|_| invalid("expected a number of seconds before 's'"))?;
        return Duration::try_from_secs_f64(secs)
            .map_err(|_| invalid("seconds must be finite and non-negative"));
    }

    trimmed
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| invalid("expected milliseconds, e.g. '150', '150ms' or '0.15s'"))
}
