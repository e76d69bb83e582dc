// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # statline
//!
//! Prints CPU and memory utilisation as one compact line for status bars
//! and shell prompts.
//!
//! ## Usage
//! ```bash
//! # Sample CPU over the default 100 ms window
//! statline
//!
//! # Sample over 250 ms
//! statline 250
//! statline --duration 0.25s
//!
//! # Legacy "MB" suffix when the used figure is three characters wide
//! statline --byte-suffix-width 3
//! ```
//!
//! ## Exit status
//! `0` after printing the line, `1` on bad arguments or when the system
//! counters cannot be read.

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, CommandFactory, FromArgMatches, Parser};
use stat_source::StatSource;
use statline_core::{parse_duration, StatlineConfig};
use std::ffi::OsString;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "statline",
    about = "Print CPU and memory utilisation as one compact status line",
    version,
    disable_version_flag = true
)]
struct Cli {
    /// CPU sample window: milliseconds ("150", "150ms") or seconds ("0.25s").
    #[arg(value_name = "DURATION", value_parser = parse_duration, conflicts_with = "duration")]
    window: Option<Duration>,

    /// Same as the positional DURATION.
    #[arg(short, long, value_name = "DURATION", value_parser = parse_duration)]
    duration: Option<Duration>,

    /// Append "B" to the unit when the used figure is exactly WIDTH characters.
    #[arg(long, value_name = "WIDTH", value_parser = clap::value_parser!(u64).range(1..))]
    byte_suffix_width: Option<u64>,

    /// Log to stderr (repeat for more: --verbose --verbose).
    #[arg(long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> anyhow::Result<StatlineConfig> {
        let mut config = StatlineConfig::default();
        if let Some(duration) = self.window.or(self.duration) {
            config = config.with_duration(duration);
        }
        if let Some(width) = self.byte_suffix_width {
            let width = usize::try_from(width).context("byte suffix width out of range")?;
            config = config.with_byte_suffix_width(width)?;
        }
        Ok(config)
    }
}

/// The full command, with `-v` as the version flag.
fn command() -> clap::Command {
    Cli::command().arg(
        Arg::new("version")
            .short('v')
            .long("version")
            .action(ArgAction::Version)
            .help("Print version"),
    )
}

fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command().try_get_matches_from(args)?;
    Cli::from_arg_matches(&matches)
}

/// Exit status for a parse outcome: help and version are successes.
fn parse_exit_status(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Initialises tracing on stderr so stdout carries only the status line.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn default_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = cli.config()?;
    let source = stat_source::platform_source();
    tracing::info!(
        source = source.name(),
        window_ms = config.sample_duration.as_millis() as u64,
        "sampling"
    );
    statline_core::status_line(&source, &config)
        .with_context(|| format!("cannot read system counters via {}", source.name()))
}

fn main() -> ExitCode {
    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(parse_exit_status(e.kind()));
        }
    };

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("statline: {e:#}");
            ExitCode::FAILURE
        }
    }
}
