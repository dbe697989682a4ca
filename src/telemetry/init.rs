// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Logging initialization.
//!
//! Output goes to stderr: the process that embeds the bootstrapper usually
//! prints the resulting server collection on stdout.

use std::io;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration for logging initialization.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Level used when neither RUST_LOG nor `filter_directive` is set.
    pub default_level: Level,

    /// Prefix each line with `file:line`.
    pub include_file_line: bool,

    /// Include the target module path.
    pub include_target: bool,

    /// Colorize output.
    pub ansi_colors: bool,

    /// Filter directive used when RUST_LOG is unset or invalid.
    pub filter_directive: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_level: Level::INFO,
            include_file_line: true,
            include_target: false,
            ansi_colors: false,
            filter_directive: None,
        }
    }
}

impl TelemetryConfig {
    /// Debug output for this crate, info for everything else.
    pub fn development() -> Self {
        Self {
            default_level: Level::DEBUG,
            include_target: true,
            ansi_colors: true,
            filter_directive: Some("info,mcp_bootstrap=debug".to_string()),
            ..Self::default()
        }
    }

    /// Warnings and errors only.
    pub fn production() -> Self {
        Self {
            default_level: Level::WARN,
            include_file_line: false,
            ..Self::default()
        }
    }

    /// Trace output for this crate, no colors.
    pub fn testing() -> Self {
        Self {
            default_level: Level::TRACE,
            include_target: true,
            filter_directive: Some("mcp_bootstrap=trace".to_string()),
            ..Self::default()
        }
    }

    /// Set the default log level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    /// Set the filter directive used when RUST_LOG is absent.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter_directive = Some(filter.into());
        self
    }

    /// Enable or disable ANSI colors.
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi_colors = ansi;
        self
    }

    /// RUST_LOG, then `filter_directive`, then `default_level`.
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| self.fallback_filter())
    }

    fn fallback_filter(&self) -> EnvFilter {
        self.filter_directive
            .as_deref()
            .and_then(|directive| EnvFilter::try_new(directive).ok())
            .unwrap_or_else(|| EnvFilter::new(self.default_level.to_string()))
    }
}

/// Install the global subscriber. Call once at startup.
///
/// # Example
///
/// ```rust,ignore
/// use mcp_bootstrap::telemetry::{init_telemetry, TelemetryConfig};
///
/// init_telemetry(&TelemetryConfig::default())?;
/// ```
pub fn init_telemetry(config: &TelemetryConfig) -> io::Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(config.ansi_colors)
        .with_target(config.include_target)
        .with_file(config.include_file_line)
        .with_line_number(config.include_file_line)
        .compact();

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}
