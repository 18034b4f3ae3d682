// ABOUTME: Tracing subscriber setup for the BeautyPro server
// ABOUTME: Chooses json, pretty, or compact output from the environment and quiets noisy dependencies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

//! Structured logging
//!
//! | Variable | Effect |
//! |---|---|
//! | `RUST_LOG` | base filter (default `info`) |
//! | `LOG_FORMAT` | `json`, `pretty` (default) or `compact` |
//! | `LOG_INCLUDE_LOCATION` | add file and line to every event |
//! | `LOG_INCLUDE_SPANS` | emit span open/close events |
//!
//! Production (`ENVIRONMENT=production`) always includes locations and spans.

use crate::constants::service_names;
use anyhow::Result;
use std::env;
use std::io;
use tracing::info;
use tracing_subscriber::{
    filter::Directive,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Dependency targets that are too chatty at `info`
const QUIET_TARGETS: &[&str] = &[
    "hyper=warn",
    "hyper::proto=warn",
    "sqlx=info",
    "sqlx::query=warn",
    "tower_http=info",
];

/// How events are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line, for log shippers
    Json,
    /// Multi-line human output
    #[default]
    Pretty,
    /// Single-line human output
    Compact,
}

impl LogFormat {
    fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Subscriber settings resolved from the environment
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Base filter directive, e.g. `info` or `beautypro_server=debug`
    pub filter: String,
    /// Output rendering
    pub format: LogFormat,
    /// Attach file/line to events
    pub with_location: bool,
    /// Emit span lifecycle events
    pub with_spans: bool,
    /// Deployment environment reported in the startup event
    pub environment: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
            format: LogFormat::default(),
            with_location: false,
            with_spans: false,
            environment: "development".to_owned(),
        }
    }
}

impl LoggingConfig {
    /// Read the logging variables
    #[must_use]
    pub fn from_env() -> Self {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_owned());
        let verbose = environment.eq_ignore_ascii_case("production");

        Self {
            filter: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned()),
            format: env::var("LOG_FORMAT")
                .map(|f| LogFormat::parse(&f))
                .unwrap_or_default(),
            with_location: verbose || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            with_spans: verbose || env::var("LOG_INCLUDE_SPANS").is_ok(),
            environment,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        QUIET_TARGETS
            .iter()
            .filter_map(|target| target.parse::<Directive>().ok())
            .fold(EnvFilter::new(&self.filter), EnvFilter::add_directive)
    }

    /// Install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let spans = if self.with_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let layer = fmt::layer()
            .with_writer(io::stdout)
            .with_file(self.with_location)
            .with_line_number(self.with_location)
            .with_span_events(spans);
        let registry = tracing_subscriber::registry().with(self.env_filter());

        match self.format {
            LogFormat::Json => registry.with(layer.json()).try_init()?,
            LogFormat::Pretty => registry.with(layer).try_init()?,
            LogFormat::Compact => registry.with(layer.compact().with_target(false)).try_init()?,
        }

        info!(
            service = service_names::BEAUTYPRO_SERVER,
            version = env!("CARGO_PKG_VERSION"),
            environment = %self.environment,
            filter = %self.filter,
            format = ?self.format,
            "Logging initialized"
        );
        Ok(())
    }
}

/// Install the subscriber described by the environment
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("COMPACT"), LogFormat::Compact);
        assert_eq!(LogFormat::parse("anything"), LogFormat::Pretty);
    }

    #[test]
    fn test_quiet_targets_parse() {
        for target in QUIET_TARGETS {
            assert!(target.parse::<Directive>().is_ok(), "{target}");
        }
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(!config.with_spans);
    }
}
