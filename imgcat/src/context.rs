//! Application context that holds resolved configuration
//!
//! The context is built following the precedence order:
//! 1. Default values
//! 2. Config file values (`--config` or `IMGCAT_CONFIG`)
//!
//! Once built, the context is passed as read-only throughout the application.

use libimgcat::Config;
use std::path::Path;

/// Verbosity level derived from repeated `-v` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    Quiet,
    Info,
    Debug,
    Trace,
}

impl VerbosityLevel {
    /// Map the number of `-v` flags to a level
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => VerbosityLevel::Quiet,
            1 => VerbosityLevel::Info,
            2 => VerbosityLevel::Debug,
            _ => VerbosityLevel::Trace,
        }
    }

    /// Default `tracing` filter directive for this level
    pub fn filter_directive(self) -> &'static str {
        match self {
            VerbosityLevel::Quiet => "warn",
            VerbosityLevel::Info => "info",
            VerbosityLevel::Debug => "debug",
            VerbosityLevel::Trace => "trace",
        }
    }
}

/// Application context with resolved configuration and runtime state
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Resolved configuration
    pub config: Config,
}

impl AppContext {
    /// Build context from defaults and an optional config file
    pub fn build(config_path: Option<&Path>) -> Result<Self, String> {
        let config = Config::load(config_path).map_err(|e| match config_path {
            Some(p) => format!("Failed to load config from {}: {}", p.display(), e),
            None => format!("Failed to load config: {}", e),
        })?;

        Ok(Self { config })
    }
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over the verbosity flags when it is set.
pub fn init_logging(verbosity: VerbosityLevel) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(verbosity.filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
