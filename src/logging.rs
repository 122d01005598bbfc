//! Log verbosity and an optional subscriber installer.
//!
//! The crate only emits `tracing` events; where they go is the application's
//! choice. [`init_tracing`] is a convenience for binaries and tests that have
//! no subscriber of their own.

use std::str::FromStr;
use tracing_subscriber::EnvFilter;

use crate::{Error, ErrorContext, Result};

/// Verbosity levels, from silent to per-attempt request/response summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// Filter directive scoped to this crate.
    pub fn directive(&self) -> String {
        format!("wujie_sdk={}", self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(LogLevel::Off),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "trace" => Ok(LogLevel::Debug),
            other => Err(Error::setup(
                format!("unknown log level `{}`", other),
                ErrorContext::new()
                    .with_field("log_level")
                    .with_origin("logging"),
            )),
        }
    }
}

/// Install a global fmt subscriber filtered at `level`.
///
/// `RUST_LOG`, when set and valid, replaces `level`. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(level: LogLevel) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.directive()))
        .map_err(|e| setup_error(format!("invalid log filter: {}", e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| setup_error(format!("failed to install tracing subscriber: {}", e)))
}

fn setup_error(message: String) -> Error {
    Error::setup(message, ErrorContext::new().with_origin("logging"))
}
