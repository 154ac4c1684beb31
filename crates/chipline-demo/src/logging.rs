//! Logging setup using tracing.

use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Parse a log level from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Initialize logging.
///
/// The demo owns the terminal, so logs go to a file when one is given and
/// are otherwise discarded (spans still work).
pub fn init(level: LogLevel, file: Option<PathBuf>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let subscriber = tracing_subscriber::registry().with(filter);

    match file {
        Some(path) => {
            let writer = std::sync::Arc::new(std::fs::File::create(path)?);
            let fmt_layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer);
            subscriber.with(fmt_layer).init();
        }
        None => subscriber.init(),
    }
    Ok(())
}
