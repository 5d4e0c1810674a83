// Tracing log adapter - Structured logging using tracing crate

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use crate::domain::errors::*;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(DomainError::Config {
                message: format!("Invalid log format: {}. Valid formats: pretty, json", s),
            }),
        }
    }
}

/// Tracing log adapter
pub struct TracingLogAdapter;

impl TracingLogAdapter {
    /// Install the global subscriber writing to stderr
    ///
    /// `filter` uses `EnvFilter` directive syntax (`"warn"`, `"frameclip=debug"`).
    /// Installing twice is not an error; the first subscriber stays active.
    pub fn init(filter: &str, format: LogFormat) -> Result<(), DomainError> {
        let env_filter = EnvFilter::try_new(filter).map_err(|e| DomainError::Config {
            message: format!("Invalid log level '{}': {}", filter, e),
        })?;

        let builder = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false);

        let _ = match format {
            LogFormat::Pretty => builder.try_init(),
            LogFormat::Json => builder.json().try_init(),
        };
        Ok(())
    }
}
