//! Tracing subscriber setup.
//!
//! Filter priority is CLI > RUST_LOG > built-in default. Whatever filter wins,
//! the startup announcement under [`STARTUP_TARGET`] stays enabled at info so
//! the deployment lines always reach stdout.

use tracing_subscriber::filter::Directive;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, DEFAULT_LOG_FILTER};
use crate::error::AppError;

/// Target of the listening/environment/version lines printed at startup
pub const STARTUP_TARGET: &str = "pipeline_demo::startup";

/// Build the env filter from the winning filter string, always admitting startup lines.
pub fn build_filter(log_filter: &str) -> Result<EnvFilter, AppError> {
    let startup: Directive = format!("{}=info", STARTUP_TARGET)
        .parse()
        .map_err(|e: tracing_subscriber::filter::ParseError| AppError::Logging(e.to_string()))?;
    Ok(EnvFilter::new(log_filter).add_directive(startup))
}

/// Install the global subscriber.
pub fn init_tracing(cli_filter: Option<String>, format: LogFormat) -> Result<(), AppError> {
    let log_filter = cli_filter
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry = tracing_subscriber::registry().with(build_filter(&log_filter)?);

    let result = match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    };

    result.map_err(|e| AppError::Logging(e.to_string()))
}

/// In-memory log sink for tests.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl CapturedLogs {
    pub(crate) fn text(&self) -> String {
        let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

#[cfg(test)]
impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(mut bytes) = self.0.lock() {
            bytes.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
