//! Tracing setup. The terminal owns stdout, so logs go to a file.

use crate::config::TuiConfig;
use crate::error::TuiError;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "agentdesk_tui=info,agentdesk_core=info";

pub fn init_tracing(config: &TuiConfig) -> Result<(), TuiError> {
    if let Some(parent) = config.log_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .try_init()
        .map_err(|e| TuiError::Logging(e.to_string()))
}
