use crate::config::{LogLevel, ENV_LOG};
use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Filter directive: `NOTEFLOW_LOG` when set, else the configured level
fn filter_directive(env_value: Option<String>, level: LogLevel) -> String {
    env_value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| level.as_filter_str().to_string())
}

/// Send tracing output to `log_path`. The terminal belongs to the UI.
pub fn init_tracing(log_path: &Path, level: LogLevel) -> Result<()> {
    let directive = filter_directive(std::env::var(ENV_LOG).ok(), level);
    let env_filter = EnvFilter::try_new(&directive)
        .or_else(|_| EnvFilter::try_new(level.as_filter_str()))
        .map_err(|e| anyhow!("invalid log filter {directive:?}: {e}"))?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_directive_wins() {
        assert_eq!(
            filter_directive(Some("noteflow=trace".into()), LogLevel::Info),
            "noteflow=trace"
        );
    }

    #[test]
    fn test_blank_env_uses_level() {
        assert_eq!(filter_directive(Some(" ".into()), LogLevel::Warn), "warn");
        assert_eq!(filter_directive(None, LogLevel::Debug), "debug");
    }
}
