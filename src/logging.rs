//! Logging setup on top of `tracing`.
//!
//! Output goes to a daily-rotating file under the local data directory, so
//! it never draws over the table. The filter comes from `RUST_LOG`, then
//! `settings.log_level`, then [`DEFAULT_LOG_FILTER`].

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::config::Settings;

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "curbdesk=info,warn";

/// File name prefix; the appender adds the date.
const LOG_FILE_PREFIX: &str = "curbdesk.log";

/// Pick the filter directive: `RUST_LOG` wins over the configured level.
fn filter_directive(env: Option<String>, settings: &Settings) -> String {
    env.filter(|value| !value.trim().is_empty())
        .or_else(|| settings.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Install the global subscriber.
///
/// Logs land in:
///
/// - Linux: `~/.local/share/curbdesk/logs/`
/// - macOS: `~/Library/Application Support/curbdesk/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\curbdesk\logs\`
///
/// # Errors
///
/// Fails if the log directory cannot be created or a global subscriber is
/// already installed.
pub fn init(settings: &Settings) -> anyhow::Result<()> {
    let log_dir = log_directory()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;
    std::fs::create_dir_all(&log_dir)?;

    let directive = filter_directive(std::env::var(EnvFilter::DEFAULT_ENV).ok(), settings);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(RollingFileAppender::new(
                    Rotation::DAILY,
                    &log_dir,
                    LOG_FILE_PREFIX,
                ))
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        filter = %directive,
        "curbdesk starting up"
    );
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");
    Ok(())
}

/// Directory holding the log files, shown on the help screen.
pub fn log_directory() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("curbdesk").join("logs"))
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("curbdesk shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_level(level: Option<&str>) -> Settings {
        Settings {
            log_level: level.map(str::to_string),
            ..Settings::default()
        }
    }

    #[test]
    fn test_log_directory_layout() {
        let dir = log_directory().unwrap();
        assert!(dir.ends_with("curbdesk/logs"));
    }

    #[test]
    fn test_default_filter() {
        assert_eq!(filter_directive(None, &with_level(None)), DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_configured_level_used() {
        assert_eq!(
            filter_directive(None, &with_level(Some("curbdesk=debug"))),
            "curbdesk=debug"
        );
    }

    #[test]
    fn test_env_overrides_configured_level() {
        let settings = with_level(Some("curbdesk=debug"));
        assert_eq!(
            filter_directive(Some("trace".to_string()), &settings),
            "trace"
        );
        assert_eq!(
            filter_directive(Some("  ".to_string()), &settings),
            "curbdesk=debug"
        );
    }
}
