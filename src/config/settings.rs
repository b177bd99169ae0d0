//! Application settings configuration.

use serde::{Deserialize, Serialize};

/// Default event loop tick rate in milliseconds.
pub const DEFAULT_TICK_RATE_MS: u64 = 100;

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// The UI theme to use.
    pub theme: String,
    /// Whether to use vim-style keybindings.
    pub vim_mode: bool,
    /// Event loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
    /// Log filter directive, e.g. `debug` or `curbdesk=trace`. `RUST_LOG`
    /// takes precedence.
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            vim_mode: true,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            log_level: None,
        }
    }
}

/// Where the admin table is loaded from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "location", rename_all = "lowercase")]
pub enum TableSource {
    /// A JSON table document on disk.
    File(String),
    /// A server path returning a JSON table document.
    Remote(String),
}

impl Default for TableSource {
    fn default() -> Self {
        TableSource::Remote("/admin/addresses.json".to_string())
    }
}

/// Table behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableSettings {
    /// Column sorted on when the table is first shown.
    pub default_column: usize,
    /// Where the rows come from.
    pub source: TableSource,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            default_column: 0,
            source: TableSource::default(),
        }
    }
}
