use std::env;
use std::path::PathBuf;

use dashboard_core::models::settings::Settings;

/// Server configuration derived from environment variables.
/// Every variable is optional; the defaults serve the two archives from
/// the working directory on localhost.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,

    // ── Data ───────────────────────────────────────────────────────
    /// Zip archive (or directory) holding the case-count CSV.
    pub covid_archive: PathBuf,
    /// Zip archive (or directory) holding one CSV per security.
    pub stocks_archive: PathBuf,

    // ── Presentation ───────────────────────────────────────────────
    pub panel_height: u32,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable lookup. `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let str_or = |name: &str, default: &str| -> String {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let defaults = Settings::default();

        Self {
            bind: str_or("DASHBOARD_BIND", "127.0.0.1"),
            port: parse_or(lookup("DASHBOARD_PORT"), 8050),
            covid_archive: PathBuf::from(str_or("DASHBOARD_COVID_ARCHIVE", "Data_Covid.zip")),
            stocks_archive: PathBuf::from(str_or("DASHBOARD_STOCKS_ARCHIVE", "Data_stocks.zip")),
            panel_height: parse_or(lookup("DASHBOARD_PANEL_HEIGHT"), defaults.panel_height),
        }
    }

    /// Chart-builder settings implied by this configuration.
    pub fn settings(&self) -> Settings {
        Settings {
            panel_height: self.panel_height,
            ..Settings::default()
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}
