use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Inline JSON array of portfolios. Stands in for a real datastore.
    pub portfolio_data: Option<String>,
    /// File holding the same JSON array; only read when `portfolio_data` is unset.
    pub portfolio_data_path: Option<PathBuf>,
    pub export: ExportSettings,
}

/// Tuning for the background export worker.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub workers: usize,
    pub queue_capacity: usize,
    /// `None` disables the per-job deadline.
    pub timeout: Option<Duration>,
    /// `None` keeps finished jobs for the lifetime of the process.
    pub retention: Option<Duration>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            workers: 4,
            queue_capacity: 64,
            timeout: Some(Duration::from_secs(120)),
            retention: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = ExportSettings::default();

        Ok(Config {
            port: parse_env("PORT", 8080u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            portfolio_data: optional_env("PORTFOLIO_DATA"),
            portfolio_data_path: optional_env("PORTFOLIO_DATA_PATH").map(PathBuf::from),
            export: ExportSettings {
                workers: parse_env("EXPORT_WORKERS", defaults.workers)?.max(1),
                queue_capacity: parse_env("EXPORT_QUEUE_CAPACITY", defaults.queue_capacity)?
                    .max(1),
                timeout: seconds(parse_env("EXPORT_TIMEOUT_SECS", 120u64)?),
                retention: seconds(parse_env("EXPORT_RETENTION_SECS", 0u64)?),
            },
        })
    }

    /// Raw portfolio JSON, from the inline variable or the configured file.
    pub fn load_portfolio_json(&self) -> Result<Option<String>> {
        if let Some(raw) = &self.portfolio_data {
            return Ok(Some(raw.clone()));
        }
        match &self.portfolio_data_path {
            Some(path) => std::fs::read_to_string(path)
                .map(Some)
                .with_context(|| format!("Failed to read portfolio data from {}", path.display())),
            None => Ok(None),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

fn seconds(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "PORT",
            "PORTFOLIO_DATA",
            "PORTFOLIO_DATA_PATH",
            "EXPORT_WORKERS",
            "EXPORT_QUEUE_CAPACITY",
            "EXPORT_TIMEOUT_SECS",
            "EXPORT_RETENTION_SECS",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = Config::from_env().expect("config loads with defaults");
        assert_eq!(config.port, 8080);
        assert!(config.portfolio_data.is_none());
        assert_eq!(config.export.workers, 4);
        assert_eq!(config.export.timeout, Some(Duration::from_secs(120)));
        assert!(config.export.retention.is_none());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        std::env::set_var("PORT", "not-a-port");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("PORT"));
        reset_env();
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        std::env::set_var("EXPORT_TIMEOUT_SECS", "0");
        std::env::set_var("EXPORT_WORKERS", "0");
        let config = Config::from_env().expect("config loads");
        assert!(config.export.timeout.is_none());
        assert_eq!(config.export.workers, 1);
        reset_env();
    }

    #[test]
    fn test_portfolio_json_prefers_inline_value() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "[{{\"id\":\"from-file\"}}]").expect("write");

        let mut config = Config {
            port: 8080,
            rust_log: "info".to_string(),
            portfolio_data: None,
            portfolio_data_path: Some(file.path().to_path_buf()),
            export: ExportSettings::default(),
        };
        let raw = config.load_portfolio_json().expect("reads file").expect("some");
        assert!(raw.contains("from-file"));

        config.portfolio_data = Some("[]".to_string());
        assert_eq!(config.load_portfolio_json().unwrap().as_deref(), Some("[]"));
    }
}
