use std::path::PathBuf;
use std::time::Duration;

use crate::utils::ChartError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/admin/clicks-over-time";
pub const DEFAULT_OUTPUT_PATH: &str = "clicks_vs_time.png";

/// Runtime settings for one chart generation
#[derive(Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub api_token: String,
    pub output_path: PathBuf,
    pub show_chart: bool,
    /// `None` means the request may block forever
    pub http_timeout: Option<Duration>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_url", &self.api_url)
            .field("api_token", &"<redacted>")
            .field("output_path", &self.output_path)
            .field("show_chart", &self.show_chart)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl AppConfig {
    /// Build the config from process environment (after `.env` has been loaded)
    pub fn from_env() -> Result<Self, ChartError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup, so tests don't touch the real environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ChartError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_token = get("CLICKS_API_TOKEN")
            .ok_or_else(|| ChartError::Config("CLICKS_API_TOKEN not set".to_string()))?;

        let api_url = get("CLICKS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let output_path = get("CLICKS_OUTPUT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));

        let show_chart = match get("CLICKS_SHOW_CHART") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                ChartError::Config(format!("CLICKS_SHOW_CHART must be true/false, got '{}'", raw))
            })?,
            None => false,
        };

        let http_timeout = match get("CLICKS_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    ChartError::Config(format!(
                        "CLICKS_HTTP_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                        raw
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_url,
            api_token,
            output_path,
            show_chart,
            http_timeout,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
