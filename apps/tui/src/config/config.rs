use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::DEFAULT_API_BASE;
use crate::catalogue::StatusPolicy;

pub const API_URL_VAR: &str = "TROVE_API_URL";
/// Name the web build used for the same setting.
pub const LEGACY_API_URL_VAR: &str = "VITE_PUBLIC_API_URL";
pub const HIDE_DRAFTS_VAR: &str = "TROVE_HIDE_DRAFTS";
pub const HTTP_TIMEOUT_VAR: &str = "TROVE_HTTP_TIMEOUT_SECS";
pub const LOG_FILE_VAR: &str = "TROVE_LOG_FILE";

const DEFAULT_LOG_FILE: &str = "trove.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub status_policy: StatusPolicy,
    /// `None` leaves requests without a deadline.
    pub http_timeout: Option<Duration>,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl AppConfig {
    /// Builds the configuration from `lookup`, which returns the value of a
    /// variable when it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_base_url = non_empty(API_URL_VAR)
            .or_else(|| non_empty(LEGACY_API_URL_VAR))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(eyre!("{API_URL_VAR} must be an http(s) URL, got {api_base_url}"));
        }

        let include_drafts = !non_empty(HIDE_DRAFTS_VAR).is_some_and(|value| is_truthy(&value));

        let http_timeout = match non_empty(HTTP_TIMEOUT_VAR) {
            Some(value) => {
                let secs: u64 = value
                    .trim()
                    .parse()
                    .map_err(|e| eyre!("{HTTP_TIMEOUT_VAR}={value}: {e}"))?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => None,
        };

        let log_file =
            non_empty(LOG_FILE_VAR).map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from);
        let debug = non_empty("DEBUG").is_some_and(|value| is_truthy(&value));

        Ok(Self {
            api_base_url,
            status_policy: StatusPolicy { include_drafts },
            http_timeout,
            log_file,
            debug,
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Loads `.env` and reads the application configuration from the
/// environment.
pub fn init_app_config() -> Result<AppConfig> {
    dotenv().ok();
    AppConfig::from_lookup(|name| env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_without_environment() -> Result<()> {
        let config = config_from(&[])?;

        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert!(config.status_policy.include_drafts);
        assert_eq!(config.http_timeout, None);
        assert_eq!(config.log_file, PathBuf::from("trove.log"));
        assert!(!config.debug);
        Ok(())
    }

    #[test]
    fn legacy_url_is_used_when_primary_missing() -> Result<()> {
        let config = config_from(&[(LEGACY_API_URL_VAR, "https://api.example.com")])?;
        assert_eq!(config.api_base_url, "https://api.example.com");

        let config = config_from(&[
            (LEGACY_API_URL_VAR, "https://api.example.com"),
            (API_URL_VAR, "http://10.0.0.2:5000"),
        ])?;
        assert_eq!(config.api_base_url, "http://10.0.0.2:5000");
        Ok(())
    }

    #[test]
    fn rejects_non_http_url() {
        assert!(config_from(&[(API_URL_VAR, "localhost:5000")]).is_err());
    }

    #[test]
    fn hide_drafts_and_timeout_are_parsed() -> Result<()> {
        let config = config_from(&[
            (HIDE_DRAFTS_VAR, "TRUE"),
            (HTTP_TIMEOUT_VAR, "15"),
            ("DEBUG", "1"),
        ])?;

        assert!(!config.status_policy.include_drafts);
        assert_eq!(config.http_timeout, Some(Duration::from_secs(15)));
        assert!(config.debug);
        Ok(())
    }

    #[test]
    fn zero_timeout_means_none_and_garbage_is_an_error() -> Result<()> {
        assert_eq!(config_from(&[(HTTP_TIMEOUT_VAR, "0")])?.http_timeout, None);
        assert!(config_from(&[(HTTP_TIMEOUT_VAR, "soon")]).is_err());
        Ok(())
    }
}
