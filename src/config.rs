//! Runtime configuration read from the environment.
//!
//! On desktop a `.env` file is loaded first; otherwise the bundled
//! `assets/config.env` seeds any variable not already set.

use anyhow::{Context, Result, bail};
use std::time::Duration;
use tracing::Level;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

pub const API_BASE_VAR: &str = "DOCQA_API_BASE";
pub const POLL_INTERVAL_VAR: &str = "DOCQA_POLL_INTERVAL_MS";
pub const LOG_LEVEL_VAR: &str = "DOCQA_LOG";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    pub poll_interval: Duration,
    pub log_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            log_level: Level::INFO,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(base) = lookup(API_BASE_VAR).map(|v| v.trim().to_string()) {
            if base.is_empty() {
                bail!("{API_BASE_VAR} is set but empty");
            }
            config.api_base = base;
        }

        if let Some(raw) = lookup(POLL_INTERVAL_VAR) {
            let millis: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{POLL_INTERVAL_VAR} must be whole milliseconds, got {raw:?}"))?;
            if millis == 0 {
                bail!("{POLL_INTERVAL_VAR} must be greater than zero");
            }
            config.poll_interval = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup(LOG_LEVEL_VAR) {
            config.log_level = raw
                .trim()
                .parse()
                .with_context(|| format!("{LOG_LEVEL_VAR} is not a log level: {raw:?}"))?;
        }

        Ok(config)
    }

    /// [`AppConfig::from_env`], falling back to defaults when it is invalid.
    pub fn load() -> Self {
        Self::from_env().unwrap_or_else(|err| {
            tracing::warn!("invalid configuration, using defaults: {err:#}");
            Self::default()
        })
    }
}

/// Parses `KEY=VALUE` lines, skipping blanks and `#` comments.
pub fn parse_env_lines(contents: &str) -> Vec<(&str, &str)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_base, "http://localhost:8000/api");
        assert_eq!(config.poll_interval, Duration::from_secs(2));
    }

    #[test]
    fn overrides_are_read() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (API_BASE_VAR, "https://docs.example.com/api"),
            (POLL_INTERVAL_VAR, "500"),
            (LOG_LEVEL_VAR, "debug"),
        ]))
        .unwrap();
        assert_eq!(config.api_base, "https://docs.example.com/api");
        assert_eq!(config.poll_interval, Duration::from_millis(500));
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(AppConfig::from_lookup(lookup_from(&[(POLL_INTERVAL_VAR, "2s")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[(POLL_INTERVAL_VAR, "0")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[(API_BASE_VAR, "  ")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[(LOG_LEVEL_VAR, "loud")])).is_err());
    }

    #[test]
    fn env_lines_skip_comments_and_blanks() {
        let contents = "# backend\n\nDOCQA_API_BASE = http://10.0.2.2:8000/api\nnot a pair\n=orphan\nDOCQA_LOG=warn\n";
        assert_eq!(
            parse_env_lines(contents),
            vec![
                ("DOCQA_API_BASE", "http://10.0.2.2:8000/api"),
                ("DOCQA_LOG", "warn"),
            ]
        );
    }
}
