use std::time::Duration;

use crate::error::ConfigError;

/// Status API endpoint used when `PRACTICUM_ENDPOINT` is unset.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Telegram Bot API base URL used when `TELEGRAM_API_URL` is unset.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Seconds between poll iterations when `RETRY_INTERVAL_SECS` is unset.
pub const DEFAULT_RETRY_INTERVAL_SECS: u64 = 10;

const REQUIRED_KEYS: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OAuth token for the status API
    pub practicum_token: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Chat that receives status notifications
    pub telegram_chat_id: String,

    /// Status API endpoint
    pub endpoint: String,

    /// Telegram Bot API base URL
    pub telegram_api_url: String,

    /// Fixed wait between iterations, also used after failures
    pub retry_interval: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Every missing required key is logged before the error is returned, so
    /// the operator sees the full list in one run.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<&'static str> = REQUIRED_KEYS
            .into_iter()
            .filter(|key| get(*key).is_none())
            .collect();

        if !missing.is_empty() {
            for key in &missing {
                tracing::error!(key = *key, "Required environment variable is missing");
            }
            return Err(ConfigError::Missing(missing));
        }

        let retry_interval_secs = match get("RETRY_INTERVAL_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: "RETRY_INTERVAL_SECS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_RETRY_INTERVAL_SECS,
        };

        Ok(Self {
            practicum_token: get("PRACTICUM_TOKEN").unwrap_or_default(),
            telegram_token: get("TELEGRAM_TOKEN").unwrap_or_default(),
            telegram_chat_id: get("TELEGRAM_CHAT_ID").unwrap_or_default(),
            endpoint: get("PRACTICUM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            telegram_api_url: get("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            retry_interval: Duration::from_secs(retry_interval_secs),
        })
    }
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

    const FULL: [(&str, &str); 3] = [
        ("PRACTICUM_TOKEN", "pt"),
        ("TELEGRAM_TOKEN", "tt"),
        ("TELEGRAM_CHAT_ID", "42"),
    ];

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::from_lookup(lookup_from(&FULL)).unwrap();
        assert_eq!(config.practicum_token, "pt");
        assert_eq!(config.telegram_token, "tt");
        assert_eq!(config.telegram_chat_id, "42");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.telegram_api_url, DEFAULT_TELEGRAM_API_URL);
        assert_eq!(config.retry_interval, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let mut pairs = FULL.to_vec();
        pairs.push(("PRACTICUM_ENDPOINT", "http://localhost:1234/statuses/"));
        pairs.push(("RETRY_INTERVAL_SECS", "600"));
        let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.endpoint, "http://localhost:1234/statuses/");
        assert_eq!(config.retry_interval, Duration::from_secs(600));
    }

    #[test]
    fn test_every_missing_key_reported() {
        let err = AppConfig::from_lookup(lookup_from(&[("TELEGRAM_TOKEN", "tt")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing(vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"])
        );
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let pairs = [
            ("PRACTICUM_TOKEN", "pt"),
            ("TELEGRAM_TOKEN", "   "),
            ("TELEGRAM_CHAT_ID", "42"),
        ];
        let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert_eq!(err, ConfigError::Missing(vec!["TELEGRAM_TOKEN"]));
    }

    #[test]
    fn test_invalid_retry_interval() {
        let mut pairs = FULL.to_vec();
        pairs.push(("RETRY_INTERVAL_SECS", "ten"));
        let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "RETRY_INTERVAL_SECS",
                ..
            }
        ));
    }
}
