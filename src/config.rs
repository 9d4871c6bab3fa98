use std::str::FromStr;
use std::time::Duration;

use chrono::FixedOffset;
use thiserror::Error;

use crate::external::gold_page::DEFAULT_URL_TEMPLATE;
use crate::external::telegram::DEFAULT_API_BASE;
use crate::services::job_scheduler_service::JobSchedules;
use crate::store::gold_prices::DEFAULT_KEY_PREFIX;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },

    #[error("{key} must be set")]
    Missing { key: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Redis,
    Memory,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub api_base: String,
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cache_backend: CacheBackend,
    pub redis_url: String,
    pub redis_timeout: Duration,
    pub cache_key_prefix: String,
    pub source_url_template: String,
    pub fetch_timeout: Duration,
    pub initial_crawl: bool,
    pub schedules: JobSchedules,
    /// Notifications are disabled when either token or chat id is missing.
    pub telegram: Option<TelegramConfig>,
    pub notify_offset: FixedOffset,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let string = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let cache_backend = match string("CACHE_BACKEND", "redis").to_lowercase().as_str() {
            "redis" => CacheBackend::Redis,
            "memory" => CacheBackend::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    key: "CACHE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let telegram = match (lookup("TELEGRAM_BOT_TOKEN"), lookup("TELEGRAM_CHAT_ID")) {
            (Some(bot_token), Some(chat_id)) if !bot_token.is_empty() && !chat_id.is_empty() => {
                Some(TelegramConfig {
                    api_base: string("TELEGRAM_API_BASE", DEFAULT_API_BASE),
                    bot_token,
                    chat_id,
                })
            }
            _ => None,
        };

        let offset_hours: i32 = parse(&lookup, "NOTIFY_UTC_OFFSET_HOURS", 7)?;
        let notify_offset = FixedOffset::east_opt(offset_hours * 3600).ok_or(ConfigError::Invalid {
            key: "NOTIFY_UTC_OFFSET_HOURS",
            value: offset_hours.to_string(),
        })?;

        Ok(Self {
            host: string("SERVER_HOST", "0.0.0.0"),
            port: parse(&lookup, "SERVER_PORT", 8080)?,
            cache_backend,
            redis_url: string("REDIS_URL", "redis://127.0.0.1:6379/0"),
            redis_timeout: Duration::from_millis(parse(&lookup, "REDIS_TIMEOUT_MS", 2000)?),
            cache_key_prefix: string("CACHE_KEY_PREFIX", DEFAULT_KEY_PREFIX),
            source_url_template: string("GOLD_SOURCE_URL_TEMPLATE", DEFAULT_URL_TEMPLATE),
            fetch_timeout: Duration::from_secs(parse(&lookup, "FETCH_TIMEOUT_SECS", 10)?),
            initial_crawl: parse(&lookup, "INITIAL_CRAWL", true)?,
            schedules: JobSchedules {
                crawl: string("CRAWL_SCHEDULE", "0 0 */6 * * *"),
                notify: string("NOTIFY_SCHEDULE", "0 0 0 * * *"),
                test_mode: parse(&lookup, "JOB_SCHEDULER_TEST_MODE", false)?,
            },
            telegram,
            notify_offset,
        })
    }
}

pub(crate) fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.cache_backend, CacheBackend::Redis);
        assert_eq!(cfg.cache_key_prefix, "gold_price");
        assert_eq!(cfg.fetch_timeout, Duration::from_secs(10));
        assert!(cfg.initial_crawl);
        assert_eq!(cfg.schedules.crawl, "0 0 */6 * * *");
        assert!(!cfg.schedules.test_mode);
        assert!(cfg.telegram.is_none());
        assert_eq!(cfg.notify_offset.local_minus_utc(), 7 * 3600);
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("SERVER_PORT", "9000"),
            ("CACHE_BACKEND", "Memory"),
            ("INITIAL_CRAWL", "false"),
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "-100"),
            ("NOTIFY_UTC_OFFSET_HOURS", "0"),
        ])
        .unwrap();

        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.cache_backend, CacheBackend::Memory);
        assert!(!cfg.initial_crawl);
        let telegram = cfg.telegram.unwrap();
        assert_eq!(telegram.chat_id, "-100");
        assert_eq!(telegram.api_base, "https://api.telegram.org");
        assert_eq!(cfg.notify_offset.local_minus_utc(), 0);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(matches!(
            config(&[("SERVER_PORT", "http")]),
            Err(ConfigError::Invalid { key: "SERVER_PORT", .. })
        ));
        assert!(config(&[("CACHE_BACKEND", "memcached")]).is_err());
        assert!(config(&[("NOTIFY_UTC_OFFSET_HOURS", "30")]).is_err());
    }

    #[test]
    fn test_telegram_requires_token_and_chat() {
        assert!(config(&[("TELEGRAM_BOT_TOKEN", "123:abc")]).unwrap().telegram.is_none());
        assert!(config(&[("TELEGRAM_BOT_TOKEN", ""), ("TELEGRAM_CHAT_ID", "1")])
            .unwrap()
            .telegram
            .is_none());
    }
}
