use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::config::{parse, ConfigError};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid log filter '{filter}': {reason}")]
    Filter { filter: String, reason: String },

    #[error("failed to build Loki layer: {0}")]
    Loki(String),

    #[error(transparent)]
    Init(#[from] TryInitError),
}

/// Console output is always on; lines are also shipped to Loki when `loki_url` is set.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: String,
    pub service_name: String,
    pub environment: String,
    pub loki_url: Option<Url>,
}

impl LoggingConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let loki_enabled: bool = parse(&lookup, "LOKI_ENABLED", false)?;
        let loki_url = match (loki_enabled, lookup("LOKI_URL")) {
            (false, _) => None,
            (true, None) => return Err(ConfigError::Missing { key: "LOKI_URL" }),
            (true, Some(raw)) => Some(
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid { key: "LOKI_URL", value: raw })?,
            ),
        };

        Ok(Self {
            filter: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            service_name: lookup("SERVICE_NAME").unwrap_or_else(|| "goldprice".to_string()),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            loki_url,
        })
    }
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(&config.filter).map_err(|e| LoggingError::Filter {
        filter: config.filter.clone(),
        reason: e.to_string(),
    })?;

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());

    #[cfg(feature = "loki")]
    registry.with(loki_layer(config)?).try_init()?;

    #[cfg(not(feature = "loki"))]
    {
        registry.try_init()?;
        if config.loki_url.is_some() {
            tracing::warn!("LOKI_ENABLED is set but this build has no Loki support");
        }
    }

    tracing::info!(
        "📊 Logging initialized (filter: {}, loki: {})",
        config.filter,
        config.loki_url.as_ref().map_or("off", |u| u.as_str())
    );
    Ok(())
}

#[cfg(feature = "loki")]
fn loki_layer(config: &LoggingConfig) -> Result<Option<tracing_loki::Layer>, LoggingError> {
    let Some(url) = config.loki_url.clone() else {
        return Ok(None);
    };

    let (layer, task) = tracing_loki::builder()
        .label("service", &config.service_name)
        .and_then(|b| b.label("environment", &config.environment))
        .and_then(|b| b.build_url(url))
        .map_err(|e| LoggingError::Loki(e.to_string()))?;

    // Ships buffered log lines to Loki in the background
    tokio::spawn(task);
    Ok(Some(layer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<LoggingConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LoggingConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_are_console_only() {
        let cfg = config(&[("LOKI_URL", "http://localhost:3100")]).unwrap();
        assert_eq!(cfg.filter, "info");
        assert_eq!(cfg.service_name, "goldprice");
        assert_eq!(cfg.environment, "development");
        assert!(cfg.loki_url.is_none());
    }

    #[test]
    fn test_loki_enabled_with_url() {
        let cfg = config(&[
            ("LOKI_ENABLED", "true"),
            ("LOKI_URL", "http://localhost:3100"),
            ("RUST_LOG", "goldprice_backend=debug"),
        ])
        .unwrap();
        assert_eq!(cfg.loki_url.unwrap().as_str(), "http://localhost:3100/");
        assert_eq!(cfg.filter, "goldprice_backend=debug");
    }

    #[test]
    fn test_loki_settings_are_validated() {
        assert!(matches!(
            config(&[("LOKI_ENABLED", "yes")]),
            Err(ConfigError::Invalid { key: "LOKI_ENABLED", .. })
        ));
        assert!(matches!(
            config(&[("LOKI_ENABLED", "true")]),
            Err(ConfigError::Missing { key: "LOKI_URL" })
        ));
        assert!(matches!(
            config(&[("LOKI_ENABLED", "true"), ("LOKI_URL", "not a url")]),
            Err(ConfigError::Invalid { key: "LOKI_URL", .. })
        ));
    }
}
