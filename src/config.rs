use crate::{AppError, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_DATASET_PATH: &str = "data/sample_data.json";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_CURRENCY: &str = "ETB";
const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://localhost:5174",
    "http://localhost:5175",
];

/// Immutable process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub dataset_path: PathBuf,
    pub gemini: GeminiConfig,
    /// Empty only for `ALLOWED_ORIGINS=*`, meaning any origin is allowed.
    pub allowed_origins: Vec<String>,
    pub default_currency: String,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// `None` leaves the service running on fallback predictions.
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: Url,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_base_raw = var("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string());
        let api_base = Url::parse(api_base_raw.trim_end_matches('/'))
            .map_err(|e| AppError::Config(format!("Invalid GEMINI_API_BASE '{}': {}", api_base_raw, e)))?;

        let timeout_secs = match var("GEMINI_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                AppError::Config(format!("Invalid GEMINI_TIMEOUT_SECS '{}': {}", raw, e))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let allowed_origins = match var("ALLOWED_ORIGINS") {
            Some(raw) if raw == "*" => Vec::new(),
            Some(raw) => {
                let origins: Vec<String> = raw
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect();
                if origins.is_empty() {
                    return Err(AppError::Config(format!(
                        "ALLOWED_ORIGINS '{}' lists no origins; use '*' to allow any",
                        raw
                    )));
                }
                origins
            }
            None => DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Ok(Self {
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            dataset_path: var("DATASET_PATH")
                .unwrap_or_else(|| DEFAULT_DATASET_PATH.to_string())
                .into(),
            gemini: GeminiConfig {
                api_key: var("GEMINI_API_KEY"),
                model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                api_base,
                timeout: Duration::from_secs(timeout_secs),
            },
            allowed_origins,
            default_currency: var("DEFAULT_CURRENCY").unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.dataset_path, PathBuf::from("data/sample_data.json"));
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert_eq!(config.gemini.timeout, Duration::from_secs(120));
        assert_eq!(config.allowed_origins.len(), 3);
        assert_eq!(config.default_currency, "ETB");
    }

    #[test]
    fn test_blank_api_key_is_unset() {
        let config = config_from(&[("GEMINI_API_KEY", "   ")]).unwrap();
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-2.5-flash"),
            ("GEMINI_TIMEOUT_SECS", "15"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example"),
        ])
        .unwrap();
        assert_eq!(config.gemini.api_key.as_deref(), Some("secret"));
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(config.gemini.timeout, Duration::from_secs(15));
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn test_wildcard_origins_means_permissive() {
        let config = config_from(&[("ALLOWED_ORIGINS", "*")]).unwrap();
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn test_origins_without_entries_rejected() {
        for raw in [",", " , ", ",,"] {
            let err = config_from(&[("ALLOWED_ORIGINS", raw)]).unwrap_err();
            assert!(matches!(err, AppError::Config(_)));
        }
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let err = config_from(&[("GEMINI_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_invalid_api_base_rejected() {
        let err = config_from(&[("GEMINI_API_BASE", "not a url")]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
