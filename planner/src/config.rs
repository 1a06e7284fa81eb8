use std::time::Duration;

use thiserror::Error;

use crate::api::{SortMode, DEFAULT_WALK_LINK_BASE, MAX_PAGE_SIZE};

const MAX_COLLECTED_PAGES: u32 = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub kakao_api_key: Option<String>,
    pub kakao_base_url: String,
    pub map_link_base: String,
    pub search_timeout: Duration,
    pub page_size: u32,
    pub max_pages: u32,
    pub(crate) sort: SortMode,
    pub selection_seed: Option<u64>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let sort = match var("SEARCH_SORT") {
            Some(value) => SortMode::parse(&value).ok_or(ConfigError::Invalid {
                name: "SEARCH_SORT",
                expected: "'accuracy' or 'distance'",
                value,
            })?,
            None => SortMode::default(),
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or("PORT", var("PORT"), 8000, "a port number")?,
            kakao_api_key: var("KAKAO_REST_API_KEY"),
            kakao_base_url: var("KAKAO_LOCAL_BASE_URL")
                .unwrap_or_else(|| "https://dapi.kakao.com".into()),
            map_link_base: var("MAP_LINK_BASE_URL")
                .unwrap_or_else(|| DEFAULT_WALK_LINK_BASE.into()),
            search_timeout: Duration::from_secs(parse_or(
                "SEARCH_TIMEOUT_SECS",
                var("SEARCH_TIMEOUT_SECS"),
                10,
                "a whole number of seconds",
            )?),
            page_size: parse_or(
                "SEARCH_PAGE_SIZE",
                var("SEARCH_PAGE_SIZE"),
                MAX_PAGE_SIZE,
                "a count",
            )?
            .clamp(1, MAX_PAGE_SIZE),
            max_pages: parse_or("SEARCH_MAX_PAGES", var("SEARCH_MAX_PAGES"), 1, "a count")?
                .clamp(1, MAX_COLLECTED_PAGES),
            sort,
            selection_seed: var("SELECTION_SEED")
                .map(|v| parse_or("SELECTION_SEED", Some(v), 0, "an unsigned integer"))
                .transpose()?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match value {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.kakao_api_key, None);
        assert_eq!(config.kakao_base_url, "https://dapi.kakao.com");
        assert_eq!(config.map_link_base, "https://map.kakao.com/link/by/walk");
        assert_eq!(config.search_timeout, Duration::from_secs(10));
        assert_eq!(config.page_size, 15);
        assert_eq!(config.max_pages, 1);
        assert_eq!(config.sort, SortMode::Accuracy);
        assert_eq!(config.selection_seed, None);
    }

    #[test]
    fn blank_credential_counts_as_unset() {
        let config = config_from(&[("KAKAO_REST_API_KEY", "   ")]).unwrap();
        assert_eq!(config.kakao_api_key, None);

        let config = config_from(&[("KAKAO_REST_API_KEY", " abc123 ")]).unwrap();
        assert_eq!(config.kakao_api_key.as_deref(), Some("abc123"));
    }

    #[test]
    fn search_limits_are_clamped() {
        let config =
            config_from(&[("SEARCH_PAGE_SIZE", "40"), ("SEARCH_MAX_PAGES", "9")]).unwrap();
        assert_eq!(config.page_size, 15);
        assert_eq!(config.max_pages, 3);

        let config =
            config_from(&[("SEARCH_PAGE_SIZE", "0"), ("SEARCH_MAX_PAGES", "0")]).unwrap();
        assert_eq!(config.page_size, 1);
        assert_eq!(config.max_pages, 1);
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("PORT", "9090"),
            ("SEARCH_SORT", "Distance"),
            ("SEARCH_TIMEOUT_SECS", "3"),
            ("SELECTION_SEED", "42"),
        ])
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.sort, SortMode::Distance);
        assert_eq!(config.search_timeout, Duration::from_secs(3));
        assert_eq!(config.selection_seed, Some(42));
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        let err = config_from(&[("SEARCH_SORT", "rating")]).unwrap_err();
        assert!(err.to_string().contains("SEARCH_SORT"));

        assert!(config_from(&[("SELECTION_SEED", "-1")]).is_err());
    }
}
