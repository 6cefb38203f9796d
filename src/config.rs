use std::{env, time::Duration};

pub const DEFAULT_API_URL: &str = "http://localhost:3002";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_url: String,
    pub api_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let api_url = lookup("SUBTRACK_API_URL")
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_timeout = lookup("SUBTRACK_API_TIMEOUT_SECS")
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);

        Self {
            port,
            api_url,
            api_timeout: Duration::from_secs(api_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_url, "http://localhost:3002");
        assert_eq!(config.api_timeout, Duration::from_secs(10));
    }

    #[test]
    fn reads_overrides_and_trims_url() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("SUBTRACK_API_URL", "https://api.example.com/"),
            ("SUBTRACK_API_TIMEOUT_SECS", "3"),
        ]));
        assert_eq!(config.port, 9000);
        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.api_timeout, Duration::from_secs(3));
    }

    #[test]
    fn ignores_garbage_values() {
        let config = Config::from_lookup(lookup(&[("PORT", "http"), ("SUBTRACK_API_TIMEOUT_SECS", "0")]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_timeout, Duration::from_secs(10));
    }
}
