//! Client configuration.
//!
//! Values come from code or from the environment:
//! - `NEWS_API_BASE_URL` overrides the provider base URL
//! - `NEWS_API_TIMEOUT_SECS` sets a global request timeout
//! - `NEWS_API_KEY` holds the API key (read by `NewsApi::from_env`)

use std::time::Duration;

use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

pub const ENV_API_KEY: &str = "NEWS_API_KEY";
pub const ENV_BASE_URL: &str = "NEWS_API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "NEWS_API_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// `None` blocks until the transport itself gives up.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config.timeout = Some(Duration::from_secs(secs)),
                Err(err) => warn!(value = %raw, error = %err, "ignoring unparsable {ENV_TIMEOUT_SECS}"),
            }
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn env_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, " http://127.0.0.1:3000/v2 "),
            (ENV_TIMEOUT_SECS, "15"),
        ]));
        assert_eq!(config.base_url, "http://127.0.0.1:3000/v2");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn bad_timeout_is_ignored() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")]));
        assert!(config.timeout.is_none());
    }

    #[test]
    fn blank_base_url_keeps_default() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_BASE_URL, "   ")]));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn builder_methods() {
        let config = ClientConfig::default()
            .with_base_url("http://localhost:1/v2")
            .with_timeout(Duration::from_millis(250));
        assert_eq!(config.base_url, "http://localhost:1/v2");
        assert_eq!(config.timeout, Some(Duration::from_millis(250)));
    }
}
