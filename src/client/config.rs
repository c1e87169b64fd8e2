//! Slack Web API client configuration.

use std::env;
use std::time::Duration;

use url::Url;

use crate::{Error, Result};

/// Default Slack Web API base URL.
pub const DEFAULT_BASE_URL: &str = "https://slack.com/api/";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header value.
pub const DEFAULT_USER_AGENT: &str = concat!("slack-token/", env!("CARGO_PKG_VERSION"));

const BASE_URL_ENV: &str = "SLACK_TOKEN_API_BASE_URL";
const TIMEOUT_ENV: &str = "SLACK_TOKEN_TIMEOUT_SECS";

/// Configuration for [`SlackClient`](super::SlackClient).
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base endpoint; method names are joined beneath it.
    pub base_url: String,
    /// Per-request timeout. Expiry surfaces as a transport error.
    pub timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create configuration with defaults, then apply environment variable overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var(BASE_URL_ENV) {
            config.base_url = url;
        }
        if let Ok(secs) = env::var(TIMEOUT_ENV) {
            match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = %secs, "Ignoring invalid {}", TIMEOUT_ENV),
            }
        }

        config
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the URL for a remote method with URL-encoded query parameters.
    pub fn method_url(&self, method: &str, params: &[(&str, &str)]) -> Result<Url> {
        if method.is_empty() || method.contains(['/', '?', '#']) {
            return Err(Error::config(format!("invalid method name: {:?}", method)));
        }

        let base = if self.base_url.ends_with('/') {
            Url::parse(&self.base_url)
        } else {
            Url::parse(&format!("{}/", self.base_url))
        }
        .map_err(|e| Error::config(format!("invalid base URL {}: {}", self.base_url, e)))?;

        let mut url = base
            .join(method)
            .map_err(|e| Error::config(format!("invalid method name {}: {}", method, e)))?;

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://slack.com/api/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("slack-token/"));
    }

    #[test]
    fn test_from_env() {
        unsafe {
            env::set_var(BASE_URL_ENV, "http://127.0.0.1:9000/api/");
            env::set_var(TIMEOUT_ENV, "not-a-number");
        }
        let config = ClientConfig::from_env();
        assert_eq!(config.base_url, "http://127.0.0.1:9000/api/");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);

        unsafe { env::set_var(TIMEOUT_ENV, "0") };
        assert_eq!(ClientConfig::from_env().timeout, DEFAULT_TIMEOUT);

        unsafe { env::set_var(TIMEOUT_ENV, " 5 ") };
        assert_eq!(ClientConfig::from_env().timeout, Duration::from_secs(5));

        unsafe {
            env::remove_var(BASE_URL_ENV);
            env::remove_var(TIMEOUT_ENV);
        }
        let config = ClientConfig::from_env();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_method_url() {
        let config = ClientConfig::default();
        let url = config
            .method_url("tooling.tokens.rotate", &[("refresh_token", "xoxe-1-abc")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://slack.com/api/tooling.tokens.rotate?refresh_token=xoxe-1-abc"
        );
    }

    #[test]
    fn test_method_url_without_trailing_slash() {
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:8080/api");
        let url = config.method_url("auth.test", &[]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/api/auth.test");
        assert!(url.query().is_none());
    }

    #[test]
    fn test_method_url_encodes_params() {
        let config = ClientConfig::default();
        let url = config
            .method_url("tooling.tokens.rotate", &[("refresh_token", "a&b=c d")])
            .unwrap();
        let pairs: Vec<_> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![("refresh_token".to_string(), "a&b=c d".to_string())]
        );
    }

    #[test]
    fn test_method_url_rejects_bad_input() {
        let config = ClientConfig::default();
        assert!(matches!(
            config.method_url("", &[]),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            config.method_url("x?refresh_token=1", &[]),
            Err(Error::Configuration(_))
        ));

        let config = ClientConfig::default().with_base_url("not a url");
        assert!(matches!(
            config.method_url("auth.test", &[]),
            Err(Error::Configuration(_))
        ));
    }
}
