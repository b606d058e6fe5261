use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:3001";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API url '{value}': {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid request timeout '{0}', expected whole seconds")]
    InvalidTimeout(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Base endpoint of the books API, without trailing slash.
    pub api_url: String,
    /// `None` means requests may hang forever.
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl Config {
    pub fn new(api_url: &str, timeout_secs: Option<u64>) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: normalize_api_url(api_url)?,
            request_timeout: timeout_secs.filter(|s| *s > 0).map(Duration::from_secs),
        })
    }

    /// Read `BOOK_API_URL` and `BOOK_API_TIMEOUT_SECS`, after loading `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_url = env::var("BOOK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_secs = match env::var("BOOK_API_TIMEOUT_SECS") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?,
            ),
            _ => None,
        };

        Self::new(&api_url, timeout_secs)
    }

    /// Full URL for an API path such as `/books`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    Url::parse(trimmed).map_err(|source| ConfigError::InvalidUrl {
        value: trimmed.to_string(),
        source,
    })?;
    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_api_without_timeout() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:3001");
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = Config::new("http://books.local:8080/", None).unwrap();
        assert_eq!(config.endpoint("/books"), "http://books.local:8080/books");
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let config = Config::new(DEFAULT_API_URL, Some(0)).unwrap();
        assert_eq!(config.request_timeout, None);

        let config = Config::new(DEFAULT_API_URL, Some(5)).unwrap();
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let err = Config::new("not a url", None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }
}
