use std::time::Duration;

/// Test environment.
pub const DEFAULT_BASE_URL: &str = "https://ets-test.bulutix.com";

/// Production environment.
pub const LIVE_BASE_URL: &str = "https://ets.bulutix.com";

/// Connect timeout applied when none is configured.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`EtsClient::with_config`](super::EtsClient::with_config).
///
/// ```
/// use ets_client::{ClientConfig, LIVE_BASE_URL};
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .base_url(LIVE_BASE_URL)
///     .connect_timeout(Duration::from_secs(10));
/// assert_eq!(config.base_url, "https://ets.bulutix.com");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint root, without a trailing slash.
    pub base_url: String,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Trailing slashes are stripped.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url: String = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}
