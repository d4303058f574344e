use std::collections::BTreeMap;
use std::time::Duration;

use crate::url::DEFAULT_AGENT_BASE_URL;

/// Default bound on how long one streaming chunk read may stall before the
/// stream is treated as a transport failure.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(60);

/// Transport configuration for agent API requests.
#[derive(Debug, Clone)]
pub struct EinsteinApiConfig {
    /// Bearer credential passed to `Authorization`. Opaque to this crate.
    pub access_token: String,
    /// Base URL for the session endpoints.
    pub base_url: String,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
    /// Additional headers merged into request headers.
    pub extra_headers: BTreeMap<String, String>,
    /// Optional timeout for the non-streaming session calls.
    pub timeout: Option<Duration>,
    /// Per-chunk stall bound for streaming reads.
    pub read_timeout: Duration,
}

impl Default for EinsteinApiConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            base_url: DEFAULT_AGENT_BASE_URL.to_string(),
            user_agent: None,
            extra_headers: BTreeMap::new(),
            timeout: None,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

impl EinsteinApiConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    pub fn insert_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.extra_headers.extend(headers);
        self
    }
}
