//! Registry configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default control-plane base URL.
pub const DEFAULT_HTTP_BASE: &str = "https://clorabase.herokuapp.com/chat";

/// Default data-plane base URL.
pub const DEFAULT_WS_BASE: &str = "wss://clorabase.herokuapp.com/chat";

/// Default timeout for a create request.
pub const DEFAULT_CREATE_TIMEOUT: Duration = Duration::from_secs(20);

/// Default timeout for kick and close requests.
pub const DEFAULT_ADMIN_TIMEOUT: Duration = Duration::from_secs(20);

/// Where the registry lives and how long to wait for it.
///
/// Both base URLs are prefixes: endpoint paths (`create`, `join`,
/// `{room}/delete`) are appended as extra path segments, so a trailing
/// slash is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Base URL for create/kick/close (`http` or `https`).
    pub http_base: String,

    /// Base URL for the data-channel join endpoint (`ws` or `wss`).
    pub ws_base: String,

    /// Timeout for `create`.
    pub create_timeout: Duration,

    /// Timeout for kick and close.
    pub admin_timeout: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            http_base: DEFAULT_HTTP_BASE.to_string(),
            ws_base: DEFAULT_WS_BASE.to_string(),
            create_timeout: DEFAULT_CREATE_TIMEOUT,
            admin_timeout: DEFAULT_ADMIN_TIMEOUT,
        }
    }
}

impl RegistryConfig {
    /// Sets the control-plane base URL.
    pub fn http_base(mut self, url: impl Into<String>) -> Self {
        self.http_base = url.into();
        self
    }

    /// Sets the data-plane base URL.
    pub fn ws_base(mut self, url: impl Into<String>) -> Self {
        self.ws_base = url.into();
        self
    }

    /// Sets the create timeout.
    pub fn create_timeout(mut self, timeout: Duration) -> Self {
        self.create_timeout = timeout;
        self
    }

    /// Sets the kick/close timeout.
    pub fn admin_timeout(mut self, timeout: Duration) -> Self {
        self.admin_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_config_default() {
        let config = RegistryConfig::default();
        assert_eq!(config.http_base, DEFAULT_HTTP_BASE);
        assert_eq!(config.ws_base, DEFAULT_WS_BASE);
        assert_eq!(config.create_timeout, Duration::from_secs(20));
        assert_eq!(config.admin_timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_registry_config_setters() {
        let config = RegistryConfig::default()
            .http_base("http://localhost:8080/chat")
            .ws_base("ws://localhost:8080/chat")
            .create_timeout(Duration::from_secs(1));
        assert_eq!(config.http_base, "http://localhost:8080/chat");
        assert_eq!(config.ws_base, "ws://localhost:8080/chat");
        assert_eq!(config.create_timeout, Duration::from_secs(1));
        assert_eq!(config.admin_timeout, DEFAULT_ADMIN_TIMEOUT);
    }

    #[test]
    fn test_registry_config_missing_fields_use_defaults() {
        let config: RegistryConfig =
            serde_json::from_str(r#"{"http_base":"http://example.test/chat"}"#)
                .unwrap();
        assert_eq!(config.http_base, "http://example.test/chat");
        assert_eq!(config.ws_base, DEFAULT_WS_BASE);
    }
}
