//! Client configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | M3_STORE_URL | http://localhost:8080 | Document store base URL |
//! | M3_CHAT_ENDPOINT | {store}/api/gemini | Chat relay endpoint |
//! | M3_REQUEST_TIMEOUT_SECS | 30 | HTTP timeout |
//! | M3_STORE_TOKEN | (unset) | Bearer token for the store |
//! | M3_LOG_LEVEL | info | Fallback log level |

use crate::catalog::CatalogConfig;

const DEFAULT_STORE_URL: &str = "http://localhost:8080";
const CHAT_PATH: &str = "api/gemini";

/// Storefront client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Document store base URL (e.g., "http://localhost:8080")
    pub store_url: String,

    /// Chat relay endpoint (absolute URL)
    pub chat_endpoint: String,

    /// Bearer token for the document store
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Fallback log level when RUST_LOG is unset
    pub log_level: String,

    /// Catalog grid settings
    pub catalog: CatalogConfig,
}

impl ClientConfig {
    /// Create a configuration for the given store, chat relay on the same host
    pub fn new(store_url: impl Into<String>) -> Self {
        let store_url = store_url.into();
        let chat_endpoint = format!("{}/{}", store_url.trim_end_matches('/'), CHAT_PATH);
        Self {
            store_url,
            chat_endpoint,
            token: None,
            timeout: 30,
            log_level: "info".to_string(),
            catalog: CatalogConfig::default(),
        }
    }

    /// Load `.env` (if present) and then read the environment
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Read configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let store_url =
            std::env::var("M3_STORE_URL").unwrap_or_else(|_| DEFAULT_STORE_URL.to_string());
        let mut config = Self::new(store_url);

        if let Ok(endpoint) = std::env::var("M3_CHAT_ENDPOINT") {
            config.chat_endpoint = endpoint;
        }
        config.token = std::env::var("M3_STORE_TOKEN").ok().filter(|s| !s.is_empty());
        config.timeout = std::env::var("M3_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(30);
        if let Ok(level) = std::env::var("M3_LOG_LEVEL") {
            config.log_level = level;
        }
        config
    }

    /// Set the store URL (chat endpoint is left unchanged)
    pub fn with_store_url(mut self, url: impl Into<String>) -> Self {
        self.store_url = url.into();
        self
    }

    /// Set the chat relay endpoint
    pub fn with_chat_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.chat_endpoint = endpoint.into();
        self
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the compact/full breakpoint in pixels
    pub fn with_breakpoint(mut self, px: u32) -> Self {
        self.catalog.breakpoint_px = px;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_endpoint_follows_store() {
        let config = ClientConfig::new("https://store.m3outfit.co.tz/");
        assert_eq!(config.chat_endpoint, "https://store.m3outfit.co.tz/api/gemini");
        assert_eq!(config.timeout, 30);
        assert!(config.token.is_none());
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::default()
            .with_token("abc")
            .with_timeout(5)
            .with_breakpoint(640)
            .with_chat_endpoint("http://relay/chat");

        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, 5);
        assert_eq!(config.catalog.breakpoint_px, 640);
        assert_eq!(config.chat_endpoint, "http://relay/chat");
    }
}
