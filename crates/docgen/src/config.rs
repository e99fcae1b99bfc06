use crate::prelude::*;
use std::time::Duration;

/// Connection settings for the documentation backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Port the backend listens on when started with its defaults.
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:9003";

    pub fn from_global(global: &crate::Global) -> Self {
        Self::new(&global.base_url, Duration::from_secs(global.timeout))
    }

    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let base_url = base_url.trim().trim_end_matches('/');
        let base_url = if base_url.is_empty() {
            Self::DEFAULT_BASE_URL
        } else {
            base_url
        };

        Self {
            base_url: base_url.to_string(),
            timeout,
        }
    }

    /// Absolute URL of an endpoint path such as `/process-zip`.
    pub fn endpoint(&self, path: &str) -> String {
        f!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn build_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("docgen/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slashes() {
        let config = ClientConfig::new("http://docs.local:8080//", Duration::from_secs(5));
        assert_eq!(config.base_url, "http://docs.local:8080");
    }

    #[test]
    fn test_new_falls_back_to_default() {
        let config = ClientConfig::new("  ", Duration::from_secs(5));
        assert_eq!(config.base_url, ClientConfig::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let config = ClientConfig::new("http://localhost:9003/", Duration::from_secs(5));
        assert_eq!(
            config.endpoint("/generate-docs"),
            "http://localhost:9003/generate-docs"
        );
        assert_eq!(
            config.endpoint("process-zip"),
            "http://localhost:9003/process-zip"
        );
    }
}
