use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Create the default HTTP client for API requests
/// with settings for connection pooling and timeouts
pub fn create_http_client() -> Client {
    ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .timeout(Duration::from_secs(300)) // 5 minutes
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to create HTTP client")
}

/// Configuration for the Goodreads API client
#[derive(Debug, Clone)]
pub struct Config {
    /// URL scheme (http or https)
    pub scheme: String,
    /// API host
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scheme: "https".to_string(),
            host: "goodreads.com".to_string(),
        }
    }
}

impl Config {
    /// Create a new configuration with the given scheme and host
    pub fn new(scheme: String, host: String) -> Self {
        Config { scheme, host }
    }

    /// Get the base URL for API requests
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url(), "https://goodreads.com");
    }

    #[test]
    fn test_custom_config() {
        let config = Config::new("http".to_string(), "localhost:8080".to_string());
        assert_eq!(config.base_url(), "http://localhost:8080");
    }
}
