// src/session.rs
use crate::types::{CrtShConfig, HostscopeError};
use reqwest::Client;
use std::time::Duration;

#[derive(Clone)]
pub struct Session {
    pub client: Client,
}

impl Session {
    pub fn new(config: &CrtShConfig) -> Result<Self, HostscopeError> {
        // Build HTTP client
        let mut client_builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .deflate(true)
            .connect_timeout(config.timeout.min(Duration::from_secs(10)));

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| HostscopeError::ConfigError(format!("Invalid proxy URL: {}", e)))?;
            client_builder = client_builder.proxy(proxy);
        }

        let client = client_builder
            .build()
            .map_err(|e| HostscopeError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Session { client })
    }

    pub async fn get(&self, url: &str) -> Result<reqwest::Response, HostscopeError> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| HostscopeError::NetworkError(e.to_string()))
    }

    /// GET `url` and return the raw body. Non-2xx statuses are errors.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, HostscopeError> {
        let response = self.get(url).await?;

        if !response.status().is_success() {
            return Err(HostscopeError::NetworkError(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
