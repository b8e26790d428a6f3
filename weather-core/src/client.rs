use async_trait::async_trait;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};
use std::{fmt::Debug, time::Duration};
use tracing::{debug, warn};

use crate::{
    config::{Config, DEFAULT_TIMEOUT_SECS},
    error::{FetchError, WeatherError},
};

/// Single-shot GET of a JSON document. No retries.
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    /// Returns the raw response body on a 2xx answer.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Settings for [`NwsClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self { user_agent: user_agent.into(), timeout_secs: DEFAULT_TIMEOUT_SECS }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl From<&Config> for ClientConfig {
    fn from(cfg: &Config) -> Self {
        Self::new(cfg.user_agent()).with_timeout(cfg.timeout_secs)
    }
}

/// api.weather.gov client.
#[derive(Debug, Clone)]
pub struct NwsClient {
    http: Client,
}

impl NwsClient {
    pub fn new(config: ClientConfig) -> Result<Self, WeatherError> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&config.user_agent).map_err(|_| {
            WeatherError::Config(format!("invalid User-Agent value '{}'", config.user_agent))
        })?;
        headers.insert(USER_AGENT, agent);
        headers.insert("accept", HeaderValue::from_static("application/geo+json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl WeatherClient for NwsClient {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "GET");

        let res = self.http.get(url).send().await?;

        // The status decides the outcome; the error body is never read.
        let status = res.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "Request failed");
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        Ok(res.text().await?)
    }
}
