use thiserror::Error;

/// Transport-level failure of a single HTTP request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with a non-success status code.
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),

    #[error("Connection error: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("An error occurred: {0}")]
    Other(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::ConnectionFailed(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::HttpStatus(status.as_u16())
        } else {
            FetchError::Other(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum WeatherError {
    /// Bad or missing station fields.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown location '{0}'")]
    NotFound(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The response body did not have the expected JSON shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::MalformedResponse(err.to_string())
    }
}
