use thiserror::Error;

/// Errors that can occur within a [`StatsProvider`](super::StatsProvider)
/// implementation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider's API returned an error payload.
    #[error("API error: {0}")]
    Api(String),

    /// The response body did not match the expected shape.
    #[error("unexpected response payload: {0}")]
    Decode(String),
}

/// Errors while constructing a provider.
#[derive(Debug, Error)]
pub enum ProviderInitError {
    /// Required configuration is absent from the environment.
    #[error(transparent)]
    Config(#[from] shared_utils::env::ConfigError),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
