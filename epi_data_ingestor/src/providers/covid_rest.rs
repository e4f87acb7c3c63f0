//! REST provider for a JHU-CSSE-style statistics API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::models::summary::Summary;
use crate::providers::{ProviderError, ProviderInitError, StatsProvider};
use shared_utils::env::get_env_var;

const DEFAULT_BASE_URL: &str = "https://covid-stats-api.example.org/v1";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "COVID_STATS_BASE_URL";

/// Fetches snapshot/summary/history documents over HTTP.
///
/// No retry or backoff lives here; a transient failure surfaces as a
/// [`ProviderError::Request`] for the caller to handle.
pub struct CovidRestProvider {
    client: Client,
    base_url: String,
}

impl CovidRestProvider {
    /// Creates a provider against the default API endpoint.
    pub fn new() -> Result<Self, ProviderInitError> {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Creates a provider reading the base URL from [`BASE_URL_ENV`].
    pub fn from_env() -> Result<Self, ProviderInitError> {
        Self::with_base_url(get_env_var(BASE_URL_ENV)?)
    }

    /// Creates a provider against an explicit base URL.
    pub fn with_base_url(base_url: String) -> Result<Self, ProviderInitError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ProviderError> {
        let url = format!("{}/{path}", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown API error".to_string());
            return Err(ProviderError::Api(message));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl StatsProvider for CovidRestProvider {
    async fn fetch_snapshot(&self) -> Result<Value, ProviderError> {
        let tree: Value = self.get_json("all_records").await?;
        if !tree.is_object() {
            return Err(ProviderError::Decode(
                "snapshot root is not a mapping".into(),
            ));
        }
        Ok(tree)
    }

    async fn fetch_summary(&self) -> Result<Summary, ProviderError> {
        self.get_json("stats").await
    }

    async fn fetch_history(&self, entity: &str) -> Result<Value, ProviderError> {
        let tree: Value = self.get_json(&format!("history/{entity}")).await?;
        if tree.get(entity).is_none() {
            return Err(ProviderError::Decode(format!(
                "history response carries no record for `{entity}`"
            )));
        }
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let provider =
            CovidRestProvider::with_base_url("http://localhost:9999/v1/".into()).unwrap();
        assert_eq!(provider.base_url, "http://localhost:9999/v1");
    }

    #[test]
    fn from_env_requires_the_variable() {
        // The variable is intentionally unset in the test environment.
        if std::env::var(BASE_URL_ENV).is_ok() {
            return;
        }
        assert!(matches!(
            CovidRestProvider::from_env(),
            Err(ProviderInitError::Config(_))
        ));
    }
}
