//! Admin GraphQL transport.
//!
//! Posts `{ query, variables }` to the shop's GraphQL endpoint using
//! [`reqwest`] and unwraps the `{ data, errors }` envelope.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::CatalogConfig;

/// Header carrying the Admin API access token.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Errors from the GraphQL transport layer.
#[derive(Debug, thiserror::Error)]
pub enum GraphqlError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Admin API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response carried GraphQL `errors`.
    #[error("GraphQL errors: {0}")]
    Errors(String),

    /// The response had neither `data` nor `errors`.
    #[error("GraphQL response has no data")]
    MissingData,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: String,
}

/// HTTP client for the Admin GraphQL API.
pub struct AdminGraphqlClient {
    client: reqwest::Client,
    config: CatalogConfig,
}

impl AdminGraphqlClient {
    /// Build a client with the configured request timeout.
    pub fn new(config: CatalogConfig) -> Result<Self, GraphqlError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Run a GraphQL query against `shop` and decode its `data`.
    pub async fn query<T: DeserializeOwned>(
        &self,
        shop: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, GraphqlError> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let response = self
            .client
            .post(self.config.endpoint(shop))
            .header(ACCESS_TOKEN_HEADER, &self.config.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraphqlError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope<T> = response.json().await?;
        if !envelope.errors.is_empty() {
            let messages: Vec<_> = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(GraphqlError::Errors(messages.join("; ")));
        }
        envelope.data.ok_or(GraphqlError::MissingData)
    }
}
