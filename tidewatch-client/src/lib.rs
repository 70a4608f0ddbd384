//! Tidewatch HTTP Client
//!
//! A small, type-safe HTTP client for the Tidewatch job tracking API.
//!
//! The CLI drives the server exclusively through this crate.
//!
//! # Example
//!
//! ```no_run
//! use tidewatch_client::TidewatchClient;
//! use tidewatch_core::dto::pipeline::CreatePipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = TidewatchClient::new("http://localhost:8000");
//!
//!     let pipeline = client.create_pipeline(CreatePipeline {
//!         name: "Bay Area Forecast Pipeline".to_string(),
//!         description: None,
//!         status: Default::default(),
//!         metadata: Default::default(),
//!     }).await?;
//!
//!     println!("Created pipeline: {}", pipeline.id);
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;
mod pipelines;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Tidewatch API
///
/// Methods are grouped by resource:
/// - Jobs (list with filters, get, create, retry, delete)
/// - Pipelines (list, get, create)
#[derive(Debug, Clone)]
pub struct TidewatchClient {
    /// Base URL of the server (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl TidewatchClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the server (e.g., "http://localhost:8000")
    ///
    /// # Example
    /// ```
    /// use tidewatch_client::TidewatchClient;
    ///
    /// let client = TidewatchClient::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check that the server is up
    pub async fn health(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize a JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            return Err(Self::error_from(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Check the status code of a response whose body is ignored
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        Ok(())
    }

    async fn error_from(response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        tracing::debug!("API error (status {}): {}", status, text);

        ClientError::api_error(status, error_message(&text))
    }
}

/// Pull the `error` field out of a JSON error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = TidewatchClient::new("http://localhost:8000");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = TidewatchClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_with_custom_client() {
        let client = TidewatchClient::with_client("http://localhost:8000", Client::new());
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_error_message_extracts_error_field() {
        assert_eq!(
            error_message(r#"{"error":"Job job_1 not found"}"#),
            "Job job_1 not found"
        );
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message(r#"{"detail":"x"}"#), r#"{"detail":"x"}"#);
    }
}
