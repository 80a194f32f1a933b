//! Blob storage client for payment-proof uploads.
//!
//! Talks to a Vercel-Blob-compatible store: objects are `PUT` under a
//! caller-chosen name and the store answers with the public URL they are
//! served from.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::BlobConfig;

/// Blob store API version.
const API_VERSION: &str = "7";

/// Errors that can occur when storing blobs.
#[derive(Debug, Error)]
pub enum BlobError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Response from the blob store for a completed upload.
#[derive(Debug, Deserialize)]
struct PutBlobResponse {
    url: String,
}

/// Blob store API client.
#[derive(Clone)]
pub struct BlobClient {
    client: reqwest::Client,
    endpoint: String,
}

impl BlobClient {
    /// Create a new blob store client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &BlobConfig) -> Result<Self, BlobError> {
        let mut headers = HeaderMap::new();

        // Authorization header
        let auth_value = format!("Bearer {}", config.read_write_token.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| BlobError::Parse(format!("Invalid token format: {e}")))?,
        );

        // API version header
        headers.insert("x-api-version", HeaderValue::from_static(API_VERSION));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.as_str().trim_end_matches('/').to_owned(),
        })
    }

    /// Store an object and return the public URL it is served from.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the store rejects the upload.
    #[instrument(skip(self, data), fields(name = %name, size = data.len()))]
    pub async fn put(
        &self,
        name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, BlobError> {
        let url = format!("{}/{name}", self.endpoint);

        let response = self
            .client
            .put(&url)
            .header("x-content-type", content_type)
            .body(data)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BlobError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let put_response: PutBlobResponse = response
            .json()
            .await
            .map_err(|e| BlobError::Parse(e.to_string()))?;

        debug!("Blob stored");

        Ok(put_response.url)
    }
}
