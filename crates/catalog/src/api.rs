//! REST client for the character catalog HTTP endpoints.
//!
//! Wraps page listing, name search, and batch lookup using [`reqwest`].

use std::time::Duration;

use mortydex_core::types::LikedIds;
use reqwest::StatusCode;

use crate::messages::{self, CharacterPage, RawCharacter};

/// Public instance of the catalog.
pub const DEFAULT_API_URL: &str = "https://rickandmortyapi.com/api";

/// HTTP client for one catalog base URL.
#[derive(Debug, Clone)]
pub struct CatalogApi {
    client: reqwest::Client,
    api_url: String,
}

/// Errors from the catalog REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum CatalogApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog returned a non-2xx status code.
    #[error("Catalog API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body did not have the expected shape.
    #[error("Unexpected catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CatalogApi {
    /// Create a client for the catalog at `api_url`, e.g.
    /// `https://rickandmortyapi.com/api`. A trailing slash is ignored.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CatalogApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_url))
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Fetch one page of the full character listing.
    ///
    /// Sends `GET /character?page={page}`. Pages are numbered from 1.
    pub async fn fetch_page(&self, page: u32) -> Result<CharacterPage, CatalogApiError> {
        let response = self
            .client
            .get(format!("{}/character", self.api_url))
            .query(&[("page", page)])
            .send()
            .await?;

        let text = Self::success_text(response).await?;
        let page_body = messages::parse_page(&text)?;
        tracing::debug!(
            page,
            count = page_body.results.len(),
            has_next = page_body.has_next(),
            "Fetched catalog page"
        );
        Ok(page_body)
    }

    /// Search characters whose name contains `name`.
    ///
    /// Sends `GET /character/?name={name}`. The catalog answers 404 when
    /// nothing matches; that is returned as an empty page.
    pub async fn search_by_name(&self, name: &str) -> Result<CharacterPage, CatalogApiError> {
        let response = self
            .client
            .get(format!("{}/character/", self.api_url))
            .query(&[("name", name)])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(query = name, "Catalog search found nothing");
            return Ok(CharacterPage::default());
        }

        let text = Self::success_text(response).await?;
        let page = messages::parse_page(&text)?;
        tracing::debug!(query = name, count = page.results.len(), "Catalog search returned");
        Ok(page)
    }

    /// Fetch every character in `ids` in one round trip.
    ///
    /// Sends `GET /character/{id1,id2,...}`. An empty set returns an empty
    /// list without touching the network.
    pub async fn fetch_by_ids(&self, ids: &LikedIds) -> Result<Vec<RawCharacter>, CatalogApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let response = self
            .client
            .get(format!("{}/character/{}", self.api_url, joined))
            .send()
            .await?;

        let text = Self::success_text(response).await?;
        let records = messages::parse_batch(&text)?;
        tracing::debug!(requested = ids.len(), returned = records.len(), "Fetched characters by id");
        Ok(records)
    }

    // ---- private helpers ----

    /// Return the body of a successful response, or an
    /// [`CatalogApiError::ApiError`] with the status and body on failure.
    async fn success_text(response: reqwest::Response) -> Result<String, CatalogApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CatalogApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.text().await?)
    }
}
