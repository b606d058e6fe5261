//! reqwest implementation of BookRepository

use async_trait::async_trait;
use reqwest::{Client, Method, header};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::domain::{BookRepository, RequestError};
use crate::models::{Book, BookId, CreateBookFragment};

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// HTTP-based implementation of BookRepository
pub struct HttpBookRepository {
    client: Client,
    config: Config,
}

impl HttpBookRepository {
    pub fn new(config: Config) -> reqwest::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Shared request primitive: send, reject non-2xx, decode JSON.
    ///
    /// Every failure is logged here and then flattened into `RequestError`.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        data: Option<serde_json::Value>,
    ) -> Result<T, RequestError> {
        let url = self.config.endpoint(path);
        tracing::debug!(%method, %url, has_body = data.is_some(), "Sending request");

        let mut req = self.client.request(method.clone(), &url);
        if let Some(data) = data {
            let body = serde_json::to_vec(&data).map_err(|e| {
                tracing::warn!(%method, %url, "Failed to encode request body: {}", e);
                RequestError
            })?;
            req = req.header(header::CONTENT_TYPE, JSON_CONTENT_TYPE).body(body);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::warn!(%method, %url, "Request failed: {}", e);
            RequestError
        })?;

        if !resp.status().is_success() {
            tracing::warn!(%method, %url, status = %resp.status(), "API returned non-success status");
            return Err(RequestError);
        }

        let body = resp.bytes().await.map_err(|e| {
            tracing::warn!(%method, %url, "Failed to read response body: {}", e);
            RequestError
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(%method, %url, "Failed to parse JSON: {}", e);
            RequestError
        })
    }
}

#[async_trait]
impl BookRepository for HttpBookRepository {
    async fn list(&self) -> Result<Vec<Book>, RequestError> {
        self.request(Method::GET, "/books", None).await
    }

    async fn create_or_update(&self, fragment: CreateBookFragment) -> Result<Book, RequestError> {
        let data = serde_json::to_value(&fragment).map_err(|e| {
            tracing::warn!("Failed to serialize book fragment: {}", e);
            RequestError
        })?;
        self.request(Method::POST, "/books", Some(data)).await
    }

    async fn delete(&self, id: BookId) -> Result<serde_json::Value, RequestError> {
        self.request(Method::DELETE, &format!("/books/{}", id), None)
            .await
    }
}
